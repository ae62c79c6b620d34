//! Run configuration for the grouping engine.

use anyhow::{bail, Result};

/// Field delimiter used when no other is configured.
pub const DEFAULT_DELIMITER: char = ';';

/// Output path used by the binary when none is given.
pub const DEFAULT_OUTPUT_PATH: &str = "result.txt";

/// Settings that must be fixed before a file is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrouperConfig {
    /// Single character separating fields within a line.
    pub delimiter: char,
}

impl Default for GrouperConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl GrouperConfig {
    /// Create a configuration with the default `;` delimiter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style delimiter override.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the delimiter from a string, using its first character.
    ///
    /// # Errors
    /// Returns an error if `delimiter` is empty.
    pub fn set_delimiter(&mut self, delimiter: &str) -> Result<()> {
        let Some(c) = delimiter.chars().next() else {
            bail!("delimiter must not be empty");
        };
        self.delimiter = c;
        Ok(())
    }
}
