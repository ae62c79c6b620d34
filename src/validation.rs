//! Line classification and normalization.
//!
//! Every raw line is either turned into its canonical form or rejected with a
//! [`RejectReason`]. Rejection is a normal outcome, not an error: rejected
//! lines are counted and otherwise ignored.
//!
//! # Example
//!
//! ```
//! use line_grouper::validation::{LineValidator, LineVerdict, RejectReason};
//!
//! let v = LineValidator::new(';');
//! assert_eq!(v.classify(" \"111\";\"222\" "), LineVerdict::Valid("111;222".into()));
//! assert_eq!(v.classify("\"8383\"200000741652251\""), LineVerdict::Rejected(RejectReason::MalformedQuotes));
//! assert_eq!(v.classify(" ; \"\" ;"), LineVerdict::Rejected(RejectReason::NoContent));
//! ```

use crate::fields::{is_separator_space, trim_spaces};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

const QUOTE: char = '"';

/// Two quoted numbers glued together, e.g. `"7985"8310"`.
static MALFORMED_QUOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[0-9]+"[0-9]+""#).expect("valid malformed-quote regex"));

/// Why a line was excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Nothing but whitespace.
    Blank,
    /// Adjacent quoted numeric tokens with no separator between them.
    MalformedQuotes,
    /// Only delimiters, quotes and whitespace.
    NoContent,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Blank => "blank line",
            Self::MalformedQuotes => "malformed quoted numbers",
            Self::NoContent => "no field content",
        };
        f.write_str(s)
    }
}

/// Outcome of [`LineValidator::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineVerdict {
    /// Canonical line form, ready for dedup and parsing.
    Valid(String),
    Rejected(RejectReason),
}

/// Classifies raw lines for a given delimiter.
#[derive(Debug, Clone, Copy)]
pub struct LineValidator {
    delimiter: char,
}

impl LineValidator {
    #[must_use]
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Decide whether `raw` is usable and, if so, return its canonical form.
    pub fn classify(&self, raw: &str) -> LineVerdict {
        let trimmed = trim_spaces(raw);
        if trimmed.is_empty() {
            return LineVerdict::Rejected(RejectReason::Blank);
        }
        let quoted = trimmed.contains(QUOTE);
        if quoted && MALFORMED_QUOTES.is_match(trimmed) {
            return LineVerdict::Rejected(RejectReason::MalformedQuotes);
        }
        if !self.has_content(trimmed) {
            return LineVerdict::Rejected(RejectReason::NoContent);
        }
        if quoted {
            LineVerdict::Valid(normalize(trimmed))
        } else {
            LineVerdict::Valid(trimmed.to_string())
        }
    }

    fn has_content(&self, line: &str) -> bool {
        line.chars()
            .any(|c| c != self.delimiter && c != QUOTE && !is_separator_space(c))
    }
}

/// Remove every quote character and trim surrounding whitespace.
pub fn normalize(line: &str) -> String {
    trim_spaces(&line.replace(QUOTE, "")).to_string()
}
