//! First pass: validation, deduplication and value frequencies.
//!
//! The scanner consumes raw lines one at a time. Each distinct canonical line
//! is retained once, in first-seen order, and its non-empty field values are
//! tallied. After the pass, values with a count above one become the grouping
//! values for the second pass.
//!
//! Every occurrence is counted, so a value repeated inside one line qualifies
//! on its own even though the grouping pass keys on `(value, column)`.

use crate::fields::non_empty_fields;
use crate::stats::GroupingStats;
use crate::validation::{LineValidator, LineVerdict};
use anyhow::{Context, Result};
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};
use std::io;

/// Initial container sizes for the first pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanCapacity {
    pub lines: usize,
    pub values: usize,
}

impl Default for ScanCapacity {
    fn default() -> Self {
        Self {
            lines: 1_000_000,
            values: 200_000,
        }
    }
}

impl ScanCapacity {
    /// No preallocation; handy for small in-memory inputs.
    pub const NONE: Self = Self {
        lines: 0,
        values: 0,
    };
}

/// Result of the first pass.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Retained canonical lines; a line's index is its identity from here on.
    pub lines: Vec<String>,
    /// Values seen more than once anywhere in the retained lines.
    pub grouping_values: HashSet<String>,
    pub stats: GroupingStats,
}

/// Streaming state of the first pass.
#[derive(Debug)]
pub struct FrequencyScanner {
    validator: LineValidator,
    // Retained lines in first-seen order; the position is the line's id.
    lines: IndexSet<String>,
    frequencies: HashMap<String, u32>,
    stats: GroupingStats,
}

impl FrequencyScanner {
    pub fn new(delimiter: char) -> Self {
        Self::with_capacity(delimiter, ScanCapacity::default())
    }

    pub fn with_capacity(delimiter: char, capacity: ScanCapacity) -> Self {
        Self {
            validator: LineValidator::new(delimiter),
            lines: IndexSet::with_capacity(capacity.lines),
            frequencies: HashMap::with_capacity(capacity.values),
            stats: GroupingStats::default(),
        }
    }

    /// Feed one raw line.
    pub fn push(&mut self, raw: &str) {
        self.stats.lines_read += 1;
        let line = match self.validator.classify(raw) {
            LineVerdict::Valid(line) => line,
            LineVerdict::Rejected(reason) => {
                self.stats.record_rejection(reason);
                return;
            }
        };
        if self.lines.contains(&line) {
            self.stats.duplicate_lines += 1;
            return;
        }
        for field in non_empty_fields(&line, self.validator.delimiter()) {
            match self.frequencies.get_mut(field.value) {
                Some(count) => *count = count.saturating_add(1),
                None => {
                    self.frequencies.insert(field.value.to_owned(), 1);
                }
            }
        }
        self.lines.insert(line);
    }

    /// Close the pass and extract the grouping values.
    pub fn finish(self) -> ScanOutput {
        let Self {
            lines,
            frequencies,
            mut stats,
            ..
        } = self;
        let lines: Vec<String> = lines.into_iter().collect();
        stats.retained_lines = lines.len() as u64;
        stats.distinct_values = frequencies.len() as u64;
        let grouping_values: HashSet<String> = frequencies
            .into_iter()
            .filter_map(|(value, count)| (count > 1).then_some(value))
            .collect();
        stats.grouping_values = grouping_values.len() as u64;
        tracing::debug!(
            retained = stats.retained_lines,
            distinct_values = stats.distinct_values,
            grouping_values = stats.grouping_values,
            "frequency scan complete"
        );
        ScanOutput {
            lines,
            grouping_values,
            stats,
        }
    }
}

/// Run the first pass over a line source.
///
/// # Errors
/// Fails on the first read error, annotated with its 1-based line number.
pub fn scan_lines<I>(lines: I, delimiter: char, capacity: ScanCapacity) -> Result<ScanOutput>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut scanner = FrequencyScanner::with_capacity(delimiter, capacity);
    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.with_context(|| format!("read line {}", idx + 1))?;
        scanner.push(&line);
    }
    Ok(scanner.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> ScanOutput {
        let mut s = FrequencyScanner::with_capacity(';', ScanCapacity::NONE);
        for line in text.lines() {
            s.push(line);
        }
        s.finish()
    }

    #[test]
    fn dedups_in_first_seen_order() {
        let out = scan("b;1\na;2\nb;1\n\"b\";\"1\"\n");
        assert_eq!(out.lines, vec!["b;1", "a;2"]);
        assert_eq!(out.stats.duplicate_lines, 2);
        assert!(out.grouping_values.is_empty());
    }

    #[test]
    fn line_id_is_first_seen_position() {
        let mut s = FrequencyScanner::with_capacity(';', ScanCapacity::NONE);
        for line in ["a;1", "b;2", "a;1", "c;3", "b;2"] {
            s.push(line);
        }
        assert_eq!(s.lines.len(), 3);
        assert_eq!(s.lines.get_index_of("c;3"), Some(2));
        assert_eq!(s.finish().lines, vec!["a;1", "b;2", "c;3"]);
    }

    #[test]
    fn values_repeated_anywhere_qualify() {
        let out = scan("100;200;300\n200;300;100\n400;;\n");
        let mut values: Vec<_> = out.grouping_values.iter().cloned().collect();
        values.sort();
        assert_eq!(values, vec!["100", "200", "300"]);
        assert_eq!(out.stats.distinct_values, 4);
    }

    #[test]
    fn repeat_within_one_line_counts() {
        let out = scan("x;x\n");
        assert!(out.grouping_values.contains("x"));
    }

    #[test]
    fn rejected_lines_are_not_tallied() {
        let out = scan("1;2\n\"8383\"1\";2\n;;\n\n");
        assert_eq!(out.lines, vec!["1;2"]);
        assert!(out.grouping_values.is_empty());
        assert_eq!(out.stats.lines_read, 4);
        assert_eq!(out.stats.rejected_lines(), 3);
    }

    #[test]
    fn read_errors_carry_line_number() {
        let src = vec![
            Ok("a;b".to_string()),
            Err(io::Error::other("boom")),
        ];
        let err = scan_lines(src, ';', ScanCapacity::NONE).unwrap_err();
        assert!(format!("{err:#}").contains("read line 2"));
    }

    #[test]
    fn empty_input() -> Result<()> {
        let out = scan_lines(Vec::new(), ';', ScanCapacity::NONE)?;
        assert!(out.lines.is_empty());
        assert!(out.grouping_values.is_empty());
        Ok(())
    }
}
