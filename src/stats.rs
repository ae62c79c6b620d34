//! Run diagnostics.
//!
//! [`GroupingStats`] is filled in by the scanner and the grouper and can be
//! logged or exported as JSON once a run has finished.

use crate::validation::RejectReason;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupingStats {
    /// Lines pulled from the reader, valid or not.
    pub lines_read: u64,
    pub blank_lines: u64,
    pub malformed_lines: u64,
    pub no_content_lines: u64,
    /// Valid lines whose canonical form was already retained.
    pub duplicate_lines: u64,
    pub retained_lines: u64,
    /// Distinct non-empty field values seen in retained lines.
    pub distinct_values: u64,
    /// Values occurring more than once.
    pub grouping_values: u64,
    /// Distinct `(value, column)` pairs seen in the grouping pass.
    pub join_keys: u64,
    pub groups: u64,
    pub largest_group: u64,
    /// Lines that ended up in some emitted group.
    pub grouped_lines: u64,
    #[serde(serialize_with = "as_secs_f64")]
    pub elapsed: Duration,
}

fn as_secs_f64<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

impl GroupingStats {
    pub(crate) fn record_rejection(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::Blank => self.blank_lines += 1,
            RejectReason::MalformedQuotes => self.malformed_lines += 1,
            RejectReason::NoContent => self.no_content_lines += 1,
        }
    }

    /// Total lines excluded by classification.
    pub fn rejected_lines(&self) -> u64 {
        self.blank_lines + self.malformed_lines + self.no_content_lines
    }

    /// Export as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize grouping stats")
    }

    /// Write the JSON export to `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))
    }

    /// Emit a single summary event.
    pub fn log_summary(&self) {
        tracing::info!(
            lines_read = self.lines_read,
            rejected = self.rejected_lines(),
            duplicates = self.duplicate_lines,
            retained = self.retained_lines,
            grouping_values = self.grouping_values,
            groups = self.groups,
            largest_group = self.largest_group,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "grouping finished"
        );
    }
}
