//! The end-to-end run: read, scan, group, rank, write.

use crate::config::GrouperConfig;
use crate::grouper::{build_groups, Group};
use crate::io::{open_lines, write_report_file};
use crate::output::{rank_groups, write_report};
use crate::scan::{scan_lines, ScanCapacity};
use crate::stats::GroupingStats;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

/// Ranked groups of one run together with its counters.
#[derive(Debug, Clone, Default)]
pub struct GroupingReport {
    /// Groups by descending size.
    pub groups: Vec<Group>,
    pub stats: GroupingStats,
}

impl GroupingReport {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Serialize the groups in report format.
    pub fn write_to<W: Write>(&self, sink: W) -> io::Result<usize> {
        write_report(&self.groups, sink)
    }
}

/// Groups lines of delimited text by shared column values.
///
/// # Example
///
/// ```
/// use line_grouper::LineGrouper;
///
/// let report = LineGrouper::new().group_str("111;123;222\n200;123;100\n300;;100\n400;500;600\n");
/// assert_eq!(report.group_count(), 1);
/// assert_eq!(report.groups[0].len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineGrouper {
    config: GrouperConfig,
    capacity: Option<ScanCapacity>,
    last_stats: Option<GroupingStats>,
}

impl LineGrouper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: GrouperConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Override the container preallocation used for file runs.
    #[must_use]
    pub fn with_capacity(mut self, capacity: ScanCapacity) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn config(&self) -> &GrouperConfig {
        &self.config
    }

    /// Use the first character of `delimiter` as field separator.
    ///
    /// # Errors
    /// Returns an error if `delimiter` is empty.
    pub fn set_delimiter(&mut self, delimiter: &str) -> Result<()> {
        self.config.set_delimiter(delimiter)
    }

    /// Counters of the most recent [`process_file`](Self::process_file) run.
    pub fn last_stats(&self) -> Option<&GroupingStats> {
        self.last_stats.as_ref()
    }

    /// Group an in-memory sequence of lines.
    ///
    /// # Errors
    /// Propagates the first error produced by `lines`.
    pub fn process_lines<I>(&self, lines: I) -> Result<GroupingReport>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        self.run(lines, self.capacity.unwrap_or(ScanCapacity::NONE))
    }

    /// Group the lines of `text`.
    pub fn group_str(&self, text: &str) -> GroupingReport {
        // Reading from a str cannot fail.
        self.process_lines(text.lines().map(|l| Ok::<_, io::Error>(l.to_string())))
            .unwrap_or_default()
    }

    /// Group the lines of `input` and write the report to `output`.
    ///
    /// Nothing is written unless the whole input was read successfully.
    /// Returns the number of groups written.
    ///
    /// # Errors
    /// Fails if the input cannot be opened or read, or the output cannot be written.
    pub fn process_file(
        &mut self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<usize> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let started = Instant::now();
        tracing::debug!(input = %input.display(), delimiter = %self.config.delimiter, "processing file");

        let lines = open_lines(input)?;
        let mut report = self
            .run(lines, self.capacity.unwrap_or_default())
            .with_context(|| format!("read {}", input.display()))?;
        let written = write_report_file(output, &report.groups)?;

        report.stats.elapsed = started.elapsed();
        report.stats.log_summary();
        self.last_stats = Some(report.stats);
        Ok(written)
    }

    fn run<I>(&self, lines: I, capacity: ScanCapacity) -> Result<GroupingReport>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let started = Instant::now();
        let delimiter = self.config.delimiter;
        let scanned = scan_lines(lines, delimiter, capacity)?;
        let mut stats = scanned.stats;

        let grouping = build_groups(scanned.lines, &scanned.grouping_values, delimiter);
        let mut groups = grouping.groups;
        rank_groups(&mut groups);

        stats.join_keys = grouping.join_keys as u64;
        stats.groups = groups.len() as u64;
        stats.largest_group = groups.first().map_or(0, |g| g.len() as u64);
        stats.grouped_lines = groups.iter().map(|g| g.len() as u64).sum();
        stats.elapsed = started.elapsed();
        Ok(GroupingReport { groups, stats })
    }
}
