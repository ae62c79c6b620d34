//! # Line Grouper
//!
//! Partitions the lines of a large delimited text file into groups of lines
//! that share a non-empty field value **in the same column**, transitively.
//! Lines connected to nothing are dropped; groups are reported largest first.
//!
//! ## Pipeline
//!
//! 1. [`io::open_lines`] opens the input, decompressing gzip transparently.
//! 2. [`scan`] validates and normalizes each line ([`validation`]), drops
//!    exact duplicates and counts field values. Values seen more than once
//!    become grouping values.
//! 3. [`grouper`] re-splits every retained line ([`fields`]) and unions lines
//!    sharing a `(value, column)` pair in a [`union_find::UnionFind`].
//! 4. [`output`] ranks groups by size and writes the report, which
//!    [`io::write_report_file`] places atomically at the destination.
//!
//! ## Quick Start
//!
//! ```no_run
//! use line_grouper::LineGrouper;
//! # fn main() -> anyhow::Result<()> {
//! let mut grouper = LineGrouper::new();
//! grouper.set_delimiter(",")?;
//! let groups = grouper.process_file("lng.csv.gz", "result.txt")?;
//! println!("{groups} groups");
//! # Ok(())
//! # }
//! ```
//!
//! ## Report format
//!
//! The first line is the number of groups, then a blank line, then one block
//! per group: a `Группа <n>` header, the member lines verbatim and a blank line.

pub mod config;
pub mod fields;
pub mod grouper;
pub mod io;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod stats;
pub mod union_find;
pub mod validation;

pub use config::GrouperConfig;
pub use grouper::Group;
pub use pipeline::{GroupingReport, LineGrouper};
pub use stats::GroupingStats;
pub use union_find::UnionFind;
