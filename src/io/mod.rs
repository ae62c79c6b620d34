//! Input and output collaborators of the grouping engine.

pub mod compression;
pub mod lines;
pub mod sink;

pub use lines::{open_lines, LineReader};
pub use sink::write_report_file;
