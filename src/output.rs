//! Ranking and the result text format.
//!
//! ```text
//! <group count>
//!
//! Группа 1
//! <member line>
//! <member line>
//!
//! Группа 2
//! ...
//! ```

use crate::grouper::Group;
use std::io::{self, Write};

/// Header prefix of each group block.
pub const GROUP_HEADER: &str = "Группа";

/// Order groups by descending size.
///
/// The sort is stable, so groups of equal size keep the order they were
/// built in (by first member).
pub fn rank_groups(groups: &mut [Group]) {
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
}

/// Serialize `groups` in report format. Returns the number of groups written.
pub fn write_report<W: Write>(groups: &[Group], mut sink: W) -> io::Result<usize> {
    writeln!(sink, "{}", groups.len())?;
    writeln!(sink)?;
    for (i, group) in groups.iter().enumerate() {
        writeln!(sink, "{GROUP_HEADER} {}", i + 1)?;
        for line in group.members() {
            sink.write_all(line.as_bytes())?;
            sink.write_all(b"\n")?;
        }
        writeln!(sink)?;
    }
    sink.flush()?;
    Ok(groups.len())
}

/// Recover the member lines of each group from report text.
///
/// Counts, headers and blank lines are skipped. A header is only recognized
/// as the first line of a block, so members that happen to start with the
/// header word stay members.
pub fn parse_report(text: &str) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut in_group = false;
    let mut block_start = false;
    for line in text.lines().skip(1) {
        if line.is_empty() {
            in_group = false;
            block_start = true;
            continue;
        }
        if block_start && is_group_header(line) {
            groups.push(Vec::new());
            in_group = true;
        } else if in_group && let Some(current) = groups.last_mut() {
            current.push(line.to_string());
        }
        block_start = false;
    }
    groups
}

/// `Группа <n>` with a decimal `n`.
fn is_group_header(line: &str) -> bool {
    line.strip_prefix(GROUP_HEADER)
        .and_then(|rest| rest.strip_prefix(' '))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}
