//! Second pass: connect lines that share a value in the same column.
//!
//! Each retained line is an element of a [`UnionFind`] keyed by its index.
//! For every `(value, column)` join key, all lines carrying it are unioned with
//! the first line that carried it. Components with at least two members
//! become [`Group`]s.

use crate::fields::non_empty_fields;
use crate::union_find::UnionFind;
use std::collections::{HashMap, HashSet};

/// A connected set of at least two lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    first_index: usize,
    members: Vec<String>,
}

impl Group {
    /// Members in retained-line order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn into_members(self) -> Vec<String> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Retained-line index of the earliest member.
    pub fn first_index(&self) -> usize {
        self.first_index
    }
}

/// Groups plus bookkeeping from the grouping pass.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    /// Groups ordered by their first member; not yet ranked.
    pub groups: Vec<Group>,
    /// Distinct `(value, column)` pairs encountered.
    pub join_keys: usize,
}

/// Partition `lines` into groups.
///
/// `grouping_values` gates which field values may form join keys; a value
/// outside the set can never be shared, so it is skipped without hashing the
/// pair.
pub fn build_groups(
    lines: Vec<String>,
    grouping_values: &HashSet<String>,
    delimiter: char,
) -> Grouping {
    if grouping_values.is_empty() || lines.len() < 2 {
        return Grouping::default();
    }

    let mut uf = UnionFind::new(lines.len());
    let join_keys = {
        let mut first_seen: HashMap<(&str, usize), usize> =
            HashMap::with_capacity(grouping_values.len() * 2);
        for (idx, line) in lines.iter().enumerate() {
            for field in non_empty_fields(line, delimiter) {
                if !grouping_values.contains(field.value) {
                    continue;
                }
                match first_seen.get(&(field.value, field.column)) {
                    Some(&first) => {
                        uf.union(first, idx);
                    }
                    None => {
                        first_seen.insert((field.value, field.column), idx);
                    }
                }
            }
        }
        first_seen.len()
    };

    let groups = collect_components(lines, &mut uf);
    tracing::debug!(join_keys, groups = groups.len(), "grouping pass complete");
    Grouping { groups, join_keys }
}

/// Bucket every line by its root, keeping buckets of size two or more.
fn collect_components(lines: Vec<String>, uf: &mut UnionFind) -> Vec<Group> {
    let mut bucket_of_root: HashMap<usize, usize> = HashMap::new();
    let mut buckets: Vec<Vec<usize>> = Vec::new();
    for idx in 0..lines.len() {
        let root = uf.find(idx);
        let slot = *bucket_of_root.entry(root).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push(idx);
    }

    let mut lines: Vec<Option<String>> = lines.into_iter().map(Some).collect();
    buckets
        .into_iter()
        .filter(|b| b.len() > 1)
        .map(|b| Group {
            first_index: b[0],
            members: b.iter().filter_map(|&i| lines[i].take()).collect(),
        })
        .collect()
}
