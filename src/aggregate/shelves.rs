//! Bookshelf label distribution.

use super::Aggregate;
use crate::core::Table;

/// Trim and ASCII case-fold a shelf label.
pub fn normalize_shelf(label: &str) -> String {
    label.trim().to_ascii_lowercase()
}

/// Split a comma-separated shelf field into normalized labels.
///
/// Labels that are empty after trimming (`"read,"`) are dropped.
pub fn split_shelves(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(normalize_shelf)
        .filter(|label| !label.is_empty())
}

/// Count rows per shelf label. A row filed on N shelves counts once in each.
pub fn shelf_distribution(table: &Table) -> Aggregate<String> {
    table
        .rows()
        .iter()
        .filter_map(|row| row.exclusive_shelf.as_deref())
        .flat_map(split_shelves)
        .collect()
}
