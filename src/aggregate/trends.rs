//! Books read per calendar month.

use super::Aggregate;
use crate::core::{Table, YearMonth};

/// Count rows per (year, month) of `date_read`.
///
/// Rows without a parseable read date are skipped. Iteration order of the
/// result is chronological.
pub fn reading_trends(table: &Table) -> Aggregate<YearMonth> {
    table
        .rows()
        .iter()
        .filter_map(|row| row.date_read)
        .map(YearMonth::from_date)
        .collect()
}
