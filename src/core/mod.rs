//! Core types for reading-log reports.
//!
//! This module contains the typed `Row` model, the `Table` parse step, and the
//! `YearMonth` key used for time-series buckets.

pub mod month;
pub mod row;

// Re-export key types for convenience
pub use month::YearMonth;
pub use row::{REQUIRED_COLUMNS, Row, Table};
