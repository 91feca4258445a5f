//! Calendar-month bucket key.

use std::fmt;

use serde::{Serialize, Serializer};
use time::Date;

/// A (year, month) pair. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Build a key, returning `None` when `month` is outside 1..=12.
    pub fn new(year: i32, month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(YearMonth { year, month })
    }

    /// Truncate a date to its month bucket.
    pub fn from_date(date: Date) -> Self {
        YearMonth {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_from_date_truncates_day() {
        let a = YearMonth::from_date(date!(2023 - 01 - 05));
        let b = YearMonth::from_date(date!(2023 - 01 - 20));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "2023-01");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let dec = YearMonth::new(2022, 12).unwrap();
        let jan = YearMonth::new(2023, 1).unwrap();
        let feb = YearMonth::new(2023, 2).unwrap();
        let mut keys = vec![feb, dec, jan];
        keys.sort();
        assert_eq!(keys, vec![dec, jan, feb]);
    }

    #[test]
    fn test_rejects_out_of_range_month() {
        assert!(YearMonth::new(2023, 0).is_none());
        assert!(YearMonth::new(2023, 13).is_none());
    }

    #[test]
    fn test_serializes_as_string() {
        let key = YearMonth::new(987, 3).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"0987-03\"");
    }
}
