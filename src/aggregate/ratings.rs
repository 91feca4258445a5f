//! Distribution of star ratings.

use std::ops::RangeInclusive;

use super::Aggregate;
use crate::core::Table;

/// Ratings that form a bucket. 0 means unrated.
pub const RATING_RANGE: RangeInclusive<u8> = 1..=5;

/// Count rows per rating, skipping unrated and out-of-range values.
pub fn rating_distribution(table: &Table) -> Aggregate<u8> {
    table
        .rows()
        .iter()
        .map(|row| row.my_rating)
        .filter(|rating| RATING_RANGE.contains(rating))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Row;

    fn rated(my_rating: u8) -> Row {
        Row {
            my_rating,
            ..Row::default()
        }
    }

    #[test]
    fn test_unrated_never_appears() {
        let table: Table = [0, 0, 3, 0, 5, 3].into_iter().map(rated).collect();
        let ratings = rating_distribution(&table);
        assert_eq!(ratings.get(&0u8), 0);
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings.get(&3u8), 2);
        assert_eq!(ratings.get(&5u8), 1);
    }

    #[test]
    fn test_keys_stay_within_range() {
        let table: Table = (0..=u8::MAX).map(rated).collect();
        let ratings = rating_distribution(&table);
        let keys: Vec<u8> = ratings.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);
        assert!(ratings.iter().all(|(_, count)| count == 1));
    }

    #[test]
    fn test_all_unrated_is_empty() {
        let table: Table = [0, 0].into_iter().map(rated).collect();
        assert!(rating_distribution(&table).is_empty());
    }
}
