//! Aggregators that reduce a reading-log table to labelled counts.
//!
//! Each aggregator is a pure function of a [`Table`](crate::core::Table) and can
//! run in any order relative to the others:
//! - `reading_trends`: books read per calendar month
//! - `author_popularity`: authors on the "read" shelf
//! - `rating_distribution`: ratings 1 to 5, unrated excluded
//! - `shelf_distribution`: shelf labels, fanned out over comma-separated lists

pub mod authors;
pub mod ratings;
pub mod shelves;
pub mod trends;

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::Serialize;

pub use authors::{author_popularity, is_read_shelf};
pub use ratings::{RATING_RANGE, rating_distribution};
pub use shelves::{normalize_shelf, shelf_distribution, split_shelves};
pub use trends::reading_trends;

/// Count of rows per key. Keys are unique and iterate in key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Aggregate<K: Ord> {
    counts: BTreeMap<K, u64>,
}

impl<K: Ord> Default for Aggregate<K> {
    fn default() -> Self {
        Aggregate {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord> Aggregate<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Count for `key`, 0 when absent.
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all bucket counts. May exceed the row count for fan-out aggregates.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    /// Buckets ordered by count descending, ties broken by key.
    pub fn by_count_desc(&self) -> Vec<(&K, u64)> {
        let mut entries: Vec<(&K, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl<K: Ord> FromIterator<K> for Aggregate<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut agg = Aggregate::new();
        for key in iter {
            agg.increment(key);
        }
        agg
    }
}
