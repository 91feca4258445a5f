//! Report assembler: runs every aggregator over one table.

use serde::Serialize;
use tracing::debug;

use super::ReportKind;
use crate::aggregate::{
    Aggregate, author_popularity, rating_distribution, reading_trends, shelf_distribution,
};
use crate::chart::BarDatum;
use crate::core::{Table, YearMonth};

/// The four aggregates of one upload, each under its fixed report name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportData {
    pub reading_trends: Aggregate<YearMonth>,
    pub author_popularity: Aggregate<String>,
    pub ratings_analysis: Aggregate<u8>,
    pub bookshelf_analysis: Aggregate<String>,
}

impl ReportData {
    /// Bars for one report in key order. Count ordering is left to the chart spec.
    /// Rating bars are pinned to a palette slot so each rating keeps its colour.
    pub fn series(&self, kind: ReportKind) -> Vec<BarDatum> {
        fn bars<K: Ord + ToString>(agg: &Aggregate<K>) -> Vec<BarDatum> {
            agg.iter()
                .map(|(k, v)| BarDatum::new(k.to_string(), v))
                .collect()
        }
        match kind {
            ReportKind::ReadingTrends => bars(&self.reading_trends),
            ReportKind::AuthorPopularity => bars(&self.author_popularity),
            ReportKind::RatingsAnalysis => self
                .ratings_analysis
                .iter()
                .map(|(rating, v)| {
                    BarDatum::new(rating.to_string(), v).with_slot(usize::from(rating.saturating_sub(1)))
                })
                .collect(),
            ReportKind::BookshelfAnalysis => bars(&self.bookshelf_analysis),
        }
    }

    /// Number of buckets in one report.
    pub fn bucket_count(&self, kind: ReportKind) -> usize {
        match kind {
            ReportKind::ReadingTrends => self.reading_trends.len(),
            ReportKind::AuthorPopularity => self.author_popularity.len(),
            ReportKind::RatingsAnalysis => self.ratings_analysis.len(),
            ReportKind::BookshelfAnalysis => self.bookshelf_analysis.len(),
        }
    }
}

/// Run all four aggregators. Empty aggregates are valid results.
pub fn assemble(table: &Table) -> ReportData {
    let data = ReportData {
        reading_trends: reading_trends(table),
        author_popularity: author_popularity(table),
        ratings_analysis: rating_distribution(table),
        bookshelf_analysis: shelf_distribution(table),
    };
    debug!(
        rows = table.len(),
        months = data.reading_trends.len(),
        authors = data.author_popularity.len(),
        ratings = data.ratings_analysis.len(),
        shelves = data.bookshelf_analysis.len(),
        "assembled report data"
    );
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Row;
    use time::macros::date;

    #[test]
    fn test_empty_table_yields_empty_aggregates() {
        let data = assemble(&Table::default());
        assert_eq!(data, ReportData::default());
        for kind in ReportKind::ALL {
            assert!(data.series(kind).is_empty());
        }
    }

    #[test]
    fn test_series_labels() {
        let table = Table::new(vec![Row {
            date_read: Some(date!(2023 - 04 - 09)),
            author: Some("A".to_string()),
            exclusive_shelf: Some("read".to_string()),
            my_rating: 4,
        }]);
        let data = assemble(&table);
        assert_eq!(
            data.series(ReportKind::ReadingTrends),
            vec![BarDatum::new("2023-04", 1)]
        );
        assert_eq!(
            data.series(ReportKind::RatingsAnalysis),
            vec![BarDatum::new("4", 1).with_slot(3)]
        );
        assert_eq!(data.bucket_count(ReportKind::AuthorPopularity), 1);
        assert_eq!(data.bucket_count(ReportKind::BookshelfAnalysis), 1);
    }

    #[test]
    fn test_rating_slots_ignore_missing_ratings() {
        let rated = |my_rating| Row {
            my_rating,
            ..Row::default()
        };
        let data = assemble(&Table::new(vec![rated(3), rated(5), rated(5)]));
        let slots: Vec<Option<usize>> = data
            .series(ReportKind::RatingsAnalysis)
            .iter()
            .map(|bar| bar.slot)
            .collect();
        assert_eq!(slots, vec![Some(2), Some(4)]);
    }

    #[test]
    fn test_serializes_under_report_names() {
        let table = Table::new(vec![Row {
            exclusive_shelf: Some("Read, Favorites".to_string()),
            my_rating: 5,
            ..Row::default()
        }]);
        let json = serde_json::to_value(assemble(&table)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "reading_trends": {},
                "author_popularity": {},
                "ratings_analysis": {"5": 1},
                "bookshelf_analysis": {"favorites": 1, "read": 1},
            })
        );
    }
}
