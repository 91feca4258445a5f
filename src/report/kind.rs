//! The fixed set of charts a report contains.

use serde::Serialize;

use crate::chart::palette::{DEFAULT_BAR, SET1, TEMPS};
use crate::chart::{BarOrder, ChartSpec, ColorMapping};

/// Report identifiers, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    ReadingTrends,
    AuthorPopularity,
    RatingsAnalysis,
    BookshelfAnalysis,
}

impl ReportKind {
    /// All kinds in display order.
    pub const ALL: [ReportKind; 4] = [
        ReportKind::ReadingTrends,
        ReportKind::AuthorPopularity,
        ReportKind::RatingsAnalysis,
        ReportKind::BookshelfAnalysis,
    ];

    /// Stable identifier, also used as the chart's element id.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::ReadingTrends => "reading_trends",
            ReportKind::AuthorPopularity => "author_popularity",
            ReportKind::RatingsAnalysis => "ratings_analysis",
            ReportKind::BookshelfAnalysis => "bookshelf_analysis",
        }
    }

    /// Section heading on the results page.
    pub fn heading(&self) -> &'static str {
        match self {
            ReportKind::ReadingTrends => "Reading Trends",
            ReportKind::AuthorPopularity => "Author Popularity",
            ReportKind::RatingsAnalysis => "Ratings Analysis",
            ReportKind::BookshelfAnalysis => "Bookshelf Analysis",
        }
    }

    pub fn chart_spec(&self) -> ChartSpec {
        match self {
            ReportKind::ReadingTrends => ChartSpec {
                title: "Number of Books Read by Month",
                x_label: "Month",
                y_label: "Number of Books",
                colors: ColorMapping::Continuous(TEMPS),
                bar_labels: true,
                order: BarOrder::Key,
            },
            ReportKind::AuthorPopularity => ChartSpec {
                title: "Most Common Authors on the \"Read\" Shelf",
                x_label: "Author",
                y_label: "Number of Books",
                colors: ColorMapping::Continuous(TEMPS),
                bar_labels: false,
                order: BarOrder::CountDescending,
            },
            ReportKind::RatingsAnalysis => ChartSpec {
                title: "Distribution of Book Ratings",
                x_label: "Rating",
                y_label: "Number of Books",
                colors: ColorMapping::Qualitative(SET1),
                bar_labels: false,
                order: BarOrder::Key,
            },
            ReportKind::BookshelfAnalysis => ChartSpec {
                title: "Bookshelf Analysis",
                x_label: "Bookshelf",
                y_label: "Number of Books",
                colors: ColorMapping::Single(DEFAULT_BAR),
                bar_labels: false,
                order: BarOrder::CountDescending,
            },
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
