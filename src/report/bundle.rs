//! Rendered charts of one report.

use std::collections::BTreeMap;

use tracing::warn;

use super::{ReportData, ReportKind};
use crate::chart::{ChartArtifact, ChartLayout, RenderError, render_bar_chart};

/// Charts keyed by report kind, plus the reason for any chart that failed.
///
/// Iteration follows [`ReportKind`] declaration order.
#[derive(Debug, Clone, Default)]
pub struct ReportBundle {
    charts: BTreeMap<ReportKind, ChartArtifact>,
    failures: BTreeMap<ReportKind, String>,
}

impl ReportBundle {
    pub fn chart(&self, kind: ReportKind) -> Option<&ChartArtifact> {
        self.charts.get(&kind)
    }

    pub fn failure(&self, kind: ReportKind) -> Option<&str> {
        self.failures.get(&kind).map(String::as_str)
    }

    pub fn charts(&self) -> impl Iterator<Item = (ReportKind, &ChartArtifact)> {
        self.charts.iter().map(|(k, v)| (*k, v))
    }

    pub fn failures(&self) -> impl Iterator<Item = (ReportKind, &str)> {
        self.failures.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.charts.len() == ReportKind::ALL.len()
    }
}

/// Render one report through its fixed chart specification.
pub fn render_chart(
    kind: ReportKind,
    data: &ReportData,
    layout: &ChartLayout,
) -> Result<ChartArtifact, RenderError> {
    render_bar_chart(kind.as_str(), &kind.chart_spec(), layout, data.series(kind))
}

/// Render every report. A chart that fails is left out and its error recorded;
/// the remaining charts are still rendered.
pub fn render_bundle(data: &ReportData, layout: &ChartLayout) -> ReportBundle {
    render_bundle_with(|kind| render_chart(kind, data, layout))
}

/// Collect a bundle from an arbitrary per-kind renderer.
pub fn render_bundle_with<F>(mut render: F) -> ReportBundle
where
    F: FnMut(ReportKind) -> Result<ChartArtifact, RenderError>,
{
    let mut bundle = ReportBundle::default();
    for kind in ReportKind::ALL {
        match render(kind) {
            Ok(chart) => {
                bundle.charts.insert(kind, chart);
            }
            Err(e) => {
                warn!(report = %kind, error = %e, "chart omitted");
                bundle.failures.insert(kind, e.to_string());
            }
        }
    }
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bundle_renders_every_kind() {
        let bundle = render_bundle(&ReportData::default(), &ChartLayout::default());
        assert!(bundle.is_complete());
        let kinds: Vec<ReportKind> = bundle.charts().map(|(k, _)| k).collect();
        assert_eq!(kinds, ReportKind::ALL.to_vec());
        for kind in ReportKind::ALL {
            let chart = bundle.chart(kind).unwrap();
            assert!(chart.as_str().contains(&format!(r#"id="{}""#, kind.as_str())));
        }
    }

    #[test]
    fn test_render_failure_is_recorded_not_fatal() {
        let layout = ChartLayout {
            width: 10,
            height: 10,
            max_bars: 5,
        };
        let bundle = render_bundle(&ReportData::default(), &layout);
        assert!(!bundle.is_complete());
        assert_eq!(bundle.charts().count(), 0);
        assert_eq!(bundle.failures().count(), 4);
        assert!(bundle.failure(ReportKind::RatingsAnalysis).unwrap().contains("too small"));
    }

    #[test]
    fn test_one_failed_chart_keeps_the_others() {
        let data = ReportData::default();
        let layout = ChartLayout::default();
        let bundle = render_bundle_with(|kind| match kind {
            ReportKind::AuthorPopularity => Err(RenderError::Format(std::fmt::Error)),
            other => render_chart(other, &data, &layout),
        });
        let kinds: Vec<ReportKind> = bundle.charts().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                ReportKind::ReadingTrends,
                ReportKind::RatingsAnalysis,
                ReportKind::BookshelfAnalysis
            ]
        );
        assert!(bundle.chart(ReportKind::AuthorPopularity).is_none());
        assert!(bundle.failure(ReportKind::AuthorPopularity).is_some());
    }
}
