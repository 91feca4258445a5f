//! Report pipeline: parse, aggregate, render.
//!
//! This module provides:
//! - `ReportKind`: the four fixed chart identifiers and their display specs
//! - `assemble`: runs every aggregator over a parsed table
//! - `render_bundle`: turns the aggregates into embeddable chart fragments
//! - HTML rendering for the upload form and the results page

pub mod assemble;
pub mod bundle;
pub mod html;
pub mod kind;

use tracing::info;

use crate::ReportResult;
use crate::chart::ChartLayout;
use crate::core::Table;

// Re-export key types
pub use assemble::{ReportData, assemble};
pub use bundle::{ReportBundle, render_bundle, render_bundle_with, render_chart};
pub use html::{html_escape, render_results_page, render_upload_page, write_results_html};
pub use kind::ReportKind;

/// Run the whole pipeline over uploaded CSV bytes.
///
/// Fails only when the bytes cannot be parsed into a table. Charts that fail
/// to render are recorded in the bundle rather than failing the report.
pub fn generate_report(csv: &[u8], layout: &ChartLayout) -> ReportResult<ReportBundle> {
    let table = Table::from_csv_bytes(csv)?;
    let data = assemble(&table);
    let bundle = render_bundle(&data, layout);
    info!(
        rows = table.len(),
        charts = bundle.charts().count(),
        failed = bundle.failures().count(),
        "report generated"
    );
    Ok(bundle)
}
