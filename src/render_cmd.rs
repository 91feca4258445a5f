//! CLI command handler for `render`.
//!
//! Produces the same report the server returns, from a CSV file on disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::core::Table;
use crate::report::{ReportData, assemble, render_bundle, write_results_html};
use crate::{ReportError, ReportResult};

fn ensure_parent(path: &Path) -> ReportResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ReportError::Message(format!("failed to create directory: {e}")))?;
        }
    }
    Ok(())
}

/// Write the aggregates as pretty-printed JSON.
pub fn write_report_json(path: &Path, data: &ReportData) -> ReportResult<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| ReportError::Message(format!("failed to serialize report data: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Run the `render` command.
///
/// # Arguments
/// * `input` - Reading-log CSV export
/// * `output` - Path of the HTML report to write
/// * `json` - Optional path for a JSON dump of the four aggregates
/// * `config` - Loaded configuration (chart layout)
pub fn run(input: PathBuf, output: PathBuf, json: Option<PathBuf>, config: &AppConfig) -> ReportResult<()> {
    if !input.exists() {
        return Err(ReportError::Message(format!(
            "CSV file not found: {}",
            input.display()
        )));
    }
    let bytes = std::fs::read(&input).with_context(|| format!("failed to read {}", input.display()))?;

    let table = Table::from_csv_bytes(&bytes)?;
    info!(rows = table.len(), input = %input.display(), "read reading log");

    let data = assemble(&table);
    let bundle = render_bundle(&data, &config.charts);
    for (kind, reason) in bundle.failures() {
        warn!(report = %kind, %reason, "chart left out of report");
    }

    ensure_parent(&output)?;
    write_results_html(&output, &bundle)?;
    info!(path = %output.display(), "wrote HTML report");

    if let Some(json_path) = json {
        write_report_json(&json_path, &data)?;
        info!(path = %json_path.display(), "wrote JSON summary");
    }
    Ok(())
}
