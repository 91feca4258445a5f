pub mod aggregate;
pub mod chart;
pub mod config;
pub mod core;
pub mod render_cmd;
pub mod report;
pub mod serve_cmd;

use thiserror::Error;

pub use chart::RenderError;
pub use report::{ReportBundle, ReportData, ReportKind, generate_report};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("could not parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
