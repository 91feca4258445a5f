//! Render adapter: labelled counts in, inline SVG bar chart out.
//!
//! The output is an HTML fragment (`<figure>` wrapping an `<svg>`) that can be
//! embedded directly in a page. No JavaScript, no external assets.

pub mod palette;
pub mod svg;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use palette::{ColorMapping, Rgb};
pub use svg::render_bar_chart;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart area {width}x{height} is too small to draw a plot")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("failed to write chart markup: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Order in which bars are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarOrder {
    /// Keep the order the data arrives in (key order for aggregates).
    Key,
    /// Largest count first; the chart is cut to `ChartLayout::max_bars`.
    CountDescending,
}

/// Fixed display specification of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub colors: ColorMapping,
    /// Print the count above each bar.
    pub bar_labels: bool,
    pub order: BarOrder,
}

/// Canvas size and bar limit, shared by every chart of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub max_bars: usize,
}

impl Default for ChartLayout {
    fn default() -> Self {
        ChartLayout {
            width: 900,
            height: 420,
            max_bars: 30,
        }
    }
}

/// One bar: display label and count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarDatum {
    pub label: String,
    pub value: u64,
    /// Fixed palette slot for qualitative colouring. Bars without one are
    /// coloured by position.
    pub slot: Option<usize>,
}

impl BarDatum {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        BarDatum {
            label: label.into(),
            value,
            slot: None,
        }
    }

    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }
}

/// An embeddable chart fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArtifact(String);

impl ChartArtifact {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
