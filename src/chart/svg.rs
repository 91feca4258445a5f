//! SVG bar-chart writer.

use std::fmt::Write;

use super::{BarDatum, BarOrder, ChartArtifact, ChartLayout, ChartSpec, RenderError};
use crate::report::html::html_escape;

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 104.0;
const MIN_PLOT_SIDE: f64 = 40.0;
const MAX_LABEL_CHARS: usize = 22;
const FONT: &str = "system-ui, -apple-system, sans-serif";

/// Render `data` as a bar chart wrapped in `<figure id="{id}">`.
///
/// Bars are drawn in the order given unless `spec.order` asks for count order,
/// in which case only the first `layout.max_bars` bars are kept. An empty
/// series renders the frame with a "No data" notice.
pub fn render_bar_chart(
    id: &str,
    spec: &ChartSpec,
    layout: &ChartLayout,
    mut data: Vec<BarDatum>,
) -> Result<ChartArtifact, RenderError> {
    let width = f64::from(layout.width);
    let height = f64::from(layout.height);
    let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
    if plot_w < MIN_PLOT_SIDE || plot_h < MIN_PLOT_SIDE {
        return Err(RenderError::InvalidDimensions {
            width: layout.width,
            height: layout.height,
        });
    }

    let total_bars = data.len();
    let mut subtitle = None;
    if spec.order == BarOrder::CountDescending {
        data.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
        let limit = layout.max_bars.max(1);
        if data.len() > limit {
            data.truncate(limit);
            subtitle = Some(format!("Top {limit} of {total_bars}"));
        }
    }

    let id = html_escape(id);
    let mut out = String::new();
    writeln!(out, r#"<figure class="chart" id="{id}">"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-labelledby="{id}-title">"#,
        w = layout.width,
        h = layout.height,
    )?;
    writeln!(out, r#"<title id="{id}-title">{}</title>"#, html_escape(spec.title))?;
    writeln!(out, r##"<rect width="{width}" height="{height}" rx="8" fill="#16213e"/>"##)?;
    writeln!(
        out,
        r##"<text x="{MARGIN_LEFT}" y="28" font-family="{FONT}" font-size="18" font-weight="600" fill="#e8e8e8">{}</text>"##,
        html_escape(spec.title)
    )?;
    if let Some(sub) = &subtitle {
        writeln!(
            out,
            r##"<text x="{MARGIN_LEFT}" y="46" font-family="{FONT}" font-size="12" fill="#9a9a9a">{}</text>"##,
            html_escape(sub)
        )?;
    }

    let plot = Plot {
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        width: plot_w,
        height: plot_h,
    };
    let max_value = data.iter().map(|d| d.value).max().unwrap_or(0);
    let (step, y_max) = y_axis_scale(max_value);

    write_y_axis(&mut out, &plot, step, y_max)?;
    write_axis_titles(&mut out, spec, &plot)?;

    if data.is_empty() {
        writeln!(
            out,
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="{FONT}" font-size="14" fill="#9a9a9a">No data</text>"##,
            plot.left + plot.width / 2.0,
            plot.top + plot.height / 2.0
        )?;
    } else {
        write_bars(&mut out, spec, &plot, &data, y_max)?;
    }

    writeln!(out, "</svg>")?;
    writeln!(out, "</figure>")?;
    Ok(ChartArtifact(out))
}

struct Plot {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Plot {
    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn y_for(&self, value: u64, y_max: u64) -> f64 {
        self.bottom() - value as f64 / y_max as f64 * self.height
    }
}

/// Tick step and axis maximum for counts up to `max_value`.
///
/// Steps are 1, 2 or 5 times a power of ten, giving at most five intervals.
fn y_axis_scale(max_value: u64) -> (u64, u64) {
    let max_value = max_value.max(1);
    let rough = max_value.div_ceil(5);
    let mut magnitude = 1u64;
    while magnitude.saturating_mul(10) <= rough {
        magnitude *= 10;
    }
    let step = [1u64, 2, 5, 10]
        .iter()
        .map(|m| m.saturating_mul(magnitude))
        .find(|s| *s >= rough)
        .unwrap_or(rough);
    (step, max_value.div_ceil(step) * step)
}

fn write_y_axis(out: &mut String, plot: &Plot, step: u64, y_max: u64) -> Result<(), RenderError> {
    let mut tick = 0;
    while tick <= y_max {
        let y = plot.y_for(tick, y_max);
        writeln!(
            out,
            r##"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#2d3a5c" stroke-width="1"/>"##,
            plot.left,
            plot.left + plot.width
        )?;
        writeln!(
            out,
            r##"<text x="{:.1}" y="{:.1}" text-anchor="end" font-family="{FONT}" font-size="11" fill="#9a9a9a">{tick}</text>"##,
            plot.left - 8.0,
            y + 4.0
        )?;
        tick += step;
    }
    Ok(())
}

fn write_axis_titles(out: &mut String, spec: &ChartSpec, plot: &Plot) -> Result<(), RenderError> {
    writeln!(
        out,
        r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="{FONT}" font-size="12" fill="#e8e8e8">{}</text>"##,
        plot.left + plot.width / 2.0,
        plot.bottom() + MARGIN_BOTTOM - 12.0,
        html_escape(spec.x_label)
    )?;
    let cy = plot.top + plot.height / 2.0;
    writeln!(
        out,
        r##"<text x="18" y="{cy:.1}" transform="rotate(-90 18 {cy:.1})" text-anchor="middle" font-family="{FONT}" font-size="12" fill="#e8e8e8">{}</text>"##,
        html_escape(spec.y_label)
    )?;
    Ok(())
}

fn write_bars(
    out: &mut String,
    spec: &ChartSpec,
    plot: &Plot,
    data: &[BarDatum],
    y_max: u64,
) -> Result<(), RenderError> {
    let min_value = data.iter().map(|d| d.value).min().unwrap_or(0);
    let max_value = data.iter().map(|d| d.value).max().unwrap_or(0);
    let slot = plot.width / data.len() as f64;
    let bar_w = slot * 0.8;
    let rotate = data.len() > 8 || data.iter().any(|d| d.label.chars().count() > 10);

    for (i, datum) in data.iter().enumerate() {
        let x = plot.left + slot * i as f64 + (slot - bar_w) / 2.0;
        let y = plot.y_for(datum.value, y_max);
        let h = plot.bottom() - y;
        let color = spec
            .colors
            .color_for(datum.slot.unwrap_or(i), datum.value, min_value, max_value);
        let label = html_escape(&datum.label);
        writeln!(
            out,
            r#"<rect class="bar" x="{x:.1}" y="{y:.1}" width="{bar_w:.1}" height="{h:.1}" fill="{color}"><title>{label}: {}</title></rect>"#,
            datum.value
        )?;

        let cx = x + bar_w / 2.0;
        if spec.bar_labels {
            writeln!(
                out,
                r##"<text x="{cx:.1}" y="{:.1}" text-anchor="middle" font-family="{FONT}" font-size="11" fill="#e8e8e8">{}</text>"##,
                y - 4.0,
                datum.value
            )?;
        }

        let shown = html_escape(&shorten(&datum.label));
        let ly = plot.bottom() + 14.0;
        if rotate {
            writeln!(
                out,
                r##"<text x="{cx:.1}" y="{ly:.1}" transform="rotate(-40 {cx:.1} {ly:.1})" text-anchor="end" font-family="{FONT}" font-size="11" fill="#9a9a9a">{shown}</text>"##
            )?;
        } else {
            writeln!(
                out,
                r##"<text x="{cx:.1}" y="{ly:.1}" text-anchor="middle" font-family="{FONT}" font-size="11" fill="#9a9a9a">{shown}</text>"##
            )?;
        }
    }
    Ok(())
}

fn shorten(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut s: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    s.push('…');
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ColorMapping;
    use crate::chart::palette::{DEFAULT_BAR, SET1};

    fn spec(order: BarOrder) -> ChartSpec {
        ChartSpec {
            title: "Test Chart",
            x_label: "Thing",
            y_label: "Count",
            colors: ColorMapping::Single(DEFAULT_BAR),
            bar_labels: true,
            order,
        }
    }

    #[test]
    fn test_y_axis_scale() {
        assert_eq!(y_axis_scale(0), (1, 1));
        assert_eq!(y_axis_scale(3), (1, 3));
        assert_eq!(y_axis_scale(7), (2, 8));
        assert_eq!(y_axis_scale(23), (5, 25));
        assert_eq!(y_axis_scale(100), (20, 100));
        assert_eq!(y_axis_scale(1234), (500, 1500));
    }

    #[test]
    fn test_renders_one_rect_per_bar() {
        let data = vec![BarDatum::new("a", 1), BarDatum::new("b", 3)];
        let chart = render_bar_chart("c", &spec(BarOrder::Key), &ChartLayout::default(), data).unwrap();
        let html = chart.as_str();
        assert!(html.starts_with(r#"<figure class="chart" id="c">"#));
        assert_eq!(html.matches(r#"class="bar""#).count(), 2);
        assert!(html.contains("<title>a: 1</title>"));
        assert!(html.contains("<title>b: 3</title>"));
        assert!(html.contains("Test Chart"));
        assert!(html.trim_end().ends_with("</figure>"));
    }

    #[test]
    fn test_key_order_is_preserved() {
        let data = vec![BarDatum::new("zeta", 1), BarDatum::new("alpha", 9)];
        let chart = render_bar_chart("c", &spec(BarOrder::Key), &ChartLayout::default(), data).unwrap();
        let html = chart.as_str();
        assert!(html.find("zeta: 1").unwrap() < html.find("alpha: 9").unwrap());
    }

    #[test]
    fn test_count_order_sorts_and_truncates() {
        let data = (1..=5).map(|i| BarDatum::new(format!("k{i}"), i)).collect();
        let layout = ChartLayout {
            max_bars: 3,
            ..ChartLayout::default()
        };
        let chart = render_bar_chart("c", &spec(BarOrder::CountDescending), &layout, data).unwrap();
        let html = chart.as_str();
        assert_eq!(html.matches(r#"class="bar""#).count(), 3);
        assert!(html.contains("Top 3 of 5"));
        assert!(html.find("k5: 5").unwrap() < html.find("k3: 3").unwrap());
        assert!(!html.contains("k1: 1"));
    }

    #[test]
    fn test_empty_series_renders_notice() {
        let chart = render_bar_chart("c", &spec(BarOrder::Key), &ChartLayout::default(), Vec::new()).unwrap();
        assert!(chart.as_str().contains("No data"));
        assert!(!chart.as_str().contains(r#"class="bar""#));
    }

    #[test]
    fn test_too_small_layout_is_an_error() {
        let layout = ChartLayout {
            width: 100,
            height: 100,
            max_bars: 10,
        };
        let err = render_bar_chart("c", &spec(BarOrder::Key), &layout, vec![BarDatum::new("a", 1)]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimensions { width: 100, height: 100 }));
    }

    #[test]
    fn test_labels_are_escaped() {
        let data = vec![BarDatum::new("<script>alert('x')</script>", 1)];
        let chart = render_bar_chart("c", &spec(BarOrder::Key), &ChartLayout::default(), data).unwrap();
        assert!(!chart.as_str().contains("<script>"));
        assert!(chart.as_str().contains("&lt;script&gt;"));
    }

    #[test]
    fn test_qualitative_colors_follow_position() {
        let mut s = spec(BarOrder::Key);
        s.colors = ColorMapping::Qualitative(SET1);
        let data = vec![BarDatum::new("1", 2), BarDatum::new("2", 2)];
        let chart = render_bar_chart("c", &s, &ChartLayout::default(), data).unwrap();
        assert!(chart.as_str().contains(&format!(r#"fill="{}""#, SET1[0])));
        assert!(chart.as_str().contains(&format!(r#"fill="{}""#, SET1[1])));
    }

    #[test]
    fn test_qualitative_colors_follow_slot() {
        let mut s = spec(BarOrder::Key);
        s.colors = ColorMapping::Qualitative(SET1);
        let data = vec![BarDatum::new("3", 1).with_slot(2), BarDatum::new("5", 4).with_slot(4)];
        let chart = render_bar_chart("c", &s, &ChartLayout::default(), data).unwrap();
        let html = chart.as_str();
        assert!(html.contains(&format!(r#"fill="{}"><title>3: 1</title>"#, SET1[2])));
        assert!(html.contains(&format!(r#"fill="{}"><title>5: 4</title>"#, SET1[4])));
        assert!(!html.contains(&format!(r#"fill="{}""#, SET1[0])));
    }

    #[test]
    fn test_long_labels_are_shortened() {
        assert_eq!(shorten("short"), "short");
        let long = "A Very Long Author Name That Goes On";
        let shown = shorten(long);
        assert_eq!(shown.chars().count(), MAX_LABEL_CHARS);
        assert!(shown.ends_with('…'));
    }
}
