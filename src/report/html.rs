//! Page rendering for the upload form and the results report.
//!
//! Both pages are single self-contained HTML documents with embedded CSS and
//! no JavaScript. Charts arrive as pre-rendered SVG fragments; every other
//! user-controlled string is HTML-escaped here.

use std::path::Path;

use super::{ReportBundle, ReportKind};

/// Escape `&`, `<`, `>`, `"` and `'` so `s` is safe in text and quoted attributes.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    let mut plain = 0;
    for (i, c) in s.char_indices() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            '\'' => "&#x27;",
            _ => continue,
        };
        out.push_str(&s[plain..i]);
        out.push_str(entity);
        plain = i + c.len_utf8();
    }
    out.push_str(&s[plain..]);
    out
}

const STYLE: &str = r#"<style>
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
  font-family: system-ui, -apple-system, sans-serif;
  background: #1a1a2e;
  color: #e8e8e8;
  padding: 24px;
}
h1 { font-size: 1.5rem; margin-bottom: 16px; }
h2 { font-size: 1.125rem; margin: 24px 0 12px 0; color: #9a9a9a; }
p { margin-bottom: 12px; }
form {
  background: #16213e;
  border-radius: 8px;
  padding: 16px;
  display: flex;
  gap: 16px;
  align-items: center;
  flex-wrap: wrap;
}
input[type="file"] { color: #e8e8e8; font-size: 0.875rem; }
button {
  background: #4ecdc4;
  border: none;
  color: #1a1a2e;
  padding: 6px 14px;
  border-radius: 4px;
  font-size: 0.875rem;
  cursor: pointer;
}
.hint { color: #9a9a9a; font-size: 0.875rem; }
.error {
  color: #ff6b6b;
  border: 1px solid #ff6b6b;
  border-radius: 4px;
  padding: 10px 12px;
  margin-bottom: 16px;
}
.chart { margin: 0; overflow-x: auto; }
.chart svg { display: block; max-width: 100%; height: auto; }
.chart-missing { color: #9a9a9a; font-style: italic; }
a { color: #4ecdc4; text-decoration: none; }
a:hover { text-decoration: underline; }
</style>"#;

fn page_head(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{}</title>
{STYLE}
</head>
<body>
"#,
        html_escape(title)
    )
}

/// Render the upload form, optionally with an error message above it.
pub fn render_upload_page(error: Option<&str>) -> String {
    let mut html = page_head("Reading Log Report");
    html.push_str("<h1>Reading Log Report</h1>\n");
    if let Some(message) = error {
        html.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            html_escape(message)
        ));
    }
    html.push_str(
        r#"<p class="hint">Upload a CSV export of your reading log. The columns <code>Date Read</code>, <code>Author</code>, <code>Exclusive Shelf</code> and <code>My Rating</code> are required.</p>
<form method="post" action="/" enctype="multipart/form-data">
<input type="file" name="file" accept=".csv,text/csv">
<button type="submit">Upload</button>
</form>
</body>
</html>
"#,
    );
    html
}

/// Render the results page with one section per report kind, in fixed order.
///
/// A kind without a chart gets a short notice instead of the figure.
pub fn render_results_page(bundle: &ReportBundle) -> String {
    let mut html = page_head("Reading Log Report");
    html.push_str("<h1>Reading Log Report</h1>\n");
    for kind in ReportKind::ALL {
        html.push_str(&format!(
            "<section class=\"report\" id=\"section-{}\">\n<h2>{}</h2>\n",
            kind.as_str(),
            html_escape(kind.heading())
        ));
        match (bundle.chart(kind), bundle.failure(kind)) {
            (Some(chart), _) => html.push_str(chart.as_str()),
            (None, Some(reason)) => html.push_str(&format!(
                "<p class=\"chart-missing\">Chart unavailable: {}</p>\n",
                html_escape(reason)
            )),
            (None, None) => html.push_str("<p class=\"chart-missing\">Chart unavailable.</p>\n"),
        }
        html.push_str("</section>\n");
    }
    html.push_str("<p><a href=\"/\">Upload another file</a></p>\n</body>\n</html>\n");
    html
}

/// Write the results page as a standalone HTML file.
pub fn write_results_html(path: &Path, bundle: &ReportBundle) -> anyhow::Result<()> {
    let html = render_results_page(bundle);
    std::fs::write(path, html)?;
    Ok(())
}
