//! Minimal SVG element writer.
//!
//! Every string that reaches the document goes through [`escape_into`], so
//! callers pass raw text.

use std::fmt::Write as _;

use crate::escape::escape_into;
use crate::format::coord;

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Text attributes.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub size: f64,
    pub fill: &'a str,
    pub bold: bool,
    pub mono: bool,
    pub anchor: Anchor,
}

impl<'a> TextStyle<'a> {
    pub fn new(size: f64, fill: &'a str) -> Self {
        Self {
            size,
            fill,
            bold: false,
            mono: false,
            anchor: Anchor::Start,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn mono(mut self) -> Self {
        self.mono = true;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

const SANS: &str = "Inter, Helvetica, Arial, sans-serif";
const MONO: &str = "JetBrains Mono, Menlo, Consolas, monospace";

/// Accumulates one SVG document.
#[derive(Debug)]
pub struct SvgWriter {
    out: String,
}

impl SvgWriter {
    /// Open a document of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        let mut out = String::with_capacity(8 * 1024);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let (w, h) = (coord(width), coord(height));
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
        );
        Self { out }
    }

    /// `<title>` element.
    pub fn title(&mut self, text: &str) {
        self.out.push_str("<title>");
        escape_into(&mut self.out, text);
        self.out.push_str("</title>\n");
    }

    /// `<desc>` element.
    pub fn desc(&mut self, text: &str) {
        self.out.push_str("<desc>");
        escape_into(&mut self.out, text);
        self.out.push_str("</desc>\n");
    }

    /// `<metadata>` element carrying a JSON payload.
    pub fn metadata(&mut self, json: &serde_json::Value) {
        self.out.push_str("<metadata>");
        escape_into(&mut self.out, &json.to_string());
        self.out.push_str("</metadata>\n");
    }

    /// Diagonal two-stop gradient usable as `url(#id)`.
    pub fn linear_gradient(&mut self, id: &str, from: &str, to: &str) {
        self.out.push_str("<defs><linearGradient id=\"");
        escape_into(&mut self.out, id);
        self.out
            .push_str("\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\"><stop offset=\"0\" stop-color=\"");
        escape_into(&mut self.out, from);
        self.out.push_str("\"/><stop offset=\"1\" stop-color=\"");
        escape_into(&mut self.out, to);
        self.out.push_str("\"/></linearGradient></defs>\n");
    }

    /// Filled rectangle with rounded corners.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64, fill: &str) {
        let _ = write!(
            self.out,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"",
            coord(x),
            coord(y),
            coord(width.max(0.0)),
            coord(height.max(0.0)),
            coord(radius),
        );
        escape_into(&mut self.out, fill);
        self.out.push_str("\"/>\n");
    }

    /// Rounded rectangle with a fill and a one-pixel border.
    pub fn panel(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str, stroke: &str) {
        let _ = write!(
            self.out,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"12.0\" fill=\"",
            coord(x),
            coord(y),
            coord(width.max(0.0)),
            coord(height.max(0.0)),
        );
        escape_into(&mut self.out, fill);
        self.out.push_str("\" stroke=\"");
        escape_into(&mut self.out, stroke);
        self.out.push_str("\" stroke-width=\"1\"/>\n");
    }

    /// Straight line.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        let _ = write!(
            self.out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"",
            coord(x1),
            coord(y1),
            coord(x2),
            coord(y2),
        );
        escape_into(&mut self.out, stroke);
        self.out.push_str("\" stroke-width=\"1\"/>\n");
    }

    /// Text with the baseline at `y`.
    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle<'_>) {
        let _ = write!(
            self.out,
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" text-anchor=\"{}\" fill=\"",
            coord(x),
            coord(y),
            if style.mono { MONO } else { SANS },
            coord(style.size),
            style.anchor.as_str(),
        );
        escape_into(&mut self.out, style.fill);
        self.out.push('"');
        if style.bold {
            self.out.push_str(" font-weight=\"bold\"");
        }
        self.out.push('>');
        escape_into(&mut self.out, content);
        self.out.push_str("</text>\n");
    }

    /// Embedded image, usually a `data:` URI.
    pub fn image(&mut self, x: f64, y: f64, width: f64, height: f64, href: &str) {
        let _ = write!(
            self.out,
            "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid meet\" href=\"",
            coord(x),
            coord(y),
            coord(width),
            coord(height),
        );
        escape_into(&mut self.out, href);
        self.out.push_str("\"/>\n");
    }

    /// Upper semicircle gauge centred at `(cx, cy)`, filled to `fraction`.
    ///
    /// Draws the full track first, then the filled part on top.
    pub fn gauge(&mut self, cx: f64, cy: f64, radius: f64, fraction: f64, track: &str, fill: &str) {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.arc(cx, cy, radius, 1.0, track);
        if fraction > 0.0 {
            self.arc(cx, cy, radius, fraction, fill);
        }
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, fraction: f64, stroke: &str) {
        // Sweep from the left end (angle pi) clockwise towards the right end (angle 0).
        let angle = std::f64::consts::PI * (1.0 - fraction);
        let (start_x, start_y) = (cx - radius, cy);
        let end_x = cx + radius * angle.cos();
        let end_y = cy - radius * angle.sin();
        let _ = write!(
            self.out,
            "<path d=\"M {} {} A {} {} 0 0 1 {} {}\" fill=\"none\" stroke-width=\"10\" stroke-linecap=\"round\" stroke=\"",
            coord(start_x),
            coord(start_y),
            coord(radius),
            coord(radius),
            coord(end_x),
            coord(end_y),
        );
        escape_into(&mut self.out, stroke);
        self.out.push_str("\"/>\n");
    }

    /// Close the document.
    pub fn finish(mut self) -> String {
        self.out.push_str("</svg>\n");
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_structure() {
        let svg = SvgWriter::new(800.0, 600.0).finish();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("width=\"800.0\" height=\"600.0\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut w = SvgWriter::new(100.0, 100.0);
        w.text(1.0, 2.0, "<script>&", &TextStyle::new(12.0, "#000").bold());
        let svg = w.finish();
        assert!(svg.contains("&lt;script&gt;&amp;</text>"));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(!svg.contains("<script>"));
    }

    #[test]
    fn test_metadata_is_escaped() {
        let mut w = SvgWriter::new(10.0, 10.0);
        w.metadata(&serde_json::json!({ "circuit": "a<b" }));
        let svg = w.finish();
        assert!(svg.contains("&quot;circuit&quot;:&quot;a&lt;b&quot;"));
    }

    #[test]
    fn test_gauge_full_ends_on_the_right() {
        let mut w = SvgWriter::new(10.0, 10.0);
        w.gauge(50.0, 50.0, 40.0, 1.0, "#111", "#f00");
        let svg = w.finish();
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("M 10.0 50.0 A 40.0 40.0 0 0 1 90.0 50.0"));
    }

    #[test]
    fn test_gauge_empty_draws_only_track() {
        let mut w = SvgWriter::new(10.0, 10.0);
        w.gauge(50.0, 50.0, 40.0, f64::NAN, "#111", "#f00");
        assert_eq!(w.finish().matches("<path").count(), 1);
    }
}
