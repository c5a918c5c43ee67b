//! Append-only SVG markup buffer.

use std::borrow::Cow;

use super::glyph::Glyph;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const STYLE: &str = ".svg_txt{font-size:20px;}.glyph{stroke:#000000;stroke-width:1;}";
const MAJOR_LINE_STYLE: &str = "stroke:black;stroke-width:2";
const LABEL_CELL_STYLE: &str = "fill:rgb(255,255,255);stroke:black;stroke-width:1;";

/// A self-contained SVG document under construction.
///
/// The root element and embedded stylesheet are written on creation.
/// Elements can only be appended; [`finish`](Self::finish) closes the root
/// and hands back the markup.
///
/// # Example
///
/// ```
/// use stitch_pattern::SvgDocument;
///
/// let mut doc = SvgDocument::new(20, 10);
/// doc.push_rect(0, 0, 10, 10, "fill:rgb(1,2,3);stroke:none;");
///
/// let svg = doc.finish();
/// assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"20\" height=\"10\""));
/// assert!(svg.ends_with("</svg>\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    markup: String,
    width: u32,
    height: u32,
}

impl SvgDocument {
    /// Start a document with the given canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        let mut markup = String::with_capacity(1024);
        markup.push_str(&format!(
            "<svg xmlns=\"{SVG_NS}\" width=\"{width}\" height=\"{height}\" style=\"fill:none;\">\n"
        ));
        markup.push_str(&format!("<style>{STYLE}</style>\n"));
        Self {
            markup,
            width,
            height,
        }
    }

    /// Canvas width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Markup appended so far, without the closing tag.
    pub fn as_str(&self) -> &str {
        &self.markup
    }

    /// Append a rectangle with an inline style.
    pub fn push_rect(&mut self, x: u32, y: u32, width: u32, height: u32, style: &str) {
        self.markup.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" style=\"{style}\"/>\n"
        ));
    }

    /// Append a white, outlined rectangle used behind key labels.
    pub fn push_label_cell(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.push_rect(x, y, width, height, LABEL_CELL_STYLE);
    }

    /// Append a symbol drawn in the 20x20 glyph box, scaled and moved to `(x, y)`.
    pub fn push_glyph(&mut self, glyph: Glyph, x: u32, y: u32, scale: f64) {
        let fill = if glyph.filled() { " fill=\"black\"" } else { "" };
        self.markup.push_str(&format!(
            "<path class=\"glyph\" d=\"{}\"{fill} transform=\"translate({x} {y}) scale({scale})\"/>\n",
            glyph.path_data()
        ));
    }

    /// Append a major gridline.
    pub fn push_line(&mut self, x1: u32, y1: u32, x2: u32, y2: u32) {
        self.markup.push_str(&format!(
            "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" style=\"{MAJOR_LINE_STYLE}\"/>\n"
        ));
    }

    /// Append an unfilled black path with a 2px stroke.
    pub fn push_marker(&mut self, d: &str, tx: f64, ty: f64) {
        self.markup.push_str(&format!(
            "<path d=\"{d}\" stroke=\"black\" stroke-width=\"2\" fill=\"none\" transform=\"translate({tx} {ty})\"/>\n"
        ));
    }

    /// Append a text label. `text` is escaped.
    pub fn push_text(&mut self, x: f64, y: f64, text: &str) {
        self.markup.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" class=\"svg_txt\" fill=\"black\">{}</text>\n",
            escape_xml(text)
        ));
    }

    /// Close the root element and return the markup.
    pub fn finish(mut self) -> String {
        self.markup.push_str("</svg>\n");
        self.markup
    }
}

/// Escape the five XML special characters.
///
/// Borrows the input when nothing needs escaping.
///
/// ```
/// use stitch_pattern::render::escape_xml;
///
/// assert_eq!(escape_xml("Shell Pink"), "Shell Pink");
/// assert_eq!(escape_xml("Black & \"Tan\""), "Black &amp; &quot;Tan&quot;");
/// ```
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_and_style() {
        let svg = SvgDocument::new(50, 40).finish();
        let mut lines = svg.lines();
        assert_eq!(
            lines.next(),
            Some("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"50\" height=\"40\" style=\"fill:none;\">")
        );
        assert_eq!(
            lines.next(),
            Some("<style>.svg_txt{font-size:20px;}.glyph{stroke:#000000;stroke-width:1;}</style>")
        );
        assert_eq!(lines.next(), Some("</svg>"));
    }

    #[test]
    fn test_glyph_markup() {
        let mut doc = SvgDocument::new(10, 10);
        doc.push_glyph(Glyph::Backslash, 10, 20, 0.5);
        doc.push_glyph(Glyph::Block, 0, 0, 2.0);
        let svg = doc.finish();
        assert!(svg.contains(
            "<path class=\"glyph\" d=\"M4 4L16 16\" transform=\"translate(10 20) scale(0.5)\"/>"
        ));
        assert!(svg.contains(
            "d=\"M4 4L4 16 16 16 16 4Z\" fill=\"black\" transform=\"translate(0 0) scale(2)\""
        ));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = SvgDocument::new(10, 10);
        doc.push_text(60.0, 20.0, "<Ecru>");
        assert!(doc.as_str().contains(">&lt;Ecru&gt;</text>"));
    }

    #[test]
    fn test_escape_borrows_plain_text() {
        assert!(matches!(escape_xml("Salmon"), Cow::Borrowed(_)));
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }
}
