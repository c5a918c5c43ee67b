//! Colour key: one row per palette entry.

use super::document::SvgDocument;
use super::mode::RenderMode;
use super::pattern::emit_cell;
use crate::palette::ResolvedPalette;

/// Width of the key in row heights: swatch (1) + name (10) + ID (2).
const KEY_COLUMNS: u32 = 13;
const NAME_COLUMNS: u32 = 10;
const ID_COLUMNS: u32 = 2;

/// Renders the legend mapping each chart swatch to its thread.
///
/// Each row holds a swatch drawn exactly like a chart cell, the thread name
/// and the thread ID. The canvas is `13·s` wide and `s·n` tall for row height
/// `s` and `n` palette entries.
///
/// # Example
///
/// ```
/// use stitch_pattern::{KeyRenderer, ReferenceEntry, RenderMode, ResolvedPalette, Rgb};
///
/// let palette = ResolvedPalette::from_entries(vec![
///     ReferenceEntry::new("310", "Black", Rgb::new(0, 0, 0)),
///     ReferenceEntry::new("B5200", "Snow White", Rgb::new(255, 255, 255)),
/// ]);
///
/// let doc = KeyRenderer::new(40, RenderMode::color_symbols()).render(&palette);
/// assert_eq!((doc.width(), doc.height()), (520, 80));
/// assert!(doc.finish().contains(">Snow White</text>"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRenderer {
    row_height: u32,
    mode: RenderMode,
}

impl KeyRenderer {
    /// Create a renderer. A zero row height is raised to 1.
    pub fn new(row_height: u32, mode: RenderMode) -> Self {
        Self {
            row_height: row_height.max(1),
            mode,
        }
    }

    /// Height of one row.
    #[inline]
    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    /// Render the key.
    pub fn render(&self, palette: &ResolvedPalette) -> SvgDocument {
        let s = self.row_height;
        let mut doc = SvgDocument::new(KEY_COLUMNS * s, s * palette.len() as u32);

        let name_x = s;
        let id_x = (1 + NAME_COLUMNS) * s;
        let half = f64::from(s) / 2.0;

        for (index, entry) in palette.iter().enumerate() {
            let y = index as u32 * s;
            let text_y = f64::from(y) + half;

            emit_cell(&mut doc, 0, y, s, index, palette, &self.mode);

            doc.push_label_cell(name_x, y, NAME_COLUMNS * s, s);
            doc.push_text(f64::from(name_x) + half, text_y, entry.name());

            doc.push_label_cell(id_x, y, ID_COLUMNS * s, s);
            doc.push_text(f64::from(id_x) + half, text_y, entry.id());
        }

        tracing::debug!(rows = palette.len(), "Rendered key");
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::ReferenceEntry;
    use pretty_assertions::assert_eq;

    fn two_threads() -> ResolvedPalette {
        ResolvedPalette::from_entries(vec![
            ReferenceEntry::new("321", "Red", Rgb::new(199, 43, 59)),
            ReferenceEntry::new("3865", "Winter White", Rgb::new(249, 247, 241)),
        ])
    }

    #[test]
    fn test_row_layout() {
        let svg = KeyRenderer::new(40, RenderMode::color_symbols())
            .render(&two_threads())
            .finish();
        let body: Vec<&str> = svg.lines().skip(2).take(5).collect();
        assert_eq!(
            body,
            vec![
                "<rect x=\"0\" y=\"0\" width=\"40\" height=\"40\" style=\"fill:rgb(199,43,59);stroke:rgb(20,20,20);stroke-width:1;\"/>",
                "<path class=\"glyph\" d=\"M4 4L16 16\" transform=\"translate(0 0) scale(2)\"/>",
                "<rect x=\"40\" y=\"0\" width=\"400\" height=\"40\" style=\"fill:rgb(255,255,255);stroke:black;stroke-width:1;\"/>",
                "<text x=\"60\" y=\"20\" class=\"svg_txt\" fill=\"black\">Red</text>",
                "<rect x=\"440\" y=\"0\" width=\"80\" height=\"40\" style=\"fill:rgb(255,255,255);stroke:black;stroke-width:1;\"/>",
            ]
        );
        assert!(svg.contains("<text x=\"460\" y=\"60\" class=\"svg_txt\" fill=\"black\">3865</text>"));
    }

    #[test]
    fn test_canvas_scales_with_row_height() {
        let doc = KeyRenderer::new(25, RenderMode::color()).render(&two_threads());
        assert_eq!((doc.width(), doc.height()), (325, 50));
    }

    #[test]
    fn test_names_escaped() {
        let palette = ResolvedPalette::from_entries(vec![ReferenceEntry::new(
            "X1",
            "Salt & Pepper",
            Rgb::new(1, 1, 1),
        )]);
        let svg = KeyRenderer::new(40, RenderMode::color()).render(&palette).finish();
        assert!(svg.contains(">Salt &amp; Pepper</text>"));
    }

    #[test]
    fn test_empty_palette() {
        let doc = KeyRenderer::new(40, RenderMode::color()).render(&ResolvedPalette::from_entries(Vec::new()));
        assert_eq!(doc.height(), 0);
        assert!(!doc.finish().contains("<rect"));
    }
}
