//! Presentation toggles shared by both renderers.

use crate::color::Rgb;

/// How cells are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    /// Thread colour of the cell's palette entry
    #[default]
    Color,
    /// Plain white; symbols carry the colour information
    Monochrome,
}

/// Presentation variant for a chart or key.
///
/// The fields are independent; the presets cover the three variants the
/// command line writes.
///
/// # Example
///
/// ```
/// use stitch_pattern::{Fill, RenderMode};
///
/// let mode = RenderMode::monochrome().center_marks(true);
/// assert_eq!(mode.fill, Fill::Monochrome);
/// assert!(mode.symbols && mode.minor_lines && mode.center_marks);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderMode {
    /// Cell fill
    pub fill: Fill,
    /// Overlay a glyph per palette index
    pub symbols: bool,
    /// Outline every cell
    pub minor_lines: bool,
    /// Draw arrows in the margin pointing at the chart centre
    pub center_marks: bool,
}

impl RenderMode {
    /// Colour fill, no symbols, no cell outlines.
    pub const fn color() -> Self {
        Self {
            fill: Fill::Color,
            symbols: false,
            minor_lines: false,
            center_marks: false,
        }
    }

    /// Colour fill with symbols and cell outlines.
    pub const fn color_symbols() -> Self {
        Self {
            fill: Fill::Color,
            symbols: true,
            minor_lines: true,
            center_marks: false,
        }
    }

    /// White cells with symbols and outlines, for black and white printing.
    pub const fn monochrome() -> Self {
        Self {
            fill: Fill::Monochrome,
            symbols: true,
            minor_lines: true,
            center_marks: false,
        }
    }

    /// Toggle centre marks.
    #[inline]
    pub const fn center_marks(mut self, enabled: bool) -> Self {
        self.center_marks = enabled;
        self
    }

    /// Inline CSS for a cell of the given thread colour.
    pub(crate) fn cell_style(&self, rgb: Rgb) -> String {
        let fill = match self.fill {
            Fill::Color => rgb,
            Fill::Monochrome => Rgb::new(255, 255, 255),
        };
        let stroke = if self.minor_lines {
            "stroke:rgb(20,20,20);stroke-width:1;"
        } else {
            "stroke:none;"
        };
        format!("fill:{};{stroke}", fill.to_css())
    }
}
