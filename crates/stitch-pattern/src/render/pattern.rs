//! Chart rendering: one square per stitch.

use super::document::SvgDocument;
use super::glyph::Glyph;
use super::mode::RenderMode;
use crate::color::Rgb;
use crate::grid::IndexGrid;
use crate::palette::ResolvedPalette;

/// Cells between two major gridlines.
pub const MAJOR_GRID_STRIDE: u32 = 10;

/// Draw one cell: the filled square and, if enabled, its glyph.
///
/// Shared by the chart and the key so swatches match chart cells exactly.
pub(crate) fn emit_cell(
    doc: &mut SvgDocument,
    x: u32,
    y: u32,
    size: u32,
    index: usize,
    palette: &ResolvedPalette,
    mode: &RenderMode,
) {
    let rgb = match palette.get(index) {
        Some(entry) => entry.rgb(),
        None => {
            debug_assert!(false, "palette index {index} out of range ({})", palette.len());
            Rgb::new(255, 255, 255)
        }
    };
    doc.push_rect(x, y, size, size, &mode.cell_style(rgb));

    if mode.symbols {
        if let Some(glyph) = Glyph::for_index(index) {
            doc.push_glyph(glyph, x, y, f64::from(size) / 20.0);
        }
    }
}

/// Renders an [`IndexGrid`] as a stitch chart.
///
/// The chart starts one cell in from the top-left corner; that margin holds
/// the centre marks when they are enabled. Cells are emitted row by row,
/// left to right. Rendering is deterministic: the same inputs always produce
/// byte-identical markup.
///
/// # Example
///
/// ```
/// use stitch_pattern::{
///     IndexGrid, PatternRenderer, ReferenceEntry, RenderMode, ResolvedPalette, Rgb,
/// };
///
/// let palette = ResolvedPalette::from_entries(vec![
///     ReferenceEntry::new("310", "Black", Rgb::new(0, 0, 0)),
/// ]);
/// let grid = IndexGrid::new(vec![0; 12], 4, 3);
///
/// let doc = PatternRenderer::new(10, RenderMode::color()).render(&grid, &palette);
/// assert_eq!((doc.width(), doc.height()), (50, 40));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRenderer {
    cell_size: u32,
    mode: RenderMode,
}

impl PatternRenderer {
    /// Create a renderer. A zero cell size is raised to 1.
    pub fn new(cell_size: u32, mode: RenderMode) -> Self {
        Self {
            cell_size: cell_size.max(1),
            mode,
        }
    }

    /// Side length of one cell.
    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Presentation variant in use.
    #[inline]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Offset of the first cell from the top and left edges.
    #[inline]
    pub fn margin(&self) -> u32 {
        self.cell_size
    }

    /// Canvas `(width, height)` for a grid.
    pub fn canvas_size(&self, grid: &IndexGrid) -> (u32, u32) {
        let cols = grid.width() as u32;
        let rows = grid.height() as u32;
        (
            cols * self.cell_size + self.margin(),
            rows * self.cell_size + self.margin(),
        )
    }

    /// Render the chart.
    pub fn render(&self, grid: &IndexGrid, palette: &ResolvedPalette) -> SvgDocument {
        let (width, height) = self.canvas_size(grid);
        let mut doc = SvgDocument::new(width, height);
        let size = self.cell_size;
        let margin = self.margin();

        if self.mode.center_marks {
            self.center_marks(&mut doc, grid);
        }

        for (row, cells) in grid.rows().enumerate() {
            let y = margin + row as u32 * size;
            for (col, &index) in cells.iter().enumerate() {
                let x = margin + col as u32 * size;
                emit_cell(&mut doc, x, y, size, index, palette, &self.mode);
            }
        }

        self.major_gridlines(&mut doc);

        tracing::debug!(
            width,
            height,
            cells = grid.cells().len(),
            symbols = self.mode.symbols,
            "Rendered chart"
        );
        doc
    }

    /// Thick lines every [`MAJOR_GRID_STRIDE`] cells, starting one stride in
    /// from the chart's top-left and stopping before the canvas edge.
    fn major_gridlines(&self, doc: &mut SvgDocument) {
        let margin = self.margin();
        let stride = self.cell_size * MAJOR_GRID_STRIDE;
        let (width, height) = (doc.width(), doc.height());

        let mut x = margin + stride;
        while x < width {
            doc.push_line(x, margin, x, height);
            x += stride;
        }
        let mut y = margin + stride;
        while y < height {
            doc.push_line(margin, y, width, y);
            y += stride;
        }
    }

    /// Arrows in the left and top margins, level with the chart centre.
    fn center_marks(&self, doc: &mut SvgDocument, grid: &IndexGrid) {
        let size = f64::from(self.cell_size);
        let half = size / 2.0;
        let margin = f64::from(self.margin());
        let mid_y = margin + grid.height() as f64 * size / 2.0 - half;
        let mid_x = margin + grid.width() as f64 * size / 2.0 - half;

        // Right-pointing arrow on the left edge.
        let horizontal = format!("M0 {half}L{size} {half}M{half} 0L{size} {half} {half} {size}");
        // Down-pointing arrow on the top edge.
        let vertical = format!("M{half} 0L{half} {size}M{size} {half}L{half} {size} 0 {half}");

        doc.push_marker(&horizontal, 0.0, mid_y);
        doc.push_marker(&vertical, mid_x, 0.0);
    }
}
