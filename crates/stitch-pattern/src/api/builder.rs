//! StitchPattern builder -- the primary entry point for the crate.
//!
//! [`StitchPattern`] runs quantization, thread matching and smoothing in
//! order and returns a [`Pattern`] that both renderers read from.

use super::error::PatternError;
use crate::grid::{clean_in_place, IndexGrid, PixelGrid};
use crate::palette::{resolve, NearestReference, ResolvedPalette};
use crate::quantize::{reduce, Palette, QuantizeMethod};
use crate::render::{KeyRenderer, PatternRenderer, RenderMode, SvgDocument};

/// Pattern builder.
///
/// # Design
///
/// - Constructor takes the quantization method and requested color count
/// - Configuration methods consume and return `self`
/// - [`build()`](Self::build) takes `&self` so one builder can process
///   several images against the same table
///
/// # Example
///
/// ```
/// use stitch_pattern::{PixelGrid, QuantizeMethod, ReferenceEntry, ReferenceTable, Rgb, StitchPattern};
///
/// let table = ReferenceTable::new(vec![
///     ReferenceEntry::new("310", "Black", Rgb::new(0, 0, 0)),
///     ReferenceEntry::new("321", "Red", Rgb::new(199, 43, 59)),
/// ])
/// .unwrap();
/// let pixels = PixelGrid::new(
///     vec![Rgb::new(200, 40, 60), Rgb::new(200, 40, 60), Rgb::new(5, 5, 5), Rgb::new(5, 5, 5)],
///     2,
///     2,
/// )
/// .unwrap();
///
/// let builder = StitchPattern::new(QuantizeMethod::KMeans, 2).smoothing(false);
/// let pattern = builder.build(&pixels, &table).unwrap();
///
/// assert_eq!(pattern.palette().len(), 2);
/// let top_left = pattern.grid().get(0, 0);
/// assert_eq!(pattern.resolved().entry(top_left).id(), "321");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StitchPattern {
    method: QuantizeMethod,
    colors: usize,
    smoothing: bool,
}

impl StitchPattern {
    /// Create a builder for `colors` palette entries using `method`.
    ///
    /// Smoothing is on by default.
    pub fn new(method: QuantizeMethod, colors: usize) -> Self {
        Self {
            method,
            colors,
            smoothing: true,
        }
    }

    /// Enable or disable the isolated-cell smoothing pass.
    #[inline]
    pub fn smoothing(mut self, enabled: bool) -> Self {
        self.smoothing = enabled;
        self
    }

    /// Quantization method in use.
    #[inline]
    pub fn method(&self) -> QuantizeMethod {
        self.method
    }

    /// Requested color count.
    #[inline]
    pub fn colors(&self) -> usize {
        self.colors
    }

    /// Run the pipeline on an already resized pixel grid.
    ///
    /// 1. Quantize pixels into a palette and index grid
    /// 2. Resolve every palette color to its nearest thread
    /// 3. Smooth isolated cells (single pass)
    ///
    /// # Errors
    ///
    /// [`PatternError::Quantize`] if the color count is zero.
    pub fn build<T>(&self, pixels: &PixelGrid, table: &T) -> Result<Pattern, PatternError>
    where
        T: NearestReference + ?Sized,
    {
        let (mut grid, palette) = reduce(pixels, self.method, self.colors)?;
        tracing::info!(
            method = %self.method,
            colors = palette.len(),
            width = grid.width(),
            height = grid.height(),
            "Quantized image"
        );

        let resolved = resolve(&palette, table);

        let smoothed = if self.smoothing {
            let changed = clean_in_place(&mut grid);
            tracing::info!(changed, "Smoothed isolated stitches");
            changed
        } else {
            0
        };

        Ok(Pattern {
            grid,
            palette,
            resolved,
            smoothed,
        })
    }
}

/// A finished pattern: index grid, palette and the threads chosen for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    grid: IndexGrid,
    palette: Palette,
    resolved: ResolvedPalette,
    smoothed: usize,
}

impl Pattern {
    /// The (smoothed) index grid.
    #[inline]
    pub fn grid(&self) -> &IndexGrid {
        &self.grid
    }

    /// Quantized colors.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Thread per palette index.
    #[inline]
    pub fn resolved(&self) -> &ResolvedPalette {
        &self.resolved
    }

    /// Number of cells the smoothing pass rewrote.
    #[inline]
    pub fn smoothed_cells(&self) -> usize {
        self.smoothed
    }

    /// Render the chart.
    pub fn render_chart(&self, cell_size: u32, mode: RenderMode) -> SvgDocument {
        PatternRenderer::new(cell_size, mode).render(&self.grid, &self.resolved)
    }

    /// Render the colour key.
    pub fn render_key(&self, row_height: u32, mode: RenderMode) -> SvgDocument {
        KeyRenderer::new(row_height, mode).render(&self.resolved)
    }
}
