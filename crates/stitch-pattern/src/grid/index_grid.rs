//! Palette index per cell, row-major.

/// Quantized chart: one palette index per stitch.
///
/// Stores indices in row-major order with the grid dimensions. Every value
/// is expected to be a valid index into the palette produced alongside it.
///
/// # Example
///
/// ```
/// use stitch_pattern::IndexGrid;
///
/// let grid = IndexGrid::from_rows(&[vec![0, 1, 1], vec![2, 1, 0]]);
///
/// assert_eq!(grid.width(), 3);
/// assert_eq!(grid.height(), 2);
/// assert_eq!(grid.get(2, 1), 0);
/// assert_eq!(grid.row(1), &[2, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGrid {
    cells: Vec<usize>,
    width: usize,
    height: usize,
}

impl IndexGrid {
    /// Wrap row-major indices.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `cells.len() == width * height`.
    pub fn new(cells: Vec<usize>, width: usize, height: usize) -> Self {
        debug_assert_eq!(
            cells.len(),
            width * height,
            "cells length ({}) must match width * height ({}x{}={})",
            cells.len(),
            width,
            height,
            width * height,
        );
        Self {
            cells,
            width,
            height,
        }
    }

    /// Build from nested rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<usize>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        debug_assert!(rows.iter().all(|r| r.len() == width), "ragged rows");
        Self::new(rows.concat(), width, height)
    }

    /// Columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Index at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> usize {
        self.cells[y * self.width + x]
    }

    /// Overwrite the index at column `x`, row `y`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: usize) {
        self.cells[y * self.width + x] = value;
    }

    /// All indices, row-major.
    #[inline]
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Row `y` as a slice.
    #[inline]
    pub fn row(&self, y: usize) -> &[usize] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        // chunks_exact panics on a zero chunk size
        self.cells.chunks_exact(self.width.max(1))
    }

    /// Largest index present, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.cells.iter().copied().max()
    }

    /// Number of cells holding each palette index, for a palette of `len` colors.
    ///
    /// Indices `>= len` are not counted.
    pub fn histogram(&self, len: usize) -> Vec<usize> {
        let mut counts = vec![0; len];
        for &i in &self.cells {
            if let Some(c) = counts.get_mut(i) {
                *c += 1;
            }
        }
        counts
    }
}
