//! Pixel and index grids, plus the neighbourhood smoother.
//!
//! - [`PixelGrid`]: decoded RGB input, row-major, read-only
//! - [`IndexGrid`]: one palette index per cell, same shape as the input
//! - [`clean`] / [`clean_in_place`]: single-pass removal of isolated cells

mod index_grid;
mod pixel_grid;
mod smooth;

pub use index_grid::IndexGrid;
pub use pixel_grid::{GridError, PixelGrid};
pub use smooth::{clean, clean_in_place, neighbors};
