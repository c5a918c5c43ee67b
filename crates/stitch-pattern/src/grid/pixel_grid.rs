//! Row-major RGB pixel grid.

use thiserror::Error;

use crate::color::Rgb;

/// Errors constructing a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height is zero
    #[error("grid must be at least 1x1, got {width}x{height}")]
    Empty {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Pixel count does not equal width × height
    #[error("expected {expected} pixels for the grid, got {actual}")]
    SizeMismatch {
        /// width × height
        expected: usize,
        /// Number of pixels supplied
        actual: usize,
    },
}

/// An image already resized to one pixel per stitch.
///
/// # Example
///
/// ```
/// use stitch_pattern::{PixelGrid, Rgb};
///
/// let grid = PixelGrid::new(vec![Rgb::new(1, 2, 3); 6], 3, 2).unwrap();
/// assert_eq!(grid.get(2, 1), Rgb::new(1, 2, 3));
/// assert!(PixelGrid::new(vec![Rgb::default(); 5], 3, 2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pixels: Vec<Rgb>,
    width: usize,
    height: usize,
}

impl PixelGrid {
    /// Wrap row-major pixels.
    ///
    /// # Errors
    ///
    /// [`GridError::Empty`] for a zero dimension, [`GridError::SizeMismatch`]
    /// if `pixels.len() != width * height`.
    pub fn new(pixels: Vec<Rgb>, width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        if pixels.len() != width * height {
            return Err(GridError::SizeMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Build from packed `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// # Errors
    ///
    /// Same as [`PixelGrid::new`]; trailing bytes that do not form a full
    /// pixel count towards a size mismatch.
    pub fn from_rgb_bytes(bytes: &[u8], width: usize, height: usize) -> Result<Self, GridError> {
        if bytes.len() % 3 != 0 {
            return Err(GridError::SizeMismatch {
                expected: width * height,
                actual: bytes.len() / 3,
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(pixels, width, height)
    }

    /// Width in pixels (stitches per row).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels (rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always `false`; empty grids are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            PixelGrid::new(Vec::new(), 0, 4).unwrap_err(),
            GridError::Empty {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn test_from_rgb_bytes_layout() {
        let grid = PixelGrid::from_rgb_bytes(&[1, 2, 3, 4, 5, 6], 2, 1).unwrap();
        assert_eq!(grid.get(0, 0), Rgb::new(1, 2, 3));
        assert_eq!(grid.get(1, 0), Rgb::new(4, 5, 6));
    }

    #[test]
    fn test_from_rgb_bytes_partial_pixel() {
        assert!(matches!(
            PixelGrid::from_rgb_bytes(&[1, 2, 3, 4], 1, 1),
            Err(GridError::SizeMismatch { .. })
        ));
    }
}
