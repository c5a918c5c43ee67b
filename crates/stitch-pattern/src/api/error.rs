//! Unified error type for the stitch-pattern public API.
//!
//! [`PatternError`] wraps the per-module errors so application code can use
//! `?` across the whole pipeline.

use thiserror::Error;

use crate::grid::GridError;
use crate::palette::{PaletteError, ParseColorError};
use crate::quantize::QuantizeError;

/// Unified error type for the stitch-pattern public API.
///
/// # Example
///
/// ```
/// use stitch_pattern::{PatternError, QuantizeMethod, Rgb};
///
/// fn parse(method: &str, color: &str) -> Result<(QuantizeMethod, Rgb), PatternError> {
///     Ok((method.parse()?, color.parse()?))
/// }
///
/// assert!(parse("kmeans", "#ff0000").is_ok());
/// assert!(matches!(parse("spectral", "#ff0000"), Err(PatternError::Quantize(_))));
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// Unsupported method or invalid color count
    #[error("quantization error: {0}")]
    Quantize(#[from] QuantizeError),
    /// Reference table validation error (empty or duplicate IDs)
    #[error("reference table error: {0}")]
    Palette(#[from] PaletteError),
    /// Invalid hex color string
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Pixel grid dimensions do not match its data
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}
