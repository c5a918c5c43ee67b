//! Error types for color parsing and reference table validation.

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for reference table validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No entries provided. Matching is impossible against an empty table.
    #[error("reference table cannot be empty")]
    EmptyTable,
    /// Two entries share the same reference ID
    #[error("duplicate reference id {id:?} at index {index}")]
    DuplicateId {
        /// The repeated ID
        id: String,
        /// Index where the duplicate was found
        index: usize,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
