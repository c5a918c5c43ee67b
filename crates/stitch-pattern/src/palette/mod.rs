//! Thread reference table and palette matching
//!
//! A [`ReferenceTable`] is the immutable catalogue of manufactured thread
//! colors. [`resolve`] maps each quantized palette color to its nearest
//! catalogue entry, producing a [`ResolvedPalette`] aligned index-for-index
//! with the quantized palette.

mod error;
mod matcher;
mod reference;

pub use error::{PaletteError, ParseColorError};
pub use matcher::{
    resolve, weighted_distance, weighted_distance_from, NearestReference, ResolvedPalette,
};
pub use reference::{ReferenceEntry, ReferenceTable};
