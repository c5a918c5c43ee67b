//! Thread reference entries and the immutable reference table.

use std::collections::HashSet;

use super::error::PaletteError;
use crate::color::Rgb;

/// One catalogue entry: a manufactured thread color.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    id: String,
    name: String,
    rgb: Rgb,
}

impl ReferenceEntry {
    /// Create an entry from its catalogue ID, display name and RGB approximation.
    pub fn new(id: impl Into<String>, name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rgb,
        }
    }

    /// Catalogue ID, e.g. `"310"` or `"B5200"`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human readable color name, e.g. `"Black"`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// RGB approximation of the thread color.
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }
}

/// The thread catalogue, loaded once and read-only afterwards.
///
/// Entries keep the order they were supplied in. That order is the
/// tie-break order for nearest-color matching: among equidistant entries the
/// one with the lowest table index wins.
///
/// # Example
///
/// ```
/// use stitch_pattern::{ReferenceEntry, ReferenceTable, Rgb};
///
/// let table = ReferenceTable::new(vec![
///     ReferenceEntry::new("310", "Black", Rgb::new(0, 0, 0)),
///     ReferenceEntry::new("B5200", "Snow White", Rgb::new(255, 255, 255)),
/// ])
/// .unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get("310").unwrap().name(), "Black");
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    entries: Vec<ReferenceEntry>,
}

impl ReferenceTable {
    /// Build a table from entries.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyTable`] if `entries` is empty
    /// - [`PaletteError::DuplicateId`] if two entries share an ID
    pub fn new(entries: Vec<ReferenceEntry>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::EmptyTable);
        }

        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if !seen.insert(entry.id.as_str()) {
                return Err(PaletteError::DuplicateId {
                    id: entry.id.clone(),
                    index,
                });
            }
        }

        Ok(Self { entries })
    }

    /// Number of entries. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; empty tables are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at table position `idx`.
    #[inline]
    pub fn entry(&self, idx: usize) -> &ReferenceEntry {
        &self.entries[idx]
    }

    /// Look an entry up by its catalogue ID.
    pub fn get(&self, id: &str) -> Option<&ReferenceEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Iterate entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.iter()
    }
}
