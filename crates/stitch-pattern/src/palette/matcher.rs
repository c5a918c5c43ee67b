//! Nearest-thread matching for quantized palettes.

use super::reference::{ReferenceEntry, ReferenceTable};
use crate::color::Rgb;
use crate::quantize::Palette;

/// Weighted Euclidean distance between two RGB colors.
///
/// `sqrt(2·Δr² + 4·Δg² + 3·Δb²)`, computed in `f64` from exact integer
/// channel differences.
///
/// # Example
///
/// ```
/// use stitch_pattern::{weighted_distance, Rgb};
///
/// let d = weighted_distance(Rgb::new(0, 0, 0), Rgb::new(1, 1, 1));
/// assert_eq!(d, 3.0);
/// ```
#[inline]
pub fn weighted_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    ((2 * dr * dr + 4 * dg * dg + 3 * db * db) as f64).sqrt()
}

/// [`weighted_distance`] from a real-valued point, such as an unrounded
/// cluster centre, to a thread color.
#[inline]
pub fn weighted_distance_from(point: [f64; 3], color: Rgb) -> f64 {
    let [r, g, b] = color.to_f64();
    let (dr, dg, db) = (point[0] - r, point[1] - g, point[2] - b);
    (2.0 * dr * dr + 4.0 * dg * dg + 3.0 * db * db).sqrt()
}

/// Lookup of the catalogue entry closest to a color.
///
/// [`ReferenceTable`] implements this with an exhaustive scan. A spatial
/// index may implement it instead, provided it returns the same entry: the
/// minimum of [`weighted_distance_from`], ties going to the lowest table
/// index.
pub trait NearestReference {
    /// Return the entry nearest to a real-valued point along with its
    /// distance.
    fn nearest_point(&self, point: [f64; 3]) -> (&ReferenceEntry, f64);

    /// Return the entry nearest to `color` along with its distance.
    fn nearest(&self, color: Rgb) -> (&ReferenceEntry, f64) {
        self.nearest_point(color.to_f64())
    }
}

impl NearestReference for ReferenceTable {
    fn nearest_point(&self, point: [f64; 3]) -> (&ReferenceEntry, f64) {
        // Linear scan; catalogues hold a few hundred entries.
        // Strict `<` keeps the first of several equidistant entries.
        let mut best = self.entry(0);
        let mut best_dist = weighted_distance_from(point, best.rgb());

        for entry in self.iter().skip(1) {
            let dist = weighted_distance_from(point, entry.rgb());
            if dist < best_dist {
                best = entry;
                best_dist = dist;
            }
        }

        (best, best_dist)
    }
}

/// Catalogue entries resolved for each palette index.
///
/// `resolved.entry(i)` is the thread chosen for `palette.color(i)`; length and
/// index alignment match the palette it was resolved from. Both renderers
/// read colors, names and IDs from here.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPalette {
    entries: Vec<ReferenceEntry>,
}

impl ResolvedPalette {
    /// Wrap already resolved entries, one per palette index.
    pub fn from_entries(entries: Vec<ReferenceEntry>) -> Self {
        Self { entries }
    }

    /// Number of palette indices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the palette had no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Thread chosen for palette index `idx`.
    #[inline]
    pub fn entry(&self, idx: usize) -> &ReferenceEntry {
        &self.entries[idx]
    }

    /// Thread chosen for palette index `idx`, or `None` past the end.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&ReferenceEntry> {
        self.entries.get(idx)
    }

    /// Thread color for palette index `idx`.
    #[inline]
    pub fn rgb(&self, idx: usize) -> Rgb {
        self.entries[idx].rgb()
    }

    /// Iterate resolved entries in palette order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.iter()
    }
}

/// Map every palette color to its nearest catalogue entry.
///
/// Matching uses the unrounded cluster centres; the rounded colors are only
/// for display.
///
/// # Example
///
/// ```
/// use stitch_pattern::{resolve, Palette, ReferenceEntry, ReferenceTable, Rgb};
///
/// let table = ReferenceTable::new(vec![
///     ReferenceEntry::new("310", "Black", Rgb::new(0, 0, 0)),
///     ReferenceEntry::new("B5200", "Snow White", Rgb::new(255, 255, 255)),
/// ])
/// .unwrap();
/// let palette = Palette::new(vec![Rgb::new(240, 240, 240), Rgb::new(20, 10, 10)]);
///
/// let resolved = resolve(&palette, &table);
/// assert_eq!(resolved.entry(0).id(), "B5200");
/// assert_eq!(resolved.entry(1).id(), "310");
/// ```
pub fn resolve<T: NearestReference + ?Sized>(palette: &Palette, table: &T) -> ResolvedPalette {
    let entries = palette
        .centers()
        .iter()
        .enumerate()
        .map(|(idx, &center)| {
            let (entry, dist) = table.nearest_point(center);
            tracing::debug!(
                index = idx,
                color = %palette.color(idx),
                thread = entry.id(),
                distance = dist,
                "Resolved palette color"
            );
            entry.clone()
        })
        .collect();

    ResolvedPalette { entries }
}
