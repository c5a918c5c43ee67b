//! Distinct-color histogram shared by the clustering strategies.

use std::collections::HashMap;

use super::point::Point;
use crate::color::Rgb;

/// Distinct colors of a point list with their pixel counts.
///
/// Bins are kept in first-seen order so that everything derived from the
/// histogram is independent of hash iteration order.
///
/// # Example
///
/// ```
/// use stitch_pattern::quantize::ColorHistogram;
/// use stitch_pattern::Rgb;
///
/// let black = Rgb::new(0, 0, 0);
/// let white = Rgb::new(255, 255, 255);
/// let hist = ColorHistogram::new(&[white, black, white]);
///
/// assert_eq!(hist.colors(), &[white, black]);
/// assert_eq!(hist.counts(), &[2, 1]);
/// assert_eq!(hist.expand(&[7, 9]), vec![7, 9, 7]);
/// ```
#[derive(Debug, Clone)]
pub struct ColorHistogram {
    colors: Vec<Rgb>,
    counts: Vec<usize>,
    pixel_bins: Vec<usize>,
}

impl ColorHistogram {
    /// Count distinct colors in `points`.
    pub fn new(points: &[Rgb]) -> Self {
        let mut lookup: HashMap<Rgb, usize> = HashMap::new();
        let mut colors = Vec::new();
        let mut counts = Vec::new();
        let mut pixel_bins = Vec::with_capacity(points.len());

        for &color in points {
            let bin = *lookup.entry(color).or_insert_with(|| {
                colors.push(color);
                counts.push(0);
                colors.len() - 1
            });
            counts[bin] += 1;
            pixel_bins.push(bin);
        }

        Self {
            colors,
            counts,
            pixel_bins,
        }
    }

    /// Number of distinct colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True if built from an empty point list.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Distinct colors in first-seen order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Pixel count per distinct color.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of pixels counted.
    pub fn total(&self) -> usize {
        self.pixel_bins.len()
    }

    /// Bin index of each input pixel.
    pub fn pixel_bins(&self) -> &[usize] {
        &self.pixel_bins
    }

    /// Turn per-bin labels into per-pixel labels.
    pub fn expand(&self, bin_labels: &[usize]) -> Vec<usize> {
        self.pixel_bins.iter().map(|&b| bin_labels[b]).collect()
    }

    pub(crate) fn points(&self) -> Vec<Point> {
        self.colors.iter().map(|c| c.to_f64()).collect()
    }

    pub(crate) fn weights(&self) -> Vec<f64> {
        self.counts.iter().map(|&c| c as f64).collect()
    }
}
