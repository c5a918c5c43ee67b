//! Color quantization strategies.
//!
//! Reduces a [`PixelGrid`] to a small [`Palette`] plus an [`IndexGrid`]
//! recording which palette entry each pixel was assigned to.
//!
//! # Strategies
//!
//! Three clustering strategies are available, selected by [`QuantizeMethod`]:
//!
//! - **K-means** ([`KMeans`]): centroid based, returns exactly the requested
//!   number of colors. Seeded with a fixed value, so runs are reproducible.
//! - **Mean shift** ([`MeanShift`]): density-mode based, discovers its own
//!   cluster count from an estimated bandwidth. The requested count is ignored.
//! - **Gaussian mixture** ([`GaussianMixture`]): fits the requested number of
//!   diagonal Gaussians with EM; components can end up owning no pixels.
//!
//! Only k-means promises `palette.len() == n`. Downstream code must treat the
//! returned palette length as authoritative.
//!
//! Mean shift and the Gaussian mixture are seeded as well and repeat
//! themselves for identical input on the same build, but their output is
//! best-effort: it is not expected to match other implementations of these
//! algorithms bit for bit, and small changes in input can move modes.
//!
//! # Architecture
//!
//! All strategies implement the [`Cluster`] trait over a flat list of color
//! points. Internally each works on a [`ColorHistogram`] of distinct colors
//! weighted by pixel count, which keeps the cost proportional to the number of
//! distinct colors rather than pixels.

mod gmm;
mod histogram;
mod kmeans;
mod mean_shift;
mod point;

pub use gmm::GaussianMixture;
pub use histogram::ColorHistogram;
pub use kmeans::KMeans;
pub use mean_shift::MeanShift;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::color::Rgb;
use crate::grid::{IndexGrid, PixelGrid};

/// Errors raised before or during quantization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantizeError {
    /// The method name is not one of the supported strategies
    #[error("unsupported quantization method {0:?} (choose from 'kmeans', 'meanshift' or 'gmm')")]
    UnsupportedMethod(String),
    /// Zero colors were requested
    #[error("color count must be at least 1")]
    InvalidColorCount,
}

/// Quantization strategy selector.
///
/// Parsed from the method names accepted on the command line.
///
/// # Example
///
/// ```
/// use stitch_pattern::QuantizeMethod;
///
/// let m: QuantizeMethod = "kmeans".parse().unwrap();
/// assert_eq!(m, QuantizeMethod::KMeans);
/// assert!("median-cut".parse::<QuantizeMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantizeMethod {
    /// Centroid based clustering; exact color count, fixed seed.
    #[default]
    KMeans,
    /// Density-mode clustering; discovers its own color count.
    MeanShift,
    /// Gaussian mixture model fitted with EM.
    GaussianMixture,
}

impl QuantizeMethod {
    /// All supported methods.
    pub const ALL: [QuantizeMethod; 3] = [
        QuantizeMethod::KMeans,
        QuantizeMethod::MeanShift,
        QuantizeMethod::GaussianMixture,
    ];

    /// Canonical method name.
    pub fn as_str(self) -> &'static str {
        match self {
            QuantizeMethod::KMeans => "kmeans",
            QuantizeMethod::MeanShift => "meanshift",
            QuantizeMethod::GaussianMixture => "gmm",
        }
    }

    /// Whether the returned palette always has exactly the requested length.
    pub fn honors_color_count(self) -> bool {
        matches!(self, QuantizeMethod::KMeans)
    }

    /// Run the strategy with its default parameters.
    pub fn cluster(self, points: &[Rgb], target: usize) -> Clustering {
        match self {
            QuantizeMethod::KMeans => KMeans::default().cluster(points, target),
            QuantizeMethod::MeanShift => MeanShift::default().cluster(points, target),
            QuantizeMethod::GaussianMixture => GaussianMixture::default().cluster(points, target),
        }
    }
}

impl fmt::Display for QuantizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuantizeMethod {
    type Err = QuantizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kmeans" | "k-means" => Ok(QuantizeMethod::KMeans),
            "meanshift" | "mean-shift" => Ok(QuantizeMethod::MeanShift),
            "gmm" | "gaussian-mixture" => Ok(QuantizeMethod::GaussianMixture),
            _ => Err(QuantizeError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// Result of a clustering run.
///
/// `assignments[i]` is the cluster of input point `i`; every assignment is a
/// valid index into `representatives`.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Cluster index per input point, in input order
    pub assignments: Vec<usize>,
    /// Representative color per cluster, rounded to 8-bit channels
    pub representatives: Vec<Rgb>,
    /// Unrounded cluster centres, parallel to `representatives`
    pub centers: Vec<[f64; 3]>,
}

impl Clustering {
    /// Build from assignments and real-valued centres; representatives are
    /// the centres rounded and clamped.
    pub fn from_centers(assignments: Vec<usize>, centers: Vec<[f64; 3]>) -> Self {
        Self {
            assignments,
            representatives: centers.iter().map(|&c| Rgb::from_f64(c)).collect(),
            centers,
        }
    }
}

/// A clustering strategy.
///
/// Given color points and a target cluster count, assign every point to a
/// cluster and pick a representative color per cluster. Strategies may
/// return a different number of clusters than `target`.
pub trait Cluster {
    /// Cluster `points` into (about) `target` groups.
    fn cluster(&self, points: &[Rgb], target: usize) -> Clustering;
}

/// The quantized colors, indexed by palette index.
///
/// Keeps each cluster centre as computed, for thread matching, next to its
/// 8-bit rounding. Created by [`reduce`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
    centers: Vec<[f64; 3]>,
}

impl Palette {
    /// Wrap a list of colors.
    pub fn new(colors: Vec<Rgb>) -> Self {
        let centers = colors.iter().map(|c| c.to_f64()).collect();
        Self { colors, centers }
    }

    /// Wrap real-valued cluster centres.
    pub fn from_centers(centers: Vec<[f64; 3]>) -> Self {
        let colors = centers.iter().map(|&c| Rgb::from_f64(c)).collect();
        Self { colors, centers }
    }

    /// Number of palette entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True if the palette holds no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at palette index `idx`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// Unrounded centre at palette index `idx`.
    #[inline]
    pub fn center(&self, idx: usize) -> [f64; 3] {
        self.centers[idx]
    }

    /// Unrounded centres in palette order.
    pub fn centers(&self) -> &[[f64; 3]] {
        &self.centers
    }

    /// Iterate colors in palette order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rgb> {
        self.colors.iter()
    }

    /// Colors as a slice.
    pub fn as_slice(&self) -> &[Rgb] {
        &self.colors
    }
}

/// Reduce a pixel grid to an index grid and a palette.
///
/// `n` is the requested color count. K-means returns exactly `n` colors; the
/// other methods may return fewer or more.
///
/// # Errors
///
/// [`QuantizeError::InvalidColorCount`] if `n == 0`.
///
/// # Example
///
/// ```
/// use stitch_pattern::{reduce, PixelGrid, QuantizeMethod, Rgb};
///
/// let pixels = PixelGrid::new(
///     vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)],
///     2,
///     2,
/// )
/// .unwrap();
/// let (grid, palette) = reduce(&pixels, QuantizeMethod::KMeans, 2).unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(grid.get(0, 0), grid.get(0, 1));
/// assert_ne!(grid.get(0, 0), grid.get(1, 0));
/// ```
pub fn reduce(
    pixels: &PixelGrid,
    method: QuantizeMethod,
    n: usize,
) -> Result<(IndexGrid, Palette), QuantizeError> {
    if n == 0 {
        return Err(QuantizeError::InvalidColorCount);
    }

    tracing::debug!(
        method = %method,
        requested = n,
        width = pixels.width(),
        height = pixels.height(),
        "Quantizing pixels"
    );

    let Clustering {
        assignments,
        centers,
        ..
    } = method.cluster(pixels.pixels(), n);

    debug_assert_eq!(assignments.len(), pixels.len());
    debug_assert!(assignments.iter().all(|&a| a < centers.len()));

    if method.honors_color_count() {
        debug_assert_eq!(centers.len(), n);
    } else if centers.len() != n {
        tracing::info!(
            method = %method,
            requested = n,
            actual = centers.len(),
            "Quantizer chose its own color count"
        );
    }

    let grid = IndexGrid::new(assignments, pixels.width(), pixels.height());
    Ok((grid, Palette::from_centers(centers)))
}
