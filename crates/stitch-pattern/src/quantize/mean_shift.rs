//! Mean shift clustering with an estimated bandwidth.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::histogram::ColorHistogram;
use super::point::{dist_sq, nearest, weighted_mean, Point};
use super::{Cluster, Clustering};
use crate::color::Rgb;

/// Density-mode clustering.
///
/// The kernel bandwidth is estimated from the data as the average distance
/// from a sample of points to their `quantile`-th nearest neighbour. Seeds
/// are placed on a bandwidth-sized grid over the occupied colors, each seed
/// climbs to a density mode with a flat kernel, and modes closer than one
/// bandwidth are merged, keeping the one with more pixels in reach.
///
/// The number of clusters is whatever the data yields; the requested target
/// is not used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanShift {
    /// Fraction of sampled points used as the neighbour rank for bandwidth estimation
    pub quantile: f64,
    /// Number of pixels sampled for bandwidth estimation
    pub n_samples: usize,
    /// Seed for the bandwidth sample
    pub seed: u64,
    /// Upper bound on mode-climbing iterations per seed
    pub max_iter: usize,
    /// Lower bound on the estimated bandwidth
    pub min_bandwidth: f64,
}

impl Default for MeanShift {
    fn default() -> Self {
        Self {
            quantile: 0.2,
            n_samples: 500,
            seed: 0,
            max_iter: 300,
            min_bandwidth: 1.0,
        }
    }
}

impl MeanShift {
    /// Estimate the kernel bandwidth for `hist`.
    pub fn estimate_bandwidth(&self, hist: &ColorHistogram) -> f64 {
        let total = hist.total();
        if total == 0 {
            return self.min_bandwidth;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let amount = self.n_samples.min(total);
        let sample: Vec<Point> = rand::seq::index::sample(&mut rng, total, amount)
            .iter()
            .map(|pixel| hist.colors()[hist.pixel_bins()[pixel]].to_f64())
            .collect();

        let rank = ((sample.len() as f64 * self.quantile) as usize).max(1);
        let mut sum = 0.0;
        let mut dists = Vec::with_capacity(sample.len());
        for p in &sample {
            dists.clear();
            dists.extend(sample.iter().map(|q| dist_sq(p, q)));
            dists.sort_by(|a, b| a.total_cmp(b));
            sum += dists[rank - 1].sqrt();
        }

        (sum / sample.len() as f64).max(self.min_bandwidth)
    }
}

impl Cluster for MeanShift {
    fn cluster(&self, points: &[Rgb], _target: usize) -> Clustering {
        let hist = ColorHistogram::new(points);
        if hist.is_empty() {
            return Clustering::from_centers(Vec::new(), Vec::new());
        }

        let bandwidth = self.estimate_bandwidth(&hist);
        let pts = hist.points();
        let weights = hist.weights();

        let mut modes: Vec<(Point, f64)> = bin_seeds(&pts, bandwidth)
            .into_iter()
            .filter_map(|seed| self.climb(seed, &pts, &weights, bandwidth))
            .collect();

        // Stable sort keeps seed order among equally dense modes.
        modes.sort_by(|a, b| b.1.total_cmp(&a.1));

        let radius_sq = bandwidth * bandwidth;
        let mut centres: Vec<Point> = Vec::new();
        for (mode, _) in &modes {
            if centres.iter().all(|c| dist_sq(c, mode) > radius_sq) {
                centres.push(*mode);
            }
        }

        if centres.is_empty() {
            // Unreachable with positive weights; keep the invariant anyway.
            centres.extend(weighted_mean(pts.iter().zip(weights.iter().copied())));
        }

        tracing::debug!(
            bandwidth,
            seeds = modes.len(),
            clusters = centres.len(),
            "mean shift converged"
        );

        let labels: Vec<usize> = pts.iter().map(|p| nearest(p, &centres).0).collect();

        Clustering::from_centers(hist.expand(&labels), centres)
    }
}

impl MeanShift {
    /// Move `seed` uphill until it settles. Returns the mode and the weight
    /// within reach of it, or `None` if the seed has no neighbours.
    fn climb(&self, seed: Point, pts: &[Point], weights: &[f64], bandwidth: f64) -> Option<(Point, f64)> {
        let radius_sq = bandwidth * bandwidth;
        let stop = 1e-3 * bandwidth;
        let mut mean = seed;
        let mut reach = 0.0;

        for _ in 0..self.max_iter {
            let within = pts
                .iter()
                .zip(weights.iter().copied())
                .filter(|(p, _)| dist_sq(p, &mean) <= radius_sq);
            reach = within.clone().map(|(_, w)| w).sum();
            let Some(next) = weighted_mean(within) else {
                break;
            };
            let moved = dist_sq(&next, &mean).sqrt();
            mean = next;
            if moved < stop {
                break;
            }
        }

        (reach > 0.0).then_some((mean, reach))
    }
}

/// Seeds on a grid of `bin_size` cells, one per occupied cell, in first-seen order.
fn bin_seeds(pts: &[Point], bin_size: f64) -> Vec<Point> {
    let mut seen: HashMap<[i64; 3], ()> = HashMap::new();
    let mut seeds = Vec::new();
    for p in pts {
        let key = [
            (p[0] / bin_size).round() as i64,
            (p[1] / bin_size).round() as i64,
            (p[2] / bin_size).round() as i64,
        ];
        if seen.insert(key, ()).is_none() {
            seeds.push([
                key[0] as f64 * bin_size,
                key[1] as f64 * bin_size,
                key[2] as f64 * bin_size,
            ]);
        }
    }
    seeds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<Rgb> {
        let mut pts = Vec::new();
        for i in 0..30u8 {
            pts.push(Rgb::new(20 + i % 2, 20, 20));
            pts.push(Rgb::new(220, 30 + i % 2, 30));
            pts.push(Rgb::new(30, 30, 220 + i % 2));
        }
        pts
    }

    #[test]
    fn test_finds_separated_modes() {
        let points = blobs();
        let result = MeanShift::default().cluster(&points, 99);
        assert_eq!(result.representatives.len(), 3);
        for (i, &a) in result.assignments.iter().enumerate() {
            assert_eq!(a, result.assignments[i % 3], "point {i}");
        }
    }

    #[test]
    fn test_single_color_input_uses_bandwidth_floor() {
        let points = vec![Rgb::new(90, 90, 90); 6];
        let ms = MeanShift::default();
        let hist = ColorHistogram::new(&points);
        assert_eq!(ms.estimate_bandwidth(&hist), 1.0);

        let result = ms.cluster(&points, 1);
        assert_eq!(result.representatives, vec![Rgb::new(90, 90, 90)]);
        assert_eq!(result.assignments, vec![0; 6]);
    }

    #[test]
    fn test_assignments_are_valid() {
        let points: Vec<Rgb> = (0..120u32)
            .map(|i| Rgb::new((i * 7 % 256) as u8, (i * 29 % 256) as u8, (i * 53 % 256) as u8))
            .collect();
        let result = MeanShift::default().cluster(&points, 4);
        assert!(!result.representatives.is_empty());
        assert!(result
            .assignments
            .iter()
            .all(|&a| a < result.representatives.len()));
    }

    #[test]
    fn test_bin_seeds_dedupe() {
        let pts = [[0.0, 0.0, 0.0], [0.4, 0.0, 0.0], [10.0, 0.0, 0.0]];
        assert_eq!(bin_seeds(&pts, 1.0), vec![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]]);
    }
}
