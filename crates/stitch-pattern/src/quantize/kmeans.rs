//! K-means clustering with k-means++ seeding.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::histogram::ColorHistogram;
use super::point::{dist_sq, nearest, weighted_mean, Point};
use super::{Cluster, Clustering};
use crate::color::Rgb;

/// Default seed. Fixed so that identical input produces identical charts.
pub const DEFAULT_SEED: u64 = 18;

/// Centroid based clustering.
///
/// Runs weighted Lloyd iterations over the distinct colors of the input,
/// restarting `restarts` times from independent k-means++ seedings and
/// keeping the run with the lowest inertia (sum of squared distances).
///
/// Always returns exactly `target` representatives. If the input holds fewer
/// distinct colors than `target`, some representatives repeat and own no
/// points.
///
/// # Example
///
/// ```
/// use stitch_pattern::quantize::KMeans;
/// use stitch_pattern::{Cluster, Rgb};
///
/// let points = [Rgb::new(0, 0, 0), Rgb::new(2, 2, 2), Rgb::new(250, 250, 250)];
/// let result = KMeans::default().cluster(&points, 2);
///
/// assert_eq!(result.representatives.len(), 2);
/// assert_eq!(result.assignments[0], result.assignments[1]);
/// assert_ne!(result.assignments[0], result.assignments[2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeans {
    /// RNG seed for k-means++ seeding
    pub seed: u64,
    /// Number of independent seedings; the best run is kept
    pub restarts: usize,
    /// Upper bound on Lloyd iterations per run
    pub max_iter: usize,
    /// Convergence threshold, relative to the mean per-channel variance
    pub tolerance: f64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            restarts: 15,
            max_iter: 300,
            tolerance: 1e-4,
        }
    }
}

/// Outcome of one fitted model over histogram bins.
pub(crate) struct KMeansFit {
    pub centroids: Vec<Point>,
    pub labels: Vec<usize>,
    pub inertia: f64,
}

impl KMeans {
    /// Fit `k` centroids to weighted points. `points` must not be empty.
    pub(crate) fn fit(&self, points: &[Point], weights: &[f64], k: usize) -> KMeansFit {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let tol = self.tolerance * mean_variance(points, weights);
        let mut best: Option<KMeansFit> = None;

        for run in 0..self.restarts.max(1) {
            let seeds = plus_plus_seeds(points, weights, k, &mut rng);
            let fit = lloyd(points, weights, seeds, self.max_iter, tol);
            tracing::trace!(run, inertia = fit.inertia, "k-means run finished");

            if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }

        // restarts.max(1) guarantees at least one run
        best.unwrap_or_else(|| KMeansFit {
            centroids: Vec::new(),
            labels: Vec::new(),
            inertia: 0.0,
        })
    }
}

impl Cluster for KMeans {
    fn cluster(&self, points: &[Rgb], target: usize) -> Clustering {
        let hist = ColorHistogram::new(points);
        if hist.is_empty() || target == 0 {
            return Clustering::from_centers(vec![0; points.len()], Vec::new());
        }

        let fit = self.fit(&hist.points(), &hist.weights(), target);
        tracing::debug!(
            clusters = target,
            distinct_colors = hist.len(),
            inertia = fit.inertia,
            "k-means converged"
        );

        Clustering::from_centers(hist.expand(&fit.labels), fit.centroids)
    }
}

/// Mean of the per-channel weighted variances.
fn mean_variance(points: &[Point], weights: &[f64]) -> f64 {
    let Some(mean) = weighted_mean(points.iter().zip(weights.iter().copied())) else {
        return 0.0;
    };
    let total: f64 = weights.iter().sum();
    let mut var = [0.0; 3];
    for (p, &w) in points.iter().zip(weights) {
        for c in 0..3 {
            let d = p[c] - mean[c];
            var[c] += w * d * d;
        }
    }
    (var[0] + var[1] + var[2]) / (3.0 * total)
}

/// k-means++ seeding: each new seed is drawn with probability proportional
/// to weight × squared distance from the nearest seed chosen so far.
fn plus_plus_seeds(points: &[Point], weights: &[f64], k: usize, rng: &mut StdRng) -> Vec<Point> {
    let mut seeds = Vec::with_capacity(k);
    seeds.push(points[sample_index(weights.iter().copied(), rng)]);

    let mut closest: Vec<f64> = points.iter().map(|p| dist_sq(p, &seeds[0])).collect();

    while seeds.len() < k {
        let scores = closest.iter().zip(weights).map(|(d, w)| d * w);
        let total: f64 = scores.clone().sum();

        // Every point already coincides with a seed: fewer distinct
        // colors than clusters. Duplicate the first seed.
        let next = if total > 0.0 {
            points[sample_index(scores, rng)]
        } else {
            seeds[0]
        };

        for (d, p) in closest.iter_mut().zip(points) {
            *d = d.min(dist_sq(p, &next));
        }
        seeds.push(next);
    }

    seeds
}

/// Draw an index with probability proportional to its score.
fn sample_index(scores: impl Iterator<Item = f64> + Clone, rng: &mut StdRng) -> usize {
    let total: f64 = scores.clone().sum();
    let target = rng.gen::<f64>() * total;
    let mut acc = 0.0;
    let mut last_positive = 0;
    for (i, s) in scores.enumerate() {
        if s <= 0.0 {
            continue;
        }
        acc += s;
        last_positive = i;
        if acc > target {
            return i;
        }
    }
    last_positive
}

fn lloyd(
    points: &[Point],
    weights: &[f64],
    mut centroids: Vec<Point>,
    max_iter: usize,
    tol: f64,
) -> KMeansFit {
    let k = centroids.len();
    let mut labels = vec![0usize; points.len()];
    let mut dists = vec![0.0f64; points.len()];

    for iter in 0..max_iter {
        for (i, p) in points.iter().enumerate() {
            let (label, d) = nearest(p, &centroids);
            labels[i] = label;
            dists[i] = d;
        }

        let mut sums = vec![[0.0f64; 3]; k];
        let mut mass = vec![0.0f64; k];
        for ((p, &w), &label) in points.iter().zip(weights).zip(&labels) {
            sums[label][0] += p[0] * w;
            sums[label][1] += p[1] * w;
            sums[label][2] += p[2] * w;
            mass[label] += w;
        }

        let mut shift = 0.0;
        for c in 0..k {
            let updated = if mass[c] > 0.0 {
                [sums[c][0] / mass[c], sums[c][1] / mass[c], sums[c][2] / mass[c]]
            } else {
                // Empty cluster: move it onto the point worst served by its centroid.
                match farthest_point(&dists) {
                    Some(far) => {
                        dists[far] = 0.0;
                        points[far]
                    }
                    None => centroids[c],
                }
            };
            shift += dist_sq(&centroids[c], &updated);
            centroids[c] = updated;
        }

        if shift <= tol {
            tracing::trace!(iterations = iter + 1, "Lloyd iterations converged");
            break;
        }
    }

    let mut inertia = 0.0;
    for (i, p) in points.iter().enumerate() {
        let (label, d) = nearest(p, &centroids);
        labels[i] = label;
        inertia += d * weights[i];
    }

    KMeansFit {
        centroids,
        labels,
        inertia,
    }
}

fn farthest_point(dists: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &d) in dists.iter().enumerate() {
        if d > 0.0 && best.map_or(true, |(_, bd)| d > bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}
