//! Gaussian mixture clustering fitted with expectation-maximisation.

use super::histogram::ColorHistogram;
use super::kmeans::{KMeans, DEFAULT_SEED};
use super::point::Point;
use super::{Cluster, Clustering};
use crate::color::Rgb;

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Mixture-model clustering with diagonal covariances.
///
/// Components are initialised from a single k-means run and refined with EM
/// until the mean log-likelihood improves by less than `tolerance`. Pixels
/// are labelled with their most responsible component; the palette is the
/// component means. A component that ends up owning no pixel still keeps its
/// palette slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianMixture {
    /// Seed for the k-means initialisation
    pub seed: u64,
    /// Upper bound on EM iterations
    pub max_iter: usize,
    /// Convergence threshold on the mean log-likelihood
    pub tolerance: f64,
    /// Added to every variance to keep components from collapsing
    pub reg_covar: f64,
}

impl Default for GaussianMixture {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_iter: 100,
            tolerance: 1e-3,
            reg_covar: 1e-6,
        }
    }
}

/// Parameters of one diagonal Gaussian.
#[derive(Debug, Clone, Copy)]
struct Component {
    weight: f64,
    mean: Point,
    var: Point,
}

impl Component {
    fn log_density(&self, x: &Point) -> f64 {
        let mut acc = 0.0;
        for c in 0..3 {
            let d = x[c] - self.mean[c];
            acc += LN_2PI + self.var[c].ln() + d * d / self.var[c];
        }
        self.weight.ln() - 0.5 * acc
    }
}

impl GaussianMixture {
    /// M-step: re-estimate components from responsibilities.
    fn maximise(&self, pts: &[Point], weights: &[f64], resp: &[Vec<f64>], k: usize) -> Vec<Component> {
        let total: f64 = weights.iter().sum();
        (0..k)
            .map(|j| {
                let nk: f64 = resp
                    .iter()
                    .zip(weights)
                    .map(|(r, w)| r[j] * w)
                    .sum::<f64>()
                    + 10.0 * f64::EPSILON;

                let mut mean = [0.0; 3];
                for ((p, r), w) in pts.iter().zip(resp).zip(weights) {
                    for c in 0..3 {
                        mean[c] += r[j] * w * p[c];
                    }
                }
                for m in &mut mean {
                    *m /= nk;
                }

                let mut var = [0.0; 3];
                for ((p, r), w) in pts.iter().zip(resp).zip(weights) {
                    for c in 0..3 {
                        let d = p[c] - mean[c];
                        var[c] += r[j] * w * d * d;
                    }
                }
                for v in &mut var {
                    *v = *v / nk + self.reg_covar;
                }

                Component {
                    weight: nk / total,
                    mean,
                    var,
                }
            })
            .collect()
    }

    /// E-step: responsibilities per point and the mean log-likelihood.
    fn expect(pts: &[Point], weights: &[f64], comps: &[Component], resp: &mut [Vec<f64>]) -> f64 {
        let total: f64 = weights.iter().sum();
        let mut ll = 0.0;
        for ((p, w), r) in pts.iter().zip(weights).zip(resp.iter_mut()) {
            for (slot, comp) in r.iter_mut().zip(comps) {
                *slot = comp.log_density(p);
            }
            let norm = log_sum_exp(r);
            for slot in r.iter_mut() {
                *slot = (*slot - norm).exp();
            }
            ll += w * norm;
        }
        ll / total
    }
}

impl Cluster for GaussianMixture {
    fn cluster(&self, points: &[Rgb], target: usize) -> Clustering {
        let hist = ColorHistogram::new(points);
        if hist.is_empty() || target == 0 {
            return Clustering::from_centers(vec![0; points.len()], Vec::new());
        }

        let pts = hist.points();
        let weights = hist.weights();
        let k = target;

        let init = KMeans {
            seed: self.seed,
            restarts: 1,
            ..KMeans::default()
        }
        .fit(&pts, &weights, k);

        let mut resp: Vec<Vec<f64>> = init
            .labels
            .iter()
            .map(|&label| {
                let mut r = vec![0.0; k];
                r[label] = 1.0;
                r
            })
            .collect();

        let mut comps = self.maximise(&pts, &weights, &resp, k);
        let mut previous = f64::NEG_INFINITY;
        for iter in 0..self.max_iter {
            let ll = Self::expect(&pts, &weights, &comps, &mut resp);
            comps = self.maximise(&pts, &weights, &resp, k);
            if (ll - previous).abs() < self.tolerance {
                tracing::debug!(iterations = iter + 1, log_likelihood = ll, "EM converged");
                break;
            }
            previous = ll;
        }

        Self::expect(&pts, &weights, &comps, &mut resp);
        let labels: Vec<usize> = resp.iter().map(|r| argmax(r)).collect();

        Clustering::from_centers(hist.expand(&labels), comps.iter().map(|c| c.mean).collect())
    }
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

/// Index of the largest value, first one on ties.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_component_fit() {
        let mut points = Vec::new();
        for i in 0..40u8 {
            points.push(Rgb::new(10 + i % 4, 200, 10 + i % 3));
            points.push(Rgb::new(200, 20 + i % 5, 180 + i % 2));
        }
        let result = GaussianMixture::default().cluster(&points, 2);
        assert_eq!(result.representatives.len(), 2);
        for (i, &a) in result.assignments.iter().enumerate() {
            assert_eq!(a, result.assignments[i % 2], "point {i}");
        }
        assert_ne!(result.assignments[0], result.assignments[1]);

        let green = result.representatives[result.assignments[0]];
        assert!(green.g > 190 && green.r < 20, "{green:?}");
    }

    #[test]
    fn test_single_color_input() {
        let points = vec![Rgb::new(5, 6, 7); 9];
        let result = GaussianMixture::default().cluster(&points, 1);
        assert_eq!(result.representatives, vec![Rgb::new(5, 6, 7)]);
        assert_eq!(result.assignments, vec![0; 9]);
    }

    #[test]
    fn test_log_sum_exp_stable() {
        let v = [-1000.0, -1000.0];
        assert!((log_sum_exp(&v) - (-1000.0 + 2f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_argmax_first_on_tie() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
    }
}
