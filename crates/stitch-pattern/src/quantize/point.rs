//! Small vector helpers for clustering in RGB space.

pub(crate) type Point = [f64; 3];

#[inline]
pub(crate) fn dist_sq(a: &Point, b: &Point) -> f64 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    let d2 = a[2] - b[2];
    d0 * d0 + d1 * d1 + d2 * d2
}

/// Index of the closest centre and its squared distance.
///
/// Ties go to the lowest index. `centres` must not be empty.
#[inline]
pub(crate) fn nearest(p: &Point, centres: &[Point]) -> (usize, f64) {
    let mut best = 0;
    let mut best_dist = f64::MAX;
    for (i, c) in centres.iter().enumerate() {
        let d = dist_sq(p, c);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    (best, best_dist)
}

/// Weighted mean of `points`. `None` when the total weight is zero.
pub(crate) fn weighted_mean<'a>(
    points: impl Iterator<Item = (&'a Point, f64)>,
) -> Option<Point> {
    let mut sum = [0.0; 3];
    let mut total = 0.0;
    for (p, w) in points {
        sum[0] += p[0] * w;
        sum[1] += p[1] * w;
        sum[2] += p[2] * w;
        total += w;
    }
    (total > 0.0).then(|| [sum[0] / total, sum[1] / total, sum[2] / total])
}
