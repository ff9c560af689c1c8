use super::Point2d;
use cgmath::prelude::*;
use itertools::Itertools;

/// Computes the cumulative straight-line distance along a point sequence.
///
/// The result has one entry per point, starting at zero. A repeated point
/// produces a repeated entry, which a strictly-increasing consumer will
/// reject.
pub fn cumulative_chord_lengths(points: &[Point2d]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(points.len());
    if !points.is_empty() {
        distances.push(0.0);
    }
    let mut total = 0.0;
    for (p1, p2) in points.iter().tuple_windows() {
        total += (*p2 - *p1).magnitude();
        distances.push(total);
    }
    distances
}

/// Builds the half-open arithmetic progression `[0, step, 2*step, ..) < length`.
pub fn resample_grid(length: f64, step: f64) -> Vec<f64> {
    assert!(step > 0.0, "step must be positive");
    (0u64..)
        .map(|i| i as f64 * step)
        .take_while(|&s| s < length)
        .collect()
}
