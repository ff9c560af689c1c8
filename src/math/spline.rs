use super::cubic::CubicFn;
use super::curve::ParametricCurve2d;
use super::{Point2d, Vector2d};
use crate::util::Interval;
use thiserror::Error;

/// Reasons a spline cannot be fit to the given control points.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SplineError {
    #[error("at least two knots are required, got {0}")]
    TooFewKnots(usize),
    #[error("expected {knots} values to match the knots, got {values}")]
    LengthMismatch { knots: usize, values: usize },
    #[error("knots and values must be finite")]
    NonFinite,
    #[error("knots must be strictly increasing")]
    NotIncreasing,
}

/// A piecewise-cubic interpolant through `(knot, value)` control points
/// with natural boundary conditions.
///
/// The curvature at both endpoints is zero, and the curve is C2-continuous
/// across the interior knots. Evaluation outside the knot range yields NaN.
#[derive(Clone, Debug)]
pub struct NaturalCubicSpline {
    knots: Vec<f64>,
    segments: Vec<CubicFn>,
}

impl NaturalCubicSpline {
    /// Fits a natural cubic spline through the control points.
    pub fn fit(knots: &[f64], values: &[f64]) -> Result<Self, SplineError> {
        let n = knots.len();
        if n < 2 {
            return Err(SplineError::TooFewKnots(n));
        }
        if values.len() != n {
            return Err(SplineError::LengthMismatch {
                knots: n,
                values: values.len(),
            });
        }
        if knots.iter().chain(values).any(|v| !v.is_finite()) {
            return Err(SplineError::NonFinite);
        }
        if knots.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SplineError::NotIncreasing);
        }

        let h: Vec<f64> = knots.windows(2).map(|w| w[1] - w[0]).collect();

        // Tridiagonal system for the segment curvatures. The first and last
        // rows pin the endpoint curvature to zero.
        let mut diag = vec![0.0; n];
        let mut upper = vec![0.0; n - 1];
        let mut lower = vec![0.0; n - 1];
        let mut rhs = vec![0.0; n];
        for i in 1..n - 1 {
            lower[i - 1] = h[i - 1];
            diag[i] = 2.0 * (h[i - 1] + h[i]);
            upper[i] = h[i];
            rhs[i] = 3.0 * ((values[i + 1] - values[i]) / h[i] - (values[i] - values[i - 1]) / h[i - 1]);
        }
        diag[0] = 1.0;
        diag[n - 1] = 1.0;

        let curvatures = solve_tridiagonal(&lower, &diag, &upper, &rhs);

        // Knot slopes follow from the curvatures; consecutive segments share
        // the slope at their common knot.
        let mut slopes = vec![0.0; n];
        for i in 0..n - 1 {
            slopes[i] = (values[i + 1] - values[i]) / h[i]
                - h[i] * (2.0 * curvatures[i] + curvatures[i + 1]) / 3.0;
        }
        slopes[n - 1] = slopes[n - 2] + h[n - 2] * (curvatures[n - 2] + curvatures[n - 1]);

        let segments = (0..n - 1)
            .map(|i| {
                CubicFn::fit(
                    knots[i],
                    values[i],
                    slopes[i],
                    knots[i + 1],
                    values[i + 1],
                    slopes[i + 1],
                )
            })
            .collect();

        Ok(Self {
            knots: knots.to_vec(),
            segments,
        })
    }

    /// The knot range over which the spline is defined.
    pub fn bounds(&self) -> Interval<f64> {
        Interval::new(self.knots[0], self.knots[self.knots.len() - 1])
    }

    /// Samples the spline.
    pub fn y(&self, t: f64) -> f64 {
        self.segment(t).map_or(f64::NAN, |seg| seg.y(t))
    }

    /// Samples the first derivative of the spline.
    pub fn dy(&self, t: f64) -> f64 {
        self.segment(t).map_or(f64::NAN, |seg| seg.dy(t))
    }

    /// Samples the second derivative of the spline.
    pub fn d2y(&self, t: f64) -> f64 {
        self.segment(t).map_or(f64::NAN, |seg| seg.d2y(t))
    }

    fn segment(&self, t: f64) -> Option<&CubicFn> {
        if !self.bounds().contains(t) {
            return None;
        }
        let idx = self.knots.partition_point(|&k| k <= t);
        Some(&self.segments[idx.saturating_sub(1).min(self.segments.len() - 1)])
    }
}

/// Thomas algorithm. The natural-spline system is strictly diagonally
/// dominant, so no pivoting is required.
fn solve_tridiagonal(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    c_prime[0] = upper[0] / diag[0];
    d_prime[0] = rhs[0] / diag[0];
    for i in 1..n {
        let denom = diag[i] - lower[i - 1] * c_prime[i - 1];
        if i < n - 1 {
            c_prime[i] = upper[i] / denom;
        }
        d_prime[i] = (rhs[i] - lower[i - 1] * d_prime[i - 1]) / denom;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }
    x
}

/// A vector-valued natural cubic spline through 2D points, parameterized
/// by a shared strictly-increasing knot vector.
#[derive(Clone, Debug)]
pub struct CubicSpline2d {
    x: NaturalCubicSpline,
    y: NaturalCubicSpline,
}

impl CubicSpline2d {
    /// Fits one scalar spline per coordinate over the shared knots.
    pub fn through_points(knots: &[f64], points: &[Point2d]) -> Result<Self, SplineError> {
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        Ok(Self {
            x: NaturalCubicSpline::fit(knots, &xs)?,
            y: NaturalCubicSpline::fit(knots, &ys)?,
        })
    }
}

impl ParametricCurve2d for CubicSpline2d {
    fn sample(&self, t: f64) -> Point2d {
        Point2d::new(self.x.y(t), self.y.y(t))
    }

    fn bounds(&self) -> Interval<f64> {
        self.x.bounds()
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        Vector2d::new(self.x.dy(t), self.y.dy(t))
    }

    fn sample_dt2(&self, t: f64) -> Vector2d {
        Vector2d::new(self.x.d2y(t), self.y.d2y(t))
    }
}
