//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};
pub use cubic::CubicFn;
pub use curve::ParametricCurve2d;
pub use spline::{CubicSpline2d, NaturalCubicSpline, SplineError};
pub use util::{cumulative_chord_lengths, resample_grid};

mod cubic;
mod curve;
mod spline;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
