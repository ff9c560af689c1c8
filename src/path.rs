//! Cubic spline path generation through an ordered waypoint sequence.

use crate::math::{
    cumulative_chord_lengths, resample_grid, CubicSpline2d, ParametricCurve2d, Point2d,
    SplineError, Vector2d,
};
use cgmath::prelude::*;
use std::ops::BitOr;
use thiserror::Error;

/// The default arc-length spacing of the resampled path.
pub const DEFAULT_DISTANCE_STEP: f64 = 0.05;

/// Selects which outputs of a path build to compute.
///
/// The three base flags combine with `|`; all seven combinations are
/// available as named constants. There is no empty profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile(u8);

impl Profile {
    /// The resampled (x, y) positions.
    pub const PATH: Profile = Profile(0b001);
    /// The heading angle at each sample.
    pub const YAW: Profile = Profile(0b010);
    /// The signed curvature at each sample.
    pub const CURVATURE: Profile = Profile(0b100);
    /// Positions and headings.
    pub const NO_CURVATURE: Profile = Profile(0b011);
    /// Positions and curvatures.
    pub const NO_YAW: Profile = Profile(0b101);
    /// Headings and curvatures.
    pub const NO_PATH: Profile = Profile(0b110);
    /// Positions, headings and curvatures.
    pub const ALL: Profile = Profile(0b111);

    /// Returns true if every output requested by `other` is also requested
    /// by this profile.
    pub fn contains(self, other: Profile) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Profile {
    type Output = Profile;

    fn bitor(self, rhs: Profile) -> Profile {
        Profile(self.0 | rhs.0)
    }
}

/// Reasons a path cannot be built from a waypoint sequence.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// Two or more consecutive waypoints are geometrically identical, so
    /// the chord-length parameterization is not strictly increasing.
    #[error("waypoint sequence contains consecutive duplicate points")]
    ConsecutiveDuplicates,
    /// Any other spline fit failure, surfaced unmodified.
    #[error(transparent)]
    Fit(#[from] SplineError),
}

/// The outputs of a path build.
///
/// Each field is populated iff the corresponding [Profile] flag was
/// requested; populated fields all have the resample grid's length.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicPath2d {
    /// The resampled path positions.
    pub path: Option<Vec<Point2d>>,
    /// The heading at each sample, in radians within (-pi, pi].
    pub yaw: Option<Vec<f64>>,
    /// The signed curvature at each sample, counterclockwise positive.
    pub curvature: Option<Vec<f64>>,
}

/// Receives diagnostics about defective waypoint input.
///
/// The sink is purely observational: it never alters which error a build
/// returns.
pub trait DiagnosticSink {
    /// Called when a build fails on consecutive duplicate waypoints.
    ///
    /// `distinct[i]` is false iff `waypoints[i + 1]` equals `waypoints[i]`.
    fn consecutive_duplicates(&self, waypoints: &[Point2d], distinct: &[bool]);
}

/// A diagnostic sink that discards everything.
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    fn consecutive_duplicates(&self, _waypoints: &[Point2d], _distinct: &[bool]) {}
}

/// A diagnostic sink that lists the waypoints on the error log channel,
/// with the members of each duplicate run highlighted in red.
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn consecutive_duplicates(&self, waypoints: &[Point2d], distinct: &[bool]) {
        log::error!("[");
        for (i, point) in waypoints.iter().enumerate() {
            let duplicate =
                (i > 0 && !distinct[i - 1]) || (i < distinct.len() && !distinct[i]);
            if duplicate {
                log::error!("    \x1b[91m({}, {})\x1b[0m", point.x, point.y);
            } else {
                log::error!("    ({}, {})", point.x, point.y);
            }
        }
        log::error!("]");
    }
}

/// Builds a resampled cubic spline path through an ordered waypoint
/// sequence.
///
/// The waypoints are parameterized by cumulative chord length, a natural
/// cubic spline is fit through them, and the spline is resampled at a
/// fixed arc-length step. Position, yaw and curvature are derived from the
/// spline and its first two derivatives, per the requested [Profile].
pub struct CubicPathBuilder<'a> {
    profile: Profile,
    distance_step: f64,
    diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> CubicPathBuilder<'a> {
    /// Creates a builder with the default distance step and no diagnostics.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            distance_step: DEFAULT_DISTANCE_STEP,
            diagnostics: &NoDiagnostics,
        }
    }

    /// Sets the arc-length spacing of the output grid.
    ///
    /// # Panics
    /// Panics if `step` is not positive.
    pub fn distance_step(mut self, step: f64) -> Self {
        assert!(step > 0.0, "distance_step must be positive");
        self.distance_step = step;
        self
    }

    /// Sets the sink that receives duplicate-waypoint diagnostics.
    pub fn diagnostics(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Builds the path.
    ///
    /// Fails with [PathError::ConsecutiveDuplicates] when the waypoint
    /// sequence contains back-to-back duplicate points, and with
    /// [PathError::Fit] for any other fit failure, including fewer than
    /// two waypoints.
    pub fn build(&self, waypoints: &[Point2d]) -> Result<CubicPath2d, PathError> {
        let distances = cumulative_chord_lengths(waypoints);
        let total = distances.last().copied().unwrap_or(0.0);
        let steps = resample_grid(total, self.distance_step);

        let spline = match CubicSpline2d::through_points(&distances, waypoints) {
            Ok(spline) => spline,
            Err(error) => {
                let distinct: Vec<bool> =
                    waypoints.windows(2).map(|w| w[1] != w[0]).collect();
                if distinct.iter().all(|&d| d) {
                    return Err(error.into());
                }
                self.diagnostics.consecutive_duplicates(waypoints, &distinct);
                return Err(PathError::ConsecutiveDuplicates);
            }
        };

        let mut cubic_path = CubicPath2d::default();
        let mut first_derivative: Option<Vec<Vector2d>> = None;

        if self.profile.contains(Profile::PATH) {
            cubic_path.path = Some(steps.iter().map(|&s| spline.sample(s)).collect());
        }

        if self.profile.contains(Profile::YAW) {
            let velocities = first_derivative
                .get_or_insert_with(|| steps.iter().map(|&s| spline.sample_dt(s)).collect());
            cubic_path.yaw = Some(velocities.iter().map(|v| v.y.atan2(v.x)).collect());
        }

        if self.profile.contains(Profile::CURVATURE) {
            let velocities = first_derivative
                .get_or_insert_with(|| steps.iter().map(|&s| spline.sample_dt(s)).collect());
            let curvatures = steps
                .iter()
                .zip(velocities.iter())
                .map(|(&s, v)| {
                    let acceleration = spline.sample_dt2(s);
                    v.perp_dot(acceleration) / v.magnitude2().powf(1.5)
                })
                .collect();
            cubic_path.curvature = Some(curvatures);
        }

        Ok(cubic_path)
    }
}

/// Builds a path with the default distance step and no diagnostics.
pub fn create_cubic_path_2d(
    waypoints: &[Point2d],
    profile: Profile,
) -> Result<CubicPath2d, PathError> {
    CubicPathBuilder::new(profile).build(waypoints)
}
