pub use cgmath;
pub use path::{
    create_cubic_path_2d, CubicPath2d, CubicPathBuilder, DiagnosticSink, LogDiagnostics,
    NoDiagnostics, PathError, Profile, DEFAULT_DISTANCE_STEP,
};
pub use util::Interval;

pub mod math;
mod path;
mod util;
