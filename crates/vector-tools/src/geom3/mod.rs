//! 3D geometry: vectors, parametric lines, planes, and their intersections.
//!
//! Conventions
//! - Lines are `x = p + t d` with the direction kept at the caller's scale
//!   (no normalization), so `t` means what the caller built it to mean.
//! - Planes are `n · x = n · p`, written as `a x + b y + c z = d`; the normal is
//!   not normalized either.
//! - Zero tests go through `GeomCfg` tolerances. Parallel configurations are
//!   reported as `GeomError::NoSolution` or `GeomError::InfiniteSolutions`.
//!
//! Code cross-refs: `Line3`, `Plane3`, `intersect_line_plane`, `GeomCfg`

pub mod rand;

mod cfg;
mod error;
mod intersect;
mod line;
mod plane;
mod vec;

pub use cfg::GeomCfg;
pub use error::GeomError;
pub use intersect::{
    intersect_line_plane, intersect_line_plane_cfg, intersect_plane_plane, line_plane_param,
};
pub use line::Line3;
pub use plane::{Axis, Plane3};
pub use vec::{angle_between, cross, dot, fmt_vec3, norm, normalized, vec3_from_slice};
