//! Vector-space geometry in three dimensions.
//!
//! Vectors are plain `nalgebra::Vector3<f64>`; lines and planes are small `Copy`
//! structs over them. Every solve that can fail geometrically (parallel line and
//! plane, coincident points, zero normals) returns a `GeomError` instead of
//! dividing by zero.
//!
//! API Policy
//! - Callers should import from `prelude` or `geom3`; module internals may move.

pub mod geom3;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom3::{GeomCfg, GeomError, Line3, Plane3};
pub use nalgebra::Vector3 as Vec3;

/// Common geometry exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom3::rand::{draw_line, draw_plane, unit_direction, ReplayToken, SampleCfg};
    pub use crate::geom3::{
        cross, dot, intersect_line_plane, intersect_line_plane_cfg, intersect_plane_plane,
        line_plane_param, normalized, vec3_from_slice, GeomCfg, GeomError, Line3, Plane3,
    };
    pub use nalgebra::Vector3 as Vec3;
}
