//! Line/plane and plane/plane intersections.
//!
//! Line-plane solve: substitute the parametric line into the plane equation.
//!
//! ```text
//! D = A(a t + x0) + B(b t + y0) + C(c t + z0)
//!   = t (A a + B b + C c) + (A x0 + B y0 + C z0)
//!   = t t_term + const_term
//! ```
//!
//! With `t_term != 0` the unique parameter is `t = (D - const_term) / t_term`.
//! Otherwise the line is parallel to the plane and either misses it
//! (`D != const_term`) or lies within it (`D == const_term`).

use nalgebra::Vector3;

use super::cfg::GeomCfg;
use super::error::GeomError;
use super::line::Line3;
use super::plane::Plane3;

/// Parameter `t` at which `line` meets `plane`.
///
/// Errors:
/// - `NoSolution` when the line is parallel to the plane and off it.
/// - `InfiniteSolutions` when the line lies within the plane.
pub fn line_plane_param(line: &Line3, plane: &Plane3, cfg: GeomCfg) -> Result<f64, GeomError> {
    let (a, b, c, d) = plane.coefficients();
    let (la, lb, lc, x0, y0, z0) = line.coefficients();
    let t_term = a * la + b * lb + c * lc;
    let const_term = a * x0 + b * y0 + c * z0;
    let n_len = plane.n.norm();
    if !cfg.is_parallel(t_term, n_len * line.d.norm()) {
        return Ok((d - const_term) / t_term);
    }
    // |D - const_term| / |n| is the distance from the line to the plane.
    if (d - const_term).abs() <= cfg.eps_coincident * n_len {
        Err(GeomError::infinite("the line lies within the plane"))
    } else {
        Err(GeomError::none("the line does not intersect the plane"))
    }
}

/// Point where `line` meets `plane`, using `cfg` tolerances.
pub fn intersect_line_plane_cfg(
    line: &Line3,
    plane: &Plane3,
    cfg: GeomCfg,
) -> Result<Vector3<f64>, GeomError> {
    line_plane_param(line, plane, cfg).map(|t| line.at(t))
}

/// Point where `line` meets `plane` with default tolerances.
#[inline]
pub fn intersect_line_plane(line: &Line3, plane: &Plane3) -> Result<Vector3<f64>, GeomError> {
    intersect_line_plane_cfg(line, plane, GeomCfg::default())
}

/// Line of intersection of two planes.
///
/// Direction is `n1 × n2`; the returned base point is the point of the line
/// closest to the origin:
///
/// `x = (d1 (n2 × u) + d2 (u × n1)) / |u|²`, with `u = n1 × n2`.
///
/// Parallel planes give `NoSolution` (distinct) or `InfiniteSolutions` (coincident).
pub fn intersect_plane_plane(
    p1: &Plane3,
    p2: &Plane3,
    cfg: GeomCfg,
) -> Result<Line3, GeomError> {
    let u = p1.n.cross(&p2.n);
    let scale = p1.n.norm() * p2.n.norm();
    if cfg.is_parallel(u.norm(), scale) {
        return if p1.signed_distance(p2.p).abs() <= cfg.eps_coincident {
            Err(GeomError::infinite("the planes coincide"))
        } else {
            Err(GeomError::none("the planes are parallel"))
        };
    }
    let base = (p2.n.cross(&u) * p1.d() + u.cross(&p1.n) * p2.d()) / u.norm_squared();
    Ok(Line3::new(base, u))
}
