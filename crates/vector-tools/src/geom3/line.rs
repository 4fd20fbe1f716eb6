//! Parametric lines in R³.

use std::fmt;

use nalgebra::Vector3;

use super::error::GeomError;
use super::vec::fmt_vec3;

/// Line `x(t) = p + t d`.
///
/// Parametric form:
/// - `x = a t + x0`
/// - `y = b t + y0`
/// - `z = c t + z0`
///
/// with `(a, b, c) = d` and `(x0, y0, z0) = p`.
///
/// Invariants:
/// - `d` is not normalized.
/// - `try_new`/`from_two_points` guarantee a finite, nonzero `d`; `new` does not check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line3 {
    pub p: Vector3<f64>,
    pub d: Vector3<f64>,
}

impl Line3 {
    #[inline]
    pub fn new(p: Vector3<f64>, d: Vector3<f64>) -> Self {
        Self { p, d }
    }

    /// Checked constructor: rejects a zero or non-finite direction and a non-finite position.
    pub fn try_new(p: Vector3<f64>, d: Vector3<f64>) -> Result<Self, GeomError> {
        if !p.iter().all(|x| x.is_finite()) {
            return Err(GeomError::degenerate("line position is not finite"));
        }
        let len = d.norm();
        if !len.is_finite() || len <= 0.0 {
            return Err(GeomError::degenerate("line direction is zero or not finite"));
        }
        Ok(Self { p, d })
    }

    /// Line through `a` (at `t = 0`) and `b` (at `t = 1`).
    pub fn from_two_points(a: Vector3<f64>, b: Vector3<f64>) -> Result<Self, GeomError> {
        Self::try_new(a, b - a)
            .map_err(|_| GeomError::degenerate("two coincident points do not define a line"))
    }

    /// Parametric coefficients `(a, b, c, x0, y0, z0)`.
    #[inline]
    pub fn coefficients(&self) -> (f64, f64, f64, f64, f64, f64) {
        (self.d.x, self.d.y, self.d.z, self.p.x, self.p.y, self.p.z)
    }

    #[inline]
    pub fn x(&self, t: f64) -> f64 {
        t * self.d.x + self.p.x
    }

    #[inline]
    pub fn y(&self, t: f64) -> f64 {
        t * self.d.y + self.p.y
    }

    #[inline]
    pub fn z(&self, t: f64) -> f64 {
        t * self.d.z + self.p.z
    }

    /// Position on the line at parameter `t`.
    #[inline]
    pub fn at(&self, t: f64) -> Vector3<f64> {
        Vector3::new(self.x(t), self.y(t), self.z(t))
    }

    /// Parameter of the orthogonal projection of `q` onto the line.
    ///
    /// Pre: `d != 0` (checked constructors guarantee it).
    #[inline]
    pub fn closest_param(&self, q: Vector3<f64>) -> f64 {
        (q - self.p).dot(&self.d) / self.d.norm_squared()
    }

    #[inline]
    pub fn closest_point(&self, q: Vector3<f64>) -> Vector3<f64> {
        self.at(self.closest_param(q))
    }

    /// Distance from `q` to the line: `|(q - p) × d| / |d|`.
    #[inline]
    pub fn distance_to_point(&self, q: Vector3<f64>) -> f64 {
        (q - self.p).cross(&self.d).norm() / self.d.norm()
    }

    /// Directions parallel (or antiparallel) within `eps`, measured as the sine of
    /// the angle between them.
    pub fn is_parallel_eps(&self, other: &Line3, eps: f64) -> bool {
        let denom = self.d.norm() * other.d.norm();
        if denom <= 0.0 {
            return false;
        }
        self.d.cross(&other.d).norm() / denom <= eps
    }

    #[inline]
    pub fn contains_eps(&self, q: Vector3<f64>, eps: f64) -> bool {
        self.distance_to_point(q) <= eps
    }
}

impl fmt::Display for Line3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line3(position={}, direction={})",
            fmt_vec3(&self.p),
            fmt_vec3(&self.d)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::vector;

    #[test]
    fn parametric_equations() {
        let l = Line3::new(vector![1.0, 2.0, 3.0], vector![4.0, 5.0, 6.0]);
        assert_eq!(l.x(2.0), 9.0);
        assert_eq!(l.y(2.0), 12.0);
        assert_eq!(l.z(2.0), 15.0);
        assert_eq!(l.at(0.0), l.p);
        assert_eq!(l.coefficients(), (4.0, 5.0, 6.0, 1.0, 2.0, 3.0));
    }

    #[test]
    fn two_points_span_unit_interval() {
        let a = vector![1.0, 1.0, 1.0];
        let b = vector![3.0, -1.0, 2.0];
        let l = Line3::from_two_points(a, b).unwrap();
        assert_eq!(l.at(0.0), a);
        assert_relative_eq!(l.at(1.0), b, epsilon = 1e-15);
        assert!(matches!(
            Line3::from_two_points(a, a),
            Err(GeomError::Degenerate { .. })
        ));
    }

    #[test]
    fn try_new_rejects_bad_direction() {
        assert!(Line3::try_new(Vector3::zeros(), Vector3::zeros()).is_err());
        assert!(Line3::try_new(Vector3::zeros(), vector![f64::NAN, 0.0, 1.0]).is_err());
        assert!(Line3::try_new(vector![f64::INFINITY, 0.0, 0.0], vector![1.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn distance_and_projection() {
        // z-axis
        let l = Line3::new(Vector3::zeros(), vector![0.0, 0.0, 2.0]);
        let q = vector![3.0, 4.0, 10.0];
        assert_relative_eq!(l.distance_to_point(q), 5.0, epsilon = 1e-12);
        assert_relative_eq!(l.closest_param(q), 5.0, epsilon = 1e-12);
        assert_relative_eq!(l.closest_point(q), vector![0.0, 0.0, 10.0], epsilon = 1e-12);
        assert!(l.contains_eps(vector![0.0, 0.0, -7.0], 1e-12));
        assert!(!l.contains_eps(q, 1e-9));
    }

    #[test]
    fn parallel_detection() {
        let a = Line3::new(Vector3::zeros(), vector![1.0, 2.0, 3.0]);
        let b = Line3::new(vector![5.0, 0.0, 0.0], vector![-2.0, -4.0, -6.0]);
        let c = Line3::new(Vector3::zeros(), vector![1.0, 0.0, 0.0]);
        assert!(a.is_parallel_eps(&b, 1e-12));
        assert!(!a.is_parallel_eps(&c, 1e-12));
    }

    #[test]
    fn display_format() {
        let l = Line3::new(vector![1.0, 2.0, 3.0], vector![0.5, 0.0, -1.0]);
        assert_eq!(
            l.to_string(),
            "Line3(position=<1, 2, 3>, direction=<0.5, 0, -1>)"
        );
    }
}
