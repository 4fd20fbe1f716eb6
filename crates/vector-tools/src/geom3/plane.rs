//! Planes in R³ given by a point and a normal.

use std::fmt;

use nalgebra::Vector3;

use super::cfg::GeomCfg;
use super::error::GeomError;
use super::line::Line3;
use super::vec::fmt_vec3;

/// Coordinate axis, used to pick which coordinate a plane solve returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Plane through `p` with normal `n`: `a x + b y + c z = d`, where
/// `(a, b, c) = n` and `d = n · p`.
///
/// Invariants:
/// - `n` is not normalized.
/// - `try_new` and the derived constructors guarantee a finite, nonzero `n`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane3 {
    pub p: Vector3<f64>,
    pub n: Vector3<f64>,
}

impl Plane3 {
    #[inline]
    pub fn new(p: Vector3<f64>, n: Vector3<f64>) -> Self {
        Self { p, n }
    }

    pub fn try_new(p: Vector3<f64>, n: Vector3<f64>) -> Result<Self, GeomError> {
        if !p.iter().all(|x| x.is_finite()) {
            return Err(GeomError::degenerate("plane position is not finite"));
        }
        let len = n.norm();
        if !len.is_finite() || len <= 0.0 {
            return Err(GeomError::degenerate("plane normal is zero or not finite"));
        }
        Ok(Self { p, n })
    }

    /// Plane through `l1.p` spanned by both line directions (`n = d1 × d2`).
    ///
    /// Only the direction of `l2` is used; the caller is responsible for the lines
    /// actually being coplanar.
    pub fn from_two_lines(l1: &Line3, l2: &Line3) -> Result<Self, GeomError> {
        Self::from_two_lines_cfg(l1, l2, GeomCfg::default())
    }

    /// As [`Plane3::from_two_lines`]; directions whose cross product is below
    /// `eps_parallel * |d1| |d2|` count as parallel.
    pub fn from_two_lines_cfg(l1: &Line3, l2: &Line3, cfg: GeomCfg) -> Result<Self, GeomError> {
        let n = l1.d.cross(&l2.d);
        if cfg.is_parallel(n.norm(), l1.d.norm() * l2.d.norm()) {
            return Err(GeomError::degenerate("parallel lines do not span a plane"));
        }
        Self::try_new(l1.p, n)
            .map_err(|_| GeomError::degenerate("parallel lines do not span a plane"))
    }

    /// Plane through three points, `n = (b - a) × (c - a)`.
    pub fn from_three_points(
        a: Vector3<f64>,
        b: Vector3<f64>,
        c: Vector3<f64>,
    ) -> Result<Self, GeomError> {
        Self::from_three_points_cfg(a, b, c, GeomCfg::default())
    }

    /// As [`Plane3::from_three_points`]; the points count as collinear when
    /// `|n| <= eps_parallel * |b - a| |c - a|`.
    pub fn from_three_points_cfg(
        a: Vector3<f64>,
        b: Vector3<f64>,
        c: Vector3<f64>,
        cfg: GeomCfg,
    ) -> Result<Self, GeomError> {
        let (ab, ac) = (b - a, c - a);
        let n = ab.cross(&ac);
        if cfg.is_parallel(n.norm(), ab.norm() * ac.norm()) {
            return Err(GeomError::degenerate("collinear points do not span a plane"));
        }
        Self::try_new(a, n)
            .map_err(|_| GeomError::degenerate("collinear points do not span a plane"))
    }

    /// Implicit coefficients `(a, b, c, d)`.
    #[inline]
    pub fn coefficients(&self) -> (f64, f64, f64, f64) {
        (self.n.x, self.n.y, self.n.z, self.d())
    }

    /// Right-hand side `d = n · p`.
    #[inline]
    pub fn d(&self) -> f64 {
        self.n.dot(&self.p)
    }

    /// Solve `0 = n·(x - p)` for the coordinate on `axis`, given the other two
    /// coordinates in ascending axis order (`(y, z)` for X, `(x, z)` for Y,
    /// `(x, y)` for Z).
    ///
    /// If the normal has no component along `axis`, the plane does not constrain
    /// that coordinate: the answer is `InfiniteSolutions` when the given pair lies
    /// on the plane and `NoSolution` otherwise.
    pub fn solve_coord(&self, axis: Axis, u: f64, v: f64, cfg: GeomCfg) -> Result<f64, GeomError> {
        let k = axis.index();
        let (i, j) = match axis {
            Axis::X => (1, 2),
            Axis::Y => (0, 2),
            Axis::Z => (0, 1),
        };
        let rest = self.n[i] * (u - self.p[i]) + self.n[j] * (v - self.p[j]);
        let nk = self.n[k];
        let scale = self.n.norm();
        if cfg.is_parallel(nk, scale) {
            if rest.abs() <= cfg.eps_coincident * scale {
                return Err(GeomError::infinite(
                    "plane is parallel to the axis and contains the given coordinates",
                ));
            }
            return Err(GeomError::none(
                "plane is parallel to the axis and misses the given coordinates",
            ));
        }
        Ok(rest / -nk + self.p[k])
    }

    /// x-coordinate on the plane for the given `y`, `z`.
    #[inline]
    pub fn x(&self, y: f64, z: f64) -> Result<f64, GeomError> {
        self.solve_coord(Axis::X, y, z, GeomCfg::default())
    }

    /// y-coordinate on the plane for the given `x`, `z`.
    #[inline]
    pub fn y(&self, x: f64, z: f64) -> Result<f64, GeomError> {
        self.solve_coord(Axis::Y, x, z, GeomCfg::default())
    }

    /// z-coordinate on the plane for the given `x`, `y`.
    #[inline]
    pub fn z(&self, x: f64, y: f64) -> Result<f64, GeomError> {
        self.solve_coord(Axis::Z, x, y, GeomCfg::default())
    }

    /// Signed Euclidean distance from `q`; positive on the side `n` points to.
    #[inline]
    pub fn signed_distance(&self, q: Vector3<f64>) -> f64 {
        (self.n.dot(&q) - self.d()) / self.n.norm()
    }

    #[inline]
    pub fn contains_eps(&self, q: Vector3<f64>, eps: f64) -> bool {
        self.signed_distance(q).abs() <= eps
    }

    /// Orthogonal projection of `q` onto the plane.
    #[inline]
    pub fn project(&self, q: Vector3<f64>) -> Vector3<f64> {
        q - self.n * ((self.n.dot(&q) - self.d()) / self.n.norm_squared())
    }
}

impl fmt::Display for Plane3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Plane3(position={}, normal={})",
            fmt_vec3(&self.p),
            fmt_vec3(&self.n)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::vector;

    #[test]
    fn coefficients_match_point_normal() {
        let pl = Plane3::new(vector![1.0, 2.0, 3.0], vector![2.0, -1.0, 4.0]);
        // d = 2 - 2 + 12
        assert_eq!(pl.coefficients(), (2.0, -1.0, 4.0, 12.0));
    }

    #[test]
    fn coordinate_solvers_land_on_plane() {
        let pl = Plane3::new(vector![1.0, 2.0, 3.0], vector![2.0, -1.0, 4.0]);
        let x = pl.x(5.0, -1.0).unwrap();
        assert!(pl.contains_eps(vector![x, 5.0, -1.0], 1e-12));
        let y = pl.y(0.5, 7.0).unwrap();
        assert!(pl.contains_eps(vector![0.5, y, 7.0], 1e-12));
        let z = pl.z(-3.0, 2.0).unwrap();
        assert!(pl.contains_eps(vector![-3.0, 2.0, z], 1e-12));
    }

    #[test]
    fn coordinate_solver_parallel_axis() {
        // z = 2, normal has no x or y component.
        let pl = Plane3::new(vector![0.0, 0.0, 2.0], vector![0.0, 0.0, 1.0]);
        assert!(matches!(pl.x(1.0, 2.0), Err(GeomError::InfiniteSolutions { .. })));
        assert!(matches!(pl.x(1.0, 3.0), Err(GeomError::NoSolution { .. })));
        assert!(matches!(pl.y(1.0, 2.0), Err(GeomError::InfiniteSolutions { .. })));
        assert_eq!(pl.z(10.0, -4.0), Ok(2.0));
    }

    #[test]
    fn three_points() {
        let a = vector![1.0, 0.0, 0.0];
        let b = vector![0.0, 1.0, 0.0];
        let c = vector![0.0, 0.0, 1.0];
        let pl = Plane3::from_three_points(a, b, c).unwrap();
        for q in [a, b, c] {
            assert!(pl.contains_eps(q, 1e-12));
        }
        let (_, _, _, d) = pl.coefficients();
        assert_relative_eq!(d, 1.0, epsilon = 1e-12);
        assert!(matches!(
            Plane3::from_three_points(a, a * 2.0, a * 3.0),
            Err(GeomError::Degenerate { .. })
        ));
    }

    #[test]
    fn nearly_collinear_points_are_degenerate() {
        // Rounding leaves a cross product of order 1e-16 here.
        let a = vector![0.1, 0.2, 0.3];
        assert!(matches!(
            Plane3::from_three_points(a, a * 3.0, a * 7.0),
            Err(GeomError::Degenerate { .. })
        ));
        let l1 = Line3::new(Vector3::zeros(), a);
        let l2 = Line3::new(vector![1.0, 0.0, 0.0], a * 3.0);
        assert!(matches!(
            Plane3::from_two_lines(&l1, &l2),
            Err(GeomError::Degenerate { .. })
        ));
        // A slight bend passes the default tolerance but not a loose one.
        let bent = a * 7.0 + vector![0.0, 0.0, 1e-8];
        assert!(Plane3::from_three_points(a, a * 3.0, bent).is_ok());
        let loose = GeomCfg {
            eps_parallel: 1e-6,
            ..GeomCfg::default()
        };
        assert!(Plane3::from_three_points_cfg(a, a * 3.0, bent, loose).is_err());
    }

    #[test]
    fn two_lines() {
        let l1 = Line3::new(vector![0.0, 0.0, 1.0], vector![1.0, 0.0, 0.0]);
        let l2 = Line3::new(vector![0.0, 0.0, 1.0], vector![0.0, 1.0, 0.0]);
        let pl = Plane3::from_two_lines(&l1, &l2).unwrap();
        assert_eq!(pl.n, vector![0.0, 0.0, 1.0]);
        assert_eq!(pl.d(), 1.0);
        let l3 = Line3::new(Vector3::zeros(), vector![-3.0, 0.0, 0.0]);
        assert!(Plane3::from_two_lines(&l1, &l3).is_err());
    }

    #[test]
    fn distance_and_projection() {
        let pl = Plane3::new(vector![0.0, 0.0, 1.0], vector![0.0, 0.0, 5.0]);
        assert_relative_eq!(pl.signed_distance(vector![3.0, 3.0, 4.0]), 3.0, epsilon = 1e-12);
        assert_relative_eq!(pl.signed_distance(vector![3.0, 3.0, -1.0]), -2.0, epsilon = 1e-12);
        assert_relative_eq!(
            pl.project(vector![3.0, -2.0, 9.0]),
            vector![3.0, -2.0, 1.0],
            epsilon = 1e-12
        );
    }

    #[test]
    fn display_format() {
        let pl = Plane3::new(vector![1.0, 2.0, 3.0], vector![0.0, 0.0, 1.0]);
        assert_eq!(pl.to_string(), "Plane3(position=<1, 2, 3>, normal=<0, 0, 1>)");
    }
}
