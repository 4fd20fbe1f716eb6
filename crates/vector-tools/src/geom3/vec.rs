//! Vector helpers over `nalgebra::Vector3<f64>`.
//!
//! Arithmetic (`+`, `-`, scalar `*`, negation) comes from nalgebra directly;
//! this module adds checked construction and the products used by lines/planes.

use nalgebra::Vector3;

use super::error::GeomError;

/// Build a vector from a slice of exactly three components.
pub fn vec3_from_slice(xs: &[f64]) -> Result<Vector3<f64>, GeomError> {
    match xs {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(GeomError::Shape {
            expected: 3,
            found: xs.len(),
        }),
    }
}

/// Cross product `a × b` (perpendicular to both).
///
/// `(a.y b.z - a.z b.y, a.z b.x - a.x b.z, a.x b.y - a.y b.x)`
#[inline]
pub fn cross(a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    a.cross(&b)
}

/// Dot product `a · b`.
#[inline]
pub fn dot(a: Vector3<f64>, b: Vector3<f64>) -> f64 {
    a.dot(&b)
}

/// Euclidean norm (magnitude).
#[inline]
pub fn norm(v: Vector3<f64>) -> f64 {
    v.norm()
}

/// Unit vector in the direction of `v`; zero or non-finite input is degenerate.
pub fn normalized(v: Vector3<f64>) -> Result<Vector3<f64>, GeomError> {
    let len = v.norm();
    if !len.is_finite() || len <= 0.0 {
        return Err(GeomError::degenerate("cannot normalize a zero or non-finite vector"));
    }
    Ok(v / len)
}

/// Angle between `a` and `b` in `[0, π]`.
pub fn angle_between(a: Vector3<f64>, b: Vector3<f64>) -> Result<f64, GeomError> {
    let ua = normalized(a)?;
    let ub = normalized(b)?;
    // atan2 form stays accurate near 0 and π where acos loses digits.
    Ok(ua.cross(&ub).norm().atan2(ua.dot(&ub)))
}

/// Render as `<x, y, z>`.
pub fn fmt_vec3(v: &Vector3<f64>) -> String {
    format!("<{}, {}, {}>", v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn from_slice_checks_length() {
        let v = vec3_from_slice(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v, vector![1.0, 2.0, 3.0]);
        assert_eq!(
            vec3_from_slice(&[1.0, 2.0]),
            Err(GeomError::Shape {
                expected: 3,
                found: 2
            })
        );
        assert!(vec3_from_slice(&[0.0; 4]).is_err());
    }

    #[test]
    fn products_on_basis() {
        let i = vector![1.0, 0.0, 0.0];
        let j = vector![0.0, 1.0, 0.0];
        assert_eq!(cross(i, j), vector![0.0, 0.0, 1.0]);
        assert_eq!(dot(i, j), 0.0);
        assert_eq!(norm(vector![3.0, 4.0, 0.0]), 5.0);
    }

    #[test]
    fn normalize_zero_is_degenerate() {
        assert!(matches!(
            normalized(Vector3::zeros()),
            Err(GeomError::Degenerate { .. })
        ));
        let u = normalized(vector![0.0, 0.0, 2.0]).unwrap();
        assert!((u - vector![0.0, 0.0, 1.0]).norm() < 1e-15);
    }

    #[test]
    fn angles() {
        let th = angle_between(vector![1.0, 0.0, 0.0], vector![0.0, 3.0, 0.0]).unwrap();
        assert!((th - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        let th = angle_between(vector![1.0, 0.0, 0.0], vector![-2.0, 0.0, 0.0]).unwrap();
        assert!((th - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn display_format() {
        assert_eq!(fmt_vec3(&vector![1.5, -2.0, 0.25]), "<1.5, -2, 0.25>");
    }
}
