//! Tolerances for 3D geometry.

/// Geometry configuration (tolerances).
///
/// - `eps_parallel`: relative magnitude below which a dot/cross product counts as
///   zero (line parallel to plane, zero normal component, parallel directions).
///   Compared against the product of the input norms.
/// - `eps_coincident`: distance slack when deciding whether a parallel line lies
///   in a plane, or two parallel planes coincide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub eps_parallel: f64,
    pub eps_coincident: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_parallel: 1e-12,
            eps_coincident: 1e-9,
        }
    }
}

impl GeomCfg {
    /// Exact comparisons (all tolerances zero).
    #[inline]
    pub fn exact() -> Self {
        Self {
            eps_parallel: 0.0,
            eps_coincident: 0.0,
        }
    }

    /// `|x| <= eps_parallel * scale`, where `scale` is the product of the norms
    /// that `x` was computed from.
    #[inline]
    pub(crate) fn is_parallel(&self, x: f64, scale: f64) -> bool {
        x.abs() <= self.eps_parallel * scale
    }
}
