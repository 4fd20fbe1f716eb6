//! Seeded random lines and planes (replay tokens).
//!
//! Purpose
//! - Deterministic inputs for the CLI `sample` command, property tests, and
//!   benches. A `(seed, index)` token always reproduces the same draw.
//!
//! Model
//! - Directions and normals are uniform on the unit sphere (normalized Gaussian
//!   triples via Box-Muller, rejecting near-zero samples).
//! - Base points are uniform in the cube `[-r, r]^3`, `r = position_radius`.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::line::Line3;
use super::plane::Plane3;

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SampleCfg {
    /// Half-width of the cube that base points are drawn from. Clamped to
    /// `[0, f64::MAX]`; NaN counts as zero.
    pub position_radius: f64,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            position_radius: 1.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Token with the same seed and a different index.
    #[inline]
    pub fn with_index(self, index: u64) -> Self {
        Self { index, ..self }
    }

    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn gaussian<R: Rng>(rng: &mut R) -> f64 {
    // Box-Muller; u1 in (0, 1] keeps ln finite.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Uniformly distributed unit vector.
pub fn unit_direction<R: Rng>(rng: &mut R) -> Vector3<f64> {
    loop {
        let v = Vector3::new(gaussian(rng), gaussian(rng), gaussian(rng));
        let len = v.norm();
        if len > 1e-9 {
            return v / len;
        }
    }
}

fn point_in_cube<R: Rng>(rng: &mut R, r: f64) -> Vector3<f64> {
    let r = if r.is_nan() { 0.0 } else { r.clamp(0.0, f64::MAX) };
    if r == 0.0 {
        return Vector3::zeros();
    }
    // Scale a unit-cube draw; `-r..=r` overflows its width for r near f64::MAX.
    Vector3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
    ) * r
}

/// Random line with a unit direction.
pub fn draw_line(cfg: SampleCfg, tok: ReplayToken) -> Line3 {
    let mut rng = tok.to_std_rng();
    let p = point_in_cube(&mut rng, cfg.position_radius);
    let d = unit_direction(&mut rng);
    Line3::new(p, d)
}

/// Random plane with a unit normal.
pub fn draw_plane(cfg: SampleCfg, tok: ReplayToken) -> Plane3 {
    let mut rng = tok.to_std_rng();
    let p = point_in_cube(&mut rng, cfg.position_radius);
    let n = unit_direction(&mut rng);
    Plane3::new(p, n)
}
