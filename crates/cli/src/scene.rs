//! Scene files, vector arguments, and JSON results.

use std::path::Path;

use anyhow::{Context, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use vector_tools::geom3::{line_plane_param, vec3_from_slice, GeomCfg, GeomError, Line3, Plane3};

/// Parse `"x,y,z"` into a vector (clap value parser).
pub fn parse_vec3(s: &str) -> Result<Vector3<f64>, String> {
    let xs = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|e| format!("invalid number in {s:?}: {e}"))?;
    vec3_from_slice(&xs).map_err(|e| e.to_string())
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LineSpec {
    pub point: Vec<f64>,
    pub direction: Vec<f64>,
}

impl LineSpec {
    pub fn to_line(&self) -> Result<Line3, GeomError> {
        Line3::try_new(vec3_from_slice(&self.point)?, vec3_from_slice(&self.direction)?)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlaneSpec {
    pub point: Vec<f64>,
    pub normal: Vec<f64>,
}

impl PlaneSpec {
    pub fn to_plane(&self) -> Result<Plane3, GeomError> {
        Plane3::try_new(vec3_from_slice(&self.point)?, vec3_from_slice(&self.normal)?)
    }
}

/// A line and a plane, as read from `vt intersect --scene`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Scene {
    pub line: LineSpec,
    pub plane: PlaneSpec,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading scene {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn resolve(&self) -> Result<(Line3, Plane3)> {
        let line = self.line.to_line().context("scene line")?;
        let plane = self.plane.to_plane().context("scene plane")?;
        Ok((line, plane))
    }
}

/// Outcome of a line/plane solve, as emitted on stdout and in files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intersection {
    Point { point: [f64; 3], t: f64 },
    #[serde(rename = "none")]
    Miss { reason: String },
    #[serde(rename = "infinite")]
    Contained { reason: String },
}

impl Intersection {
    pub fn kind(&self) -> &'static str {
        match self {
            Intersection::Point { .. } => "point",
            Intersection::Miss { .. } => "none",
            Intersection::Contained { .. } => "infinite",
        }
    }
}

/// Solve and classify; only degenerate input is an error.
pub fn classify(line: &Line3, plane: &Plane3, cfg: GeomCfg) -> Result<Intersection, GeomError> {
    match line_plane_param(line, plane, cfg) {
        Ok(t) => {
            let x = line.at(t);
            Ok(Intersection::Point {
                point: [x.x, x.y, x.z],
                t,
            })
        }
        Err(e @ GeomError::NoSolution { .. }) => Ok(Intersection::Miss {
            reason: e.to_string(),
        }),
        Err(e @ GeomError::InfiniteSolutions { .. }) => Ok(Intersection::Contained {
            reason: e.to_string(),
        }),
        Err(e) => Err(e),
    }
}
