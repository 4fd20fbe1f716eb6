use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use nalgebra::Vector3;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use vector_tools::geom3::rand::{draw_line, draw_plane, ReplayToken, SampleCfg};
use vector_tools::geom3::{GeomCfg, Line3, Plane3};

mod batch;
mod provenance;
mod scene;

/// Upper bound for `vt sample --count`.
const MAX_SAMPLE_COUNT: u64 = 1_000_000;

use provenance::Sidecar;
use scene::{classify, parse_vec3, Scene};

#[derive(Parser)]
#[command(name = "vt")]
#[command(about = "3D vector geometry: lines, planes, and their intersections")]
struct Cmd {
    /// Free-form label; propagated to logs and provenance sidecars
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(flatten)]
    tol: TolArgs,

    #[command(subcommand)]
    action: Action,
}

/// Overrides for `GeomCfg` tolerances.
#[derive(Args, Clone, Copy, Debug, Default)]
struct TolArgs {
    /// Relative threshold for "parallel" (line vs. plane, plane normals, collinear points)
    #[arg(long, global = true)]
    eps_parallel: Option<f64>,
    /// Distance slack for "line lies in plane" / "planes coincide"
    #[arg(long, global = true)]
    eps_coincident: Option<f64>,
}

impl TolArgs {
    fn geom_cfg(self) -> GeomCfg {
        let mut cfg = GeomCfg::default();
        if let Some(eps) = self.eps_parallel {
            cfg.eps_parallel = eps;
        }
        if let Some(eps) = self.eps_coincident {
            cfg.eps_coincident = eps;
        }
        cfg
    }
}

#[derive(Subcommand)]
enum Action {
    /// Intersect a line with a plane
    Intersect {
        /// JSON scene: {"line": {"point", "direction"}, "plane": {"point", "normal"}}
        #[arg(long, conflicts_with_all = ["line_point", "line_dir", "plane_point", "plane_normal"])]
        scene: Option<PathBuf>,
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        line_point: Option<Vector3<f64>>,
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        line_dir: Option<Vector3<f64>>,
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        plane_point: Option<Vector3<f64>>,
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        plane_normal: Option<Vector3<f64>>,
        /// Write the result here (with a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Plane through three points, printed as a x + b y + c z = d
    Plane {
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        a: Vector3<f64>,
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        b: Vector3<f64>,
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        c: Vector3<f64>,
    },
    /// Intersect every line of a CSV (px,py,pz,dx,dy,dz) with one plane
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        plane_point: Vector3<f64>,
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        plane_normal: Vector3<f64>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Draw seeded random line/plane pairs and intersect them
    Sample {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 10)]
        count: u64,
        /// Base points are drawn from [-radius, radius]^3
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    run(Cmd::parse())
}

fn run(cmd: Cmd) -> Result<()> {
    let cfg = cmd.tol.geom_cfg();
    let tag = cmd.tag;
    match cmd.action {
        Action::Intersect {
            scene,
            line_point,
            line_dir,
            plane_point,
            plane_normal,
            out,
        } => {
            let (line, plane) = match scene {
                Some(path) => Scene::load(&path)?.resolve()?,
                None => {
                    let (Some(lp), Some(ld), Some(pp), Some(pn)) =
                        (line_point, line_dir, plane_point, plane_normal)
                    else {
                        bail!("either --scene or all of --line-point, --line-dir, --plane-point, --plane-normal are required");
                    };
                    (Line3::try_new(lp, ld)?, Plane3::try_new(pp, pn)?)
                }
            };
            intersect(line, plane, cfg, out.as_deref(), tag)
        }
        Action::Plane { a, b, c } => {
            let doc = plane(a, b, c, cfg)?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
        Action::Batch {
            input,
            plane_point,
            plane_normal,
            out,
        } => run_batch(&input, plane_point, plane_normal, cfg, &out, tag),
        Action::Sample {
            seed,
            count,
            radius,
            out,
        } => sample(seed, count, radius, cfg, out.as_deref(), tag),
        Action::Report => {
            println!(
                "{}",
                serde_json::to_string_pretty(&provenance::report_block(tag)?)?
            );
            Ok(())
        }
    }
}

fn intersect(
    line: Line3,
    plane: Plane3,
    cfg: GeomCfg,
    out: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    let res = classify(&line, &plane, cfg)?;
    tracing::info!(%line, %plane, kind = res.kind(), tag = ?tag, "intersect");
    let params = json!({
        "line": {"point": line.p.as_slice(), "direction": line.d.as_slice()},
        "plane": {"point": plane.p.as_slice(), "normal": plane.n.as_slice()},
        "eps_parallel": cfg.eps_parallel,
        "eps_coincident": cfg.eps_coincident,
    });
    emit(&serde_json::to_value(&res)?, out, Sidecar::new("intersect", params, tag))
}

fn plane(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>, cfg: GeomCfg) -> Result<Value> {
    let pl = Plane3::from_three_points_cfg(a, b, c, cfg)?;
    let (pa, pb, pc, pd) = pl.coefficients();
    tracing::info!(plane = %pl, "plane");
    Ok(json!({
        "a": pa,
        "b": pb,
        "c": pc,
        "d": pd,
        "point": pl.p.as_slice(),
        "normal": pl.n.as_slice(),
        "display": pl.to_string(),
    }))
}

fn run_batch(
    input: &Path,
    plane_point: Vector3<f64>,
    plane_normal: Vector3<f64>,
    cfg: GeomCfg,
    out: &Path,
    tag: Option<String>,
) -> Result<()> {
    let plane = Plane3::try_new(plane_point, plane_normal)?;
    let summary = batch::run_batch(input, &plane, cfg, out)?;
    tracing::info!(
        rows = summary.rows,
        points = summary.points,
        none = summary.none,
        infinite = summary.infinite,
        degenerate = summary.degenerate,
        tag = ?tag,
        "batch"
    );
    let params = json!({
        "input": input.to_string_lossy(),
        "plane": {"point": plane.p.as_slice(), "normal": plane.n.as_slice()},
        "eps_parallel": cfg.eps_parallel,
        "eps_coincident": cfg.eps_coincident,
    });
    let prov = Sidecar::new("batch", params, tag)
        .with_summary(&summary)?
        .write_next_to(out)?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), "wrote");
    Ok(())
}

fn sample(
    seed: u64,
    count: u64,
    radius: f64,
    cfg: GeomCfg,
    out: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
        bail!("--radius must be finite and non-negative, got {radius}");
    }
    if count > MAX_SAMPLE_COUNT {
        bail!("--count must be at most {MAX_SAMPLE_COUNT}, got {count}");
    }
    let scfg = SampleCfg {
        position_radius: radius,
    };
    let mut draws = Vec::new();
    for i in 0..count {
        // Even indices for lines, odd for planes, so pairs never share a stream.
        let line = draw_line(scfg, ReplayToken::new(seed, 2 * i));
        let plane = draw_plane(scfg, ReplayToken::new(seed, 2 * i + 1));
        let res = classify(&line, &plane, cfg)?;
        draws.push(json!({
            "index": i,
            "line": {"point": line.p.as_slice(), "direction": line.d.as_slice()},
            "plane": {"point": plane.p.as_slice(), "normal": plane.n.as_slice()},
            "result": res,
        }));
    }
    tracing::info!(seed, count, radius, tag = ?tag, "sample");
    let params = json!({
        "seed": seed,
        "count": count,
        "radius": radius,
    });
    emit(&Value::Array(draws), out, Sidecar::new("sample", params, tag))
}

/// Print `doc` to stdout, or write it to `out` together with its provenance sidecar.
fn emit(doc: &Value, out: Option<&Path>, prov: Sidecar) -> Result<()> {
    let Some(out) = out else {
        println!("{}", serde_json::to_string_pretty(doc)?);
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let prov = prov.write_next_to(out)?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), "wrote");
    Ok(())
}
