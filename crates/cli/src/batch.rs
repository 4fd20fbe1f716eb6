//! CSV batch mode: many lines against one plane.
//!
//! Input columns: `px,py,pz,dx,dy,dz` (extra columns are ignored).
//! Output columns: `ix,iy,iz,t,kind`; coordinates and `t` are null unless `kind == "point"`.

use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use nalgebra::Vector3;
use polars::prelude::*;
use serde::Serialize;
use vector_tools::geom3::{GeomCfg, Line3, Plane3};

use crate::scene::{classify, Intersection};

const INPUT_COLUMNS: [&str; 6] = ["px", "py", "pz", "dx", "dy", "dz"];

/// Per-run counts, logged and recorded in provenance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub points: usize,
    pub none: usize,
    pub infinite: usize,
    pub degenerate: usize,
}

/// Read line rows from a CSV file.
///
/// Rows whose direction is zero come back as `None` so that row indices stay aligned.
pub fn read_lines(path: &Path) -> Result<Vec<Option<Line3>>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(INPUT_COLUMNS.len());
    for name in INPUT_COLUMNS {
        let series = df
            .column(name)
            .with_context(|| format!("missing column {name}"))?
            .cast(&DataType::Float64)?;
        let values = series
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.ok_or_else(|| anyhow!("null in column {name} at row {row}")))
            .collect::<Result<Vec<f64>>>()?;
        columns.push(values);
    }
    let lines = (0..df.height())
        .map(|row| {
            let p = Vector3::new(columns[0][row], columns[1][row], columns[2][row]);
            let d = Vector3::new(columns[3][row], columns[4][row], columns[5][row]);
            Line3::try_new(p, d).ok()
        })
        .collect();
    Ok(lines)
}

/// Intersect every row with `plane` and write the result table to `out`.
pub fn run_batch(input: &Path, plane: &Plane3, cfg: GeomCfg, out: &Path) -> Result<BatchSummary> {
    let lines = read_lines(input)?;
    let mut summary = BatchSummary {
        rows: lines.len(),
        ..Default::default()
    };
    let mut ix: Vec<Option<f64>> = Vec::with_capacity(lines.len());
    let mut iy: Vec<Option<f64>> = Vec::with_capacity(lines.len());
    let mut iz: Vec<Option<f64>> = Vec::with_capacity(lines.len());
    let mut ts: Vec<Option<f64>> = Vec::with_capacity(lines.len());
    let mut kinds: Vec<&str> = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        let Some(line) = line else {
            tracing::warn!(row, "degenerate line (zero direction)");
            summary.degenerate += 1;
            ix.push(None);
            iy.push(None);
            iz.push(None);
            ts.push(None);
            kinds.push("degenerate");
            continue;
        };
        let res = classify(line, plane, cfg)?;
        let hit = match &res {
            Intersection::Point { point, t } => {
                summary.points += 1;
                Some((*point, *t))
            }
            Intersection::Miss { .. } => {
                summary.none += 1;
                None
            }
            Intersection::Contained { .. } => {
                summary.infinite += 1;
                None
            }
        };
        ix.push(hit.map(|(p, _)| p[0]));
        iy.push(hit.map(|(p, _)| p[1]));
        iz.push(hit.map(|(p, _)| p[2]));
        ts.push(hit.map(|(_, t)| t));
        kinds.push(res.kind());
    }

    let mut table = df!(
        "ix" => ix,
        "iy" => iy,
        "iz" => iz,
        "t" => ts,
        "kind" => kinds
    )?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file)
        .finish(&mut table)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn batch_classifies_rows() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lines.csv");
        fs::write(
            &input,
            "px,py,pz,dx,dy,dz\n\
             0,0,0,0,0,1\n\
             0,0,1,1,0,0\n\
             0,0,2,1,0,0\n\
             1,1,1,0,0,0\n",
        )
        .unwrap();
        let out = dir.path().join("out/hits.csv");
        // z = 2
        let plane = Plane3::new(vector![0.0, 0.0, 2.0], vector![0.0, 0.0, 1.0]);
        let summary = run_batch(&input, &plane, GeomCfg::default(), &out).unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                rows: 4,
                points: 1,
                none: 1,
                infinite: 1,
                degenerate: 1,
            }
        );
        let written = fs::read_to_string(&out).unwrap();
        let mut rows = written.lines();
        assert_eq!(rows.next(), Some("ix,iy,iz,t,kind"));
        let first = rows.next().unwrap();
        assert!(first.ends_with("point"));
        assert_eq!(rows.next(), Some(",,,,none"));
        assert_eq!(rows.next(), Some(",,,,infinite"));
        assert_eq!(written.lines().filter(|r| r.ends_with("degenerate")).count(), 1);
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.csv");
        fs::write(&input, "px,py,pz\n0,0,0\n").unwrap();
        let err = read_lines(&input).unwrap_err();
        assert!(format!("{err:#}").contains("dx"));
    }
}
