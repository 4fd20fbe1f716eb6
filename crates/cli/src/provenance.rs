//! `<artifact>.provenance.json` records for everything `vt` writes.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One written file.
#[derive(Debug, Serialize)]
pub struct Output {
    pub path: String,
    pub bytes: u64,
}

/// Provenance record: which build of `vt` ran which command with what inputs.
#[derive(Debug, Serialize)]
pub struct Sidecar {
    pub tool: &'static str,
    pub version: &'static str,
    pub code_rev: String,
    pub command: &'static str,
    pub tag: Option<String>,
    pub params: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    pub outputs: Vec<Output>,
}

impl Sidecar {
    pub fn new(command: &'static str, params: Value, tag: Option<String>) -> Self {
        Self {
            tool: "vt",
            version: vector_tools::VERSION,
            code_rev: code_rev(),
            command,
            tag,
            params,
            summary: None,
            outputs: Vec::new(),
        }
    }

    /// Attach per-run counts (e.g. the batch summary).
    pub fn with_summary<S: Serialize>(mut self, summary: &S) -> Result<Self> {
        self.summary = Some(serde_json::to_value(summary)?);
        Ok(self)
    }

    /// Record `artifact` as the output and write the sidecar next to it.
    pub fn write_next_to(mut self, artifact: &Path) -> Result<PathBuf> {
        let bytes = fs::metadata(artifact)
            .with_context(|| format!("stat {}", artifact.display()))?
            .len();
        self.outputs.push(Output {
            path: artifact.to_string_lossy().into_owned(),
            bytes,
        });
        let path = sidecar_path(artifact);
        fs::write(&path, serde_json::to_vec_pretty(&self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `hits.csv` -> `hits.provenance.json`.
pub fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Provenance block for `vt report` (no artifact).
pub fn report_block(tag: Option<String>) -> Result<Value> {
    Ok(serde_json::to_value(Sidecar::new(
        "report",
        Value::Object(Default::default()),
        tag,
    ))?)
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
fn code_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
