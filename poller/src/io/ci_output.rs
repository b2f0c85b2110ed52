//! CI orchestrator outputs for the check command.
//!
//! Two conventions are emitted: legacy `::set-output` workflow markers on
//! stdout and, when the runner provides one, `key=value` lines appended to
//! the output file named by `GITHUB_OUTPUT`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Outputs published after a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutputs {
    pub new_version: Option<String>,
}

impl CheckOutputs {
    pub fn new(new_version: Option<&str>) -> Self {
        Self {
            new_version: new_version.map(str::to_string),
        }
    }

    pub fn has_new_version(&self) -> bool {
        self.new_version.is_some()
    }

    /// Output pairs in emission order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(version) = &self.new_version {
            pairs.push(("new_version", version.clone()));
        }
        pairs.push(("has_new_version", self.has_new_version().to_string()));
        pairs
    }

    /// Legacy inline workflow markers, one per line.
    pub fn legacy_markers(&self) -> Vec<String> {
        self.pairs()
            .into_iter()
            .map(|(key, value)| format!("::set-output name={key}::{value}"))
            .collect()
    }

    /// `key=value` lines for the output file, newline-terminated.
    pub fn output_file_lines(&self) -> String {
        self.pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect()
    }
}

/// Print markers to `out` and append to `output_file` when present.
pub fn emit_outputs(
    out: &mut impl Write,
    outputs: &CheckOutputs,
    output_file: Option<&Path>,
) -> Result<()> {
    for marker in outputs.legacy_markers() {
        writeln!(out, "{marker}").context("write output markers")?;
    }
    if let Some(path) = output_file {
        append_output_file(path, outputs)?;
    }
    Ok(())
}

fn append_output_file(path: &Path, outputs: &CheckOutputs) -> Result<()> {
    debug!(path = %path.display(), has_new_version = outputs.has_new_version(), "appending ci outputs");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open ci output file {}", path.display()))?;
    file.write_all(outputs.output_file_lines().as_bytes())
        .with_context(|| format!("append ci output file {}", path.display()))?;
    Ok(())
}
