//! Version state storage (`versions.json`).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::types::VersionState;

/// Load version state from disk.
///
/// A missing file yields `VersionState::default()`. An unreadable or
/// malformed file is reported on stderr regardless of `RUST_LOG` and also
/// yields the default, so the next save replaces it.
pub fn load_state(path: &Path) -> VersionState {
    debug!(path = %path.display(), "loading version state");
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no version state yet, using defaults");
            return VersionState::default();
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read version state, using defaults");
            eprintln!(
                "Error loading {}: {}; starting from empty state",
                path.display(),
                err
            );
            return VersionState::default();
        }
    };
    match serde_json::from_str::<VersionState>(&contents) {
        Ok(state) => {
            debug!(
                built = state.built_versions.len(),
                latest = ?state.latest_version,
                "version state loaded"
            );
            state
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "malformed version state, using defaults");
            eprintln!(
                "Error loading {}: {}; starting from empty state",
                path.display(),
                err
            );
            VersionState::default()
        }
    }
}

/// Atomically write version state to disk (temp file + rename).
pub fn write_state(path: &Path, state: &VersionState) -> Result<()> {
    debug!(
        path = %path.display(),
        built = state.built_versions.len(),
        latest = ?state.latest_version,
        "writing version state"
    );
    let mut buf = serde_json::to_string_pretty(state).context("serialize version state")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("version state path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp version state {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("replace version state {}", path.display()))?;
    Ok(())
}
