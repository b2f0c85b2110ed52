//! `mark-built`: record a version as built in persisted state.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use tracing::{info, instrument};

use crate::core::reconcile::{MarkOutcome, mark_built};
use crate::io::state_store::{load_state, write_state};

/// Record `version` as built and persist when it was not already known.
///
/// Marking a known version is a no-op and does not rewrite the file.
#[instrument(skip_all, fields(state = %state_path.display(), version = %version))]
pub fn mark_version_built(
    state_path: &Path,
    version: &str,
    now: NaiveDateTime,
) -> Result<MarkOutcome> {
    if version.trim().is_empty() {
        bail!("version must be non-empty");
    }

    let mut state = load_state(state_path);
    let outcome = mark_built(&mut state, version, now);
    info!(outcome = ?outcome, "mark built reconciled");

    if outcome == MarkOutcome::Marked {
        write_state(state_path, &state).context("save version state")?;
    }
    Ok(outcome)
}
