//! `release-poller` check: poll the feed and reconcile with persisted state.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::{info, instrument};

use crate::core::reconcile::{CheckOutcome, reconcile_check};
use crate::io::release_feed::ReleaseFeed;
use crate::io::state_store::{load_state, write_state};

/// Load state, fetch releases, reconcile, and persist.
///
/// State is written for every outcome so `last_checked` always advances. A
/// feed failure aborts before anything is written.
#[instrument(skip_all, fields(state = %state_path.display()))]
pub fn check_for_new_release(
    state_path: &Path,
    feed: &dyn ReleaseFeed,
    now: NaiveDateTime,
) -> Result<CheckOutcome> {
    let mut state = load_state(state_path);
    let releases = feed.fetch_releases().context("fetch releases")?;

    let outcome = reconcile_check(&mut state, &releases, now);
    info!(releases = releases.len(), outcome = ?outcome, "release check reconciled");

    write_state(state_path, &state).context("save version state")?;
    Ok(outcome)
}

/// Human-readable summary of a check outcome.
pub fn describe(outcome: &CheckOutcome) -> String {
    match outcome {
        CheckOutcome::NoStableRelease => "No stable releases found".to_string(),
        CheckOutcome::AlreadyBuilt(version) => format!("Latest version {version} already built"),
        CheckOutcome::NewVersion(version) => format!("New version found: {version}"),
    }
}
