//! Version-state reconciliation against the upstream release feed.

use chrono::NaiveDateTime;

use crate::core::types::{ReleaseDescriptor, VersionState};

/// Result of comparing the feed with persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Feed was empty or held only prereleases.
    NoStableRelease,
    /// Newest stable release is already in `built_versions`.
    AlreadyBuilt(String),
    /// Newest stable release has not been built yet.
    NewVersion(String),
}

impl CheckOutcome {
    /// The version a downstream build should pick up, if any.
    pub fn new_version(&self) -> Option<&str> {
        match self {
            CheckOutcome::NewVersion(version) => Some(version),
            CheckOutcome::NoStableRelease | CheckOutcome::AlreadyBuilt(_) => None,
        }
    }
}

/// Result of recording a version as built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// Version was appended; state must be persisted.
    Marked,
    /// Version was already recorded; state is untouched.
    AlreadyBuilt,
}

/// First non-prerelease descriptor in feed order (newest-first).
pub fn latest_stable(releases: &[ReleaseDescriptor]) -> Option<&ReleaseDescriptor> {
    releases.iter().find(|release| release.is_stable())
}

/// Compare `releases` against `state`, stamping `last_checked` with `now`.
///
/// `last_checked` is updated for every outcome. `latest_version` is only
/// replaced when an unbuilt stable release is found.
pub fn reconcile_check(
    state: &mut VersionState,
    releases: &[ReleaseDescriptor],
    now: NaiveDateTime,
) -> CheckOutcome {
    state.last_checked = Some(now);

    let Some(latest) = latest_stable(releases) else {
        return CheckOutcome::NoStableRelease;
    };
    if state.is_built(&latest.tag_name) {
        return CheckOutcome::AlreadyBuilt(latest.tag_name.clone());
    }
    state.latest_version = Some(latest.tag_name.clone());
    CheckOutcome::NewVersion(latest.tag_name.clone())
}

/// Record `version` as built. Idempotent: a known version leaves `state` as is.
pub fn mark_built(state: &mut VersionState, version: &str, now: NaiveDateTime) -> MarkOutcome {
    if state.is_built(version) {
        return MarkOutcome::AlreadyBuilt;
    }
    state.built_versions.push(version.to_string());
    state.last_built = Some(now);
    MarkOutcome::Marked
}
