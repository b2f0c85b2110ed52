//! Test-only helpers for constructing feeds and version state.

use chrono::{NaiveDate, NaiveDateTime};

use crate::core::types::{ReleaseDescriptor, VersionState};
use crate::io::release_feed::{FeedError, ReleaseFeed};

/// Feed that returns a fixed release list.
#[derive(Debug, Clone)]
pub struct ScriptedFeed {
    releases: Vec<ReleaseDescriptor>,
}

impl ScriptedFeed {
    pub fn new(releases: Vec<ReleaseDescriptor>) -> Self {
        Self { releases }
    }
}

impl ReleaseFeed for ScriptedFeed {
    fn fetch_releases(&self) -> Result<Vec<ReleaseDescriptor>, FeedError> {
        Ok(self.releases.clone())
    }
}

/// Feed that always fails with the given error.
#[derive(Debug, Clone)]
pub struct FailingFeed(pub FeedError);

impl ReleaseFeed for FailingFeed {
    fn fetch_releases(&self) -> Result<Vec<ReleaseDescriptor>, FeedError> {
        Err(self.0.clone())
    }
}

/// Deterministic "now" for timestamp assertions.
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|date| date.and_hms_micro_opt(12, 30, 0, 250_000))
        .expect("valid fixed timestamp")
}

pub fn stable(tag: &str) -> ReleaseDescriptor {
    ReleaseDescriptor {
        tag_name: tag.to_string(),
        prerelease: false,
    }
}

pub fn prerelease(tag: &str) -> ReleaseDescriptor {
    ReleaseDescriptor {
        tag_name: tag.to_string(),
        prerelease: true,
    }
}

/// Default state with `built_versions` preset.
pub fn state_with_built(versions: &[&str]) -> VersionState {
    VersionState {
        built_versions: versions.iter().map(|v| v.to_string()).collect(),
        ..VersionState::default()
    }
}
