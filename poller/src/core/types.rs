//! Persisted build state and upstream release descriptors.
//!
//! These types are the contract between the reconciler and the state file.
//! They carry no I/O and compare field-for-field.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Build bookkeeping persisted to `versions.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "StoredVersionState")]
pub struct VersionState {
    /// When the release feed was last polled.
    pub last_checked: Option<NaiveDateTime>,
    /// When a version was last marked built.
    pub last_built: Option<NaiveDateTime>,
    /// Versions whose downstream build has completed. Never holds duplicates.
    pub built_versions: Vec<String>,
    /// Newest stable version seen by the last check, built or not.
    pub latest_version: Option<String>,
}

impl VersionState {
    pub fn is_built(&self, version: &str) -> bool {
        self.built_versions.iter().any(|built| built == version)
    }
}

/// On-disk shape accepted when loading.
///
/// Older files were written by two tools that disagreed on the build
/// timestamp key, so both are read and folded into `last_built`. Timestamps
/// are parsed per field: one unreadable value drops only that timestamp.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredVersionState {
    #[serde(deserialize_with = "lenient_timestamp")]
    last_checked: Option<NaiveDateTime>,
    #[serde(deserialize_with = "lenient_timestamp")]
    last_built: Option<NaiveDateTime>,
    #[serde(deserialize_with = "lenient_timestamp")]
    last_pushed: Option<NaiveDateTime>,
    built_versions: Option<Vec<String>>,
    latest_version: Option<String>,
}

impl From<StoredVersionState> for VersionState {
    fn from(stored: StoredVersionState) -> Self {
        let mut built_versions: Vec<String> = Vec::new();
        for version in stored.built_versions.unwrap_or_default() {
            if !built_versions.contains(&version) {
                built_versions.push(version);
            }
        }
        Self {
            last_checked: stored.last_checked,
            last_built: stored.last_built.max(stored.last_pushed),
            built_versions,
            latest_version: stored.latest_version,
        }
    }
}

/// Accepts naive ISO date-times, RFC 3339 (converted to local wall-clock)
/// and bare dates. Anything else becomes `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => {
            let parsed = parse_timestamp(&text);
            if parsed.is_none() {
                warn!(value = %text, "unreadable timestamp in version state, dropping it");
            }
            parsed
        }
        Some(other) => {
            warn!(value = %other, "non-string timestamp in version state, dropping it");
            None
        }
    })
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(naive) = text.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    text.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// One entry of the upstream release feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    pub tag_name: String,
    #[serde(default)]
    pub prerelease: bool,
}

impl ReleaseDescriptor {
    pub fn is_stable(&self) -> bool {
        !self.prerelease
    }
}
