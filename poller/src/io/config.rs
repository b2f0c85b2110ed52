//! Poller configuration stored in `release-poller.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "release-poller.toml";
pub const DEFAULT_RELEASES_URL: &str =
    "https://api.github.com/repos/comfyanonymous/ComfyUI/releases";

/// Poller configuration (TOML).
///
/// Every field is optional; a missing file or key falls back to the
/// pipeline's defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PollerConfig {
    /// Endpoint returning the upstream release list, newest first.
    pub releases_url: String,

    /// Path of the persisted version state.
    pub state_file: PathBuf,

    /// Environment variable holding the feed credential.
    pub token_env: String,

    /// Environment variable naming the CI output file.
    pub output_env: String,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            state_file: PathBuf::from("versions.json"),
            token_env: "GITHUB_TOKEN".to_string(),
            output_env: "GITHUB_OUTPUT".to_string(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub releases_url: Option<String>,
    pub state_file: Option<PathBuf>,
}

impl PollerConfig {
    pub fn validate(&self) -> Result<()> {
        let url = self.releases_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(anyhow!("releases_url must be an http(s) URL"));
        }
        if self.state_file.as_os_str().is_empty() {
            return Err(anyhow!("state_file must be non-empty"));
        }
        if self.token_env.trim().is_empty() {
            return Err(anyhow!("token_env must be non-empty"));
        }
        if self.output_env.trim().is_empty() {
            return Err(anyhow!("output_env must be non-empty"));
        }
        Ok(())
    }

    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self> {
        if let Some(url) = &overrides.releases_url {
            self.releases_url = url.clone();
        }
        if let Some(state_file) = &overrides.state_file {
            self.state_file = state_file.clone();
        }
        self.validate()?;
        Ok(self)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `PollerConfig::default()`.
pub fn load_config(path: &Path) -> Result<PollerConfig> {
    if !path.exists() {
        let cfg = PollerConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PollerConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
