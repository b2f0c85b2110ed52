//! Command implementations shared by the `release-poller` and `mark-built` binaries.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::check::{check_for_new_release, describe};
use crate::core::reconcile::MarkOutcome;
use crate::io::ci_output::{CheckOutputs, emit_outputs};
use crate::io::config::{ConfigOverrides, PollerConfig, load_config};
use crate::io::release_feed::{GithubReleaseFeed, token_from_env};
use crate::mark::mark_version_built;

/// Load config from `path` and apply command-line overrides.
pub fn resolve_config(path: &Path, overrides: &ConfigOverrides) -> Result<PollerConfig> {
    let cfg = load_config(path)?.with_overrides(overrides)?;
    debug!(config = ?cfg, "config resolved");
    Ok(cfg)
}

/// Local wall-clock time, the timestamp format kept in `versions.json`.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Poll the release feed and publish CI outputs.
pub fn run_check(cfg: &PollerConfig) -> Result<()> {
    println!("Checking for new releases...");

    let token = token_from_env(&cfg.token_env);
    let feed = GithubReleaseFeed::new(cfg.releases_url.clone(), token)
        .context("build release feed client")?;
    let outcome = check_for_new_release(&cfg.state_file, &feed, local_now())?;
    println!("{}", describe(&outcome));

    let output_file = std::env::var_os(&cfg.output_env).map(PathBuf::from);
    let outputs = CheckOutputs::new(outcome.new_version());
    emit_outputs(&mut io::stdout().lock(), &outputs, output_file.as_deref())
}

/// Record `version` as built.
pub fn run_mark_built(cfg: &PollerConfig, version: &str) -> Result<()> {
    match mark_version_built(&cfg.state_file, version, local_now())? {
        MarkOutcome::Marked => println!("Marked version {version} as built"),
        MarkOutcome::AlreadyBuilt => println!("Version {version} already marked as built"),
    }
    Ok(())
}
