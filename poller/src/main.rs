//! Release poller for CI pipelines.
//!
//! With no arguments, checks the release feed and publishes
//! `new_version`/`has_new_version` outputs. With a single version argument,
//! records that version as built in `versions.json`.

use std::path::PathBuf;

use clap::Parser;
use release_poller::cli::{resolve_config, run_check, run_mark_built};
use release_poller::exit_codes;
use release_poller::io::config::{ConfigOverrides, DEFAULT_CONFIG_PATH};
use release_poller::logging;

#[derive(Parser)]
#[command(
    name = "release-poller",
    version,
    about = "Check for a new stable upstream release and track built versions"
)]
struct Cli {
    /// Mark this version as built instead of checking the feed.
    #[arg(id = "tag", value_name = "VERSION")]
    version: Option<String>,

    /// Config file (missing file means defaults).
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the version state file.
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Override the release feed endpoint.
    #[arg(long)]
    releases_url: Option<String>,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::FAILED
        }
    };
    std::process::exit(code);
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        releases_url: cli.releases_url,
        state_file: cli.state_file,
    };
    let cfg = resolve_config(&cli.config, &overrides)?;
    match cli.version {
        Some(version) => run_mark_built(&cfg, &version),
        None => run_check(&cfg),
    }
}
