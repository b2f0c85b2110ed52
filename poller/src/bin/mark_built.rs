//! Record a version as built after a successful downstream push.

use std::path::PathBuf;

use clap::Parser;
use release_poller::cli::{resolve_config, run_mark_built};
use release_poller::exit_codes;
use release_poller::io::config::{ConfigOverrides, DEFAULT_CONFIG_PATH};
use release_poller::logging;

#[derive(Parser)]
#[command(name = "mark-built", version, about = "Mark a version as built in versions.json")]
struct Cli {
    /// Version identifier to record.
    #[arg(id = "tag", value_name = "VERSION")]
    version: String,

    /// Config file (missing file means defaults).
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the version state file.
    #[arg(long)]
    state_file: Option<PathBuf>,
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
        releases_url: None,
        state_file: cli.state_file,
    };
    let cfg = resolve_config(&cli.config, &overrides)?;
    run_mark_built(&cfg, &cli.version)
}
