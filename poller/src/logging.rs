//! Diagnostic tracing for the poller binaries.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: request, load/save and outcome diagnostics via
//!   `RUST_LOG`, written to stderr.
//! - **Product output (`cli`, `io/ci_output`)**: status lines and
//!   `::set-output` markers on stdout, plus the `GITHUB_OUTPUT` file. Never
//!   filtered, the CI job parses them.
//! - **Recovered state errors (`io/state_store`)**: logged here at `warn` and
//!   also printed to stderr directly, so a quiet `RUST_LOG` cannot hide them.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. Falls back to `warn` when `RUST_LOG` is
/// unset or unparseable.
///
/// ```bash
/// RUST_LOG=release_poller=debug release-poller --state-file ci/versions.json
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
