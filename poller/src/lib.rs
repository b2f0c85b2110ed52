//! Release polling for CI pipelines.
//!
//! Checks an upstream release feed for a new stable version, records build
//! state in `versions.json`, and publishes outputs for the CI orchestrator.
//!
//! - **[`core`]**: Pure reconciliation of feed contents against state.
//!   No I/O, the current time is an argument.
//! - **[`io`]**: State file, HTTP release feed, CI outputs, config.
//!
//! [`check`] and [`mark`] compose the two for the binaries; [`cli`] holds the
//! command bodies both binaries share.

pub mod check;
pub mod cli;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod mark;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
