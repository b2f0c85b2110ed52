//! I/O helpers for poller commands.

pub mod ci_output;
pub mod config;
pub mod release_feed;
pub mod state_store;
