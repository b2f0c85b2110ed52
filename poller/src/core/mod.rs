//! Deterministic, pure logic for release reconciliation.
//!
//! Core modules must be free of I/O side effects. The current time is passed
//! in by callers so outcomes are reproducible in tests.

pub mod reconcile;
pub mod types;
