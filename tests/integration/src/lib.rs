//! Integration test utilities for the padel match server
//!
//! Spawns the full Axum application on an ephemeral port, backed by the
//! in-memory store, and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
