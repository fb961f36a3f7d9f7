//! Test module for end-to-end and replay tests.
//!
//! - **Integration tests**: drive the simulation through `step` and
//!   `on_overlap` the way a host engine would
//! - **Determinism tests**: identical inputs produce identical event logs
//! - **Helper functions**: utilities for test setup
//!
//! # Test Structure
//!
//! - `integration.rs`: movement, collisions, freeze, and destruction
//! - `determinism.rs`: replay checks
//! - `helpers.rs`: factory functions and state readers

mod determinism;
mod helpers;

pub use helpers::*;
