//! Test utilities for fixspec development.
//!
//! Provides unit-operation [`fixtures`] built directly on a
//! [`ModelTree`](fixspec_tree::ModelTree), a [`ScriptedSolver`] that plays
//! back a fixed sequence of terminations, and [`init_tracing`] for
//! readable engine logs in failing tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod solver;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub use fixtures::{Heater, PinnedUnit, SingularUnit, TwoHeaters, Valve};
pub use solver::{ScriptedSolver, SolveCall};

static TRACING: Once = Once::new();

/// Install a fmt subscriber that writes through the test harness.
///
/// Honours `RUST_LOG`, defaulting to `fixspec_engine=debug`. Safe to call from
/// every test; only the first call installs anything.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fixspec_engine=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}
