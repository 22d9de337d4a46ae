//! State-variable registry, replacement engine and staged initializer.
//!
//! A scope of a [`ModelTree`](fixspec_tree::ModelTree) is first
//! [registered](registrar::register): its state variables are fixed and the
//! scope must come out with zero degrees of freedom. The
//! [replacement engine](replace::replace) then swaps which variables are
//! fixed, validating each swap by count and by bipartite matching and
//! rolling back on any failure. [Listings](listing) and the
//! [report](report::report) read the result back, and the
//! [staged initializer](init) uses the registry to sequence solves.
//!
//! Everything is available as free functions over a tree and a
//! [`Registry`], or as methods on [`Flowsheet`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod flowsheet;
pub mod init;
pub mod listing;
pub mod ports;
pub mod registrar;
pub mod registry;
pub mod replace;
pub mod report;

pub use config::{EngineConfig, ScopePolicy, ValidationMode};
pub use error::{InitError, InitPhase, RegistryError, ReplaceError};
pub use flowsheet::Flowsheet;
pub use init::{initialize, staged_initialize, Solver};
pub use listing::{
    list_available_vars, list_fixed_state_vars, list_guesses, list_replacements, list_state_vars,
};
pub use ports::{fix_inlets, register_inlets};
pub use registrar::{is_fixed, register};
pub use registry::{Registry, Replacement};
pub use replace::{replace, validation_scope};
pub use report::{report, ReplacementReport};
