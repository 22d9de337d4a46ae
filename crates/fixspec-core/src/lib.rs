//! Core identifiers and shared types for the fixspec workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! handles every other crate passes around: scope, variable, constraint and
//! port ids, the [`ComponentRef`] address of a single scalar component, the
//! [`PortDirection`] tag, and the solver [`Termination`] status.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod port;
pub mod termination;

pub use id::{ComponentRef, ConstraintId, PortId, ScopeId, VarId};
pub use port::PortDirection;
pub use termination::Termination;
