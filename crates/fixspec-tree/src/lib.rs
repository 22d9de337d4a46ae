//! Arena-backed hierarchical model tree.
//!
//! A [`ModelTree`] stores scopes, variables, constraints and ports in flat
//! arenas addressed by the ids from `fixspec-core`. Each scope keeps a
//! non-owning parent index plus its ordered children, which is enough for
//! every ancestor walk the engine needs (closest common ancestor, root
//! lookup) without reference cycles.
//!
//! The tree knows nothing about state variables or replacements. It
//! provides the primitives the engine consumes: fix/unfix, the all-or-none
//! fixed predicate, degrees-of-freedom statistics and fixed-state snapshots.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod node;
pub mod snapshot;
pub mod stats;
pub mod tree;

pub use error::TreeError;
pub use node::{Component, Constraint, Port, Row, ScopeNode, Variable};
pub use snapshot::{ComponentState, FixedState};
pub use tree::ModelTree;
