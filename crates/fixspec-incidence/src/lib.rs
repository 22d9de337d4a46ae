//! Structural analysis of variable-constraint incidence.
//!
//! Only the 0/1 pattern of which free components appear in which active
//! rows matters here; numeric values are never consulted. [`Bipartite`] is
//! the bare graph, [`maximum_matching`] runs Hopcroft-Karp over it, and
//! [`dulmage_mendelsohn`] splits the result into under-, over- and
//! well-determined parts. [`IncidenceGraph`] builds the graph for a scope
//! of a [`ModelTree`](fixspec_tree::ModelTree) and labels the partition
//! with tree ids.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bipartite;
pub mod dm;
pub mod graph;
pub mod matching;

pub use bipartite::{Bipartite, IncidenceError};
pub use dm::{dulmage_mendelsohn, ConPartition, DmPartition, VarPartition};
pub use graph::{ConstraintRow, IncidenceGraph};
pub use matching::{maximum_matching, Matching};
