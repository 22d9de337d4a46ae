//! Tree-specific error types.

use fixspec_core::{ConstraintId, PortId, ScopeId, VarId};
use thiserror::Error;

/// Errors from model tree construction, lookup and fixed-state access.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A `ScopeId` that this tree never issued.
    #[error("unknown scope {scope}")]
    UnknownScope {
        /// The unrecognised scope.
        scope: ScopeId,
    },
    /// A `VarId` that this tree never issued.
    #[error("unknown variable {var}")]
    UnknownVariable {
        /// The unrecognised variable.
        var: VarId,
    },
    /// A `ConstraintId` that this tree never issued.
    #[error("unknown constraint {constraint}")]
    UnknownConstraint {
        /// The unrecognised constraint.
        constraint: ConstraintId,
    },
    /// A `PortId` that this tree never issued.
    #[error("unknown port {port}")]
    UnknownPort {
        /// The unrecognised port.
        port: PortId,
    },
    /// A component index past the end of a variable.
    #[error("component {index} out of range for variable '{name}' with {len} components")]
    ComponentOutOfRange {
        /// Dotted path of the variable.
        name: String,
        /// The requested index.
        index: u32,
        /// Number of components the variable has.
        len: usize,
    },
    /// A fixed mask whose length differs from the variable's component count.
    #[error("fixed mask of length {got} does not fit variable '{name}' with {expected} components")]
    MaskLengthMismatch {
        /// Dotted path of the variable.
        name: String,
        /// Number of components the variable has.
        expected: usize,
        /// Length of the mask that was passed.
        got: usize,
    },
    /// An indexed variable was declared with zero components.
    #[error("indexed variable '{name}' must have at least one component")]
    EmptyVariable {
        /// Local name of the variable.
        name: String,
    },
    /// A port listed a variable owned by some other scope.
    #[error("port '{port}' cannot bundle '{var}': it is not owned by the port's scope")]
    ForeignPortMember {
        /// Dotted path of the port.
        port: String,
        /// Dotted path of the offending variable.
        var: String,
    },
    /// Two ports could not be linked because their members differ in count
    /// or component cardinality.
    #[error("ports '{upstream}' and '{downstream}' have different member shapes")]
    PortShapeMismatch {
        /// Dotted path of the upstream port.
        upstream: String,
        /// Dotted path of the downstream port.
        downstream: String,
    },
    /// The downstream port already has an upstream link.
    #[error("port '{port}' is already connected")]
    AlreadyConnected {
        /// Dotted path of the downstream port.
        port: String,
    },
    /// Two ports live in different trees of the forest.
    #[error("ports '{upstream}' and '{downstream}' share no common ancestor scope")]
    DisjointPorts {
        /// Dotted path of the upstream port.
        upstream: String,
        /// Dotted path of the downstream port.
        downstream: String,
    },
    /// An indexed variable has some components fixed and some free.
    ///
    /// The fixed predicate never picks a majority; mixed state is always
    /// reported.
    #[error("variable '{name}' is partially fixed ({fixed} of {total} components)")]
    PartialFix {
        /// The offending variable.
        var: VarId,
        /// Dotted path of the variable.
        name: String,
        /// Number of fixed components.
        fixed: usize,
        /// Total number of components.
        total: usize,
    },
    /// A fixed-state snapshot was restored onto a different scope than the
    /// one it was taken from.
    #[error("snapshot of scope {taken} cannot be restored onto scope {target}")]
    SnapshotScopeMismatch {
        /// Scope the snapshot was taken from.
        taken: ScopeId,
        /// Scope passed to restore.
        target: ScopeId,
    },
}

impl TreeError {
    /// Whether this is a [`TreeError::PartialFix`].
    pub fn is_partial_fix(&self) -> bool {
        matches!(self, Self::PartialFix { .. })
    }
}
