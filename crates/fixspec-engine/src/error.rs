//! Error types for registration, replacement and initialization.
//!
//! Each operation family has its own enum. All of them wrap [`TreeError`]
//! for failures of the underlying tree (unknown ids, partially fixed
//! variables) so that `?` works across the crate boundary.

use std::fmt;

use fixspec_core::{PortId, ScopeId, Termination, VarId};
use fixspec_tree::TreeError;
use thiserror::Error;

// ── RegistryError ──────────────────────────────────────────────────

/// Errors from [`register`](crate::registrar::register) and
/// [`register_inlets`](crate::ports::register_inlets).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Underlying tree access failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// A listed variable is not owned by the scope being registered.
    #[error("'{name}' is not owned by scope '{scope}'")]
    ScopeMismatch {
        /// The offending variable.
        var: VarId,
        /// Dotted path of the variable.
        name: String,
        /// Dotted path of the scope being registered.
        scope: String,
    },
    /// The scope already carries state variables.
    #[error("scope '{path}' is already registered")]
    AlreadyRegistered {
        /// The scope.
        scope: ScopeId,
        /// Dotted path of the scope.
        path: String,
    },
    /// Degrees of freedom after fixing the state variables were negative,
    /// or positive without `allow_dof`.
    #[error("scope '{scope}' has {dof} degrees of freedom after registration")]
    DofError {
        /// Dotted path of the scope.
        scope: String,
        /// Degrees of freedom observed.
        dof: i64,
    },
    /// A port in the subtree carries no direction tag.
    #[error("port '{path}' has no direction tag")]
    MissingDirectionTag {
        /// The untagged port.
        port: PortId,
        /// Dotted path of the port.
        path: String,
    },
}

// ── ReplaceError ───────────────────────────────────────────────────

/// Errors from [`replace`](crate::replace::replace).
///
/// Whenever one of these is returned, the fixed flags of both variables
/// are exactly what they were before the call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReplaceError {
    /// Underlying tree access failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The variable to replace is free, or not a registered state variable
    /// of its owning scope.
    #[error("'{name}' is not a fixed state variable of its scope")]
    NotAStateVariable {
        /// The offending variable.
        var: VarId,
        /// Dotted path of the variable.
        name: String,
    },
    /// The substitute is itself a state variable of its owning scope.
    #[error("'{name}' is already a state variable of its scope")]
    AlreadyStateVariable {
        /// The offending variable.
        var: VarId,
        /// Dotted path of the variable.
        name: String,
    },
    /// The substitute is already fixed.
    #[error("'{name}' is already fixed")]
    NotFree {
        /// The offending variable.
        var: VarId,
        /// Dotted path of the variable.
        name: String,
    },
    /// The two variables live in different trees.
    #[error("'{state_var}' and '{new_var}' share no common scope")]
    NoCommonScope {
        /// Dotted path of the state variable.
        state_var: String,
        /// Dotted path of the substitute.
        new_var: String,
    },
    /// The validation scope was not square before the swap.
    #[error("scope '{scope}' has {dof} degrees of freedom before replacement")]
    InconsistentModel {
        /// Dotted path of the validation scope.
        scope: String,
        /// Degrees of freedom observed.
        dof: i64,
    },
    /// The swap changed the degrees of freedom (strict mode: away from
    /// zero).
    #[error("replacement moved degrees of freedom of '{scope}' from {before} to {after}")]
    DofMismatch {
        /// Dotted path of the validation scope.
        scope: String,
        /// Degrees of freedom before the swap.
        before: i64,
        /// Degrees of freedom after the swap.
        after: i64,
    },
    /// The incidence graph after the swap has no complete matching.
    #[error(
        "scope '{scope}' is structurally singular: unmatched constraints [{}], unmatched variables [{}]",
        .constraints.join(", "),
        .variables.join(", ")
    )]
    StructuralSingularity {
        /// Dotted path of the validation scope.
        scope: String,
        /// Labels of the unmatched constraint rows.
        constraints: Vec<String>,
        /// Labels of unmatched variable components.
        variables: Vec<String>,
    },
}

impl ReplaceError {
    /// Whether the swap was attempted and then rolled back.
    pub fn is_rollback(&self) -> bool {
        matches!(
            self,
            Self::DofMismatch { .. } | Self::StructuralSingularity { .. }
        )
    }
}

// ── InitError ──────────────────────────────────────────────────────

/// Phase of the staged initializer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InitPhase {
    /// Solve anchored on the registered state variables.
    StateVars,
    /// Solve anchored on the substitutes of this scope's replacements.
    Replacements,
}

impl fmt::Display for InitPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StateVars => f.write_str("state variables"),
            Self::Replacements => f.write_str("replacements"),
        }
    }
}

/// Errors from [`staged_initialize`](crate::init::staged_initialize) and
/// [`initialize`](crate::init::initialize).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InitError {
    /// Underlying tree access failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The scope has neither state variables nor a replacement log.
    #[error("scope '{scope}' is not registered")]
    NotRegistered {
        /// Dotted path of the scope.
        scope: String,
    },
    /// The solver did not report an optimal termination.
    #[error("initialization of '{scope}' failed in the {phase} phase: {termination}")]
    Initialization {
        /// Dotted path of the scope.
        scope: String,
        /// The failing phase.
        phase: InitPhase,
        /// What the solver reported.
        termination: Termination,
    },
}
