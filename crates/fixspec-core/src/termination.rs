//! Solver termination status.

use std::fmt;

/// How an external solve finished.
///
/// Only [`Termination::Optimal`] counts as success; every other status is
/// reported back to the caller unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Converged to a solution.
    Optimal,
    /// The problem was proven infeasible.
    Infeasible,
    /// Iteration limit reached before convergence.
    MaxIterations,
    /// Any other solver-specific outcome.
    Other {
        /// Solver-provided description.
        reason: String,
    },
}

impl Termination {
    /// Whether the solve counts as successful.
    pub fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimal => write!(f, "optimal"),
            Self::Infeasible => write!(f, "infeasible"),
            Self::MaxIterations => write!(f, "maximum iterations exceeded"),
            Self::Other { reason } => write!(f, "{reason}"),
        }
    }
}
