//! Staged initialization of a registered scope.
//!
//! Two solves bootstrap good starting values:
//!
//! 1. **State variables**: fix the registered state variables of the scope
//!    and solve. This is the configuration the unit was designed around,
//!    so it is the most likely to converge from poor guesses.
//! 2. **Replacements**: for every replacement logged on the scope whose
//!    substitute lives inside it, fix the substitute and free the original,
//!    then solve again from the values phase 1 produced.
//!
//! A non-optimal solve stops the sequence. [`staged_initialize`] does not
//! put back the caller's specification on failure; [`initialize`] wraps
//! it in a snapshot/restore so the fixed set is always what it was before,
//! and holds the inlet state fed into the scope from outside.
//!
//! Neighbouring scopes are assumed to be initialized already.

use fixspec_core::{ScopeId, Termination};
use fixspec_tree::ModelTree;
use tracing::{debug, info, warn};

use crate::error::{InitError, InitPhase};
use crate::ports::fix_inlets;
use crate::registry::Registry;

/// External nonlinear solver.
///
/// Only [`Termination::Optimal`] counts as success. The solver may change
/// values of free components but should leave fixed flags alone.
pub trait Solver {
    /// Solve the subsystem rooted at `scope`.
    fn solve(&mut self, tree: &mut ModelTree, scope: ScopeId) -> Termination;
}

impl<F> Solver for F
where
    F: FnMut(&mut ModelTree, ScopeId) -> Termination,
{
    fn solve(&mut self, tree: &mut ModelTree, scope: ScopeId) -> Termination {
        self(tree, scope)
    }
}

/// Run both initialization phases on `scope`.
///
/// Fails with [`InitError::NotRegistered`] when the scope has neither state
/// variables nor a replacement log. On an [`InitError::Initialization`]
/// the fixed flags are left as the failing phase set them.
pub fn staged_initialize<S: Solver + ?Sized>(
    tree: &mut ModelTree,
    registry: &Registry,
    scope: ScopeId,
    solver: &mut S,
) -> Result<(), InitError> {
    let path = tree.scope_path(scope)?;
    if !registry.has_entry(scope) {
        return Err(InitError::NotRegistered { scope: path });
    }

    if let Some(vars) = registry.state_vars(scope) {
        for &var in vars {
            tree.fix(var)?;
        }
    }
    run_phase(tree, scope, &path, InitPhase::StateVars, solver)?;

    let mut swapped = 0usize;
    for r in registry.log(scope) {
        if tree.is_within(tree.var_scope(r.substitute)?, scope)? {
            tree.fix(r.substitute)?;
            tree.unfix(r.original)?;
            swapped += 1;
        }
    }
    debug!(scope = %path, swapped, "replacement anchors applied");
    run_phase(tree, scope, &path, InitPhase::Replacements, solver)?;

    info!(scope = %path, "initialization complete");
    Ok(())
}

/// [`staged_initialize`] between a snapshot and a restore.
///
/// Everything in the subtree is freed before staging, then the inlets fed
/// from outside the subtree are held (see [`fix_inlets`]). During the
/// solves only that feed state, the registered state variables and the
/// replacement anchors are fixed. The snapshot is restored whether staging
/// succeeds or not: the fixed set and fixed values come back exactly, while
/// free components keep the values the solves produced.
pub fn initialize<S: Solver + ?Sized>(
    tree: &mut ModelTree,
    registry: &Registry,
    scope: ScopeId,
    solver: &mut S,
) -> Result<(), InitError> {
    let state = tree.snapshot(scope)?;
    let result = hold_feed(tree, scope)
        .and_then(|()| staged_initialize(tree, registry, scope, solver));
    tree.restore(scope, &state)?;
    if let Err(err) = &result {
        warn!(scope = %tree.scope_path(scope)?, error = %err, "specification restored after failed initialization");
    }
    result
}

fn hold_feed(tree: &mut ModelTree, scope: ScopeId) -> Result<(), InitError> {
    tree.unfix_all(scope)?;
    fix_inlets(tree, scope)?;
    Ok(())
}

fn run_phase<S: Solver + ?Sized>(
    tree: &mut ModelTree,
    scope: ScopeId,
    path: &str,
    phase: InitPhase,
    solver: &mut S,
) -> Result<(), InitError> {
    let dof = tree.degrees_of_freedom(scope)?;
    debug!(scope = %path, %phase, dof, "solving");
    let termination = solver.solve(tree, scope);
    if !termination.is_optimal() {
        warn!(scope = %path, %phase, %termination, "initialization solve failed");
        return Err(InitError::Initialization {
            scope: path.to_owned(),
            phase,
            termination,
        });
    }
    info!(scope = %path, %phase, "initialization phase solved");
    Ok(())
}
