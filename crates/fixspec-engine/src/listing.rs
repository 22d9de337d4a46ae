//! Recursive read-only listings over a subtree.
//!
//! Every listing walks the subtree pre-order (a scope before its children,
//! children in insertion order) and concatenates per-scope contributions.
//! Unregistered scopes contribute nothing of their own but are still
//! descended into. Listings that look at fixed status go through the
//! all-or-none predicate and fail on partially fixed variables.

use fixspec_core::{ScopeId, VarId};
use fixspec_tree::{ModelTree, TreeError};

use crate::registry::{Registry, Replacement};

/// Registered state variables of `scope` and all its descendants.
pub fn list_state_vars(
    tree: &ModelTree,
    registry: &Registry,
    scope: ScopeId,
) -> Result<Vec<VarId>, TreeError> {
    let mut out = Vec::new();
    for s in tree.subtree(scope)? {
        if let Some(set) = registry.state_vars(s) {
            out.extend(set.iter().copied());
        }
    }
    Ok(out)
}

/// State variables that are currently fixed.
pub fn list_fixed_state_vars(
    tree: &ModelTree,
    registry: &Registry,
    scope: ScopeId,
) -> Result<Vec<VarId>, TreeError> {
    filter_fixed(tree, list_state_vars(tree, registry, scope)?, true)
}

/// State variables that are currently free, i.e. replaced by some other
/// specification and now only initial guesses.
pub fn list_guesses(
    tree: &ModelTree,
    registry: &Registry,
    scope: ScopeId,
) -> Result<Vec<VarId>, TreeError> {
    filter_fixed(tree, list_state_vars(tree, registry, scope)?, false)
}

/// Replacement logs of `scope` and all its descendants.
pub fn list_replacements(
    tree: &ModelTree,
    registry: &Registry,
    scope: ScopeId,
) -> Result<Vec<Replacement>, TreeError> {
    let mut out = Vec::new();
    for s in tree.subtree(scope)? {
        out.extend_from_slice(registry.log(s));
    }
    Ok(out)
}

/// Variables in the subtree that are free and not a state variable of
/// their owning scope: what is left for the solver to compute and could
/// serve as a substitute.
pub fn list_available_vars(
    tree: &ModelTree,
    registry: &Registry,
    scope: ScopeId,
) -> Result<Vec<VarId>, TreeError> {
    let mut out = Vec::new();
    for var in tree.vars_in(scope)? {
        if !registry.is_own_state_var(tree, var)? && !tree.is_fixed(var)? {
            out.push(var);
        }
    }
    Ok(out)
}

fn filter_fixed(tree: &ModelTree, vars: Vec<VarId>, fixed: bool) -> Result<Vec<VarId>, TreeError> {
    let mut out = Vec::with_capacity(vars.len());
    for var in vars {
        if tree.is_fixed(var)? == fixed {
            out.push(var);
        }
    }
    Ok(out)
}
