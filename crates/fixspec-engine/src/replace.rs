//! The transactional replacement engine.
//!
//! A replacement frees a fixed state variable and fixes a free substitute
//! in its place. It only commits when the validation scope stays well
//! determined, both by count (degrees of freedom) and by structure (a
//! matching covering every active row). Counting alone is not enough: two
//! rows can collapse onto one shared unknown while another unknown is left
//! untouched, and the totals still balance.
//!
//! Every failure after the swap puts both variables' fixed flags back
//! before the error is returned; nothing is logged until all checks pass.

use fixspec_core::{ComponentRef, ScopeId, VarId};
use fixspec_incidence::{ConstraintRow, IncidenceGraph};
use fixspec_tree::{ModelTree, TreeError};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, ScopePolicy};
use crate::error::ReplaceError;
use crate::registry::{Registry, Replacement};

/// Replace the specification `state_var` with `new_var`.
///
/// Returns the validation scope, which is also the scope whose log
/// received the new [`Replacement`].
pub fn replace(
    tree: &mut ModelTree,
    registry: &mut Registry,
    config: &EngineConfig,
    state_var: VarId,
    new_var: VarId,
) -> Result<ScopeId, ReplaceError> {
    check_eligibility(tree, registry, state_var, new_var)?;

    let scope = validation_scope(tree, config.scope_policy, state_var, new_var)?;
    let path = tree.scope_path(scope)?;
    debug!(
        scope = %path,
        state_var = %tree.var_path(state_var)?,
        new_var = %tree.var_path(new_var)?,
        "validating replacement"
    );

    let before = tree.degrees_of_freedom(scope)?;
    if config.validation.is_strict() && before != 0 {
        return Err(ReplaceError::InconsistentModel {
            scope: path,
            dof: before,
        });
    }

    let state_mask = tree.fixed_mask(state_var)?;
    let new_mask = tree.fixed_mask(new_var)?;
    tree.unfix(state_var)?;
    tree.fix(new_var)?;

    if let Err(err) = validate_swap(tree, config, scope, &path, before) {
        rollback(tree, (state_var, &state_mask), (new_var, &new_mask))?;
        warn!(scope = %path, error = %err, "replacement rolled back");
        return Err(err);
    }

    registry.push_replacement(
        scope,
        Replacement {
            original: state_var,
            substitute: new_var,
        },
    );
    info!(
        scope = %path,
        original = %tree.var_path(state_var)?,
        substitute = %tree.var_path(new_var)?,
        "replacement committed"
    );
    Ok(scope)
}

/// Scope a replacement of `state_var` by `new_var` is validated and logged
/// in, under `policy`.
pub fn validation_scope(
    tree: &ModelTree,
    policy: ScopePolicy,
    state_var: VarId,
    new_var: VarId,
) -> Result<ScopeId, ReplaceError> {
    let a = tree.var_scope(state_var)?;
    let b = tree.var_scope(new_var)?;
    let scope = match policy {
        ScopePolicy::ClosestCommonAncestor => tree.common_ancestor(a, b)?,
        ScopePolicy::Root => {
            let root = tree.root_of(a)?;
            (tree.root_of(b)? == root).then_some(root)
        }
    };
    match scope {
        Some(scope) => Ok(scope),
        None => Err(ReplaceError::NoCommonScope {
            state_var: tree.var_path(state_var)?,
            new_var: tree.var_path(new_var)?,
        }),
    }
}

fn check_eligibility(
    tree: &ModelTree,
    registry: &Registry,
    state_var: VarId,
    new_var: VarId,
) -> Result<(), ReplaceError> {
    if !tree.is_fixed(state_var)? || !registry.is_own_state_var(tree, state_var)? {
        return Err(ReplaceError::NotAStateVariable {
            var: state_var,
            name: tree.var_path(state_var)?,
        });
    }
    if registry.is_own_state_var(tree, new_var)? {
        return Err(ReplaceError::AlreadyStateVariable {
            var: new_var,
            name: tree.var_path(new_var)?,
        });
    }
    if tree.is_fixed(new_var)? {
        return Err(ReplaceError::NotFree {
            var: new_var,
            name: tree.var_path(new_var)?,
        });
    }
    Ok(())
}

/// Post-swap checks: DOF, then structure.
fn validate_swap(
    tree: &ModelTree,
    config: &EngineConfig,
    scope: ScopeId,
    path: &str,
    before: i64,
) -> Result<(), ReplaceError> {
    let after = tree.degrees_of_freedom(scope)?;
    let expected = if config.validation.is_strict() { 0 } else { before };
    debug!(scope = %path, before, after, "post-swap DOF check");
    if after != expected {
        return Err(ReplaceError::DofMismatch {
            scope: path.to_owned(),
            before,
            after,
        });
    }

    let partition = IncidenceGraph::for_scope(tree, scope)?.dulmage_mendelsohn();
    debug!(
        scope = %path,
        unmatched_constraints = partition.constraints.unmatched.len(),
        unmatched_vars = partition.vars.unmatched.len(),
        "structural check"
    );
    let singular = partition.is_overdetermined()
        || (config.validation.is_strict() && partition.is_underdetermined());
    if singular {
        return Err(ReplaceError::StructuralSingularity {
            scope: path.to_owned(),
            constraints: partition
                .constraints
                .unmatched
                .iter()
                .map(|row| row_label(tree, *row))
                .collect::<Result<_, _>>()?,
            variables: partition
                .vars
                .unmatched
                .iter()
                .map(|c| component_label(tree, *c))
                .collect::<Result<_, _>>()?,
        });
    }
    Ok(())
}

fn rollback(
    tree: &mut ModelTree,
    state: (VarId, &SmallVec<[bool; 4]>),
    new: (VarId, &SmallVec<[bool; 4]>),
) -> Result<(), TreeError> {
    tree.set_fixed_mask(state.0, state.1)?;
    tree.set_fixed_mask(new.0, new.1)
}

fn row_label(tree: &ModelTree, row: ConstraintRow) -> Result<String, TreeError> {
    let path = tree.constraint_path(row.constraint)?;
    if tree.constraint(row.constraint)?.rows().len() == 1 {
        Ok(path)
    } else {
        Ok(format!("{path}[{}]", row.row))
    }
}

fn component_label(tree: &ModelTree, c: ComponentRef) -> Result<String, TreeError> {
    let path = tree.var_path(c.var)?;
    if tree.var(c.var)?.len() == 1 {
        Ok(path)
    } else {
        Ok(format!("{path}[{}]", c.index))
    }
}
