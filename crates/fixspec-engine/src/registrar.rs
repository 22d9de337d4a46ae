//! State-variable registration.

use fixspec_core::{ScopeId, VarId};
use fixspec_tree::{ModelTree, TreeError};
use indexmap::IndexSet;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::error::RegistryError;
use crate::registry::Registry;

/// Register `vars` as the state variables of `scope`.
///
/// Every variable is fixed (even if it already was) and the degrees of
/// freedom of `scope` are checked: negative always fails, positive fails
/// unless `allow_dof` is set. `allow_dof` is for scopes whose remaining
/// freedom is closed by other scopes, typically through an upstream
/// connection into their inlets.
///
/// Atomic: ownership and re-registration are checked before anything is
/// fixed, and a failed DOF check puts the previous fixed flags back.
pub fn register(
    tree: &mut ModelTree,
    registry: &mut Registry,
    scope: ScopeId,
    vars: &[VarId],
    allow_dof: bool,
) -> Result<(), RegistryError> {
    let path = tree.scope_path(scope)?;
    if registry.is_registered(scope) {
        return Err(RegistryError::AlreadyRegistered { scope, path });
    }
    for &var in vars {
        if tree.var_scope(var)? != scope {
            return Err(RegistryError::ScopeMismatch {
                var,
                name: tree.var_path(var)?,
                scope: path,
            });
        }
    }

    let previous: Vec<(VarId, SmallVec<[bool; 4]>)> = vars
        .iter()
        .map(|&var| Ok((var, tree.fixed_mask(var)?)))
        .collect::<Result<_, TreeError>>()?;
    for &var in vars {
        tree.fix(var)?;
    }

    let dof = tree.degrees_of_freedom(scope)?;
    debug!(scope = %path, dof, allow_dof, "registration DOF check");
    if dof < 0 || (dof > 0 && !allow_dof) {
        for (var, mask) in &previous {
            tree.set_fixed_mask(*var, mask)?;
        }
        warn!(scope = %path, dof, "registration rejected, fixed flags restored");
        return Err(RegistryError::DofError { scope: path, dof });
    }

    let set: IndexSet<VarId> = vars.iter().copied().collect();
    info!(scope = %path, state_vars = set.len(), dof, "scope registered");
    registry.insert(scope, set);
    Ok(())
}

/// The all-or-none fixed predicate of the tree, re-exported for callers
/// that only hold the engine.
pub fn is_fixed(tree: &ModelTree, var: VarId) -> Result<bool, TreeError> {
    tree.is_fixed(var)
}
