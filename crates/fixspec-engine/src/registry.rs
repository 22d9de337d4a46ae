//! Side-table of state-variable registrations and replacement logs.
//!
//! Registrations are keyed by [`ScopeId`] rather than stored on the tree,
//! and membership is decided by [`VarId`] identity: two variables with the
//! same name in different scopes are never confused.

use fixspec_core::{ScopeId, VarId};
use fixspec_tree::{ModelTree, TreeError};
use indexmap::{IndexMap, IndexSet};

/// One committed swap of specification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Replacement {
    /// The state variable that was freed and is now a guess.
    pub original: VarId,
    /// The variable that took over its specifying role.
    pub substitute: VarId,
}

/// State variables and replacement logs, per scope.
///
/// A scope is *registered* once it has a state-variable set. A replacement
/// log may also exist on its own, on a scope that served as a validation
/// scope without ever registering state variables.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    state_vars: IndexMap<ScopeId, IndexSet<VarId>>,
    logs: IndexMap<ScopeId, Vec<Replacement>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `scope` has a state-variable set.
    pub fn is_registered(&self, scope: ScopeId) -> bool {
        self.state_vars.contains_key(&scope)
    }

    /// Whether `scope` has a state-variable set or a replacement log.
    pub fn has_entry(&self, scope: ScopeId) -> bool {
        self.is_registered(scope) || self.logs.contains_key(&scope)
    }

    /// State variables registered on `scope`, in registration order.
    pub fn state_vars(&self, scope: ScopeId) -> Option<&IndexSet<VarId>> {
        self.state_vars.get(&scope)
    }

    /// Replacement log of `scope`; empty when it has none.
    pub fn log(&self, scope: ScopeId) -> &[Replacement] {
        self.logs.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every scope with a state-variable set, in registration order.
    pub fn registered_scopes(&self) -> impl Iterator<Item = ScopeId> + '_ {
        self.state_vars.keys().copied()
    }

    /// Whether `var` is a registered state variable of the scope that owns
    /// it. Unregistered owners have no state variables.
    pub fn is_own_state_var(&self, tree: &ModelTree, var: VarId) -> Result<bool, TreeError> {
        let owner = tree.var_scope(var)?;
        Ok(self
            .state_vars
            .get(&owner)
            .is_some_and(|set| set.contains(&var)))
    }

    // ── Mutation (engine only) ─────────────────────────────────────

    /// Create a registration with `vars` and an empty log (keeping any log
    /// the scope already has).
    pub(crate) fn insert(&mut self, scope: ScopeId, vars: IndexSet<VarId>) {
        self.state_vars.insert(scope, vars);
        self.logs.entry(scope).or_default();
    }

    /// State-variable set of `scope`, created empty if missing.
    pub(crate) fn state_vars_mut(&mut self, scope: ScopeId) -> &mut IndexSet<VarId> {
        self.logs.entry(scope).or_default();
        self.state_vars.entry(scope).or_default()
    }

    /// Append to the log of `scope`, creating the log if missing.
    pub(crate) fn push_replacement(&mut self, scope: ScopeId, replacement: Replacement) {
        self.logs.entry(scope).or_default().push(replacement);
    }
}
