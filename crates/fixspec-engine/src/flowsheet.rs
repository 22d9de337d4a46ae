//! [`Flowsheet`]: a model tree bundled with its registry and configuration.
//!
//! Each method delegates to the free function of the same name, so the two
//! styles can be mixed freely.

use fixspec_core::{ScopeId, VarId};
use fixspec_tree::{ModelTree, TreeError};

use crate::config::EngineConfig;
use crate::error::{InitError, RegistryError, ReplaceError};
use crate::init::{self, Solver};
use crate::listing;
use crate::ports;
use crate::registrar;
use crate::registry::{Registry, Replacement};
use crate::replace;
use crate::report::{self, ReplacementReport};

/// Owner of a [`ModelTree`], its [`Registry`] and an [`EngineConfig`].
#[derive(Clone, Debug, Default)]
pub struct Flowsheet {
    tree: ModelTree,
    registry: Registry,
    config: EngineConfig,
}

impl Flowsheet {
    /// Wrap an existing tree with an empty registry.
    pub fn new(tree: ModelTree, config: EngineConfig) -> Self {
        Self {
            tree,
            registry: Registry::new(),
            config,
        }
    }

    /// The model tree.
    pub fn tree(&self) -> &ModelTree {
        &self.tree
    }

    /// Mutable access to the model tree, for construction and values.
    pub fn tree_mut(&mut self) -> &mut ModelTree {
        &mut self.tree
    }

    /// The registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Change the engine configuration.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Split into tree and registry.
    pub fn into_parts(self) -> (ModelTree, Registry) {
        (self.tree, self.registry)
    }

    // ── Registration ───────────────────────────────────────────────

    /// See [`registrar::register`].
    pub fn register(
        &mut self,
        scope: ScopeId,
        vars: &[VarId],
        allow_dof: bool,
    ) -> Result<(), RegistryError> {
        registrar::register(&mut self.tree, &mut self.registry, scope, vars, allow_dof)
    }

    /// See [`ports::register_inlets`].
    pub fn register_inlets(&mut self, root: ScopeId) -> Result<Vec<VarId>, RegistryError> {
        ports::register_inlets(&mut self.tree, &mut self.registry, root)
    }

    /// See [`registrar::is_fixed`].
    pub fn is_fixed(&self, var: VarId) -> Result<bool, TreeError> {
        registrar::is_fixed(&self.tree, var)
    }

    // ── Replacement ────────────────────────────────────────────────

    /// See [`replace::replace`].
    pub fn replace(&mut self, state_var: VarId, new_var: VarId) -> Result<ScopeId, ReplaceError> {
        replace::replace(
            &mut self.tree,
            &mut self.registry,
            &self.config,
            state_var,
            new_var,
        )
    }

    /// See [`replace::validation_scope`].
    pub fn validation_scope(&self, state_var: VarId, new_var: VarId) -> Result<ScopeId, ReplaceError> {
        replace::validation_scope(&self.tree, self.config.scope_policy, state_var, new_var)
    }

    // ── Listings ───────────────────────────────────────────────────

    /// See [`listing::list_state_vars`].
    pub fn list_state_vars(&self, scope: ScopeId) -> Result<Vec<VarId>, TreeError> {
        listing::list_state_vars(&self.tree, &self.registry, scope)
    }

    /// See [`listing::list_fixed_state_vars`].
    pub fn list_fixed_state_vars(&self, scope: ScopeId) -> Result<Vec<VarId>, TreeError> {
        listing::list_fixed_state_vars(&self.tree, &self.registry, scope)
    }

    /// See [`listing::list_guesses`].
    pub fn list_guesses(&self, scope: ScopeId) -> Result<Vec<VarId>, TreeError> {
        listing::list_guesses(&self.tree, &self.registry, scope)
    }

    /// See [`listing::list_replacements`].
    pub fn list_replacements(&self, scope: ScopeId) -> Result<Vec<Replacement>, TreeError> {
        listing::list_replacements(&self.tree, &self.registry, scope)
    }

    /// See [`listing::list_available_vars`].
    pub fn list_available_vars(&self, scope: ScopeId) -> Result<Vec<VarId>, TreeError> {
        listing::list_available_vars(&self.tree, &self.registry, scope)
    }

    /// See [`report::report`].
    pub fn report(&self, scope: ScopeId) -> Result<ReplacementReport, TreeError> {
        report::report(&self.tree, &self.registry, scope)
    }

    // ── Initialization ─────────────────────────────────────────────

    /// See [`ports::fix_inlets`].
    pub fn fix_inlets(&mut self, scope: ScopeId) -> Result<Vec<VarId>, TreeError> {
        ports::fix_inlets(&mut self.tree, scope)
    }

    /// See [`init::staged_initialize`].
    pub fn staged_initialize<S: Solver + ?Sized>(
        &mut self,
        scope: ScopeId,
        solver: &mut S,
    ) -> Result<(), InitError> {
        init::staged_initialize(&mut self.tree, &self.registry, scope, solver)
    }

    /// See [`init::initialize`].
    pub fn initialize<S: Solver + ?Sized>(
        &mut self,
        scope: ScopeId,
        solver: &mut S,
    ) -> Result<(), InitError> {
        init::initialize(&mut self.tree, &self.registry, scope, solver)
    }
}

impl From<ModelTree> for Flowsheet {
    fn from(tree: ModelTree) -> Self {
        Self::new(tree, EngineConfig::default())
    }
}
