//! Engine configuration: validation-scope policy and strictness.

// ── ScopePolicy ────────────────────────────────────────────────────

/// Where a replacement is validated and logged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScopePolicy {
    /// The closest scope containing both variables. Default.
    #[default]
    ClosestCommonAncestor,
    /// The root of the tree the state variable lives in.
    ///
    /// The substitute must live in the same tree, otherwise the swap fails
    /// with `NoCommonScope` just as under the ancestor policy.
    Root,
}

// ── ValidationMode ─────────────────────────────────────────────────

/// How strictly a replacement is checked.
///
/// Unmatched constraints are fatal in both modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// DOF of the validation scope must be zero before and after the swap,
    /// and every free variable must be matched. Default.
    #[default]
    Strict,
    /// No DOF pre-check. After the swap the DOF must be unchanged, and
    /// unmatched variables are tolerated: they may be pinned by
    /// constraints outside the validation scope.
    Relaxed,
}

impl ValidationMode {
    /// Whether this is [`ValidationMode::Strict`].
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Configuration for the replacement engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Validation-scope policy. Default: [`ScopePolicy::ClosestCommonAncestor`].
    pub scope_policy: ScopePolicy,
    /// Strictness. Default: [`ValidationMode::Strict`].
    pub validation: ValidationMode,
}

impl EngineConfig {
    /// Replace the validation-scope policy.
    pub fn with_scope_policy(mut self, scope_policy: ScopePolicy) -> Self {
        self.scope_policy = scope_policy;
        self
    }

    /// Replace the validation mode.
    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }
}
