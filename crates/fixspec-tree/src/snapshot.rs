//! Fixed-state snapshots of a subtree.
//!
//! [`ModelTree::snapshot`] records which components are specified and at
//! what value; [`ModelTree::restore`] puts that specification back. Values
//! of components that were free are left alone on restore, so numeric
//! progress made in between (e.g. by an initialization solve) survives.

use fixspec_core::{ComponentRef, ScopeId};

use crate::error::TreeError;
use crate::tree::ModelTree;

/// Recorded state of one component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComponentState {
    /// The component.
    pub component: ComponentRef,
    /// Whether it was fixed.
    pub fixed: bool,
    /// Its value at snapshot time.
    pub value: f64,
}

/// Opaque record of the fixed/value configuration of a subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedState {
    scope: ScopeId,
    entries: Vec<ComponentState>,
}

impl FixedState {
    /// Scope the snapshot was taken from.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Recorded components in subtree order.
    pub fn entries(&self) -> &[ComponentState] {
        &self.entries
    }

    /// Number of components recorded as fixed.
    pub fn fixed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.fixed).count()
    }
}

impl ModelTree {
    /// Record every component of every variable owned in the subtree.
    pub fn snapshot(&self, scope: ScopeId) -> Result<FixedState, TreeError> {
        let mut entries = Vec::new();
        for var in self.vars_in(scope)? {
            for (i, c) in self.var(var)?.components().iter().enumerate() {
                entries.push(ComponentState {
                    component: ComponentRef::new(var, i as u32),
                    fixed: c.fixed,
                    value: c.value,
                });
            }
        }
        Ok(FixedState { scope, entries })
    }

    /// Reapply a snapshot taken from the same scope.
    ///
    /// Everything in the subtree is unfixed first, then each recorded fixed
    /// component is re-fixed at its recorded value. Anything left fixed since
    /// the snapshot cannot conflict with the restored specification.
    pub fn restore(&mut self, scope: ScopeId, state: &FixedState) -> Result<(), TreeError> {
        if state.scope != scope {
            return Err(TreeError::SnapshotScopeMismatch {
                taken: state.scope,
                target: scope,
            });
        }
        self.unfix_all(scope)?;
        for entry in state.entries.iter().filter(|e| e.fixed) {
            self.set_component_value(entry.component, entry.value)?;
            self.fix_component(entry.component)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn restore_brings_back_specification_and_keeps_free_values() {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let spec = tree.add_var(fs, "spec", 0.0).unwrap();
        let guess = tree.add_var(fs, "guess", 1.0).unwrap();
        tree.fix_at(spec, 10.0).unwrap();

        let state = tree.snapshot(fs).unwrap();
        assert_eq!(state.fixed_count(), 1);

        // Simulate an initialization routine that swaps the specification.
        tree.unfix(spec).unwrap();
        tree.set_value(spec, 99.0).unwrap();
        tree.fix_at(guess, 7.0).unwrap();

        tree.restore(fs, &state).unwrap();
        assert!(tree.is_fixed(spec).unwrap());
        assert_eq!(tree.value(spec).unwrap(), 10.0);
        assert!(!tree.is_fixed(guess).unwrap());
        assert_eq!(tree.value(guess).unwrap(), 7.0);
    }

    #[test]
    fn restore_onto_other_scope_rejected() {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let unit = tree.add_scope(fs, "unit").unwrap();
        let state = tree.snapshot(unit).unwrap();
        assert!(matches!(
            tree.restore(fs, &state),
            Err(TreeError::SnapshotScopeMismatch { .. })
        ));
    }

    #[test]
    fn snapshot_covers_only_the_subtree() {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let unit = tree.add_scope(fs, "unit").unwrap();
        let outside = tree.add_var(fs, "outside", 0.0).unwrap();
        tree.add_indexed_var(unit, "inside", 3, 0.0).unwrap();
        tree.fix(outside).unwrap();

        let state = tree.snapshot(unit).unwrap();
        assert_eq!(state.entries().len(), 3);
        tree.restore(unit, &state).unwrap();
        assert!(tree.is_fixed(outside).unwrap());
    }

    proptest! {
        #[test]
        fn restore_reproduces_fixed_masks(
            masks in prop::collection::vec(prop::collection::vec(any::<bool>(), 1..4), 1..8),
            scramble in prop::collection::vec(any::<bool>(), 32),
        ) {
            let mut tree = ModelTree::new();
            let fs = tree.add_root("fs");
            let mut vars = Vec::new();
            for (i, mask) in masks.iter().enumerate() {
                let v = tree.add_indexed_var(fs, format!("v{i}"), mask.len(), i as f64).unwrap();
                tree.set_fixed_mask(v, mask).unwrap();
                vars.push(v);
            }
            let state = tree.snapshot(fs).unwrap();

            let mut bits = scramble.iter().cycle();
            for &v in &vars {
                let len = tree.var(v).unwrap().len();
                let mask: Vec<bool> = (0..len).map(|_| *bits.next().unwrap()).collect();
                tree.set_fixed_mask(v, &mask).unwrap();
            }

            tree.restore(fs, &state).unwrap();
            for (v, mask) in vars.iter().zip(&masks) {
                prop_assert_eq!(tree.fixed_mask(*v).unwrap().to_vec(), mask.clone());
            }
        }
    }
}
