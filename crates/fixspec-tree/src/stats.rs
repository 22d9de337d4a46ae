//! Model statistics: active rows, free unknowns and degrees of freedom.
//!
//! A subsystem's unknowns are the free scalar components that appear in at
//! least one of its active rows. Variables that no active row touches are
//! not unknowns of the subsystem and do not count, wherever they live.

use fixspec_core::{ComponentRef, ConstraintId, ScopeId};
use indexmap::IndexSet;

use crate::error::TreeError;
use crate::tree::ModelTree;

impl ModelTree {
    /// Every active scalar row owned in the subtree, as `(constraint, row)`.
    pub fn active_rows(&self, scope: ScopeId) -> Result<Vec<(ConstraintId, usize)>, TreeError> {
        let mut rows = Vec::new();
        for id in self.constraints_in(scope)? {
            let c = self.constraint(id)?;
            if c.is_active() {
                rows.extend((0..c.rows().len()).map(|r| (id, r)));
            }
        }
        Ok(rows)
    }

    /// Distinct free components touched by the subtree's active rows, in
    /// first-appearance order.
    pub fn free_components(&self, scope: ScopeId) -> Result<IndexSet<ComponentRef>, TreeError> {
        let mut free = IndexSet::new();
        for id in self.constraints_in(scope)? {
            let c = self.constraint(id)?;
            if !c.is_active() {
                continue;
            }
            for row in c.rows() {
                for &component in row {
                    if !self.is_component_fixed(component)? {
                        free.insert(component);
                    }
                }
            }
        }
        Ok(free)
    }

    /// Free unknowns minus active rows over the subtree rooted at `scope`.
    ///
    /// Zero means the subsystem is square; positive means it needs more
    /// specifications, negative means it has too many.
    pub fn degrees_of_freedom(&self, scope: ScopeId) -> Result<i64, TreeError> {
        let unknowns = self.free_components(scope)?.len() as i64;
        let equations = self.active_rows(scope)?.len() as i64;
        Ok(unknowns - equations)
    }
}
