//! A solver double that plays back scripted terminations.

use std::collections::VecDeque;

use fixspec_core::{ComponentRef, ScopeId, Termination, VarId};
use fixspec_engine::Solver;
use fixspec_tree::{ModelTree, TreeError};

/// What the model looked like when [`ScriptedSolver::solve`] was called.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveCall {
    pub scope: ScopeId,
    /// Degrees of freedom of the scope, `None` if the tree rejected it.
    pub dof: Option<i64>,
    /// Fully fixed variables owned in the subtree.
    pub fixed: Vec<VarId>,
}

/// Returns queued terminations in order, then `fallback` forever.
///
/// Every call is recorded. With [`fill_free_with`](Self::fill_free_with)
/// the solver also writes a value into every free component of the
/// subtree, standing in for the progress a real solve makes.
#[derive(Clone, Debug)]
pub struct ScriptedSolver {
    script: VecDeque<Termination>,
    fallback: Termination,
    fill: Option<f64>,
    calls: Vec<SolveCall>,
}

impl ScriptedSolver {
    /// A solver that always reports [`Termination::Optimal`].
    pub fn new() -> Self {
        Self::with_script([])
    }

    /// A solver that reports `script` first, then optimal.
    pub fn with_script(script: impl IntoIterator<Item = Termination>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: Termination::Optimal,
            fill: None,
            calls: Vec::new(),
        }
    }

    /// Report `termination` once the script is exhausted.
    pub fn fallback(mut self, termination: Termination) -> Self {
        self.fallback = termination;
        self
    }

    /// Write `value` into every free component on each call.
    pub fn fill_free_with(mut self, value: f64) -> Self {
        self.fill = Some(value);
        self
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[SolveCall] {
        &self.calls
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}

impl Default for ScriptedSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for ScriptedSolver {
    fn solve(&mut self, tree: &mut ModelTree, scope: ScopeId) -> Termination {
        let vars = tree.vars_in(scope).unwrap_or_default();
        let fixed = vars
            .iter()
            .copied()
            .filter(|&v| tree.is_fixed(v).unwrap_or(false))
            .collect();
        self.calls.push(SolveCall {
            scope,
            dof: tree.degrees_of_freedom(scope).ok(),
            fixed,
        });

        if let Some(value) = self.fill {
            if let Err(err) = fill_free(tree, &vars, value) {
                tracing::warn!(scope = %scope, %err, "scripted fill stopped");
            }
        }

        let termination = self.script.pop_front().unwrap_or_else(|| self.fallback.clone());
        tracing::debug!(scope = %scope, %termination, "scripted solve");
        termination
    }
}

fn fill_free(tree: &mut ModelTree, vars: &[VarId], value: f64) -> Result<(), TreeError> {
    for &var in vars {
        let len = tree.var(var)?.len() as u32;
        for i in 0..len {
            let c = ComponentRef::new(var, i);
            if !tree.is_component_fixed(c)? {
                tree.set_component_value(c, value)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_then_fallback() {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let mut solver = ScriptedSolver::with_script([Termination::Infeasible]);
        assert_eq!(solver.solve(&mut tree, fs), Termination::Infeasible);
        assert_eq!(solver.solve(&mut tree, fs), Termination::Optimal);
        assert_eq!(solver.call_count(), 2);
    }

    #[test]
    fn records_fixed_vars_and_fills_free() {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let a = tree.add_var(fs, "a", 1.0).unwrap();
        let b = tree.add_var(fs, "b", 1.0).unwrap();
        tree.add_equation(fs, "c", &[a, b]).unwrap();
        tree.fix(a).unwrap();

        let mut solver = ScriptedSolver::new().fill_free_with(9.0);
        solver.solve(&mut tree, fs);
        assert_eq!(solver.calls()[0].fixed, vec![a]);
        assert_eq!(solver.calls()[0].dof, Some(0));
        assert_eq!(tree.value(a).unwrap(), 1.0);
        assert_eq!(tree.value(b).unwrap(), 9.0);
    }
}
