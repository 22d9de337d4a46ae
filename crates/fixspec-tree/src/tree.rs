//! The [`ModelTree`] arena: construction, lookup, fixing and navigation.

use fixspec_core::{ComponentRef, ConstraintId, PortDirection, PortId, ScopeId, VarId};
use smallvec::{smallvec, SmallVec};

use crate::error::TreeError;
use crate::node::{Component, Constraint, Port, Row, ScopeNode, Variable};

/// Hierarchical model container addressed by index.
///
/// Scopes form a forest: [`add_root`](ModelTree::add_root) may be called
/// more than once, and scopes in different trees have no common ancestor.
/// Nothing is ever removed, so every id handed out stays valid.
#[derive(Clone, Debug, Default)]
pub struct ModelTree {
    scopes: Vec<ScopeNode>,
    vars: Vec<Variable>,
    constraints: Vec<Constraint>,
    ports: Vec<Port>,
}

impl ModelTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ───────────────────────────────────────────────

    /// Add a root scope (e.g. a flowsheet).
    pub fn add_root(&mut self, name: impl Into<String>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(ScopeNode::new(name.into(), None));
        id
    }

    /// Add a child scope under `parent`.
    pub fn add_scope(
        &mut self,
        parent: ScopeId,
        name: impl Into<String>,
    ) -> Result<ScopeId, TreeError> {
        self.scope(parent)?;
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(ScopeNode::new(name.into(), Some(parent)));
        self.scope_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Add a free scalar variable owned by `scope`.
    pub fn add_var(
        &mut self,
        scope: ScopeId,
        name: impl Into<String>,
        value: f64,
    ) -> Result<VarId, TreeError> {
        self.add_indexed_var(scope, name, 1, value)
    }

    /// Add a free indexed variable with `len` components, all set to `value`.
    pub fn add_indexed_var(
        &mut self,
        scope: ScopeId,
        name: impl Into<String>,
        len: usize,
        value: f64,
    ) -> Result<VarId, TreeError> {
        let name = name.into();
        self.scope(scope)?;
        if len == 0 {
            return Err(TreeError::EmptyVariable { name });
        }
        let id = VarId(self.vars.len() as u32);
        self.vars.push(Variable {
            name,
            scope,
            components: smallvec![Component { value, fixed: false }; len],
        });
        self.scope_mut(scope)?.vars.push(id);
        Ok(id)
    }

    /// Add an active constraint with explicit per-row incidence.
    ///
    /// Rows may reference components anywhere in the tree; a constraint on
    /// a flowsheet typically touches variables of its unit scopes.
    pub fn add_constraint(
        &mut self,
        scope: ScopeId,
        name: impl Into<String>,
        rows: Vec<Vec<ComponentRef>>,
    ) -> Result<ConstraintId, TreeError> {
        self.scope(scope)?;
        let mut checked: Vec<Row> = Vec::with_capacity(rows.len());
        for row in rows {
            for &component in &row {
                self.component(component)?;
            }
            checked.push(Row::from_vec(row));
        }
        let id = ConstraintId(self.constraints.len() as u32);
        self.constraints.push(Constraint {
            name: name.into(),
            scope,
            active: true,
            rows: checked,
        });
        self.scope_mut(scope)?.constraints.push(id);
        Ok(id)
    }

    /// Add a single-row constraint touching every component of `vars`.
    pub fn add_equation(
        &mut self,
        scope: ScopeId,
        name: impl Into<String>,
        vars: &[VarId],
    ) -> Result<ConstraintId, TreeError> {
        let mut row = Vec::new();
        for &var in vars {
            let len = self.var(var)?.len() as u32;
            row.extend((0..len).map(|i| ComponentRef::new(var, i)));
        }
        self.add_constraint(scope, name, vec![row])
    }

    /// Add a port bundling `members`, which must all be owned by `scope`.
    pub fn add_port(
        &mut self,
        scope: ScopeId,
        name: impl Into<String>,
        direction: Option<PortDirection>,
        members: &[VarId],
    ) -> Result<PortId, TreeError> {
        let name = name.into();
        for &var in members {
            if self.var(var)?.scope != scope {
                return Err(TreeError::ForeignPortMember {
                    port: format!("{}.{}", self.scope_path(scope)?, name),
                    var: self.var_path(var)?,
                });
            }
        }
        let id = PortId(self.ports.len() as u32);
        self.ports.push(Port {
            name,
            scope,
            direction,
            members: members.to_vec(),
            upstream: None,
        });
        self.scope_mut(scope)?.ports.push(id);
        Ok(id)
    }

    /// Link `upstream` into `downstream`.
    ///
    /// Records the upstream link on the downstream port and adds one
    /// equality row per paired member component. The linking constraint is
    /// owned by the closest scope containing both ports.
    pub fn connect(
        &mut self,
        upstream: PortId,
        downstream: PortId,
    ) -> Result<ConstraintId, TreeError> {
        let up = self.port(upstream)?.clone();
        let down = self.port(downstream)?;
        if down.upstream.is_some() {
            return Err(TreeError::AlreadyConnected {
                port: self.port_path(downstream)?,
            });
        }
        let same_shape = up.members.len() == down.members.len()
            && up
                .members
                .iter()
                .zip(&down.members)
                .all(|(&a, &b)| self.vars[a.0 as usize].len() == self.vars[b.0 as usize].len());
        if !same_shape {
            return Err(TreeError::PortShapeMismatch {
                upstream: self.port_path(upstream)?,
                downstream: self.port_path(downstream)?,
            });
        }
        let owner = match self.common_ancestor(up.scope, down.scope)? {
            Some(owner) => owner,
            None => {
                return Err(TreeError::DisjointPorts {
                    upstream: self.port_path(upstream)?,
                    downstream: self.port_path(downstream)?,
                })
            }
        };

        let mut rows = Vec::new();
        for (&a, &b) in up.members.iter().zip(&down.members) {
            for i in 0..self.vars[a.0 as usize].len() as u32 {
                rows.push(vec![ComponentRef::new(a, i), ComponentRef::new(b, i)]);
            }
        }
        let name = format!(
            "arc_{}_{}_to_{}_{}",
            self.scopes[up.scope.0 as usize].name,
            up.name,
            self.scopes[down.scope.0 as usize].name,
            down.name,
        );
        let constraint = self.add_constraint(owner, name, rows)?;
        self.port_mut(downstream)?.upstream = Some(upstream);
        Ok(constraint)
    }

    /// Set a constraint's activity flag.
    pub fn set_active(&mut self, constraint: ConstraintId, active: bool) -> Result<(), TreeError> {
        self.constraint_mut(constraint)?.active = active;
        Ok(())
    }

    /// Include a constraint in the model.
    pub fn activate(&mut self, constraint: ConstraintId) -> Result<(), TreeError> {
        self.set_active(constraint, true)
    }

    /// Exclude a constraint from the model without removing it.
    pub fn deactivate(&mut self, constraint: ConstraintId) -> Result<(), TreeError> {
        self.set_active(constraint, false)
    }

    // ── Lookup ─────────────────────────────────────────────────────

    /// Look up a scope node.
    pub fn scope(&self, id: ScopeId) -> Result<&ScopeNode, TreeError> {
        self.scopes
            .get(id.0 as usize)
            .ok_or(TreeError::UnknownScope { scope: id })
    }

    fn scope_mut(&mut self, id: ScopeId) -> Result<&mut ScopeNode, TreeError> {
        self.scopes
            .get_mut(id.0 as usize)
            .ok_or(TreeError::UnknownScope { scope: id })
    }

    /// Look up a variable.
    pub fn var(&self, id: VarId) -> Result<&Variable, TreeError> {
        self.vars
            .get(id.0 as usize)
            .ok_or(TreeError::UnknownVariable { var: id })
    }

    fn var_mut(&mut self, id: VarId) -> Result<&mut Variable, TreeError> {
        self.vars
            .get_mut(id.0 as usize)
            .ok_or(TreeError::UnknownVariable { var: id })
    }

    /// Look up a constraint.
    pub fn constraint(&self, id: ConstraintId) -> Result<&Constraint, TreeError> {
        self.constraints
            .get(id.0 as usize)
            .ok_or(TreeError::UnknownConstraint { constraint: id })
    }

    fn constraint_mut(&mut self, id: ConstraintId) -> Result<&mut Constraint, TreeError> {
        self.constraints
            .get_mut(id.0 as usize)
            .ok_or(TreeError::UnknownConstraint { constraint: id })
    }

    /// Look up a port.
    pub fn port(&self, id: PortId) -> Result<&Port, TreeError> {
        self.ports
            .get(id.0 as usize)
            .ok_or(TreeError::UnknownPort { port: id })
    }

    fn port_mut(&mut self, id: PortId) -> Result<&mut Port, TreeError> {
        self.ports
            .get_mut(id.0 as usize)
            .ok_or(TreeError::UnknownPort { port: id })
    }

    /// Look up a single component.
    pub fn component(&self, c: ComponentRef) -> Result<&Component, TreeError> {
        let var = self.var(c.var)?;
        match var.components.get(c.index as usize) {
            Some(component) => Ok(component),
            None => Err(self.out_of_range(c.var, c.index)),
        }
    }

    fn component_mut(&mut self, c: ComponentRef) -> Result<&mut Component, TreeError> {
        self.component(c)?;
        Ok(&mut self.vars[c.var.0 as usize].components[c.index as usize])
    }

    fn out_of_range(&self, var: VarId, index: u32) -> TreeError {
        TreeError::ComponentOutOfRange {
            name: self.var_path(var).unwrap_or_else(|_| var.to_string()),
            index,
            len: self.vars.get(var.0 as usize).map_or(0, Variable::len),
        }
    }

    /// The scope that owns `var`.
    pub fn var_scope(&self, var: VarId) -> Result<ScopeId, TreeError> {
        Ok(self.var(var)?.scope)
    }

    /// Number of scopes in the forest.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Number of variables in the forest.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    // ── Fixing ─────────────────────────────────────────────────────

    /// Fix every component of `var` at its current value.
    pub fn fix(&mut self, var: VarId) -> Result<(), TreeError> {
        for c in self.var_mut(var)?.components.iter_mut() {
            c.fixed = true;
        }
        Ok(())
    }

    /// Fix every component of `var` at `value`.
    pub fn fix_at(&mut self, var: VarId, value: f64) -> Result<(), TreeError> {
        for c in self.var_mut(var)?.components.iter_mut() {
            c.value = value;
            c.fixed = true;
        }
        Ok(())
    }

    /// Free every component of `var`.
    pub fn unfix(&mut self, var: VarId) -> Result<(), TreeError> {
        for c in self.var_mut(var)?.components.iter_mut() {
            c.fixed = false;
        }
        Ok(())
    }

    /// Fix a single component.
    pub fn fix_component(&mut self, c: ComponentRef) -> Result<(), TreeError> {
        self.component_mut(c)?.fixed = true;
        Ok(())
    }

    /// Free a single component.
    pub fn unfix_component(&mut self, c: ComponentRef) -> Result<(), TreeError> {
        self.component_mut(c)?.fixed = false;
        Ok(())
    }

    /// All-or-none fixed predicate.
    ///
    /// Returns `true` when every component is fixed and `false` when none
    /// is. Any mixed state fails with [`TreeError::PartialFix`].
    pub fn is_fixed(&self, var: VarId) -> Result<bool, TreeError> {
        let v = self.var(var)?;
        let fixed = v.fixed_count();
        if fixed == 0 {
            Ok(false)
        } else if fixed == v.len() {
            Ok(true)
        } else {
            Err(TreeError::PartialFix {
                var,
                name: self.var_path(var)?,
                fixed,
                total: v.len(),
            })
        }
    }

    /// Fixed flag of a single component.
    pub fn is_component_fixed(&self, c: ComponentRef) -> Result<bool, TreeError> {
        Ok(self.component(c)?.fixed)
    }

    /// Per-component fixed flags of `var`.
    pub fn fixed_mask(&self, var: VarId) -> Result<SmallVec<[bool; 4]>, TreeError> {
        Ok(self.var(var)?.components.iter().map(|c| c.fixed).collect())
    }

    /// Overwrite the per-component fixed flags of `var`.
    pub fn set_fixed_mask(&mut self, var: VarId, mask: &[bool]) -> Result<(), TreeError> {
        let len = self.var(var)?.len();
        if mask.len() != len {
            return Err(TreeError::MaskLengthMismatch {
                name: self.var_path(var)?,
                expected: len,
                got: mask.len(),
            });
        }
        for (c, &fixed) in self.var_mut(var)?.components.iter_mut().zip(mask) {
            c.fixed = fixed;
        }
        Ok(())
    }

    /// Free every component of every variable owned in the subtree.
    pub fn unfix_all(&mut self, scope: ScopeId) -> Result<(), TreeError> {
        for var in self.vars_in(scope)? {
            self.unfix(var)?;
        }
        Ok(())
    }

    // ── Values ─────────────────────────────────────────────────────

    /// Value of the first component (the only one, for scalars).
    pub fn value(&self, var: VarId) -> Result<f64, TreeError> {
        self.component_value(ComponentRef::scalar(var))
    }

    /// Set every component of `var` to `value` without touching fixed flags.
    pub fn set_value(&mut self, var: VarId, value: f64) -> Result<(), TreeError> {
        for c in self.var_mut(var)?.components.iter_mut() {
            c.value = value;
        }
        Ok(())
    }

    /// Value of a single component.
    pub fn component_value(&self, c: ComponentRef) -> Result<f64, TreeError> {
        Ok(self.component(c)?.value)
    }

    /// Set a single component's value.
    pub fn set_component_value(&mut self, c: ComponentRef, value: f64) -> Result<(), TreeError> {
        self.component_mut(c)?.value = value;
        Ok(())
    }

    // ── Navigation ─────────────────────────────────────────────────

    /// Parent of `scope`, `None` for a root.
    pub fn parent(&self, scope: ScopeId) -> Result<Option<ScopeId>, TreeError> {
        Ok(self.scope(scope)?.parent)
    }

    /// Direct children of `scope`, in insertion order.
    pub fn children(&self, scope: ScopeId) -> Result<&[ScopeId], TreeError> {
        Ok(self.scope(scope)?.children())
    }

    /// `scope` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, scope: ScopeId) -> Result<Vec<ScopeId>, TreeError> {
        let mut chain = vec![scope];
        let mut current = self.scope(scope)?.parent;
        while let Some(p) = current {
            chain.push(p);
            current = self.scope(p)?.parent;
        }
        Ok(chain)
    }

    /// Root of the tree containing `scope`.
    pub fn root_of(&self, scope: ScopeId) -> Result<ScopeId, TreeError> {
        let chain = self.ancestors(scope)?;
        Ok(*chain.last().unwrap_or(&scope))
    }

    /// Closest scope that contains both `a` and `b` (inclusive).
    ///
    /// `None` when the scopes sit in different trees of the forest.
    pub fn common_ancestor(&self, a: ScopeId, b: ScopeId) -> Result<Option<ScopeId>, TreeError> {
        let first = self.ancestors(a)?;
        Ok(self.ancestors(b)?.into_iter().find(|s| first.contains(s)))
    }

    /// Whether `scope` is `ancestor` or one of its descendants.
    pub fn is_within(&self, scope: ScopeId, ancestor: ScopeId) -> Result<bool, TreeError> {
        self.scope(ancestor)?;
        Ok(self.ancestors(scope)?.contains(&ancestor))
    }

    /// `scope` and all of its descendants, pre-order.
    pub fn subtree(&self, scope: ScopeId) -> Result<Vec<ScopeId>, TreeError> {
        self.scope(scope)?;
        let mut order = Vec::new();
        let mut stack = vec![scope];
        while let Some(s) = stack.pop() {
            order.push(s);
            stack.extend(self.scopes[s.0 as usize].children.iter().rev());
        }
        Ok(order)
    }

    /// Variables owned anywhere in the subtree, pre-order by scope.
    pub fn vars_in(&self, scope: ScopeId) -> Result<Vec<VarId>, TreeError> {
        Ok(self
            .subtree(scope)?
            .into_iter()
            .flat_map(|s| self.scopes[s.0 as usize].vars.iter().copied())
            .collect())
    }

    /// Ports owned anywhere in the subtree, pre-order by scope.
    pub fn ports_in(&self, scope: ScopeId) -> Result<Vec<PortId>, TreeError> {
        Ok(self
            .subtree(scope)?
            .into_iter()
            .flat_map(|s| self.scopes[s.0 as usize].ports.iter().copied())
            .collect())
    }

    /// Constraints owned anywhere in the subtree, pre-order by scope.
    pub fn constraints_in(&self, scope: ScopeId) -> Result<Vec<ConstraintId>, TreeError> {
        Ok(self
            .subtree(scope)?
            .into_iter()
            .flat_map(|s| self.scopes[s.0 as usize].constraints.iter().copied())
            .collect())
    }

    // ── Names ──────────────────────────────────────────────────────

    /// Dotted path from the root, e.g. `fs.h1`.
    pub fn scope_path(&self, scope: ScopeId) -> Result<String, TreeError> {
        let chain = self.ancestors(scope)?;
        let names: Vec<&str> = chain
            .iter()
            .rev()
            .map(|s| self.scopes[s.0 as usize].name.as_str())
            .collect();
        Ok(names.join("."))
    }

    /// Dotted path of a variable, e.g. `fs.h1.heat_duty`.
    pub fn var_path(&self, var: VarId) -> Result<String, TreeError> {
        let v = self.var(var)?;
        Ok(format!("{}.{}", self.scope_path(v.scope)?, v.name))
    }

    /// Dotted path of a constraint.
    pub fn constraint_path(&self, constraint: ConstraintId) -> Result<String, TreeError> {
        let c = self.constraint(constraint)?;
        Ok(format!("{}.{}", self.scope_path(c.scope)?, c.name))
    }

    /// Dotted path of a port.
    pub fn port_path(&self, port: PortId) -> Result<String, TreeError> {
        let p = self.port(port)?;
        Ok(format!("{}.{}", self.scope_path(p.scope)?, p.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_units() -> (ModelTree, ScopeId, ScopeId, ScopeId) {
        let mut tree = ModelTree::new();
        let fs = tree.add_root("fs");
        let a = tree.add_scope(fs, "a").unwrap();
        let b = tree.add_scope(fs, "b").unwrap();
        (tree, fs, a, b)
    }

    // ── Construction ───────────────────────────────────────────

    #[test]
    fn new_variables_are_free() {
        let (mut tree, _, a, _) = two_units();
        let x = tree.add_var(a, "x", 1.5).unwrap();
        assert!(!tree.is_fixed(x).unwrap());
        assert_eq!(tree.value(x).unwrap(), 1.5);
        assert_eq!(tree.var_scope(x).unwrap(), a);
    }

    #[test]
    fn empty_indexed_variable_rejected() {
        let (mut tree, _, a, _) = two_units();
        assert!(matches!(
            tree.add_indexed_var(a, "flows", 0, 0.0),
            Err(TreeError::EmptyVariable { .. })
        ));
    }

    #[test]
    fn constraint_rejects_out_of_range_component() {
        let (mut tree, _, a, _) = two_units();
        let x = tree.add_indexed_var(a, "x", 2, 0.0).unwrap();
        let result = tree.add_constraint(a, "c", vec![vec![ComponentRef::new(x, 2)]]);
        assert!(matches!(
            result,
            Err(TreeError::ComponentOutOfRange { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn equation_touches_every_component() {
        let (mut tree, _, a, _) = two_units();
        let x = tree.add_indexed_var(a, "x", 3, 0.0).unwrap();
        let y = tree.add_var(a, "y", 0.0).unwrap();
        let c = tree.add_equation(a, "c", &[x, y]).unwrap();
        let rows = tree.constraint(c).unwrap().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 4);
    }

    #[test]
    fn port_members_must_be_local() {
        let (mut tree, _, a, b) = two_units();
        let x = tree.add_var(b, "x", 0.0).unwrap();
        let result = tree.add_port(a, "inlet", Some(PortDirection::Inlet), &[x]);
        assert!(matches!(result, Err(TreeError::ForeignPortMember { .. })));
    }

    // ── Connections ────────────────────────────────────────────

    #[test]
    fn connect_links_ports_on_common_ancestor() {
        let (mut tree, fs, a, b) = two_units();
        let out_f = tree.add_var(a, "out_f", 0.0).unwrap();
        let in_f = tree.add_var(b, "in_f", 0.0).unwrap();
        let out = tree
            .add_port(a, "outlet", Some(PortDirection::Outlet), &[out_f])
            .unwrap();
        let inlet = tree
            .add_port(b, "inlet", Some(PortDirection::Inlet), &[in_f])
            .unwrap();

        let arc = tree.connect(out, inlet).unwrap();
        assert_eq!(tree.constraint(arc).unwrap().scope(), fs);
        assert_eq!(tree.port(inlet).unwrap().upstream(), Some(out));
        assert!(!tree.port(out).unwrap().is_connected());
        assert!(matches!(
            tree.connect(out, inlet),
            Err(TreeError::AlreadyConnected { .. })
        ));
    }

    #[test]
    fn connect_rejects_shape_mismatch() {
        let (mut tree, _, a, b) = two_units();
        let out_f = tree.add_indexed_var(a, "out_f", 2, 0.0).unwrap();
        let in_f = tree.add_var(b, "in_f", 0.0).unwrap();
        let out = tree.add_port(a, "outlet", None, &[out_f]).unwrap();
        let inlet = tree.add_port(b, "inlet", None, &[in_f]).unwrap();
        assert!(matches!(
            tree.connect(out, inlet),
            Err(TreeError::PortShapeMismatch { .. })
        ));
    }

    #[test]
    fn connect_rejects_ports_in_different_trees() {
        let mut tree = ModelTree::new();
        let one = tree.add_root("one");
        let two = tree.add_root("two");
        let x = tree.add_var(one, "x", 0.0).unwrap();
        let y = tree.add_var(two, "y", 0.0).unwrap();
        let p = tree.add_port(one, "outlet", None, &[x]).unwrap();
        let q = tree.add_port(two, "inlet", None, &[y]).unwrap();
        assert!(matches!(
            tree.connect(p, q),
            Err(TreeError::DisjointPorts { .. })
        ));
    }

    // ── Fixing ─────────────────────────────────────────────────

    #[test]
    fn partial_fix_is_an_error() {
        let (mut tree, _, a, _) = two_units();
        let x = tree.add_indexed_var(a, "x", 3, 0.0).unwrap();
        tree.fix_component(ComponentRef::new(x, 1)).unwrap();
        match tree.is_fixed(x) {
            Err(TreeError::PartialFix {
                var, fixed, total, ..
            }) => {
                assert_eq!(var, x);
                assert_eq!(fixed, 1);
                assert_eq!(total, 3);
            }
            other => panic!("expected PartialFix, got {other:?}"),
        }
        tree.fix(x).unwrap();
        assert!(tree.is_fixed(x).unwrap());
        tree.unfix(x).unwrap();
        assert!(!tree.is_fixed(x).unwrap());
    }

    #[test]
    fn fixed_mask_round_trips() {
        let (mut tree, _, a, _) = two_units();
        let x = tree.add_indexed_var(a, "x", 3, 0.0).unwrap();
        tree.set_fixed_mask(x, &[true, false, true]).unwrap();
        assert_eq!(tree.fixed_mask(x).unwrap().as_slice(), &[true, false, true]);
        assert_eq!(
            tree.set_fixed_mask(x, &[true]).unwrap_err(),
            TreeError::MaskLengthMismatch {
                name: "fs.a.x".into(),
                expected: 3,
                got: 1,
            }
        );
        assert_eq!(tree.fixed_mask(x).unwrap().as_slice(), &[true, false, true]);
    }

    #[test]
    fn fix_at_sets_value() {
        let (mut tree, _, a, _) = two_units();
        let x = tree.add_var(a, "x", 0.0).unwrap();
        tree.fix_at(x, 3000.0).unwrap();
        assert!(tree.is_fixed(x).unwrap());
        assert_eq!(tree.value(x).unwrap(), 3000.0);
    }

    // ── Navigation ─────────────────────────────────────────────

    #[test]
    fn common_ancestor_is_inclusive_and_closest() {
        let (mut tree, fs, a, b) = two_units();
        let a1 = tree.add_scope(a, "a1").unwrap();
        assert_eq!(tree.common_ancestor(a1, a).unwrap(), Some(a));
        assert_eq!(tree.common_ancestor(a1, b).unwrap(), Some(fs));
        assert_eq!(tree.common_ancestor(a, a).unwrap(), Some(a));

        let other = tree.add_root("other");
        assert_eq!(tree.common_ancestor(a1, other).unwrap(), None);
        assert_eq!(tree.root_of(a1).unwrap(), fs);
        assert!(tree.is_within(a1, fs).unwrap());
        assert!(!tree.is_within(a, a1).unwrap());
    }

    #[test]
    fn subtree_is_pre_order() {
        let (mut tree, fs, a, b) = two_units();
        let a1 = tree.add_scope(a, "a1").unwrap();
        let b1 = tree.add_scope(b, "b1").unwrap();
        assert_eq!(tree.subtree(fs).unwrap(), vec![fs, a, a1, b, b1]);
        assert_eq!(tree.subtree(b).unwrap(), vec![b, b1]);
        assert_eq!(tree.children(fs).unwrap(), &[a, b]);
        assert_eq!(tree.parent(b1).unwrap(), Some(b));
    }

    #[test]
    fn paths_are_dotted() {
        let (mut tree, _, a, _) = two_units();
        let x = tree.add_var(a, "heat_duty", 0.0).unwrap();
        assert_eq!(tree.scope_path(a).unwrap(), "fs.a");
        assert_eq!(tree.var_path(x).unwrap(), "fs.a.heat_duty");
    }

    #[test]
    fn unknown_ids_are_reported() {
        let tree = ModelTree::new();
        assert_eq!(
            tree.scope(ScopeId(4)).unwrap_err(),
            TreeError::UnknownScope { scope: ScopeId(4) }
        );
        assert!(tree.is_fixed(VarId(0)).is_err());
    }
}
