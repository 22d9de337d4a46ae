//! Arena node types: scopes, variables, constraints and ports.
//!
//! Nodes are created through [`ModelTree`](crate::ModelTree) and exposed
//! read-only; all mutation goes through the tree so that ids stay valid.

use fixspec_core::{ComponentRef, ConstraintId, PortDirection, PortId, ScopeId, VarId};
use smallvec::SmallVec;

/// The components touched by one scalar constraint row.
///
/// Only incidence is recorded; coefficients and expression shape are the
/// business of whoever evaluates the model.
pub type Row = SmallVec<[ComponentRef; 4]>;

/// A scope (block) in the model tree.
#[derive(Clone, Debug)]
pub struct ScopeNode {
    pub(crate) name: String,
    pub(crate) parent: Option<ScopeId>,
    pub(crate) children: Vec<ScopeId>,
    pub(crate) vars: Vec<VarId>,
    pub(crate) constraints: Vec<ConstraintId>,
    pub(crate) ports: Vec<PortId>,
}

impl ScopeNode {
    pub(crate) fn new(name: String, parent: Option<ScopeId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            vars: Vec::new(),
            constraints: Vec::new(),
            ports: Vec::new(),
        }
    }

    /// Local name of the scope.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent scope, `None` for a root.
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Child scopes in creation order.
    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    /// Variables owned directly by this scope.
    pub fn vars(&self) -> &[VarId] {
        &self.vars
    }

    /// Constraints owned directly by this scope.
    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    /// Ports owned directly by this scope.
    pub fn ports(&self) -> &[PortId] {
        &self.ports
    }
}

/// One scalar slot of a variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Component {
    /// Current value (a specification when fixed, a starting point when free).
    pub value: f64,
    /// Whether the value is externally specified.
    pub fixed: bool,
}

/// A scalar or indexed variable.
#[derive(Clone, Debug)]
pub struct Variable {
    pub(crate) name: String,
    pub(crate) scope: ScopeId,
    pub(crate) components: SmallVec<[Component; 1]>,
}

impl Variable {
    /// Local name of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scope that owns this variable (its immediate parent).
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Number of scalar components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always false; variables have at least one component.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// All components in index order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of fixed components.
    pub fn fixed_count(&self) -> usize {
        self.components.iter().filter(|c| c.fixed).count()
    }
}

/// A family of scalar equation rows sharing one name and activity flag.
#[derive(Clone, Debug)]
pub struct Constraint {
    pub(crate) name: String,
    pub(crate) scope: ScopeId,
    pub(crate) active: bool,
    pub(crate) rows: Vec<Row>,
}

impl Constraint {
    /// Local name of the constraint.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning scope.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Whether the constraint takes part in the model.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The scalar rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// A directional bundle of variables forming a connection interface.
#[derive(Clone, Debug)]
pub struct Port {
    pub(crate) name: String,
    pub(crate) scope: ScopeId,
    pub(crate) direction: Option<PortDirection>,
    pub(crate) members: Vec<VarId>,
    pub(crate) upstream: Option<PortId>,
}

impl Port {
    /// Local name of the port.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning scope.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Direction tag, if the port was tagged.
    pub fn direction(&self) -> Option<PortDirection> {
        self.direction
    }

    /// Bundled variables in declaration order.
    pub fn members(&self) -> &[VarId] {
        &self.members
    }

    /// The port feeding this one, if connected.
    pub fn upstream(&self) -> Option<PortId> {
        self.upstream
    }

    /// Whether an upstream port feeds this one.
    pub fn is_connected(&self) -> bool {
        self.upstream.is_some()
    }
}
