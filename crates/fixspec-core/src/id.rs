//! Strongly-typed identifiers and the [`ComponentRef`] address type.
//!
//! All ids are indices into the arenas owned by a model tree. They are only
//! meaningful for the tree that issued them; identity (not structural
//! equality) is what containment checks compare.

use std::fmt;

/// Identifies a scope (block) node in a model tree.
///
/// `ScopeId(n)` is the n-th scope created in the tree. Scopes are never
/// removed, so ids stay valid for the tree's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ScopeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a variable (scalar or indexed) in a model tree.
///
/// An indexed variable is one identity shared by all of its scalar
/// components; see [`ComponentRef`] for addressing a single component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u32);

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VarId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a constraint (one or more scalar equation rows).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub u32);

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ConstraintId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a port: a named bundle of variables on a scope boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(pub u32);

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PortId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Address of one scalar component of a variable.
///
/// Scalar variables have exactly one component at index 0. Incidence,
/// degrees-of-freedom counting and snapshots all work at this granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentRef {
    /// The owning variable.
    pub var: VarId,
    /// Position within the variable (0 for scalars).
    pub index: u32,
}

impl ComponentRef {
    /// Address component `index` of `var`.
    pub fn new(var: VarId, index: u32) -> Self {
        Self { var, index }
    }

    /// The single component of a scalar variable.
    pub fn scalar(var: VarId) -> Self {
        Self { var, index: 0 }
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.var, self.index)
    }
}
