//! Incidence graph of a scope in a model tree.

use std::fmt;

use fixspec_core::{ComponentRef, ConstraintId, ScopeId};
use fixspec_tree::{ModelTree, TreeError};

use crate::bipartite::Bipartite;
use crate::dm::{dulmage_mendelsohn, DmPartition};
use crate::matching::maximum_matching;

/// One scalar row of a constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintRow {
    /// The owning constraint.
    pub constraint: ConstraintId,
    /// Row position within the constraint.
    pub row: usize,
}

impl fmt::Display for ConstraintRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.constraint, self.row)
    }
}

/// Variable-constraint incidence over a scope subtree.
///
/// Variable vertices are the free components appearing in at least one
/// active row owned in the subtree; constraint vertices are those active
/// rows. Fixed components contribute no vertices and no edges.
#[derive(Clone, Debug)]
pub struct IncidenceGraph {
    scope: ScopeId,
    vars: Vec<ComponentRef>,
    constraints: Vec<ConstraintRow>,
    graph: Bipartite,
}

impl IncidenceGraph {
    /// Build the incidence graph of `scope` from the current fixed state.
    pub fn for_scope(tree: &ModelTree, scope: ScopeId) -> Result<Self, TreeError> {
        let free = tree.free_components(scope)?;
        let rows = tree.active_rows(scope)?;

        let mut graph = Bipartite::new(free.len());
        let mut constraints = Vec::with_capacity(rows.len());
        let mut edges: Vec<u32> = Vec::new();
        for (constraint, row) in rows {
            edges.clear();
            for component in &tree.constraint(constraint)?.rows()[row] {
                if let Some(index) = free.get_index_of(component) {
                    edges.push(index as u32);
                }
            }
            // Indices come from `free`, so they are always in range.
            if graph.add_constraint(&edges).is_ok() {
                constraints.push(ConstraintRow { constraint, row });
            }
        }

        Ok(Self {
            scope,
            vars: free.into_iter().collect(),
            constraints,
            graph,
        })
    }

    /// Scope the graph was built for.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Variable vertex labels, by vertex index.
    pub fn variables(&self) -> &[ComponentRef] {
        &self.vars
    }

    /// Constraint vertex labels, by vertex index.
    pub fn constraints(&self) -> &[ConstraintRow] {
        &self.constraints
    }

    /// The unlabelled graph.
    pub fn graph(&self) -> &Bipartite {
        &self.graph
    }

    /// Match and partition the graph, labelling vertices with tree ids.
    pub fn dulmage_mendelsohn(&self) -> DmPartition<ComponentRef, ConstraintRow> {
        let matching = maximum_matching(&self.graph);
        let partition = dulmage_mendelsohn(&self.graph, &matching);
        DmPartition {
            vars: partition.vars.map(|v| self.vars[v as usize]),
            constraints: partition
                .constraints
                .map(|c| self.constraints[c as usize]),
        }
    }
}
