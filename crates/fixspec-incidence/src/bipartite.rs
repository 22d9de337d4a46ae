//! The bare bipartite graph: constraint vertices adjacent to variable vertices.

use smallvec::SmallVec;
use thiserror::Error;

/// Errors from building a [`Bipartite`] graph by hand.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IncidenceError {
    /// A constraint referenced a variable vertex that does not exist.
    #[error("variable vertex {var} out of range ({n_vars} variables)")]
    VariableOutOfRange {
        /// The offending vertex.
        var: u32,
        /// Number of variable vertices in the graph.
        n_vars: usize,
    },
}

/// Bipartite incidence graph stored as constraint → variable adjacency.
///
/// Vertices are dense indices: variables `0..n_vars`, constraints
/// `0..n_constraints`. Duplicate edges are dropped on insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bipartite {
    n_vars: usize,
    adj: Vec<SmallVec<[u32; 4]>>,
}

impl Bipartite {
    /// A graph with `n_vars` variable vertices and no constraints.
    pub fn new(n_vars: usize) -> Self {
        Self {
            n_vars,
            adj: Vec::new(),
        }
    }

    /// Append a constraint vertex adjacent to `vars`, returning its index.
    pub fn add_constraint(&mut self, vars: &[u32]) -> Result<u32, IncidenceError> {
        let mut row: SmallVec<[u32; 4]> = SmallVec::with_capacity(vars.len());
        for &v in vars {
            if v as usize >= self.n_vars {
                return Err(IncidenceError::VariableOutOfRange {
                    var: v,
                    n_vars: self.n_vars,
                });
            }
            if !row.contains(&v) {
                row.push(v);
            }
        }
        self.adj.push(row);
        Ok((self.adj.len() - 1) as u32)
    }

    /// Number of variable vertices.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Number of constraint vertices.
    pub fn n_constraints(&self) -> usize {
        self.adj.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(SmallVec::len).sum()
    }

    /// Variables adjacent to constraint `c`.
    pub fn neighbours(&self, c: usize) -> &[u32] {
        &self.adj[c]
    }

    /// Variable → constraint adjacency (the transpose).
    pub fn var_adjacency(&self) -> Vec<Vec<u32>> {
        let mut by_var = vec![Vec::new(); self.n_vars];
        for (c, row) in self.adj.iter().enumerate() {
            for &v in row {
                by_var[v as usize].push(c as u32);
            }
        }
        by_var
    }
}
