//! Dulmage-Mendelsohn partition of a matched bipartite graph.
//!
//! Given a maximum matching, alternating paths from unmatched variables
//! sweep out the under-determined part and alternating paths from unmatched
//! constraints sweep out the over-determined part. The two sweeps are
//! disjoint for a maximum matching; whatever neither reaches is square.

use std::collections::VecDeque;

use crate::bipartite::Bipartite;
use crate::matching::Matching;

/// Variable side of a partition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VarPartition<V> {
    /// Variables with no matched constraint.
    pub unmatched: Vec<V>,
    /// Matched variables in the under-determined part.
    pub underconstrained: Vec<V>,
    /// Variables in the over-determined part.
    pub overconstrained: Vec<V>,
    /// Variables in the well-determined part.
    pub square: Vec<V>,
}

/// Constraint side of a partition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConPartition<C> {
    /// Constraints with no matched variable.
    pub unmatched: Vec<C>,
    /// Matched constraints in the over-determined part.
    pub overconstrained: Vec<C>,
    /// Constraints in the under-determined part.
    pub underconstrained: Vec<C>,
    /// Constraints in the well-determined part.
    pub square: Vec<C>,
}

/// Both sides of a Dulmage-Mendelsohn partition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DmPartition<V = u32, C = u32> {
    /// Variable vertices.
    pub vars: VarPartition<V>,
    /// Constraint vertices.
    pub constraints: ConPartition<C>,
}

impl<V> VarPartition<V> {
    /// Relabel every vertex.
    pub fn map<U>(self, mut f: impl FnMut(V) -> U) -> VarPartition<U> {
        VarPartition {
            unmatched: self.unmatched.into_iter().map(&mut f).collect(),
            underconstrained: self.underconstrained.into_iter().map(&mut f).collect(),
            overconstrained: self.overconstrained.into_iter().map(&mut f).collect(),
            square: self.square.into_iter().map(&mut f).collect(),
        }
    }

    /// Total number of vertices.
    pub fn len(&self) -> usize {
        self.unmatched.len()
            + self.underconstrained.len()
            + self.overconstrained.len()
            + self.square.len()
    }

    /// Whether the side has no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C> ConPartition<C> {
    /// Relabel every vertex.
    pub fn map<U>(self, mut f: impl FnMut(C) -> U) -> ConPartition<U> {
        ConPartition {
            unmatched: self.unmatched.into_iter().map(&mut f).collect(),
            overconstrained: self.overconstrained.into_iter().map(&mut f).collect(),
            underconstrained: self.underconstrained.into_iter().map(&mut f).collect(),
            square: self.square.into_iter().map(&mut f).collect(),
        }
    }

    /// Total number of vertices.
    pub fn len(&self) -> usize {
        self.unmatched.len()
            + self.overconstrained.len()
            + self.underconstrained.len()
            + self.square.len()
    }

    /// Whether the side has no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V, C> DmPartition<V, C> {
    /// Whether some constraint could not be matched (redundant or
    /// conflicting equations).
    pub fn is_overdetermined(&self) -> bool {
        !self.constraints.unmatched.is_empty()
    }

    /// Whether some variable could not be matched (nothing pins it down).
    pub fn is_underdetermined(&self) -> bool {
        !self.vars.unmatched.is_empty()
    }

    /// Whether the whole graph is structurally square.
    pub fn is_square(&self) -> bool {
        !self.is_overdetermined() && !self.is_underdetermined()
    }
}

/// Partition `g` using a maximum `matching` of it.
pub fn dulmage_mendelsohn(g: &Bipartite, matching: &Matching) -> DmPartition {
    let n_v = g.n_vars();
    let n_c = g.n_constraints();
    let by_var = g.var_adjacency();

    // Under-determined: var -(any edge)-> con -(matched edge)-> var.
    let mut under_var = vec![false; n_v];
    let mut under_con = vec![false; n_c];
    let mut queue: VecDeque<usize> = VecDeque::new();
    for v in matching.unmatched_vars() {
        under_var[v as usize] = true;
        queue.push_back(v as usize);
    }
    while let Some(v) = queue.pop_front() {
        for &c in &by_var[v] {
            let c = c as usize;
            if under_con[c] {
                continue;
            }
            under_con[c] = true;
            if let Some(mate) = matching.con_mate(c) {
                let mate = mate as usize;
                if !under_var[mate] {
                    under_var[mate] = true;
                    queue.push_back(mate);
                }
            }
        }
    }

    // Over-determined: con -(any edge)-> var -(matched edge)-> con.
    let mut over_var = vec![false; n_v];
    let mut over_con = vec![false; n_c];
    for c in matching.unmatched_constraints() {
        over_con[c as usize] = true;
        queue.push_back(c as usize);
    }
    while let Some(c) = queue.pop_front() {
        for &v in g.neighbours(c) {
            let v = v as usize;
            if over_var[v] {
                continue;
            }
            over_var[v] = true;
            if let Some(mate) = matching.var_mate(v) {
                let mate = mate as usize;
                if !over_con[mate] {
                    over_con[mate] = true;
                    queue.push_back(mate);
                }
            }
        }
    }

    let mut partition = DmPartition::default();
    for v in 0..n_v {
        let bucket = if matching.var_mate(v).is_none() {
            &mut partition.vars.unmatched
        } else if under_var[v] {
            &mut partition.vars.underconstrained
        } else if over_var[v] {
            &mut partition.vars.overconstrained
        } else {
            &mut partition.vars.square
        };
        bucket.push(v as u32);
    }
    for c in 0..n_c {
        let bucket = if matching.con_mate(c).is_none() {
            &mut partition.constraints.unmatched
        } else if over_con[c] {
            &mut partition.constraints.overconstrained
        } else if under_con[c] {
            &mut partition.constraints.underconstrained
        } else {
            &mut partition.constraints.square
        };
        bucket.push(c as u32);
    }
    partition
}
