//! Maximum-cardinality bipartite matching (Hopcroft-Karp).
//!
//! Each phase runs a BFS from every unmatched constraint to layer the graph,
//! then augments along vertex-disjoint shortest alternating paths. The DFS
//! is iterative so path length is bounded by heap, not stack.

use std::collections::VecDeque;

use crate::bipartite::Bipartite;

const UNREACHED: u32 = u32::MAX;

/// A matching between constraint and variable vertices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matching {
    con_mate: Vec<Option<u32>>,
    var_mate: Vec<Option<u32>>,
}

impl Matching {
    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.con_mate.iter().filter(|m| m.is_some()).count()
    }

    /// Whether nothing is matched.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Variable matched to constraint `c`.
    pub fn con_mate(&self, c: usize) -> Option<u32> {
        self.con_mate[c]
    }

    /// Constraint matched to variable `v`.
    pub fn var_mate(&self, v: usize) -> Option<u32> {
        self.var_mate[v]
    }

    /// Constraint vertices left unmatched.
    pub fn unmatched_constraints(&self) -> Vec<u32> {
        unmatched(&self.con_mate)
    }

    /// Variable vertices left unmatched.
    pub fn unmatched_vars(&self) -> Vec<u32> {
        unmatched(&self.var_mate)
    }

    /// Whether every vertex on both sides is matched.
    pub fn is_perfect(&self) -> bool {
        self.con_mate.iter().all(Option::is_some) && self.var_mate.iter().all(Option::is_some)
    }
}

fn unmatched(mates: &[Option<u32>]) -> Vec<u32> {
    mates
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_none())
        .map(|(i, _)| i as u32)
        .collect()
}

/// Compute a maximum-cardinality matching of `g`.
pub fn maximum_matching(g: &Bipartite) -> Matching {
    let n_c = g.n_constraints();
    let mut con_mate: Vec<Option<u32>> = vec![None; n_c];
    let mut var_mate: Vec<Option<u32>> = vec![None; g.n_vars()];
    let mut dist = vec![UNREACHED; n_c];
    let mut next_edge = vec![0usize; n_c];
    let mut queue = VecDeque::with_capacity(n_c);

    loop {
        // Layer constraints by alternating distance from the free ones.
        queue.clear();
        for c in 0..n_c {
            if con_mate[c].is_none() {
                dist[c] = 0;
                queue.push_back(c);
            } else {
                dist[c] = UNREACHED;
            }
        }
        let mut reachable_free_var = false;
        while let Some(c) = queue.pop_front() {
            for &v in g.neighbours(c) {
                match var_mate[v as usize] {
                    None => reachable_free_var = true,
                    Some(c2) => {
                        let c2 = c2 as usize;
                        if dist[c2] == UNREACHED {
                            dist[c2] = dist[c] + 1;
                            queue.push_back(c2);
                        }
                    }
                }
            }
        }
        if !reachable_free_var {
            break;
        }

        next_edge.iter_mut().for_each(|e| *e = 0);
        let mut augmented = false;
        for root in 0..n_c {
            if con_mate[root].is_none()
                && augment(g, root, &mut dist, &mut next_edge, &mut con_mate, &mut var_mate)
            {
                augmented = true;
            }
        }
        if !augmented {
            break;
        }
    }

    Matching { con_mate, var_mate }
}

/// Search one layered alternating path from the free constraint `root` and
/// flip it if it ends at a free variable.
fn augment(
    g: &Bipartite,
    root: usize,
    dist: &mut [u32],
    next_edge: &mut [usize],
    con_mate: &mut [Option<u32>],
    var_mate: &mut [Option<u32>],
) -> bool {
    let mut path = vec![root];
    while let Some(&c) = path.last() {
        let neighbours = g.neighbours(c);
        if next_edge[c] == neighbours.len() {
            // Dead end for the rest of this phase.
            dist[c] = UNREACHED;
            path.pop();
            continue;
        }
        let v = neighbours[next_edge[c]] as usize;
        next_edge[c] += 1;
        match var_mate[v] {
            None => {
                // Each constraint on the path takes the variable its successor
                // gives up; the last one takes the free variable.
                let mut free = v;
                for &ci in path.iter().rev() {
                    let previous = con_mate[ci];
                    con_mate[ci] = Some(free as u32);
                    var_mate[free] = Some(ci as u32);
                    if let Some(p) = previous {
                        free = p as usize;
                    }
                }
                return true;
            }
            Some(c2) => {
                let c2 = c2 as usize;
                if dist[c2] == dist[c].wrapping_add(1) {
                    path.push(c2);
                }
            }
        }
    }
    false
}
