//! Sparse hash-map two-path count backend, for large graphs where dense
//! `N*N` arrays would not fit in memory.

use std::collections::HashMap;

use super::{Relation, TwoPathIndex};
use crate::graph::Graph;
use crate::types::{Arc, NodeId};

/// Caches only the non-zero entries of the same three maps
/// [`super::DenseTwoPathIndex`] keeps as dense arrays.
#[derive(Clone, Debug, Default)]
pub struct SparseTwoPathIndex {
    cross: HashMap<Arc, u32>,
    shared_out: HashMap<Arc, u32>,
    shared_in: HashMap<Arc, u32>,
}

impl SparseTwoPathIndex {
    /// Creates an empty sparse index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn add(map: &mut HashMap<Arc, u32>, key: Arc, delta: i8) {
        if delta >= 0 {
            *map.entry(key).or_insert(0) += delta as u32;
            return;
        }
        if let Some(count) = map.get_mut(&key) {
            *count -= (-delta) as u32;
            if *count == 0 {
                map.remove(&key);
            }
        }
    }
}

impl TwoPathIndex for SparseTwoPathIndex {
    fn query(&self, relation: Relation, i: NodeId, j: NodeId) -> u32 {
        match relation {
            Relation::Mixed => self.transitive(i, j) + self.cyclic(i, j),
            Relation::Out => self.shared_out.get(&(i, j)).copied().unwrap_or(0),
            Relation::In => self.shared_in.get(&(i, j)).copied().unwrap_or(0),
        }
    }

    fn transitive(&self, i: NodeId, j: NodeId) -> u32 {
        self.cross.get(&(i, j)).copied().unwrap_or(0)
    }

    fn update(&mut self, graph: &Graph, tail: NodeId, head: NodeId, delta: i8) {
        for &i in graph.in_neighbours(tail) {
            if i != head {
                Self::add(&mut self.cross, (i, head), delta);
            }
        }
        for &j in graph.out_neighbours(head) {
            if j != tail {
                Self::add(&mut self.cross, (tail, j), delta);
            }
        }
        for &x in graph.out_neighbours(tail) {
            if x != head {
                Self::add(&mut self.shared_out, (head, x), delta);
                Self::add(&mut self.shared_out, (x, head), delta);
            }
        }
        for &x in graph.in_neighbours(head) {
            if x != tail {
                Self::add(&mut self.shared_in, (tail, x), delta);
                Self::add(&mut self.shared_in, (x, tail), delta);
            }
        }
    }

    fn rebuild(&mut self, graph: &Graph) {
        self.cross.clear();
        self.shared_out.clear();
        self.shared_in.clear();
        let n = graph.node_count() as NodeId;
        for k in 0..n {
            for &i in graph.in_neighbours(k) {
                for &j in graph.out_neighbours(k) {
                    Self::add(&mut self.cross, (i, j), 1);
                }
            }
            let out_nbrs = graph.out_neighbours(k);
            for &i in out_nbrs {
                for &j in out_nbrs {
                    if i != j {
                        Self::add(&mut self.shared_out, (i, j), 1);
                    }
                }
            }
            let in_nbrs = graph.in_neighbours(k);
            for &i in in_nbrs {
                for &j in in_nbrs {
                    if i != j {
                        Self::add(&mut self.shared_in, (i, j), 1);
                    }
                }
            }
        }
    }
}
