//! No-cache two-path backend: every query walks neighbour lists on demand.
//!
//! Always correct regardless of mutation history, at the cost of O(degree)
//! work per query instead of O(1). Used for graphs too large to afford a
//! cache and as the reference oracle in property tests comparing against
//! [`super::DenseTwoPathIndex`]/[`super::SparseTwoPathIndex`].

use super::Relation;
use crate::graph::Graph;
use crate::types::NodeId;

/// Stateless two-path backend. Does not implement [`super::TwoPathIndex`]
/// because it needs the graph at query time; [`super::TwoPathBackend`]
/// dispatches to its `_with_graph` methods directly instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledTwoPathIndex;

impl DisabledTwoPathIndex {
    /// Creates the backend. Carries no state.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes the requested configuration count directly from `graph`.
    #[must_use]
    pub fn query_with_graph(&self, graph: &Graph, relation: Relation, i: NodeId, j: NodeId) -> u32 {
        match relation {
            Relation::Mixed => {
                self.transitive_with_graph(graph, i, j) + self.transitive_with_graph(graph, j, i)
            }
            Relation::Out => count_shared(graph.in_neighbours(i), graph.in_neighbours(j)),
            Relation::In => count_shared(graph.out_neighbours(i), graph.out_neighbours(j)),
        }
    }

    /// Number of nodes `k` with `i -> k` and `k -> j`.
    #[must_use]
    pub fn transitive_with_graph(&self, graph: &Graph, i: NodeId, j: NodeId) -> u32 {
        graph
            .out_neighbours(i)
            .iter()
            .filter(|&&k| graph.is_arc(k, j))
            .count() as u32
    }

    /// No-op: this backend holds no cache to update.
    pub fn update(&mut self, _graph: &Graph, _tail: NodeId, _head: NodeId, _delta: i8) {}

    /// No-op: this backend holds no cache to rebuild.
    pub fn rebuild(&mut self, _graph: &Graph) {}
}

fn count_shared(a: &[NodeId], b: &[NodeId]) -> u32 {
    a.iter().filter(|x| b.contains(x)).count() as u32
}
