//! Two-path index: maintains counts of length-two directed configurations
//! between node pairs so alternating k-triangle/k-two-path statistics can be
//! evaluated without rescanning neighbourhoods on every proposal.
//!
//! Three configurations are tracked for an ordered pair `(i, j)`:
//! - **mixed** — a genuine directed two-path between `i` and `j`, in either
//!   direction: `i -> k -> j` (transitive) or `j -> k -> i` (cyclic).
//! - **out** — a node `k` with out-ties to both: `k -> i` and `k -> j`
//!   ("out-two-star", sometimes called the "down" orientation).
//! - **in** — a node `k` with in-ties from both: `i -> k` and `j -> k`
//!   ("in-two-star", the "up" orientation).
//!
//! The change-statistic library's four alternating-k-triangle orientations
//! need the transitive and cyclic components of "mixed" individually, so
//! each backend also exposes `transitive`/`cyclic` directly.
//!
//! Three backends share this interface, selected at run time via the
//! `twoPathBackend` configuration key:
//! - [`dense::DenseTwoPathIndex`] — `N*N` arrays, fastest for small/medium N.
//! - [`sparse::SparseTwoPathIndex`] — hash-map keyed on packed node pairs,
//!   for large sparse graphs.
//! - [`disabled::DisabledTwoPathIndex`] — no cached counts; every query walks
//!   neighbour lists on demand. Always correct, used as the property-test
//!   oracle and for graphs too large to afford a cache.

mod dense;
mod disabled;
mod sparse;

pub use dense::DenseTwoPathIndex;
pub use disabled::DisabledTwoPathIndex;
pub use sparse::SparseTwoPathIndex;

use crate::error::TwoPathError;
use crate::graph::Graph;
use crate::types::NodeId;

/// Which two-path configuration a query or update concerns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Relation {
    /// A directed two-path between `i` and `j` in either direction.
    Mixed,
    /// A node with out-ties to both `i` and `j` ("out-two-star").
    Out,
    /// A node with in-ties from both `i` and `j` ("in-two-star").
    In,
}

/// Common interface for two-path count backends.
///
/// Implementations must satisfy: for any `i != j`, `query(relation, i, j)`
/// equals the number of nodes `k` forming the requested configuration
/// between `i` and `j`, and remains correct after any sequence of `update`
/// calls mirroring the graph's actual arc toggles.
pub trait TwoPathIndex {
    /// Number of two-path configurations of the given `relation` between
    /// `i` and `j`.
    fn query(&self, relation: Relation, i: NodeId, j: NodeId) -> u32;

    /// Number of nodes `k` with `i -> k` and `k -> j`.
    fn transitive(&self, i: NodeId, j: NodeId) -> u32;

    /// Number of nodes `k` with `j -> k` and `k -> i`. Equal to
    /// `transitive(j, i)`.
    fn cyclic(&self, i: NodeId, j: NodeId) -> u32 {
        self.transitive(j, i)
    }

    /// Informs the index that arc `tail -> head` was inserted (`delta = 1`)
    /// or removed (`delta = -1`). Must be called once per toggle, after the
    /// graph itself has been updated.
    fn update(&mut self, graph: &Graph, tail: NodeId, head: NodeId, delta: i8);

    /// Rebuilds the index from scratch by scanning `graph`. Used at
    /// construction and by invariant checks that compare an incrementally
    /// maintained backend against a fresh recomputation.
    fn rebuild(&mut self, graph: &Graph);
}

/// Runtime-selected two-path backend, dispatched via a tagged enum rather
/// than a trait object so the hot sampler loop avoids virtual calls.
#[derive(Debug)]
pub enum TwoPathBackend {
    /// See [`DenseTwoPathIndex`].
    Dense(DenseTwoPathIndex),
    /// See [`SparseTwoPathIndex`].
    Sparse(SparseTwoPathIndex),
    /// See [`DisabledTwoPathIndex`].
    Disabled(DisabledTwoPathIndex),
}

impl TwoPathBackend {
    /// Builds a dense backend sized for `node_count`, scanning `graph`.
    #[must_use]
    pub fn dense(graph: &Graph) -> Self {
        let mut index = DenseTwoPathIndex::new(graph.node_count());
        index.rebuild(graph);
        Self::Dense(index)
    }

    /// Builds a sparse backend, scanning `graph`.
    #[must_use]
    pub fn sparse(graph: &Graph) -> Self {
        let mut index = SparseTwoPathIndex::new();
        index.rebuild(graph);
        Self::Sparse(index)
    }

    /// Builds a disabled backend (no cache; recomputes on every query).
    #[must_use]
    pub fn disabled() -> Self {
        Self::Disabled(DisabledTwoPathIndex::new())
    }

    /// Queries the active backend.
    #[must_use]
    pub fn query(&self, graph: &Graph, relation: Relation, i: NodeId, j: NodeId) -> u32 {
        match self {
            Self::Dense(index) => index.query(relation, i, j),
            Self::Sparse(index) => index.query(relation, i, j),
            Self::Disabled(index) => index.query_with_graph(graph, relation, i, j),
        }
    }

    /// Number of nodes `k` with `i -> k -> j`.
    #[must_use]
    pub fn transitive(&self, graph: &Graph, i: NodeId, j: NodeId) -> u32 {
        match self {
            Self::Dense(index) => index.transitive(i, j),
            Self::Sparse(index) => index.transitive(i, j),
            Self::Disabled(index) => index.transitive_with_graph(graph, i, j),
        }
    }

    /// Number of nodes `k` with `j -> k -> i`.
    #[must_use]
    pub fn cyclic(&self, graph: &Graph, i: NodeId, j: NodeId) -> u32 {
        self.transitive(graph, j, i)
    }

    /// Updates the active backend after a toggle.
    pub fn update(&mut self, graph: &Graph, tail: NodeId, head: NodeId, delta: i8) {
        match self {
            Self::Dense(index) => index.update(graph, tail, head, delta),
            Self::Sparse(index) => index.update(graph, tail, head, delta),
            Self::Disabled(index) => index.update(graph, tail, head, delta),
        }
    }

    /// Compares every ordered pair's cached counts against a from-scratch
    /// scan of `graph`, returning the first disagreement. `O(n^2)`; intended
    /// for debug assertions and property tests, never the sampler hot path.
    ///
    /// # Errors
    /// Returns [`TwoPathError::Mismatch`] at the first ordered pair whose
    /// cached count disagrees with the scan.
    pub fn check_invariant(&self, graph: &Graph) -> Result<(), TwoPathError> {
        let oracle = DisabledTwoPathIndex::new();
        let n = graph.node_count() as NodeId;
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                for relation in [Relation::Mixed, Relation::Out, Relation::In] {
                    let reported = self.query(graph, relation, i, j);
                    let actual = oracle.query_with_graph(graph, relation, i, j);
                    if reported != actual {
                        return Err(TwoPathError::Mismatch {
                            i,
                            j,
                            reported,
                            actual,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
