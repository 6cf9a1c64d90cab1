//! Structural invariant checks for [`super::Graph`].
//!
//! Surfaced via [`super::Graph::invariants`] so property-based tests can
//! assert graph health after a sequence of toggles without reimplementing
//! traversal logic themselves.

use std::collections::HashSet;

use thiserror::Error;

use super::Graph;
use crate::types::NodeId;

/// Enumerates the structural invariants enforced on [`super::Graph`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphInvariant {
    /// Every arc in the flat list has a matching out/in adjacency entry and
    /// vice versa.
    AdjacencyConsistency,
    /// The reverse index maps each arc to its true position in the flat list.
    ReverseIndexConsistency,
    /// No arc is a self-loop and no node index exceeds `node_count`.
    NoSelfLoopsInBounds,
    /// `mutual_count` equals the number of reciprocated pairs found by scan.
    MutualCountConsistency,
}

impl GraphInvariant {
    /// All invariants, in the order they should be evaluated.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::AdjacencyConsistency,
            Self::ReverseIndexConsistency,
            Self::NoSelfLoopsInBounds,
            Self::MutualCountConsistency,
        ]
    }
}

/// A single invariant violation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GraphInvariantViolation {
    /// `out_adj`/`in_adj` disagree with the flat arc list about an arc.
    #[error("arc {tail}->{head} is inconsistent between adjacency lists and the arc list")]
    AdjacencyMismatch {
        /// Tail of the offending arc.
        tail: NodeId,
        /// Head of the offending arc.
        head: NodeId,
    },
    /// `arc_index` maps an arc to a position that does not hold that arc.
    #[error("arc index maps {tail}->{head} to position {pos}, but arcs[{pos}] holds a different pair")]
    ReverseIndexMismatch {
        /// Tail of the offending arc.
        tail: NodeId,
        /// Head of the offending arc.
        head: NodeId,
        /// The stale recorded position.
        pos: usize,
    },
    /// An arc is a self-loop or references an out-of-bounds node.
    #[error("arc {tail}->{head} violates self-loop/bounds constraints for {node_count} nodes")]
    SelfLoopOrOutOfBounds {
        /// Tail of the offending arc.
        tail: NodeId,
        /// Head of the offending arc.
        head: NodeId,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// The incrementally maintained mutual-pair counter disagrees with a
    /// from-scratch scan.
    #[error("mutual_count reports {reported} mutual pairs, but a scan found {actual}")]
    MutualCountMismatch {
        /// Value returned by `Graph::mutual_count`.
        reported: usize,
        /// Value obtained by scanning the arc list.
        actual: usize,
    },
}

/// Helper returned by [`super::Graph::invariants`] to run structural checks.
#[derive(Debug)]
pub struct GraphInvariantChecker<'graph> {
    graph: &'graph Graph,
}

impl<'graph> GraphInvariantChecker<'graph> {
    pub(super) fn new(graph: &'graph Graph) -> Self {
        Self { graph }
    }

    /// Runs all invariants, returning the first violation encountered.
    pub fn check_all(&self) -> Result<(), GraphInvariantViolation> {
        self.check_many(GraphInvariant::all())
    }

    /// Runs a custom subset of invariants in the provided order.
    pub fn check_many(
        &self,
        invariants: impl IntoIterator<Item = GraphInvariant>,
    ) -> Result<(), GraphInvariantViolation> {
        for invariant in invariants {
            self.dispatch(invariant)?;
        }
        Ok(())
    }

    /// Runs a single invariant.
    pub fn check(&self, invariant: GraphInvariant) -> Result<(), GraphInvariantViolation> {
        self.check_many([invariant])
    }

    /// Executes every invariant and returns the full set of violations,
    /// rather than stopping at the first.
    #[must_use]
    pub fn collect_all(&self) -> Vec<GraphInvariantViolation> {
        GraphInvariant::all()
            .into_iter()
            .filter_map(|invariant| self.dispatch(invariant).err())
            .collect()
    }

    fn dispatch(&self, invariant: GraphInvariant) -> Result<(), GraphInvariantViolation> {
        match invariant {
            GraphInvariant::AdjacencyConsistency => self.check_adjacency_consistency(),
            GraphInvariant::ReverseIndexConsistency => self.check_reverse_index_consistency(),
            GraphInvariant::NoSelfLoopsInBounds => self.check_no_self_loops_in_bounds(),
            GraphInvariant::MutualCountConsistency => self.check_mutual_count_consistency(),
        }
    }

    fn check_adjacency_consistency(&self) -> Result<(), GraphInvariantViolation> {
        for &(tail, head) in &self.graph.arcs {
            if !self.graph.out_adj[tail as usize].contains(&head)
                || !self.graph.in_adj[head as usize].contains(&tail)
            {
                return Err(GraphInvariantViolation::AdjacencyMismatch { tail, head });
            }
        }
        for (tail, heads) in self.graph.out_adj.iter().enumerate() {
            for &head in heads {
                if !self.graph.arc_index.contains_key(&(tail as NodeId, head)) {
                    return Err(GraphInvariantViolation::AdjacencyMismatch {
                        tail: tail as NodeId,
                        head,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_reverse_index_consistency(&self) -> Result<(), GraphInvariantViolation> {
        for (&arc, &pos) in &self.graph.arc_index {
            if self.graph.arcs.get(pos) != Some(&arc) {
                return Err(GraphInvariantViolation::ReverseIndexMismatch {
                    tail: arc.0,
                    head: arc.1,
                    pos,
                });
            }
        }
        Ok(())
    }

    fn check_no_self_loops_in_bounds(&self) -> Result<(), GraphInvariantViolation> {
        let node_count = self.graph.node_count;
        for &(tail, head) in &self.graph.arcs {
            let in_bounds = (tail as usize) < node_count && (head as usize) < node_count;
            if tail == head || !in_bounds {
                return Err(GraphInvariantViolation::SelfLoopOrOutOfBounds {
                    tail,
                    head,
                    node_count,
                });
            }
        }
        Ok(())
    }

    fn check_mutual_count_consistency(&self) -> Result<(), GraphInvariantViolation> {
        let mut seen = HashSet::new();
        let mut actual = 0;
        for &(tail, head) in &self.graph.arcs {
            let pair = if tail < head { (tail, head) } else { (head, tail) };
            if !seen.insert(pair) {
                continue;
            }
            if self.graph.is_arc(tail, head) && self.graph.is_arc(head, tail) {
                actual += 1;
            }
        }
        if actual != self.graph.mutual_pairs {
            return Err(GraphInvariantViolation::MutualCountMismatch {
                reported: self.graph.mutual_pairs,
                actual,
            });
        }
        Ok(())
    }
}
