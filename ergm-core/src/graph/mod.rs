//! Directed graph store with O(1) arc toggling.
//!
//! The representation uses out/in adjacency lists for
//! iteration, a flat arc list for uniform random arc selection, and a
//! reverse index so any arc can be located and removed in O(1) via
//! swap-with-last. Mutual-arc bookkeeping is an incremental counter so
//! reciprocity-dependent statistics never need to scan.

mod attributes;
mod invariants;
mod snowball;

#[cfg(test)]
mod tests;

pub use attributes::{AttributeError, AttributeTable, NodeAttributes};
pub use invariants::{GraphInvariant, GraphInvariantChecker, GraphInvariantViolation};
pub use snowball::SnowballMetadata;

use std::collections::HashMap;

use rand::Rng;

use crate::error::GraphError;
use crate::types::{Arc, ArcPos, NodeId};

/// A directed graph over nodes `0..node_count`, with O(1) arc toggling.
#[derive(Clone, Debug)]
pub struct Graph {
    node_count: usize,
    out_adj: Vec<Vec<NodeId>>,
    in_adj: Vec<Vec<NodeId>>,
    arcs: Vec<Arc>,
    arc_index: HashMap<Arc, ArcPos>,
    mutual_pairs: usize,
    snowball: Option<SnowballMetadata>,
    attributes: AttributeTable,
}

impl Graph {
    /// Creates an empty directed graph over `node_count` nodes.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            out_adj: vec![Vec::new(); node_count],
            in_adj: vec![Vec::new(); node_count],
            arcs: Vec::new(),
            arc_index: HashMap::new(),
            mutual_pairs: 0,
            snowball: None,
            attributes: AttributeTable::new(),
        }
    }

    /// Attaches snowball-sample metadata to this graph, enabling the
    /// `*_inner_arc` operations and conditional-estimation bookkeeping.
    pub fn set_snowball(&mut self, snowball: SnowballMetadata) {
        self.snowball = Some(snowball);
    }

    /// Returns the snowball metadata, if conditional estimation is active.
    #[must_use]
    pub fn snowball(&self) -> Option<&SnowballMetadata> {
        self.snowball.as_ref()
    }

    /// Loads a named node-attribute table, validating it against the
    /// graph's node count.
    ///
    /// # Errors
    /// Returns [`AttributeError::RowCountMismatch`] if the table's length
    /// does not match `node_count`.
    pub fn load_attribute(
        &mut self,
        name: impl Into<String>,
        attribute: NodeAttributes,
    ) -> Result<(), AttributeError> {
        self.attributes.insert(name, self.node_count, attribute)
    }

    /// Returns the graph's loaded node-attribute tables.
    #[must_use]
    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }

    /// Number of nodes in the graph (fixed at construction).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of arcs currently present.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Number of unordered pairs `{i, j}` with both `i->j` and `j->i` present.
    #[must_use]
    pub fn mutual_count(&self) -> usize {
        self.mutual_pairs
    }

    /// Returns `true` if `tail -> head` is present, in O(1) expected time.
    #[must_use]
    pub fn is_arc(&self, tail: NodeId, head: NodeId) -> bool {
        self.arc_index.contains_key(&(tail, head))
    }

    /// Returns the out-neighbours of `node`.
    #[must_use]
    pub fn out_neighbours(&self, node: NodeId) -> &[NodeId] {
        &self.out_adj[node as usize]
    }

    /// Returns the in-neighbours of `node`.
    #[must_use]
    pub fn in_neighbours(&self, node: NodeId) -> &[NodeId] {
        &self.in_adj[node as usize]
    }

    /// Out-degree of `node`.
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_adj[node as usize].len()
    }

    /// In-degree of `node`.
    #[must_use]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_adj[node as usize].len()
    }

    /// Iterates over all arcs in no particular order.
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.arcs.iter().copied()
    }

    /// Current position of arc `(tail, head)` in the flat arc list, if present.
    #[must_use]
    pub fn arc_position(&self, tail: NodeId, head: NodeId) -> Option<ArcPos> {
        self.arc_index.get(&(tail, head)).copied()
    }

    fn validate_pair(&self, tail: NodeId, head: NodeId) -> Result<(), GraphError> {
        if tail == head {
            return Err(GraphError::SelfLoop { node: tail });
        }
        if tail as usize >= self.node_count {
            return Err(GraphError::NodeOutOfBounds {
                node: tail,
                node_count: self.node_count,
            });
        }
        if head as usize >= self.node_count {
            return Err(GraphError::NodeOutOfBounds {
                node: head,
                node_count: self.node_count,
            });
        }
        Ok(())
    }

    /// Inserts arc `tail -> head`. Requires the arc to be absent and
    /// `tail != head`.
    ///
    /// # Errors
    /// Returns [`GraphError::ArcAlreadyPresent`], [`GraphError::SelfLoop`], or
    /// [`GraphError::NodeOutOfBounds`].
    pub fn insert_arc(&mut self, tail: NodeId, head: NodeId) -> Result<(), GraphError> {
        self.validate_pair(tail, head)?;
        if self.is_arc(tail, head) {
            return Err(GraphError::ArcAlreadyPresent { tail, head });
        }
        self.raw_insert(tail, head);
        Ok(())
    }

    fn raw_insert(&mut self, tail: NodeId, head: NodeId) {
        let pos = self.arcs.len();
        self.arcs.push((tail, head));
        self.arc_index.insert((tail, head), pos);
        self.out_adj[tail as usize].push(head);
        self.in_adj[head as usize].push(tail);
        if self.is_arc(head, tail) {
            self.mutual_pairs += 1;
        }
    }

    /// Removes the arc stored at flat-list position `pos`. Requires `pos` to
    /// be a valid index into the current arc list.
    ///
    /// # Errors
    /// Returns [`GraphError::ArcAbsent`] if `pos` is out of range.
    pub fn remove_arc_at(&mut self, pos: ArcPos) -> Result<Arc, GraphError> {
        let &(tail, head) = self
            .arcs
            .get(pos)
            .ok_or(GraphError::ArcPositionOutOfRange {
                pos,
                arc_count: self.arcs.len(),
            })?;
        self.raw_remove(pos);
        Ok((tail, head))
    }

    /// Removes arc `tail -> head`. Requires the arc to be present.
    ///
    /// # Errors
    /// Returns [`GraphError::ArcAbsent`] if the arc does not exist.
    pub fn remove_arc(&mut self, tail: NodeId, head: NodeId) -> Result<(), GraphError> {
        let pos = self
            .arc_index
            .get(&(tail, head))
            .copied()
            .ok_or(GraphError::ArcAbsent { tail, head })?;
        self.raw_remove(pos);
        Ok(())
    }

    fn raw_remove(&mut self, pos: ArcPos) {
        let (tail, head) = self.arcs[pos];
        if self.is_arc(head, tail) {
            self.mutual_pairs -= 1;
        }
        let last = self.arcs.len() - 1;
        if pos != last {
            self.arcs.swap(pos, last);
            let moved = self.arcs[pos];
            self.arc_index.insert(moved, pos);
        }
        self.arcs.pop();
        self.arc_index.remove(&(tail, head));
        remove_first(&mut self.out_adj[tail as usize], head);
        remove_first(&mut self.in_adj[head as usize], tail);
    }

    /// Inserts arc `tail -> head` and, if snowball metadata is attached,
    /// updates `allinnerarcs` and `prev_wave_degree`.
    ///
    /// # Errors
    /// As [`Graph::insert_arc`].
    pub fn insert_inner_arc(&mut self, tail: NodeId, head: NodeId) -> Result<(), GraphError> {
        self.insert_arc(tail, head)?;
        if let Some(snowball) = &mut self.snowball {
            snowball.on_insert(tail, head);
        }
        Ok(())
    }

    /// Removes arc `tail -> head` and, if snowball metadata is attached,
    /// updates `allinnerarcs` and `prev_wave_degree`.
    ///
    /// # Errors
    /// As [`Graph::remove_arc`].
    pub fn remove_inner_arc(&mut self, tail: NodeId, head: NodeId) -> Result<(), GraphError> {
        self.remove_arc(tail, head)?;
        if let Some(snowball) = &mut self.snowball {
            snowball.on_remove(tail, head);
        }
        Ok(())
    }

    /// Draws an arc uniformly at random from the flat arc list, returning its
    /// endpoints and position. Used by the TNT delete branch and the IFD
    /// sampler.
    #[must_use]
    pub fn random_arc<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(NodeId, NodeId, ArcPos)> {
        if self.arcs.is_empty() {
            return None;
        }
        let pos = rng.gen_range(0..self.arcs.len());
        let (tail, head) = self.arcs[pos];
        Some((tail, head, pos))
    }

    /// Draws an ordered pair `(i, j)` with `i != j` uniformly at random from
    /// all `N(N-1)` ordered pairs, regardless of arc presence.
    #[must_use]
    pub fn random_ordered_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(NodeId, NodeId)> {
        if self.node_count < 2 {
            return None;
        }
        loop {
            let i = rng.gen_range(0..self.node_count) as NodeId;
            let j = rng.gen_range(0..self.node_count) as NodeId;
            if i != j {
                return Some((i, j));
            }
        }
    }

    /// Rejection-samples an ordered pair `(i, j)` with no arc `i -> j`.
    /// Acceptable because ERGM-scale graphs are sparse.
    #[must_use]
    pub fn random_non_arc<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(NodeId, NodeId)> {
        if (self.node_count as u64) * (self.node_count as u64 - 1) <= self.arcs.len() as u64 {
            return None;
        }
        loop {
            let (i, j) = self.random_ordered_pair(rng)?;
            if !self.is_arc(i, j) {
                return Some((i, j));
            }
        }
    }

    /// Returns `true` if `node` is a trap (has no out-arcs).
    #[must_use]
    pub fn is_trap(&self, node: NodeId) -> bool {
        self.out_degree(node) == 0
    }

    /// Runs the invariant checker (arc-list/adjacency consistency).
    #[must_use]
    pub fn invariants(&self) -> GraphInvariantChecker<'_> {
        GraphInvariantChecker::new(self)
    }
}

fn remove_first(list: &mut Vec<NodeId>, value: NodeId) {
    if let Some(pos) = list.iter().position(|&candidate| candidate == value) {
        list.swap_remove(pos);
    }
}
