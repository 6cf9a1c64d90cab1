//! Snowball-sample metadata for conditional estimation.
//!
//! A snowball sample partitions nodes into zones `0..=max_zone`. Zone 0 is
//! the seed set; zone `max_zone` is the outermost wave, whose ties were never
//! traced and so must never be proposed for toggling. Conditional estimation
//! treats everything inside zone `max_zone - 1` as "inner" and only resamples
//! arcs among inner nodes.

use std::collections::HashSet;

use crate::types::NodeId;

/// Per-node zone assignment and derived bookkeeping for conditional
/// (snowball) estimation.
#[derive(Clone, Debug)]
pub struct SnowballMetadata {
    zones: Vec<u32>,
    max_zone: u32,
    inner_nodes: HashSet<NodeId>,
    allinnerarcs: HashSet<(NodeId, NodeId)>,
    prev_wave_degree: Vec<u32>,
}

impl SnowballMetadata {
    /// Builds snowball metadata from a per-node zone assignment.
    ///
    /// Nodes with `zone < max_zone` are "inner"; `prev_wave_degree[v]` counts
    /// `v`'s neighbors, ignoring arc direction, whose zone is one less than
    /// `v`'s own zone. Conditional estimation must never let this drop to
    /// zero for a node that still has ties to report.
    #[must_use]
    pub fn new(zones: Vec<u32>) -> Self {
        let max_zone = zones.iter().copied().max().unwrap_or(0);
        let inner_nodes = zones
            .iter()
            .enumerate()
            .filter(|&(_, &zone)| zone < max_zone)
            .map(|(node, _)| node as NodeId)
            .collect();
        let prev_wave_degree = vec![0; zones.len()];
        Self {
            zones,
            max_zone,
            inner_nodes,
            allinnerarcs: HashSet::new(),
            prev_wave_degree,
        }
    }

    /// Zone index of `node`.
    #[must_use]
    pub fn zone(&self, node: NodeId) -> u32 {
        self.zones[node as usize]
    }

    /// Highest zone index present in the sample.
    #[must_use]
    pub fn max_zone(&self) -> u32 {
        self.max_zone
    }

    /// `true` if `node` belongs to a zone strictly inside `max_zone`, and so
    /// may have its incident arcs toggled.
    #[must_use]
    pub fn is_inner(&self, node: NodeId) -> bool {
        self.inner_nodes.contains(&node)
    }

    /// Number of inner nodes.
    #[must_use]
    pub fn num_inner_nodes(&self) -> usize {
        self.inner_nodes.len()
    }

    /// Number of arcs currently recorded between two inner nodes.
    #[must_use]
    pub fn num_inner_arcs(&self) -> usize {
        self.allinnerarcs.len()
    }

    /// `true` if arc `tail -> head` is eligible to be toggled under
    /// conditional estimation: both endpoints inner, and the zones differ by
    /// at most one.
    #[must_use]
    pub fn is_toggleable(&self, tail: NodeId, head: NodeId) -> bool {
        if !self.is_inner(tail) || !self.is_inner(head) {
            return false;
        }
        let (zt, zh) = (self.zone(tail), self.zone(head));
        zt.abs_diff(zh) <= 1
    }

    /// `true` if removing arc `tail -> head` would drop the deeper
    /// endpoint's wave-facing degree to zero, which conditional estimation
    /// forbids: a node stripped of all its ties to the previous wave is no
    /// longer a valid snowball observation.
    #[must_use]
    pub fn would_orphan_wave_degree(&self, tail: NodeId, head: NodeId) -> bool {
        if self.zone(tail) == self.zone(head) + 1 {
            self.prev_wave_degree[tail as usize] <= 1
        } else if self.zone(head) == self.zone(tail) + 1 {
            self.prev_wave_degree[head as usize] <= 1
        } else {
            false
        }
    }

    /// Draws an arc uniformly from `allinnerarcs`, for the TNT delete branch
    /// under conditional estimation. `O(n)` in the number of inner arcs.
    #[must_use]
    pub fn random_inner_arc<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Option<(NodeId, NodeId)> {
        if self.allinnerarcs.is_empty() {
            return None;
        }
        let target = rng.gen_range(0..self.allinnerarcs.len());
        self.allinnerarcs.iter().nth(target).copied()
    }

    pub(super) fn on_insert(&mut self, tail: NodeId, head: NodeId) {
        if self.is_inner(tail) && self.is_inner(head) {
            self.allinnerarcs.insert((tail, head));
        }
        if self.zone(tail) == self.zone(head) + 1 {
            self.prev_wave_degree[tail as usize] += 1;
        } else if self.zone(head) == self.zone(tail) + 1 {
            self.prev_wave_degree[head as usize] += 1;
        }
    }

    pub(super) fn on_remove(&mut self, tail: NodeId, head: NodeId) {
        self.allinnerarcs.remove(&(tail, head));
        if self.zone(tail) == self.zone(head) + 1 {
            self.prev_wave_degree[tail as usize] =
                self.prev_wave_degree[tail as usize].saturating_sub(1);
        } else if self.zone(head) == self.zone(tail) + 1 {
            self.prev_wave_degree[head as usize] =
                self.prev_wave_degree[head as usize].saturating_sub(1);
        }
    }
}
