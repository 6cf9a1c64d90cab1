//! Primitive type aliases shared across the ERGM core.

/// Identifier of a node, renumbered `0..N` on load.
pub type NodeId = u32;

/// Position of an arc within the flat arc list (see [`crate::graph::Graph`]).
pub type ArcPos = usize;

/// Index into a `theta`/change-statistic vector.
pub type StatIndex = usize;

/// A directed arc, stored as `(tail, head)`.
pub type Arc = (NodeId, NodeId);
