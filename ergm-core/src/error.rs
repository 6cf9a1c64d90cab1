//! Error types for the ERGM core library.
//!
//! Defines the error enums exposed by the public API plus stable,
//! machine-readable codes for each variant.

use std::fmt;

use thiserror::Error;

use crate::types::NodeId;

/// Stable codes describing [`GraphError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GraphErrorCode {
    /// Arc already present when `insert_arc` was called.
    ArcAlreadyPresent,
    /// Arc absent when `remove_arc` was called.
    ArcAbsent,
    /// `insert_arc`/`remove_arc` was called with `i == j`.
    SelfLoop,
    /// A node index was outside `0..node_count`.
    NodeOutOfBounds,
    /// A flat arc-list position was outside `0..arc_count`.
    ArcPositionOutOfRange,
    /// An internal invariant (arc-list/adjacency desync) was violated.
    InvariantViolation,
}

impl GraphErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArcAlreadyPresent => "GRAPH_ARC_ALREADY_PRESENT",
            Self::ArcAbsent => "GRAPH_ARC_ABSENT",
            Self::SelfLoop => "GRAPH_SELF_LOOP",
            Self::NodeOutOfBounds => "GRAPH_NODE_OUT_OF_BOUNDS",
            Self::ArcPositionOutOfRange => "GRAPH_ARC_POSITION_OUT_OF_RANGE",
            Self::InvariantViolation => "GRAPH_INVARIANT_VIOLATION",
        }
    }
}

impl fmt::Display for GraphErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced by [`crate::graph::Graph`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// `insert_arc(i, j)` was called while the arc already existed.
    #[error("arc {tail}->{head} already exists")]
    ArcAlreadyPresent {
        /// Tail of the offending arc.
        tail: NodeId,
        /// Head of the offending arc.
        head: NodeId,
    },
    /// `remove_arc(i, j, pos)` was called but no such arc exists.
    #[error("arc {tail}->{head} does not exist")]
    ArcAbsent {
        /// Tail of the offending arc.
        tail: NodeId,
        /// Head of the offending arc.
        head: NodeId,
    },
    /// A self-loop was requested; self-loops are never permitted.
    #[error("self-loops are not permitted (node {node})")]
    SelfLoop {
        /// The repeated node index.
        node: NodeId,
    },
    /// A node index was outside the graph's node count.
    #[error("node {node} is out of bounds for a graph with {node_count} nodes")]
    NodeOutOfBounds {
        /// The offending node index.
        node: NodeId,
        /// Number of nodes the graph was constructed with.
        node_count: usize,
    },
    /// `remove_arc_at(pos)` was called with `pos >= arc_count`.
    #[error("arc position {pos} is out of range for {arc_count} arcs")]
    ArcPositionOutOfRange {
        /// The offending position.
        pos: usize,
        /// Number of arcs currently present.
        arc_count: usize,
    },
    /// A debug-only structural invariant was violated.
    #[error("graph invariant violated: {message}")]
    InvariantViolation {
        /// Human-readable description of the violated invariant.
        message: String,
    },
}

impl GraphError {
    /// Retrieves the stable [`GraphErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::ArcAlreadyPresent { .. } => GraphErrorCode::ArcAlreadyPresent,
            Self::ArcAbsent { .. } => GraphErrorCode::ArcAbsent,
            Self::SelfLoop { .. } => GraphErrorCode::SelfLoop,
            Self::NodeOutOfBounds { .. } => GraphErrorCode::NodeOutOfBounds,
            Self::ArcPositionOutOfRange { .. } => GraphErrorCode::ArcPositionOutOfRange,
            Self::InvariantViolation { .. } => GraphErrorCode::InvariantViolation,
        }
    }
}

/// Error produced while selecting or evaluating change statistics.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StatError {
    /// An attribute name referenced by a statistic was not loaded.
    #[error("attribute `{name}` was not found on the graph")]
    UnknownAttribute {
        /// The missing attribute's name.
        name: String,
    },
    /// A statistic name in `structParams`/`attrParams`/... was not recognised.
    #[error("unknown statistic name `{name}`")]
    UnknownStatistic {
        /// The offending statistic name.
        name: String,
    },
    /// The `theta` vector length did not match the statistic selection length.
    #[error("theta has {theta_len} components but {selection_len} statistics are selected")]
    ThetaLengthMismatch {
        /// Length of the supplied `theta` vector.
        theta_len: usize,
        /// Number of selected statistics.
        selection_len: usize,
    },
    /// An `AttributeInteraction` named an operand that appears at or after
    /// its own position in the selection, so the operand's value has not
    /// been computed yet.
    #[error(
        "interaction operand `{name}` must be selected before the interaction term that references it"
    )]
    InteractionOperandOrder {
        /// The offending operand name.
        name: String,
    },
}

/// A debug-only mismatch between an incrementally maintained two-path
/// backend and a from-scratch recomputation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TwoPathError {
    /// `query(relation, i, j)` disagreed with a fresh scan of the graph.
    #[error(
        "two-path index mismatch for ({i}, {j}): backend reports {reported}, scan found {actual}"
    )]
    Mismatch {
        /// First node of the queried pair.
        i: NodeId,
        /// Second node of the queried pair.
        j: NodeId,
        /// Value the incrementally maintained backend returned.
        reported: u32,
        /// Value a fresh scan of the graph found.
        actual: u32,
    },
}

/// Error produced by sampler kernels.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SamplerError {
    /// Propagated from the underlying graph store.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Propagated from change-statistic evaluation.
    #[error(transparent)]
    Stat(#[from] StatError),
    /// Conditional estimation combined with `forbidReciprocity` would need a
    /// joint resampling rule for zone-boundary arcs that is not implemented.
    #[error("conditional estimation combined with forbidReciprocity is not supported")]
    UnsupportedConditionalForbidReciprocity,
    /// A sampler could not find a valid proposal within its retry budget.
    #[error("sampler exhausted {attempts} resampling attempts without a valid proposal")]
    ResamplingExhausted {
        /// Number of rejection-resampling attempts made.
        attempts: usize,
    },
    /// A non-finite `theta` component was encountered; treated as fatal
    /// since it would make every acceptance decision degenerate.
    #[error("non-finite theta component at index {index}")]
    NonFiniteTheta {
        /// Index of the offending component.
        index: usize,
    },
}

/// Error produced by the Equilibrium Expectation estimator.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EstimationError {
    /// Propagated from a sampler run.
    #[error(transparent)]
    Sampler(#[from] SamplerError),
    /// A hyperparameter was outside its valid domain.
    #[error("hyperparameter `{name}` must be {constraint} (got {value})")]
    InvalidHyperparameter {
        /// Name of the offending hyperparameter.
        name: &'static str,
        /// Human-readable constraint description.
        constraint: &'static str,
        /// The supplied value, formatted for display.
        value: String,
    },
}
