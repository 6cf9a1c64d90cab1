//! Change-statistic library: given a proposed dyad toggle, computes the
//! vector of per-statistic changes and the resulting `theta`-weighted
//! log-odds contribution.

mod attributes;
mod params;
mod structural;

pub use params::{StatKind, StatSelection, Theta};

// Re-exported for the simulation driver, which needs to recompute raw
// statistic values rather than change-statistic deltas.
pub(crate) use attributes::{attribute_numeric, lookup, values_match};
pub(crate) use structural::alternating_change;

use std::collections::HashMap;

use crate::error::StatError;
use crate::graph::Graph;
use crate::twopath::TwoPathBackend;
use crate::types::NodeId;

/// Auxiliary data a change-statistic evaluation may need beyond the graph
/// and two-path index: dyadic covariate matrices, keyed by the
/// `covariate_id` named in [`StatKind::DyadicCovariate`].
#[derive(Clone, Debug, Default)]
pub struct StatContext {
    dyadic_covariates: HashMap<String, HashMap<(NodeId, NodeId), f64>>,
}

impl StatContext {
    /// Creates an empty context (no dyadic covariates loaded).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dyadic covariate matrix under `id`.
    pub fn insert_dyadic_covariate(&mut self, id: impl Into<String>, matrix: HashMap<(NodeId, NodeId), f64>) {
        self.dyadic_covariates.insert(id.into(), matrix);
    }

    /// Looks up a previously registered dyadic covariate matrix by `id`.
    pub(crate) fn dyadic_covariate(&self, id: &str) -> Option<&HashMap<(NodeId, NodeId), f64>> {
        self.dyadic_covariates.get(id)
    }
}

/// Computes the change-statistic vector for toggling `tail -> head` and
/// returns it alongside `theta . change_stats`. `change_stats[k]` is the signed contribution of the
/// `k`-th selected statistic: positive for an add proposal, already negated
/// for a delete proposal, so callers never need to re-negate.
///
/// # Errors
/// Returns [`StatError`] if a statistic references an attribute or
/// interaction operand that cannot be resolved.
pub fn calc_change_stats(
    graph: &Graph,
    two_path: &TwoPathBackend,
    context: &StatContext,
    selection: &StatSelection,
    tail: NodeId,
    head: NodeId,
    is_delete: bool,
) -> Result<Vec<f64>, StatError> {
    let mut change_stats = vec![0.0; selection.len()];
    for (index, kind) in selection.iter().enumerate() {
        change_stats[index] = evaluate_one(
            graph,
            two_path,
            context,
            selection,
            &change_stats,
            index,
            kind,
            tail,
            head,
            is_delete,
        )?;
    }
    Ok(change_stats)
}

/// `theta . change_stats`, as used by sampler acceptance ratios.
#[must_use]
pub fn weighted_log_odds(theta: &Theta, change_stats: &[f64]) -> f64 {
    theta.dot(change_stats)
}

#[allow(
    clippy::too_many_arguments,
    reason = "one parameter per change-statistic dependency (graph, index, context, selection, running totals, the dyad's own position, the dyad, delete flag); grouping them would just move the coupling into a parameter struct"
)]
fn evaluate_one(
    graph: &Graph,
    two_path: &TwoPathBackend,
    context: &StatContext,
    selection: &StatSelection,
    change_stats_so_far: &[f64],
    index: usize,
    kind: &StatKind,
    tail: NodeId,
    head: NodeId,
    is_delete: bool,
) -> Result<f64, StatError> {
    use structural::{
        delta_alternating_k_stars_in, delta_alternating_k_stars_out,
        delta_alternating_k_triangles_c, delta_alternating_k_triangles_d,
        delta_alternating_k_triangles_t, delta_alternating_k_triangles_u,
        delta_alternating_two_paths_down, delta_alternating_two_paths_mixed,
        delta_alternating_two_paths_up, delta_arc, delta_reciprocity,
    };

    Ok(match kind {
        StatKind::Arc => delta_arc(is_delete),
        StatKind::Reciprocity => delta_reciprocity(graph, tail, head, is_delete),
        StatKind::AlternatingKStarsOut { lambda } => {
            delta_alternating_k_stars_out(graph, tail, *lambda, is_delete)
        }
        StatKind::AlternatingKStarsIn { lambda } => {
            delta_alternating_k_stars_in(graph, head, *lambda, is_delete)
        }
        StatKind::AlternatingKTrianglesT { lambda } => {
            delta_alternating_k_triangles_t(graph, two_path, tail, head, *lambda, is_delete)
        }
        StatKind::AlternatingKTrianglesC { lambda } => {
            delta_alternating_k_triangles_c(graph, two_path, tail, head, *lambda, is_delete)
        }
        StatKind::AlternatingKTrianglesD { lambda } => {
            delta_alternating_k_triangles_d(graph, two_path, tail, head, *lambda, is_delete)
        }
        StatKind::AlternatingKTrianglesU { lambda } => {
            delta_alternating_k_triangles_u(graph, two_path, tail, head, *lambda, is_delete)
        }
        StatKind::AlternatingTwoPathsMixed { lambda } => {
            delta_alternating_two_paths_mixed(graph, two_path, tail, head, *lambda, is_delete)
        }
        StatKind::AlternatingTwoPathsDown { lambda } => {
            delta_alternating_two_paths_down(graph, two_path, tail, head, *lambda, is_delete)
        }
        StatKind::AlternatingTwoPathsUp { lambda } => {
            delta_alternating_two_paths_up(graph, two_path, tail, head, *lambda, is_delete)
        }
        StatKind::Sender { attribute } => attributes::delta_sender(graph, attribute, tail, is_delete)?,
        StatKind::Receiver { attribute } => {
            attributes::delta_receiver(graph, attribute, head, is_delete)?
        }
        StatKind::Matching { attribute } => {
            attributes::delta_matching(graph, attribute, tail, head, is_delete)?
        }
        StatKind::MatchingReciprocity { attribute } => {
            attributes::delta_matching_reciprocity(graph, attribute, tail, head, is_delete)?
        }
        StatKind::ContinuousDifference { attribute } => {
            attributes::delta_continuous_difference(graph, attribute, tail, head, is_delete)?
        }
        StatKind::DyadicCovariate { covariate_id } => {
            let matrix = context
                .dyadic_covariates
                .get(covariate_id)
                .ok_or_else(|| StatError::UnknownStatistic {
                    name: covariate_id.clone(),
                })?;
            attributes::delta_dyadic_covariate(matrix, tail, head, is_delete)
        }
        StatKind::AttributeInteraction { left, right } => {
            let left_value = operand_value(selection, change_stats_so_far, index, left)?;
            let right_value = operand_value(selection, change_stats_so_far, index, right)?;
            attributes::delta_attribute_interaction(left_value, right_value)
        }
    })
}

/// Looks up an interaction operand's already-computed change-statistic
/// value. `up_to` is the interaction term's own position in `selection`;
/// the operand must appear strictly before it, since `change_stats_so_far`
/// only holds values for statistics evaluated so far.
fn operand_value(
    selection: &StatSelection,
    change_stats_so_far: &[f64],
    up_to: usize,
    operand_name: &str,
) -> Result<f64, StatError> {
    let position = selection
        .iter()
        .position(|kind| kind.name() == operand_name)
        .ok_or_else(|| StatError::UnknownStatistic {
            name: operand_name.to_owned(),
        })?;
    if position >= up_to {
        return Err(StatError::InteractionOperandOrder {
            name: operand_name.to_owned(),
        });
    }
    Ok(change_stats_so_far[position])
}
