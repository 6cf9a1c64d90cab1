//! Simulation driver: repeatedly samples at a fixed `theta` to produce a
//! stream of graph realizations and summary statistics.

use rand::Rng;
use tracing::instrument;

use crate::error::SamplerError;
use crate::graph::Graph;
use crate::sampler::{self, SamplerBackend, SamplerFlags};
use crate::stats::{attribute_numeric, alternating_change, lookup, values_match, StatContext, StatKind, StatSelection, Theta};
use crate::twopath::{Relation, TwoPathBackend};
use crate::types::NodeId;

/// Configuration for one simulation run.
#[derive(Clone, Copy, Debug)]
pub struct SimulationConfig {
    /// Proposals discarded before the first sample.
    pub burnin: usize,
    /// Proposals run between consecutive samples.
    pub interval: usize,
    /// Number of samples to draw.
    pub sample_size: usize,
    /// If `true`, each sample's graph is retained in [`SimulationTrace`]
    /// rather than only its statistics row.
    pub output_simulated_networks: bool,
}

/// One drawn sample: the statistics vector, and the graph snapshot if
/// `output_simulated_networks` was set.
#[derive(Clone, Debug)]
pub struct SimulationSample {
    /// `s(G)` at the moment this sample was taken, in `StatSelection` order.
    pub statistics: Vec<f64>,
    /// The sampled graph, present only when configured to retain it.
    pub graph: Option<Graph>,
}

/// The full output of [`run_simulation`]: one [`SimulationSample`] per
/// configured `sample_size`, written through the I/O collaborator by
/// `ergm-cli`.
#[derive(Clone, Debug, Default)]
pub struct SimulationTrace {
    /// Samples in draw order.
    pub samples: Vec<SimulationSample>,
}

/// Runs `config.burnin` proposals and discards them, then draws
/// `config.sample_size` samples, each separated by `config.interval`
/// proposals, at fixed `theta`.
///
/// # Errors
/// Propagates [`SamplerError`] from the underlying sampler run, including
/// [`SamplerError::NonFiniteTheta`].
#[allow(
    clippy::too_many_arguments,
    reason = "the driver needs every piece of sampler state plus its own run configuration in one call"
)]
#[instrument(
    name = "simulation.run",
    err,
    skip(graph, two_path, context, selection, theta, sampler_kernel, sampler_flags, rng),
    fields(sample_size = config.sample_size, burnin = config.burnin, interval = config.interval)
)]
pub fn run_simulation<R: Rng + ?Sized>(
    graph: &mut Graph,
    two_path: &mut TwoPathBackend,
    context: &StatContext,
    selection: &StatSelection,
    theta: &Theta,
    sampler_kernel: &mut SamplerBackend,
    sampler_flags: SamplerFlags,
    config: SimulationConfig,
    rng: &mut R,
) -> Result<SimulationTrace, SamplerError> {
    let flags = SamplerFlags {
        perform_move: true,
        ..sampler_flags
    };

    if config.burnin > 0 {
        sampler::run(
            sampler_kernel,
            graph,
            two_path,
            context,
            selection,
            theta,
            flags,
            config.burnin,
            rng,
        )?;
    }

    let mut trace = SimulationTrace::default();
    for _ in 0..config.sample_size {
        if config.interval > 0 {
            sampler::run(
                sampler_kernel,
                graph,
                two_path,
                context,
                selection,
                theta,
                flags,
                config.interval,
                rng,
            )?;
        }
        trace.samples.push(SimulationSample {
            statistics: raw_statistics(graph, two_path, context, selection)?,
            graph: config.output_simulated_networks.then(|| graph.clone()),
        });
    }
    Ok(trace)
}

/// Recomputes the raw statistics vector `s(G)` (not a change vector), in
/// `StatSelection` order, for one `statsFile` row. Structural statistics use
/// the same closed form as their change-statistic counterparts
/// (`crate::stats::alternating_change`), evaluated once per node or arc
/// instead of incrementally; attribute statistics sum their per-arc
/// contribution directly. [`StatKind::AttributeInteraction`] looks up its
/// operands by name from the values already computed earlier in the same
/// selection, mirroring `calc_change_stats`'s ordering rule.
///
/// # Errors
/// Returns [`crate::error::StatError`] under the same conditions as
/// `calc_change_stats`: an unresolved attribute, dyadic covariate, or
/// interaction operand name.
fn raw_statistics(
    graph: &Graph,
    two_path: &TwoPathBackend,
    context: &StatContext,
    selection: &StatSelection,
) -> Result<Vec<f64>, crate::error::StatError> {
    let mut values = vec![0.0; selection.len()];
    for (index, kind) in selection.iter().enumerate() {
        values[index] = raw_value(graph, two_path, context, selection, &values, index, kind)?;
    }
    Ok(values)
}

#[allow(
    clippy::too_many_arguments,
    reason = "one parameter per raw-statistic dependency (graph, index, context, selection, running totals, the statistic's own position, its kind); grouping them would just move the coupling into a parameter struct"
)]
fn raw_value(
    graph: &Graph,
    two_path: &TwoPathBackend,
    context: &StatContext,
    selection: &StatSelection,
    computed_so_far: &[f64],
    index: usize,
    kind: &StatKind,
) -> Result<f64, crate::error::StatError> {
    use crate::error::StatError;

    Ok(match kind {
        StatKind::Arc => graph.arc_count() as f64,
        StatKind::Reciprocity => graph.mutual_count() as f64,
        StatKind::AlternatingKStarsOut { lambda } => all_nodes(graph)
            .map(|node| alternating_change(*lambda, graph.out_degree(node) as u32, false))
            .sum(),
        StatKind::AlternatingKStarsIn { lambda } => all_nodes(graph)
            .map(|node| alternating_change(*lambda, graph.in_degree(node) as u32, false))
            .sum(),
        StatKind::AlternatingKTrianglesT { lambda } => graph
            .arcs()
            .map(|(tail, head)| {
                alternating_change(*lambda, two_path.transitive(graph, tail, head), false)
            })
            .sum(),
        StatKind::AlternatingKTrianglesC { lambda } => graph
            .arcs()
            .map(|(tail, head)| {
                alternating_change(*lambda, two_path.cyclic(graph, tail, head), false)
            })
            .sum(),
        StatKind::AlternatingKTrianglesD { lambda } => graph
            .arcs()
            .map(|(tail, head)| {
                alternating_change(*lambda, two_path.query(graph, Relation::Out, tail, head), false)
            })
            .sum(),
        StatKind::AlternatingKTrianglesU { lambda } => graph
            .arcs()
            .map(|(tail, head)| {
                alternating_change(*lambda, two_path.query(graph, Relation::In, tail, head), false)
            })
            .sum(),
        StatKind::AlternatingTwoPathsMixed { lambda } => graph
            .arcs()
            .map(|(tail, head)| {
                alternating_change(*lambda, two_path.query(graph, Relation::Mixed, tail, head), false)
            })
            .sum(),
        StatKind::AlternatingTwoPathsDown { lambda } => graph
            .arcs()
            .map(|(tail, head)| {
                alternating_change(*lambda, two_path.query(graph, Relation::Out, tail, head), false)
            })
            .sum(),
        StatKind::AlternatingTwoPathsUp { lambda } => graph
            .arcs()
            .map(|(tail, head)| {
                alternating_change(*lambda, two_path.query(graph, Relation::In, tail, head), false)
            })
            .sum(),
        StatKind::Sender { attribute } => {
            let table = lookup(graph, attribute)?;
            graph.arcs().map(|(tail, _)| attribute_numeric(table, tail)).sum()
        }
        StatKind::Receiver { attribute } => {
            let table = lookup(graph, attribute)?;
            graph.arcs().map(|(_, head)| attribute_numeric(table, head)).sum()
        }
        StatKind::Matching { attribute } => {
            let table = lookup(graph, attribute)?;
            graph
                .arcs()
                .filter(|&(tail, head)| values_match(table, tail, head))
                .count() as f64
        }
        StatKind::MatchingReciprocity { attribute } => {
            let table = lookup(graph, attribute)?;
            // Each mutual matching dyad is visited twice, once per
            // direction; halve to count unordered pairs like `mutual_count`.
            graph
                .arcs()
                .filter(|&(tail, head)| values_match(table, tail, head) && graph.is_arc(head, tail))
                .count() as f64
                / 2.0
        }
        StatKind::ContinuousDifference { attribute } => {
            let table = lookup(graph, attribute)?;
            graph
                .arcs()
                .map(|(tail, head)| match (table.continuous(tail), table.continuous(head)) {
                    (Some(a), Some(b)) => (a - b).abs(),
                    _ => 0.0,
                })
                .sum()
        }
        StatKind::DyadicCovariate { covariate_id } => {
            let matrix = context
                .dyadic_covariate(covariate_id)
                .ok_or_else(|| StatError::UnknownStatistic {
                    name: covariate_id.clone(),
                })?;
            graph
                .arcs()
                .map(|(tail, head)| matrix.get(&(tail, head)).copied().unwrap_or(0.0))
                .sum()
        }
        StatKind::AttributeInteraction { left, right } => {
            operand_raw(selection, computed_so_far, index, left)?
                * operand_raw(selection, computed_so_far, index, right)?
        }
    })
}

/// Looks up an interaction operand's already-computed raw statistic value.
/// `up_to` is the interaction term's own position in `selection`; the
/// operand must appear strictly before it, mirroring
/// `crate::stats::operand_value`'s ordering rule.
fn operand_raw(
    selection: &StatSelection,
    computed_so_far: &[f64],
    up_to: usize,
    operand_name: &str,
) -> Result<f64, crate::error::StatError> {
    let position = selection
        .iter()
        .position(|kind| kind.name() == operand_name)
        .ok_or_else(|| crate::error::StatError::UnknownStatistic {
            name: operand_name.to_owned(),
        })?;
    if position >= up_to {
        return Err(crate::error::StatError::InteractionOperandOrder {
            name: operand_name.to_owned(),
        });
    }
    Ok(computed_so_far[position])
}

fn all_nodes(graph: &Graph) -> impl Iterator<Item = NodeId> {
    0..graph.node_count() as NodeId
}
