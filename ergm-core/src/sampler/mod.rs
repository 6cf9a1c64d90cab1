//! MCMC sampler kernels for both simulation and estimation.
//!
//! Every kernel shares one state machine: `propose -> compute_delta ->
//! accept? -> {commit, restore}`. Only the proposal distribution differs
//! between kernels, so [`run`] owns the shared machinery (change-statistic
//! evaluation, the Metropolis accept step, graph/two-path commit) and each
//! kernel implements [`SamplerKernel::propose`] alone, mirroring how
//! [`crate::twopath::TwoPathBackend`] dispatches on a tagged enum rather than
//! a trait object to keep the hot loop free of virtual calls.

mod basic;
mod ifd;
mod rng;
mod tnt;

pub use basic::BasicSampler;
pub use ifd::IfdSampler;
pub use rng::{mix_rank_seed, rank_rng};
pub use tnt::TntSampler;

use rand::Rng;
use tracing::instrument;

use crate::error::SamplerError;
use crate::graph::Graph;
use crate::stats::{calc_change_stats, weighted_log_odds, StatContext, StatSelection, Theta};
use crate::twopath::TwoPathBackend;
use crate::types::NodeId;

const MAX_RESAMPLE_ATTEMPTS: usize = 10_000;

/// Flags threaded through every proposal.
#[derive(Clone, Copy, Debug, Default)]
pub struct SamplerFlags {
    /// When `false`, accepted proposals are scored but never committed to
    /// the graph: every toggle is immediately undone so statistics
    /// accumulate without the chain state drifting.
    pub perform_move: bool,
    /// Restrict proposals to the inner (toggleable) snowball zones and use
    /// `allinnerarcs` for the TNT delete branch.
    pub use_conditional_estimation: bool,
    /// Reject any proposal that would create a mutual dyad.
    pub forbid_reciprocity: bool,
}

/// Per-statistic running sums from a sampler run, partitioned by move type.
#[derive(Clone, Debug)]
pub struct SamplerOutcome {
    /// Total proposals attempted, including auto-rejected ones.
    pub proposals: usize,
    /// Proposals accepted.
    pub accepted: usize,
    /// Sum of change-statistic vectors from accepted add proposals.
    pub add_change_stats: Vec<f64>,
    /// Sum of change-statistic vectors from accepted delete proposals.
    pub del_change_stats: Vec<f64>,
}

impl SamplerOutcome {
    fn new(num_stats: usize) -> Self {
        Self {
            proposals: 0,
            accepted: 0,
            add_change_stats: vec![0.0; num_stats],
            del_change_stats: vec![0.0; num_stats],
        }
    }

    /// Fraction of proposals accepted.
    #[must_use]
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposals == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.proposals as f64
    }

    /// The net change vector `dzA = add_change_stats + del_change_stats`.
    #[must_use]
    pub fn dz_a(&self) -> Vec<f64> {
        self.add_change_stats
            .iter()
            .zip(&self.del_change_stats)
            .map(|(add, del)| add + del)
            .collect()
    }
}

/// A proposal distribution over dyad toggles. The shared [`run`] loop
/// supplies the graph and flags; a kernel returns the `(tail, head,
/// is_delete)` candidate, or `None` to auto-reject this attempt without
/// scoring it (a forbidden-reciprocity reject-only move, or a
/// rejection-resampling loop that gave up).
pub trait SamplerKernel {
    /// Produces the next proposal, if any.
    ///
    /// # Errors
    /// Returns [`SamplerError::ResamplingExhausted`] if a kernel's
    /// rejection-resampling loop could not find a valid candidate within its
    /// retry budget.
    fn propose<R: Rng + ?Sized>(
        &mut self,
        graph: &Graph,
        flags: SamplerFlags,
        rng: &mut R,
    ) -> Result<Option<(NodeId, NodeId, bool)>, SamplerError>;

    /// Called once per proposal after the accept/reject decision (and, if
    /// accepted and `perform_move`, after the commit), so stateful kernels
    /// can track realized drift. The default is a no-op.
    fn on_decision(&mut self, graph: &Graph, is_delete: bool, accepted: bool) {
        let _ = (graph, is_delete, accepted);
    }
}

/// Runtime-selected sampler kernel.
#[derive(Debug)]
pub enum SamplerBackend {
    /// See [`BasicSampler`].
    Basic(BasicSampler),
    /// See [`TntSampler`].
    Tnt(TntSampler),
    /// See [`IfdSampler`].
    Ifd(IfdSampler),
}

impl SamplerBackend {
    /// Builds the uniform-unordered-pair kernel.
    #[must_use]
    pub fn basic() -> Self {
        Self::Basic(BasicSampler::new())
    }

    /// Builds the tie-no-tie kernel.
    #[must_use]
    pub fn tnt() -> Self {
        Self::Tnt(TntSampler::new())
    }

    /// Builds the improved-fixed-density kernel targeting `target_density`
    /// with step scale `ifd_k`.
    #[must_use]
    pub fn ifd(ifd_k: f64, target_density: f64) -> Self {
        Self::Ifd(IfdSampler::new(ifd_k, target_density))
    }

    fn propose<R: Rng + ?Sized>(
        &mut self,
        graph: &Graph,
        flags: SamplerFlags,
        rng: &mut R,
    ) -> Result<Option<(NodeId, NodeId, bool)>, SamplerError> {
        match self {
            Self::Basic(kernel) => kernel.propose(graph, flags, rng),
            Self::Tnt(kernel) => kernel.propose(graph, flags, rng),
            Self::Ifd(kernel) => kernel.propose(graph, flags, rng),
        }
    }

    fn on_decision(&mut self, graph: &Graph, is_delete: bool, accepted: bool) {
        match self {
            Self::Basic(kernel) => kernel.on_decision(graph, is_delete, accepted),
            Self::Tnt(kernel) => kernel.on_decision(graph, is_delete, accepted),
            Self::Ifd(kernel) => kernel.on_decision(graph, is_delete, accepted),
        }
    }
}

/// Drives `steps` proposals of the shared sampler state machine against
/// `graph`, scoring each with `theta` over `selection` and committing
/// accepted moves unless `flags.perform_move` is `false`.
///
/// # Errors
/// Returns [`SamplerError::NonFiniteTheta`] if `theta` has a non-finite
/// component, or propagates kernel/statistic errors.
#[allow(
    clippy::too_many_arguments,
    reason = "the shared driving loop needs every piece of sampler state in one call; splitting it would only hide the coupling behind a parameter struct"
)]
#[instrument(
    name = "sampler.run",
    err,
    skip(kernel, graph, two_path, context, selection, theta, rng),
    fields(steps, perform_move = flags.perform_move, accepted = tracing::field::Empty)
)]
pub fn run<R: Rng + ?Sized>(
    kernel: &mut SamplerBackend,
    graph: &mut Graph,
    two_path: &mut TwoPathBackend,
    context: &StatContext,
    selection: &StatSelection,
    theta: &Theta,
    flags: SamplerFlags,
    steps: usize,
    rng: &mut R,
) -> Result<SamplerOutcome, SamplerError> {
    if let Some(index) = theta.as_slice().iter().position(|value| !value.is_finite()) {
        return Err(SamplerError::NonFiniteTheta { index });
    }
    if flags.use_conditional_estimation && flags.forbid_reciprocity {
        return Err(SamplerError::UnsupportedConditionalForbidReciprocity);
    }

    let mut outcome = SamplerOutcome::new(selection.len());
    for _ in 0..steps {
        outcome.proposals += 1;
        let Some((tail, head, is_delete)) = kernel.propose(graph, flags, rng)? else {
            continue;
        };

        let change_stats =
            calc_change_stats(graph, two_path, context, selection, tail, head, is_delete)?;
        let delta = weighted_log_odds(theta, &change_stats);
        let accepted = accept(delta, rng);

        if accepted {
            outcome.accepted += 1;
            let target = if is_delete {
                &mut outcome.del_change_stats
            } else {
                &mut outcome.add_change_stats
            };
            for (slot, value) in target.iter_mut().zip(&change_stats) {
                *slot += value;
            }
            if flags.perform_move {
                commit(graph, two_path, flags, tail, head, is_delete)?;
            }
        }
        kernel.on_decision(graph, is_delete, accepted);
    }
    tracing::Span::current().record("accepted", outcome.accepted);
    Ok(outcome)
}

/// Metropolis accept step with overflow clamping: a
/// non-negative `delta` is accepted unconditionally rather than evaluating
/// `exp(delta)`, which could overflow.
fn accept<R: Rng + ?Sized>(delta: f64, rng: &mut R) -> bool {
    if delta >= 0.0 {
        return true;
    }
    rng.r#gen::<f64>() < delta.exp()
}

fn commit(
    graph: &mut Graph,
    two_path: &mut TwoPathBackend,
    flags: SamplerFlags,
    tail: NodeId,
    head: NodeId,
    is_delete: bool,
) -> Result<(), SamplerError> {
    if is_delete {
        if flags.use_conditional_estimation {
            graph.remove_inner_arc(tail, head)?;
        } else {
            graph.remove_arc(tail, head)?;
        }
        two_path.update(graph, tail, head, -1);
    } else {
        if flags.use_conditional_estimation {
            graph.insert_inner_arc(tail, head)?;
        } else {
            graph.insert_arc(tail, head)?;
        }
        two_path.update(graph, tail, head, 1);
    }
    Ok(())
}

/// Draws a delete candidate: an arc uniformly from the flat arc list, or
/// from `allinnerarcs` under conditional estimation, retrying if the draw
/// would orphan a node's link to the next wave out. Shared by [`TntSampler`] and [`IfdSampler`].
fn propose_delete_arc<R: Rng + ?Sized>(
    graph: &Graph,
    flags: SamplerFlags,
    rng: &mut R,
) -> Option<(NodeId, NodeId)> {
    if flags.use_conditional_estimation {
        let snowball = graph.snowball()?;
        for _ in 0..MAX_RESAMPLE_ATTEMPTS {
            let (tail, head) = snowball.random_inner_arc(rng)?;
            if !snowball.would_orphan_wave_degree(tail, head) {
                return Some((tail, head));
            }
        }
        None
    } else {
        graph.random_arc(rng).map(|(tail, head, _)| (tail, head))
    }
}

/// Draws an add candidate: an ordered pair with no existing arc, honouring
/// conditional-estimation zone adjacency and `forbid_reciprocity`. Shared by [`TntSampler`] and [`IfdSampler`].
///
/// # Errors
/// Returns [`SamplerError::ResamplingExhausted`] if no valid pair is found
/// within the retry budget.
fn propose_add_pair<R: Rng + ?Sized>(
    graph: &Graph,
    flags: SamplerFlags,
    rng: &mut R,
) -> Result<Option<(NodeId, NodeId)>, SamplerError> {
    for _ in 0..MAX_RESAMPLE_ATTEMPTS {
        let Some((i, j)) = graph.random_non_arc(rng) else {
            return Ok(None);
        };
        if flags.use_conditional_estimation {
            match graph.snowball() {
                Some(snowball) if snowball.is_toggleable(i, j) => {}
                _ => continue,
            }
        }
        if flags.forbid_reciprocity && graph.is_arc(j, i) {
            continue;
        }
        return Ok(Some((i, j)));
    }
    Err(SamplerError::ResamplingExhausted {
        attempts: MAX_RESAMPLE_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests;
