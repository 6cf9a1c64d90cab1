//! Algorithm S: the scale-finding outer loop.

use rand::Rng;
use tracing::instrument;

use crate::error::EstimationError;
use crate::graph::Graph;
use crate::sampler::{self, SamplerBackend, SamplerFlags};
use crate::stats::{StatContext, StatSelection, Theta};
use crate::twopath::TwoPathBackend;

use super::scale::ScaleTracker;

/// A scale-finding outer-iteration budget multiplier: sparser networks get
/// proportionally more Algorithm S work, monotone in `1 / density`. Capped to keep pathologically sparse inputs from producing an
/// unbounded iteration count.
#[must_use]
pub fn density_adjusted_s_steps(s_steps: usize, density: f64) -> usize {
    let density = density.max(1e-6);
    let factor = (1.0 / density).sqrt().min(50.0);
    ((s_steps as f64) * factor).round() as usize
}

/// Runs one Algorithm S outer iteration: `sampler_steps` proposals at the
/// current `theta` (Markov-chain continuation, `perform_move = true`), then
/// a fixed-magnitude step in the sign of `dzA`, rescaled per component by
/// the running scale estimate that this same observation updates.
///
/// # Errors
/// Propagates sampler errors as [`EstimationError::Sampler`].
#[allow(
    clippy::too_many_arguments,
    reason = "carries the full sampler context plus this algorithm's own hyperparameters and running scale state"
)]
#[instrument(
    name = "estimation.algorithm_s_step",
    err,
    skip(graph, two_path, context, selection, sampler_kernel, flags, theta, scale, rng),
    fields(aca_s, sampler_steps)
)]
pub fn run_algorithm_s<R: Rng + ?Sized>(
    graph: &mut Graph,
    two_path: &mut TwoPathBackend,
    context: &StatContext,
    selection: &StatSelection,
    sampler_kernel: &mut SamplerBackend,
    flags: SamplerFlags,
    theta: &mut Theta,
    aca_s: f64,
    sampler_steps: usize,
    scale: &mut ScaleTracker,
    rng: &mut R,
) -> Result<Vec<f64>, EstimationError> {
    let outcome = sampler::run(
        sampler_kernel,
        graph,
        two_path,
        context,
        selection,
        theta,
        SamplerFlags {
            perform_move: true,
            ..flags
        },
        sampler_steps,
        rng,
    )?;
    let dz_a = outcome.dz_a();
    scale.observe(&dz_a);

    for ((component, &delta), &d_k) in
        theta.as_mut_slice().iter_mut().zip(&dz_a).zip(scale.scales())
    {
        *component -= aca_s * d_k * sign(delta);
    }
    Ok(dz_a)
}

fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_adjustment_gives_sparser_graphs_more_work() {
        let sparse = density_adjusted_s_steps(100, 0.01);
        let dense = density_adjusted_s_steps(100, 0.5);
        assert!(sparse > dense);
    }

    #[test]
    fn sign_matches_the_usual_definition() {
        assert_eq!(sign(3.0), 1.0);
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(0.0), 0.0);
    }
}
