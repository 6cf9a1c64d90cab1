//! Algorithm EE: the Borisenko-controlled parameter-refinement outer loop.

use rand::Rng;
use tracing::instrument;

use crate::error::EstimationError;
use crate::graph::Graph;
use crate::sampler::{self, SamplerBackend, SamplerFlags};
use crate::stats::{StatContext, StatSelection, Theta};
use crate::twopath::TwoPathBackend;

/// Number of recent outer-step `theta` vectors kept for the variance-control
/// clamp. Not a configured hyperparameter; a fixed window wide enough to
/// estimate a per-component coefficient of variation without unbounded
/// memory growth.
const HISTORY_WINDOW: usize = 20;

/// Runs one Algorithm EE outer iteration: `ee_inner_steps` proposals
/// accumulating `dzA`, a Borisenko update `theta_k -= aca_ee * d_k *
/// dzA_k`, then a variance-control clamp against `comp_c` using the
/// coefficient of variation of each component's recent history.
///
/// # Errors
/// Propagates sampler errors as [`EstimationError::Sampler`].
#[allow(
    clippy::too_many_arguments,
    reason = "mirrors run_algorithm_s's parameter list: the full sampler context plus this algorithm's own hyperparameters and running state"
)]
#[instrument(
    name = "estimation.algorithm_ee_step",
    err,
    skip(graph, two_path, context, selection, sampler_kernel, flags, theta, d_k, theta_history, rng),
    fields(aca_ee, comp_c, ee_inner_steps)
)]
pub fn run_algorithm_ee<R: Rng + ?Sized>(
    graph: &mut Graph,
    two_path: &mut TwoPathBackend,
    context: &StatContext,
    selection: &StatSelection,
    sampler_kernel: &mut SamplerBackend,
    flags: SamplerFlags,
    theta: &mut Theta,
    aca_ee: f64,
    comp_c: f64,
    ee_inner_steps: usize,
    d_k: &[f64],
    theta_history: &mut Vec<Vec<f64>>,
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
        ee_inner_steps,
        rng,
    )?;
    let dz_a = outcome.dz_a();

    for index in 0..theta.len() {
        let factor = variance_control_factor(theta_history, index, comp_c);
        let step = aca_ee * d_k[index] * dz_a[index] * factor;
        theta.as_mut_slice()[index] -= step;
    }

    theta_history.push(theta.as_slice().to_vec());
    if theta_history.len() > HISTORY_WINDOW {
        theta_history.remove(0);
    }
    Ok(dz_a)
}

/// `1.0` unless the recorded history at `index` has a coefficient of
/// variation exceeding `comp_c`, in which case the step is shrunk
/// proportionally.
fn variance_control_factor(history: &[Vec<f64>], index: usize, comp_c: f64) -> f64 {
    if history.len() < 2 {
        return 1.0;
    }
    let values: Vec<f64> = history.iter().map(|step| step[index]).collect();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean.abs() < 1e-12 {
        return 1.0;
    }
    let variance =
        values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let coefficient_of_variation = (variance.sqrt() / mean).abs();
    if coefficient_of_variation > comp_c {
        comp_c / coefficient_of_variation
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_history_never_triggers_the_clamp() {
        let history = vec![vec![1.0], vec![1.0], vec![1.0]];
        assert_eq!(variance_control_factor(&history, 0, 0.1), 1.0);
    }

    #[test]
    fn high_relative_variance_shrinks_the_step() {
        let history = vec![vec![1.0], vec![10.0], vec![-5.0], vec![8.0]];
        let factor = variance_control_factor(&history, 0, 0.1);
        assert!(factor < 1.0);
    }

    #[test]
    fn short_history_never_triggers_the_clamp() {
        let history = vec![vec![100.0]];
        assert_eq!(variance_control_factor(&history, 0, 0.01), 1.0);
    }
}
