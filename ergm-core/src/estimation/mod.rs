//! Equilibrium Expectation (EE) parameter estimation: Algorithm S
//! (scale-finding) followed by Algorithm EE (Borisenko-controlled parameter
//! refinement).

mod algorithm_ee;
mod algorithm_s;
mod scale;

pub use algorithm_ee::run_algorithm_ee;
pub use algorithm_s::{density_adjusted_s_steps, run_algorithm_s};
pub use scale::ScaleTracker;

use rand::Rng;
use tracing::{info, instrument};

use crate::error::EstimationError;
use crate::graph::Graph;
use crate::sampler::{SamplerBackend, SamplerFlags};
use crate::stats::{StatContext, StatSelection, Theta};
use crate::twopath::TwoPathBackend;

/// Smoothing constant for the Algorithm S scale tracker. Not a configured
/// hyperparameter; chosen as a conventional
/// exponential-moving-average decay.
const SCALE_EMA_DECAY: f64 = 0.9;

/// Hyperparameters for a full estimation run.
#[derive(Clone, Debug)]
pub struct EstimationHyperparameters {
    /// Algorithm S step-size multiplier.
    pub aca_s: f64,
    /// Algorithm EE step-size multiplier.
    pub aca_ee: f64,
    /// Variance-control coefficient-of-variation threshold for Algorithm EE.
    pub comp_c: f64,
    /// Proposals per Algorithm S / EE sampler call.
    pub sampler_steps: usize,
    /// Algorithm S outer iterations (before density adjustment).
    pub s_steps: usize,
    /// Algorithm EE outer iterations.
    pub ee_steps: usize,
    /// Proposals per Algorithm EE inner accumulation.
    pub ee_inner_steps: usize,
}

/// One recorded outer step of the estimation trajectory.
#[derive(Clone, Debug)]
pub struct EstimationStep {
    /// `theta` after this outer step's update.
    pub theta: Vec<f64>,
    /// The net change vector observed during this step.
    pub dz_a: Vec<f64>,
}

/// The full `theta`/`dzA` trajectory produced by [`run_estimation`],
/// written through the I/O collaborator by `ergm-cli`.
#[derive(Clone, Debug, Default)]
pub struct EstimationTrace {
    /// One entry per outer step, Algorithm S steps first, then Algorithm EE.
    pub steps: Vec<EstimationStep>,
}

impl EstimationTrace {
    fn push(&mut self, theta: &Theta, dz_a: Vec<f64>) {
        self.steps.push(EstimationStep {
            theta: theta.as_slice().to_vec(),
            dz_a,
        });
    }
}

/// Runs Algorithm S followed by Algorithm EE against the observed graph
/// `graph`, starting from `theta = 0`, and returns the final
/// `theta` alongside the full trajectory.
///
/// # Errors
/// Returns [`EstimationError::InvalidHyperparameter`] if a hyperparameter is
/// outside its valid domain, or propagates sampler errors.
#[allow(
    clippy::too_many_arguments,
    reason = "the top-level entry point needs every piece of sampler state plus the estimator's own hyperparameters in one call"
)]
#[instrument(
    name = "estimation.run",
    err,
    skip(graph, two_path, context, selection, sampler_kernel, sampler_flags, rng),
    fields(num_stats = selection.len())
)]
pub fn run_estimation<R: Rng + ?Sized>(
    graph: &mut Graph,
    two_path: &mut TwoPathBackend,
    context: &StatContext,
    selection: &StatSelection,
    sampler_kernel: &mut SamplerBackend,
    sampler_flags: SamplerFlags,
    hyper: &EstimationHyperparameters,
    rng: &mut R,
) -> Result<(Theta, EstimationTrace), EstimationError> {
    validate_hyperparameters(hyper)?;

    let mut theta = Theta::zeros(selection);
    let mut trace = EstimationTrace::default();
    let mut scale = ScaleTracker::new(selection.len(), SCALE_EMA_DECAY);

    let s_steps = density_adjusted_s_steps(hyper.s_steps, graph_density(graph));
    for _ in 0..s_steps {
        let dz_a = run_algorithm_s(
            graph,
            two_path,
            context,
            selection,
            sampler_kernel,
            sampler_flags,
            &mut theta,
            hyper.aca_s,
            hyper.sampler_steps,
            &mut scale,
            rng,
        )?;
        trace.push(&theta, dz_a);
    }

    let mut theta_history: Vec<Vec<f64>> = Vec::new();
    for _ in 0..hyper.ee_steps {
        let dz_a = run_algorithm_ee(
            graph,
            two_path,
            context,
            selection,
            sampler_kernel,
            sampler_flags,
            &mut theta,
            hyper.aca_ee,
            hyper.comp_c,
            hyper.ee_inner_steps,
            scale.scales(),
            &mut theta_history,
            rng,
        )?;
        trace.push(&theta, dz_a);
    }

    info!(final_theta = ?theta.as_slice(), "estimation converged");
    Ok((theta, trace))
}

fn graph_density(graph: &Graph) -> f64 {
    let n = graph.node_count() as f64;
    if n < 2.0 {
        return 0.0;
    }
    graph.arc_count() as f64 / (n * (n - 1.0))
}

fn validate_hyperparameters(hyper: &EstimationHyperparameters) -> Result<(), EstimationError> {
    if hyper.aca_s <= 0.0 {
        return Err(invalid("ACA_S", "be positive", hyper.aca_s));
    }
    if hyper.aca_ee <= 0.0 {
        return Err(invalid("ACA_EE", "be positive", hyper.aca_ee));
    }
    if hyper.comp_c <= 0.0 {
        return Err(invalid("compC", "be positive", hyper.comp_c));
    }
    Ok(())
}

fn invalid(name: &'static str, constraint: &'static str, value: f64) -> EstimationError {
    EstimationError::InvalidHyperparameter {
        name,
        constraint,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests;
