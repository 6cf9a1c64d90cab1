//! ERGM core library.
//!
//! Holds the directed graph store, change-statistic library, MCMC sampler
//! kernels, and the Equilibrium Expectation estimator and simulation driver
//! built on top of them. I/O and command-line concerns live in the
//! `ergm-io`/`ergm-cli` crates; this crate has no knowledge of files or
//! configuration formats.

mod config;
mod error;
mod estimation;
mod graph;
mod sampler;
mod simulation;
mod stats;
mod twopath;
mod types;

pub use crate::{
    config::{RunConfig, RunMode, SamplerChoice, TwoPathBackendChoice},
    error::{
        EstimationError, GraphError, GraphErrorCode, SamplerError, StatError, TwoPathError,
    },
    estimation::{
        density_adjusted_s_steps, run_algorithm_ee, run_algorithm_s, run_estimation,
        EstimationHyperparameters, EstimationStep, EstimationTrace, ScaleTracker,
    },
    graph::{
        AttributeError, AttributeTable, Graph, GraphInvariant, GraphInvariantChecker,
        GraphInvariantViolation, NodeAttributes, SnowballMetadata,
    },
    sampler::{
        mix_rank_seed, rank_rng, run as run_sampler, BasicSampler, IfdSampler, SamplerBackend,
        SamplerFlags, SamplerKernel, SamplerOutcome, TntSampler,
    },
    simulation::{run_simulation, SimulationConfig, SimulationSample, SimulationTrace},
    stats::{calc_change_stats, weighted_log_odds, StatContext, StatKind, StatSelection, Theta},
    twopath::{
        DenseTwoPathIndex, DisabledTwoPathIndex, Relation, SparseTwoPathIndex, TwoPathBackend,
        TwoPathIndex,
    },
    types::{Arc, ArcPos, NodeId, StatIndex},
};
