//! Run configuration: the fully-resolved set of options a single
//! `ergm-cli` invocation needs, parsed by `ergm-io::config` from the
//! `key = value` text format and handed to the estimator
//! or simulation driver as plain data (no file I/O happens in this crate).

use std::path::PathBuf;

use crate::sampler::SamplerFlags;
use crate::simulation::SimulationConfig;
use crate::stats::StatSelection;
use crate::twopath::TwoPathBackend;

/// Which sampler kernel a run selects (`useIFDsampler`/`useTNTsampler`;
/// neither set means the basic kernel).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SamplerChoice {
    /// Uniform ordered-pair proposals over every dyad.
    Basic,
    /// Tie-no-tie: an equal split between a delete-arc and an add-pair branch.
    Tnt,
    /// Improved fixed density: `psi`-biased branch choice targeting a density.
    Ifd,
}

/// Which two-path index backend a run selects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TwoPathBackendChoice {
    /// `N*N` dense arrays.
    Dense,
    /// Hash-map keyed on packed node pairs.
    Sparse,
    /// No cache; every query recomputes from the graph.
    Disabled,
}

impl TwoPathBackendChoice {
    /// Builds the selected backend, scanning `graph` where the backend
    /// caches counts.
    #[must_use]
    pub fn build(self, graph: &crate::graph::Graph) -> TwoPathBackend {
        match self {
            Self::Dense => TwoPathBackend::dense(graph),
            Self::Sparse => TwoPathBackend::sparse(graph),
            Self::Disabled => TwoPathBackend::disabled(),
        }
    }
}

/// Which top-level operation a run performs (`ergm-cli`'s two subcommands).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunMode {
    /// Runs Algorithm S then Algorithm EE against an observed graph.
    Estimate,
    /// Draws samples at a fixed `theta`.
    Simulate,
}

/// Fully-resolved configuration for one run, assembled by `ergm-io::config`
/// from the `key = value` configuration file and optionally overridden by
/// `ergm-cli` flags.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Which operation this run performs.
    pub mode: RunMode,
    /// Sampler kernel selection (`useIFDsampler`/`useTNTsampler`).
    pub sampler: SamplerChoice,
    /// Two-path index backend selection.
    pub two_path_backend: TwoPathBackendChoice,
    /// IFD auxiliary step-size multiplier (`ifd_K`).
    pub ifd_k: f64,
    /// IFD's target density, needed alongside `ifd_k` to build the kernel.
    pub ifd_target_density: f64,
    /// Algorithm S step-size multiplier.
    pub aca_s: f64,
    /// Algorithm EE step-size multiplier.
    pub aca_ee: f64,
    /// Variance-control multiplier for Algorithm EE (`compC`).
    pub comp_c: f64,
    /// Proposals per Algorithm S / EE sampler call (`samplerSteps`).
    pub sampler_steps: usize,
    /// Algorithm S outer iterations before density adjustment (`Ssteps`).
    pub s_steps: usize,
    /// Algorithm EE outer iterations (`EEsteps`).
    pub ee_steps: usize,
    /// Proposals per Algorithm EE inner accumulation (`EEinnerSteps`).
    pub ee_inner_steps: usize,
    /// Input directed graph, Pajek arc-list format.
    pub arclist_file: PathBuf,
    /// Binary attribute table, if any.
    pub binattr_file: Option<PathBuf>,
    /// Categorical attribute table, if any.
    pub catattr_file: Option<PathBuf>,
    /// Continuous attribute table, if any.
    pub contattr_file: Option<PathBuf>,
    /// Set-valued attribute table, if any.
    pub setattr_file: Option<PathBuf>,
    /// Snowball wave-assignment file; presence triggers conditional
    /// estimation.
    pub zone_file: Option<PathBuf>,
    /// Restrict proposals to the inner snowball zones.
    pub use_conditional_estimation: bool,
    /// Reject proposals that would create a mutual dyad.
    pub forbid_reciprocity: bool,
    /// Permit self-loops in the input graph (otherwise a load error).
    pub allow_loops: bool,
    /// The resolved structural/attribute/dyadic/interaction statistic
    /// selection (`structParams`, `attrParams`, `dyadicParams`,
    /// `attrInteractionParams`, merged in that order).
    pub selection: StatSelection,
    /// Output path prefix for the θ trajectory (`thetaFilePrefix`).
    pub theta_file_prefix: Option<PathBuf>,
    /// Output path prefix for the dzA trajectory (`dzAFilePrefix`).
    pub dz_a_file_prefix: Option<PathBuf>,
    /// Output path for the simulation statistics table (`statsFile`).
    pub stats_file: Option<PathBuf>,
    /// Output path prefix for simulated-network snapshots
    /// (`simNetFilePrefix`).
    pub sim_net_file_prefix: Option<PathBuf>,
    /// Node count for a simulation run with no observed graph
    /// (`numNodes`).
    pub num_nodes: usize,
    /// Number of samples to draw in a simulation run (`sampleSize`).
    pub sample_size: usize,
    /// Proposals between consecutive simulation samples (`interval`).
    pub interval: usize,
    /// Proposals discarded before the first simulation sample (`burnin`).
    pub burnin: usize,
    /// Whether each simulation sample retains its graph snapshot
    /// (`outputSimulatedNetworks`).
    pub output_simulated_networks: bool,
    /// Base seed mixed with a rank to derive each chain's RNG state.
    pub base_seed: u64,
}

impl RunConfig {
    /// Sampler/conditional-estimation/reciprocity flags for this run, as
    /// consumed by [`crate::sampler::run`].
    #[must_use]
    pub fn sampler_flags(&self) -> SamplerFlags {
        SamplerFlags {
            perform_move: true,
            use_conditional_estimation: self.use_conditional_estimation,
            forbid_reciprocity: self.forbid_reciprocity,
        }
    }

    /// The [`SimulationConfig`] this run's simulation-only keys describe.
    #[must_use]
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            burnin: self.burnin,
            interval: self.interval,
            sample_size: self.sample_size,
            output_simulated_networks: self.output_simulated_networks,
        }
    }
}
