//! Command implementations and argument parsing for the `ergm` CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use ergm_core::{
    AttributeError as GraphAttributeError, EstimationError, EstimationHyperparameters, Graph,
    GraphError, RunConfig, RunMode, SamplerBackend, SamplerError, StatError, Theta,
};
use ergm_io::{AttributeError, ConfigError, PajekError};
use thiserror::Error;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "ergm", about = "Estimate or simulate an Exponential Random Graph Model.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run Algorithm S followed by Algorithm EE against an observed graph.
    Estimate(EstimateArgs),
    /// Draw samples at a fixed theta.
    Simulate(SimulateArgs),
}

/// Options accepted by the `estimate` command.
#[derive(Debug, Args, Clone, Default)]
pub struct EstimateArgs {
    /// Path to a `key = value` configuration file.
    pub config: PathBuf,

    /// Chain rank, mixed with the configured base seed to derive this
    /// chain's RNG stream.
    #[arg(long, default_value_t = 0)]
    pub rank: u32,

    /// Overrides the configuration's `arclistFile`.
    #[arg(long)]
    pub arclist_file: Option<PathBuf>,

    /// Overrides the configuration's `thetaFilePrefix`.
    #[arg(long)]
    pub theta_file_prefix: Option<PathBuf>,

    /// Overrides the configuration's `dzAFilePrefix`.
    #[arg(long)]
    pub dz_a_file_prefix: Option<PathBuf>,
}

/// Options accepted by the `simulate` command.
#[derive(Debug, Args, Clone, Default)]
pub struct SimulateArgs {
    /// Path to a `key = value` configuration file.
    pub config: PathBuf,

    /// Chain rank, mixed with the configured base seed to derive this
    /// chain's RNG stream.
    #[arg(long, default_value_t = 0)]
    pub rank: u32,

    /// Theta vector to simulate at, one comma-separated value per selected
    /// statistic, in `structParams`/`attrParams`/`dyadicParams`/
    /// `attrInteractionParams` order. Required since the configuration file
    /// format has no key for an input theta.
    #[arg(long, value_delimiter = ',')]
    pub theta: Vec<f64>,

    /// Overrides the configuration's `statsFile`.
    #[arg(long)]
    pub stats_file: Option<PathBuf>,

    /// Overrides the configuration's `simNetFilePrefix`.
    #[arg(long)]
    pub sim_net_file_prefix: Option<PathBuf>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input or writing an output.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Configuration-file parsing failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Pajek graph I/O failed.
    #[error(transparent)]
    Pajek(#[from] PajekError),
    /// Attribute-table I/O failed.
    #[error(transparent)]
    Attribute(#[from] AttributeError),
    /// The graph rejected an attribute table's shape.
    #[error(transparent)]
    GraphAttribute(#[from] GraphAttributeError),
    /// The graph rejected an attribute table or an arc mutation.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Change-statistic evaluation or selection failed.
    #[error(transparent)]
    Stat(#[from] StatError),
    /// A sampler run failed.
    #[error(transparent)]
    Sampler(#[from] SamplerError),
    /// Estimation failed.
    #[error(transparent)]
    Estimation(#[from] EstimationError),
    /// `simulate` was invoked with a theta vector of the wrong length.
    #[error("--theta supplied {supplied} values but {expected} statistics are selected")]
    ThetaArityMismatch {
        /// Number of values passed on the command line.
        supplied: usize,
        /// Number of statistics the configuration selected.
        expected: usize,
    },
}

impl CliError {
    /// Maps this error onto one of the process exit codes spec.md §6
    /// defines: `1` for configuration/I/O errors, `2` for an invariant
    /// violation surfaced through the graph store.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Graph(GraphError::InvariantViolation { .. }) => 2,
            _ => 1,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// An `estimate` run completed; reports the final theta and trajectory
    /// length.
    Estimate {
        /// The statistic names the run selected, for labelling theta output.
        theta: Vec<f64>,
        /// Number of outer steps recorded (Algorithm S then Algorithm EE).
        outer_steps: usize,
    },
    /// A `simulate` run completed; reports the number of samples drawn.
    Simulate {
        /// Number of samples drawn.
        sample_count: usize,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when configuration loading, graph I/O, or execution
/// fails.
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Estimate(args) => run_estimate(args),
        Command::Simulate(args) => run_simulate(args),
    }
}

fn load_config(path: &Path) -> Result<RunConfig, CliError> {
    Ok(ergm_io::parse_config(path)?)
}

fn load_graph(config: &RunConfig) -> Result<Graph, CliError> {
    let mut graph = if config.arclist_file.as_os_str().is_empty() {
        Graph::new(config.num_nodes)
    } else {
        ergm_io::read_pajek(&config.arclist_file, config.allow_loops)?
    };
    if let Some(path) = &config.binattr_file {
        let (name, attribute) = ergm_io::read_binary_attribute(path)?;
        graph.load_attribute(name, attribute)?;
    }
    if let Some(path) = &config.catattr_file {
        let (name, attribute) = ergm_io::read_categorical_attribute(path)?;
        graph.load_attribute(name, attribute)?;
    }
    if let Some(path) = &config.contattr_file {
        let (name, attribute) = ergm_io::read_continuous_attribute(path)?;
        graph.load_attribute(name, attribute)?;
    }
    if let Some(path) = &config.setattr_file {
        let (name, attribute) = ergm_io::read_set_attribute(path)?;
        graph.load_attribute(name, attribute)?;
    }
    if let Some(path) = &config.zone_file {
        let zones = ergm_io::read_zone_file(path)?;
        graph.set_snowball(ergm_core::SnowballMetadata::new(zones));
    }
    Ok(graph)
}

fn build_sampler(config: &RunConfig) -> SamplerBackend {
    match config.sampler {
        ergm_core::SamplerChoice::Basic => SamplerBackend::basic(),
        ergm_core::SamplerChoice::Tnt => SamplerBackend::tnt(),
        ergm_core::SamplerChoice::Ifd => {
            SamplerBackend::ifd(config.ifd_k, config.ifd_target_density)
        }
    }
}

fn run_estimate(args: EstimateArgs) -> Result<ExecutionSummary, CliError> {
    let mut config = load_config(&args.config)?;
    if !matches!(config.mode, RunMode::Estimate) {
        tracing::warn!("configuration mode is not estimate; running estimate anyway");
    }
    if let Some(arclist_file) = args.arclist_file {
        config.arclist_file = arclist_file;
    }
    if args.theta_file_prefix.is_some() {
        config.theta_file_prefix = args.theta_file_prefix;
    }
    if args.dz_a_file_prefix.is_some() {
        config.dz_a_file_prefix = args.dz_a_file_prefix;
    }

    let mut graph = load_graph(&config)?;
    let mut two_path = config.two_path_backend.build(&graph);
    let context = ergm_core::StatContext::new();
    let mut sampler = build_sampler(&config);
    let hyper = EstimationHyperparameters {
        aca_s: config.aca_s,
        aca_ee: config.aca_ee,
        comp_c: config.comp_c,
        sampler_steps: config.sampler_steps,
        s_steps: config.s_steps,
        ee_steps: config.ee_steps,
        ee_inner_steps: config.ee_inner_steps,
    };
    let mut rng = ergm_core::rank_rng(config.base_seed, args.rank);

    let (theta, trace) = ergm_core::run_estimation(
        &mut graph,
        &mut two_path,
        &context,
        &config.selection,
        &mut sampler,
        config.sampler_flags(),
        &hyper,
        &mut rng,
    )?;

    if let Some(prefix) = &config.theta_file_prefix {
        write_rows(
            &output_path(prefix, args.rank),
            trace.steps.iter().map(|step| step.theta.clone()),
        )?;
    }
    if let Some(prefix) = &config.dz_a_file_prefix {
        write_rows(
            &output_path(prefix, args.rank),
            trace.steps.iter().map(|step| step.dz_a.clone()),
        )?;
    }

    Ok(ExecutionSummary::Estimate {
        theta: theta.as_slice().to_vec(),
        outer_steps: trace.steps.len(),
    })
}

fn run_simulate(args: SimulateArgs) -> Result<ExecutionSummary, CliError> {
    let mut config = load_config(&args.config)?;
    if !matches!(config.mode, RunMode::Simulate) {
        tracing::warn!("configuration mode is not simulate; running simulate anyway");
    }
    if args.stats_file.is_some() {
        config.stats_file = args.stats_file;
    }
    if args.sim_net_file_prefix.is_some() {
        config.sim_net_file_prefix = args.sim_net_file_prefix;
    }

    let mut graph = load_graph(&config)?;
    let mut two_path = config.two_path_backend.build(&graph);
    let context = ergm_core::StatContext::new();
    let mut sampler = build_sampler(&config);
    let supplied = args.theta.len();
    let theta = Theta::new(args.theta, &config.selection).map_err(|_source| {
        CliError::ThetaArityMismatch {
            supplied,
            expected: config.selection.len(),
        }
    })?;
    let mut rng = ergm_core::rank_rng(config.base_seed, args.rank);

    let trace = ergm_core::run_simulation(
        &mut graph,
        &mut two_path,
        &context,
        &config.selection,
        &theta,
        &mut sampler,
        config.sampler_flags(),
        config.simulation_config(),
        &mut rng,
    )?;

    if let Some(path) = &config.stats_file {
        write_rows(path, trace.samples.iter().map(|sample| sample.statistics.clone()))?;
    }
    if let Some(prefix) = &config.sim_net_file_prefix {
        for (index, sample) in trace.samples.iter().enumerate() {
            if let Some(graph) = &sample.graph {
                let path = prefix.with_file_name(format!(
                    "{}_{index}.net",
                    prefix.file_name().and_then(|name| name.to_str()).unwrap_or("sim")
                ));
                ergm_io::write_pajek(&path, graph)?;
            }
        }
    }

    Ok(ExecutionSummary::Simulate {
        sample_count: trace.samples.len(),
    })
}

fn output_path(prefix: &Path, rank: u32) -> PathBuf {
    let stem = prefix.file_name().and_then(|name| name.to_str()).unwrap_or("output");
    prefix.with_file_name(format!("{stem}_{rank}.txt"))
}

fn write_rows(path: &Path, rows: impl Iterator<Item = Vec<f64>>) -> Result<(), CliError> {
    let mut file = std::fs::File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    for row in rows {
        let line = row.iter().map(f64::to_string).collect::<Vec<_>>().join(" ");
        writeln!(file, "{line}").map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Estimate { theta, outer_steps } => {
            writeln!(writer, "outer steps: {outer_steps}")?;
            let rendered = theta.iter().map(f64::to_string).collect::<Vec<_>>().join(" ");
            writeln!(writer, "theta: {rendered}")?;
        }
        ExecutionSummary::Simulate { sample_count } => {
            writeln!(writer, "samples: {sample_count}")?;
        }
    }
    Ok(())
}
