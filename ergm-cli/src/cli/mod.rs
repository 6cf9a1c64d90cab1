//! Command-line interface orchestration for the `ergm` binary.
//!
//! The CLI offers two subcommands: `estimate` loads an observed graph and
//! runs Algorithm S then Algorithm EE against it; `simulate` draws samples
//! from a fixed theta.

mod commands;
#[cfg(test)]
mod tests;

pub use commands::{
    Cli, CliError, Command, EstimateArgs, ExecutionSummary, SimulateArgs, render_summary, run_cli,
};
