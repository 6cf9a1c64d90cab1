//! CLI entry point for the ERGM estimation and simulation engine.
//!
//! Parses command-line arguments with clap, executes the requested
//! subcommand, renders the summary to stdout, and maps errors to the exit
//! codes spec.md §6 defines. Logging is initialized eagerly so subsequent
//! operations can emit structured diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use ergm_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::error;

/// Parse CLI arguments, execute the command, render the summary, and flush
/// the output stream.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err
            .chain()
            .find_map(|cause| {
                let cause: &(dyn std::error::Error + 'static) = cause;
                cause.downcast_ref::<CliError>().map(CliError::exit_code)
            })
            .unwrap_or(1);

        error!(error = %err, code, "command execution failed");
        return ExitCode::from(code);
    }

    ExitCode::SUCCESS
}

/// Emit a fallback diagnostic to stderr when tracing initialization fails.
#[allow(
    clippy::print_stderr,
    reason = "emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
