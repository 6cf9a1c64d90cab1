//! Unit tests for the CLI commands and configuration wiring.

use super::{Cli, CliError, Command, EstimateArgs, ExecutionSummary, SimulateArgs, render_summary, run_cli};

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use ergm_core::GraphError;
use ergm_io::ConfigError;
use rstest::rstest;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    path
}

fn three_cycle_arclist(dir: &TempDir) -> PathBuf {
    write_file(
        dir,
        "graph.net",
        "*vertices 3\n*arcs\n1 2\n2 3\n3 1\n",
    )
}

fn estimate_config(dir: &TempDir, graph_path: &Path) -> PathBuf {
    write_file(
        dir,
        "estimate.cfg",
        &format!(
            "mode = estimate\n\
             useTNTsampler = true\n\
             arclistFile = {}\n\
             structParams = Arc,Reciprocity\n\
             aca_s = 0.1\n\
             aca_ee = 0.05\n\
             compC = 0.5\n\
             samplerSteps = 4\n\
             Ssteps = 2\n\
             EEsteps = 2\n\
             EEinnerSteps = 2\n\
             baseSeed = 7\n",
            graph_path.display()
        ),
    )
}

fn simulate_config(dir: &TempDir) -> PathBuf {
    write_file(
        dir,
        "simulate.cfg",
        "mode = simulate\n\
         useTNTsampler = true\n\
         structParams = Arc,Reciprocity\n\
         numNodes = 4\n\
         sampleSize = 2\n\
         interval = 3\n\
         burnin = 1\n\
         samplerSteps = 4\n\
         baseSeed = 11\n",
    )
}

#[rstest]
fn estimate_runs_against_a_pajek_graph() -> TestResult {
    let dir = temp_dir();
    let graph_path = three_cycle_arclist(&dir);
    let config = estimate_config(&dir, &graph_path);
    let cli = Cli {
        command: Command::Estimate(EstimateArgs {
            config,
            rank: 0,
            ..EstimateArgs::default()
        }),
    };
    let summary = run_cli(cli)?;
    let ExecutionSummary::Estimate { theta, outer_steps } = summary else {
        panic!("expected an estimate summary");
    };
    assert_eq!(theta.len(), 2);
    assert!(outer_steps > 0);
    Ok(())
}

#[rstest]
fn estimate_arclist_file_flag_overrides_the_configured_graph() -> TestResult {
    let dir = temp_dir();
    let configured_graph = three_cycle_arclist(&dir);
    let config = estimate_config(&dir, &configured_graph);
    let override_graph = write_file(&dir, "override.net", "*vertices 4\n*arcs\n1 2\n2 3\n3 4\n4 1\n");

    let cli = Cli {
        command: Command::Estimate(EstimateArgs {
            config,
            rank: 0,
            arclist_file: Some(override_graph),
            ..EstimateArgs::default()
        }),
    };
    let summary = run_cli(cli)?;
    let ExecutionSummary::Estimate { theta, .. } = summary else {
        panic!("expected an estimate summary");
    };
    assert_eq!(theta.len(), 2);
    Ok(())
}

#[rstest]
fn estimate_writes_theta_and_dz_a_trajectories() -> TestResult {
    let dir = temp_dir();
    let graph_path = three_cycle_arclist(&dir);
    let mut config_text = fs::read_to_string(estimate_config(&dir, &graph_path))?;
    let theta_prefix = dir.path().join("theta");
    let dz_a_prefix = dir.path().join("dzA");
    config_text.push_str(&format!("thetaFilePrefix = {}\n", theta_prefix.display()));
    config_text.push_str(&format!("dzAFilePrefix = {}\n", dz_a_prefix.display()));
    let config = write_file(&dir, "estimate_with_outputs.cfg", &config_text);

    let cli = Cli {
        command: Command::Estimate(EstimateArgs {
            config,
            rank: 3,
            ..EstimateArgs::default()
        }),
    };
    run_cli(cli)?;

    assert!(dir.path().join("theta_3.txt").exists());
    assert!(dir.path().join("dzA_3.txt").exists());
    Ok(())
}

#[rstest]
fn simulate_draws_the_configured_sample_count() -> TestResult {
    let dir = temp_dir();
    let config = simulate_config(&dir);
    let cli = Cli {
        command: Command::Simulate(SimulateArgs {
            config,
            rank: 0,
            theta: vec![0.5, -0.25],
            ..SimulateArgs::default()
        }),
    };
    let summary = run_cli(cli)?;
    let ExecutionSummary::Simulate { sample_count } = summary else {
        panic!("expected a simulate summary");
    };
    assert_eq!(sample_count, 2);
    Ok(())
}

#[rstest]
fn simulate_stats_file_flag_overrides_the_configured_output_path() -> TestResult {
    let dir = temp_dir();
    let config = simulate_config(&dir);
    let stats_path = dir.path().join("override_stats.txt");

    let cli = Cli {
        command: Command::Simulate(SimulateArgs {
            config,
            rank: 0,
            theta: vec![0.5, -0.25],
            stats_file: Some(stats_path.clone()),
            ..SimulateArgs::default()
        }),
    };
    let summary = run_cli(cli)?;
    let ExecutionSummary::Simulate { sample_count } = summary else {
        panic!("expected a simulate summary");
    };
    assert_eq!(sample_count, 2);
    assert!(stats_path.exists());
    Ok(())
}

#[rstest]
fn simulate_rejects_a_theta_of_the_wrong_length() -> TestResult {
    let dir = temp_dir();
    let config = simulate_config(&dir);
    let cli = Cli {
        command: Command::Simulate(SimulateArgs {
            config,
            rank: 0,
            theta: vec![0.5],
            ..SimulateArgs::default()
        }),
    };
    let err = run_cli(cli).expect_err("arity mismatch must fail");
    assert!(matches!(
        err,
        CliError::ThetaArityMismatch {
            supplied: 1,
            expected: 2,
        }
    ));
    Ok(())
}

#[rstest]
fn estimate_rejects_an_unknown_configuration_key() -> TestResult {
    let dir = temp_dir();
    let graph_path = three_cycle_arclist(&dir);
    let mut config_text = fs::read_to_string(estimate_config(&dir, &graph_path))?;
    config_text.push_str("notARealKey = 1\n");
    let config = write_file(&dir, "bad.cfg", &config_text);

    let cli = Cli {
        command: Command::Estimate(EstimateArgs {
            config,
            rank: 0,
            ..EstimateArgs::default()
        }),
    };
    let err = run_cli(cli).expect_err("unknown key must fail");
    assert!(matches!(err, CliError::Config(ConfigError::UnknownKey { .. })));
    Ok(())
}

#[rstest]
fn estimate_rejects_a_self_loop_in_the_input_graph() -> TestResult {
    let dir = temp_dir();
    let graph_path = write_file(&dir, "loopy.net", "*vertices 2\n*arcs\n1 1\n");
    let config = estimate_config(&dir, &graph_path);

    let cli = Cli {
        command: Command::Estimate(EstimateArgs {
            config,
            rank: 0,
            ..EstimateArgs::default()
        }),
    };
    let err = run_cli(cli).expect_err("self-loop must fail");
    assert!(matches!(err, CliError::Pajek(_)));
    Ok(())
}

#[rstest]
fn estimate_exit_code_is_one_for_a_configuration_error() -> TestResult {
    let dir = temp_dir();
    let config = write_file(&dir, "missing_arclist.cfg", "mode = estimate\n");
    let cli = Cli {
        command: Command::Estimate(EstimateArgs {
            config,
            rank: 0,
            ..EstimateArgs::default()
        }),
    };
    let err = run_cli(cli).expect_err("missing arclistFile must fail");
    assert_eq!(err.exit_code(), 1);
    Ok(())
}

#[rstest]
fn graph_invariant_violation_maps_to_exit_code_two() {
    let err = CliError::Graph(GraphError::InvariantViolation {
        message: "synthetic invariant violation for exit-code coverage".to_owned(),
    });
    assert_eq!(err.exit_code(), 2);
}

#[rstest]
fn render_summary_reports_estimate_output() -> TestResult {
    let summary = ExecutionSummary::Estimate {
        theta: vec![0.1, -0.2],
        outer_steps: 4,
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert!(text.contains("outer steps: 4"));
    assert!(text.contains("theta: 0.1 -0.2"));
    Ok(())
}

#[rstest]
fn render_summary_reports_simulate_output() -> TestResult {
    let summary = ExecutionSummary::Simulate { sample_count: 5 };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert!(text.contains("samples: 5"));
    Ok(())
}

#[rstest]
fn clap_rejects_a_simulate_theta_with_no_values() {
    let args = ["ergm", "simulate", "run.cfg"];
    let parsed = Cli::try_parse_from(args).expect("simulate accepts an empty --theta");
    let Command::Simulate(simulate) = parsed.command else {
        panic!("expected a simulate command");
    };
    assert!(simulate.theta.is_empty());
}

#[rstest]
fn clap_parses_a_comma_separated_theta() {
    let args = ["ergm", "simulate", "run.cfg", "--theta", "0.1,0.2,-0.3"];
    let parsed = Cli::try_parse_from(args).expect("comma-separated --theta parses");
    let Command::Simulate(simulate) = parsed.command else {
        panic!("expected a simulate command");
    };
    assert_eq!(simulate.theta, vec![0.1, 0.2, -0.3]);
}
