//! CLI module tests.

use super::args::{Args, Command, RunOptions};
use super::commands::{drive, load_run_config};
use super::output::{format_ant, format_header, format_history, format_iteration};
use crate::colony::{
    AntResult, ColonyOptimizer, DeadEndReason, StepReport, TraversalMode, TripOutcome,
};
use crate::config::ColonyConfig;
use crate::graph::{GraphModel, Point};
use std::io::Write;
use std::path::PathBuf;

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_shows_help() {
    let args = Args::parse_from(["antcolony"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_help_and_version() {
    for flag in ["-h", "--help", "help"] {
        assert_eq!(Args::parse_from(["antcolony", flag]).command, Command::Help);
    }
    for flag in ["-V", "--version", "version"] {
        assert_eq!(
            Args::parse_from(["antcolony", flag]).command,
            Command::Version
        );
    }
}

#[test]
fn test_parse_unknown_command() {
    let args = Args::parse_from(["antcolony", "fly"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_run_defaults() {
    let args = Args::parse_from(["antcolony", "run", "graph.json"]);
    assert_eq!(
        args.command,
        Command::Run {
            graph_path: PathBuf::from("graph.json"),
            options: RunOptions::default(),
        }
    );
    assert!(!args.verbose());
}

#[test]
fn test_parse_run_all_options() {
    let args = Args::parse_from([
        "antcolony",
        "run",
        "g.json",
        "--config",
        "run.yaml",
        "--mode",
        "cycle",
        "--seed",
        "7",
        "--iterations",
        "20",
        "--delay-ms",
        "250",
        "--patience",
        "4",
        "--pheromones",
        "-v",
    ]);
    let Command::Run {
        graph_path,
        options,
    } = args.command.clone()
    else {
        panic!("expected run command");
    };
    assert_eq!(graph_path, PathBuf::from("g.json"));
    assert_eq!(options.config_path, Some(PathBuf::from("run.yaml")));
    assert_eq!(options.mode, TraversalMode::Cycle);
    assert_eq!(options.seed_override, Some(7));
    assert_eq!(options.iterations, Some(20));
    assert_eq!(options.delay_ms, 250);
    assert_eq!(options.patience, Some(4));
    assert!(options.show_pheromones);
    assert!(args.verbose());
}

#[test]
fn test_parse_run_requires_path() {
    assert_eq!(Args::parse_from(["antcolony", "run"]).command, Command::Help);
    assert_eq!(
        Args::parse_from(["antcolony", "run", "--seed", "3"]).command,
        Command::Help
    );
}

#[test]
fn test_parse_run_bad_mode() {
    let args = Args::parse_from(["antcolony", "run", "g.json", "--mode", "spiral"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_run_ignores_bad_number() {
    let args = Args::parse_from(["antcolony", "run", "g.json", "--seed", "abc"]);
    let Command::Run { options, .. } = args.command else {
        panic!("expected run command");
    };
    assert_eq!(options.seed_override, None);
}

#[test]
fn test_parse_generate_forces_cycle() {
    let args = Args::parse_from([
        "antcolony",
        "generate",
        "--vertices",
        "12",
        "--mode",
        "path",
    ]);
    let Command::Generate { vertices, options } = args.command else {
        panic!("expected generate command");
    };
    assert_eq!(vertices, Some(12));
    assert_eq!(options.mode, TraversalMode::Cycle);
}

// ============================================================================
// Config override tests
// ============================================================================

#[test]
fn test_load_run_config_defaults_and_overrides() {
    let options = RunOptions {
        seed_override: Some(99),
        iterations: Some(7),
        ..RunOptions::default()
    };
    let config = load_run_config(&options).unwrap();
    assert_eq!(config.colony.seed, 99);
    assert_eq!(config.colony.iteration_limit, 7);
    assert_eq!(config.colony.ant_count, 1);
}

#[test]
fn test_load_run_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "colony:\n  ant_count: 6\n  seed: 5").unwrap();
    let options = RunOptions {
        config_path: Some(file.path().to_path_buf()),
        ..RunOptions::default()
    };
    let config = load_run_config(&options).unwrap();
    assert_eq!(config.colony.ant_count, 6);
    assert_eq!(config.colony.seed, 5);
}

#[test]
fn test_load_run_config_missing_file() {
    let options = RunOptions {
        config_path: Some(PathBuf::from("/no/such/run.yaml")),
        ..RunOptions::default()
    };
    assert!(load_run_config(&options).is_err());
}

// ============================================================================
// Driver tests
// ============================================================================

fn square() -> GraphModel {
    GraphModel::complete(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ])
}

#[test]
fn test_drive_runs_until_auto_stop() {
    let config = ColonyConfig::builder()
        .ant_count(3)
        .iteration_limit(4)
        .route(0, 2)
        .build();
    let mut colony = ColonyOptimizer::new(square(), config).unwrap();
    let summary = drive(&mut colony, &RunOptions::default());
    // Counter 0..=4 runs, the fifth pass exceeds the limit.
    assert_eq!(summary.iterations, 5);
    assert_eq!(summary.history.len(), 5);
    assert!(!summary.best_path.is_empty());
    assert!(summary.best_distance.is_some());
    assert!(!summary.gave_up);
    assert!(!colony.is_running());
}

#[test]
fn test_drive_gives_up_without_solution() {
    // Two vertices with no edges: every ant dead-ends.
    let graph = GraphModel::complete(vec![Point::new(0.0, 0.0), Point::new(0.0, 0.0)]);
    let config = ColonyConfig::builder().iteration_limit(100).build();
    let mut colony = ColonyOptimizer::new(graph, config).unwrap();
    let options = RunOptions {
        patience: Some(3),
        ..RunOptions::default()
    };
    let summary = drive(&mut colony, &options);
    assert_eq!(summary.iterations, 3);
    assert!(summary.gave_up);
    assert!(summary.best_path.is_empty());
    assert!(summary.best_distance.is_none());
}

// ============================================================================
// Output formatting tests
// ============================================================================

fn sample_report() -> StepReport {
    StepReport {
        ants: vec![
            AntResult {
                ant: 0,
                path: vec![0, 1, 2],
                outcome: TripOutcome::Completed(2.5),
            },
            AntResult {
                ant: 1,
                path: vec![0, 3],
                outcome: TripOutcome::DeadEnd(DeadEndReason::NoEligibleVertex),
            },
        ],
        iteration_best: Some(2.5),
        best_path: vec![0, 1, 2],
        iteration: 3,
        is_running: true,
    }
}

#[test]
fn test_format_iteration() {
    let line = format_iteration(&sample_report());
    assert!(line.contains("iter    3"));
    assert!(line.contains("1/2"));
    assert!(line.contains("best 2.500"));
}

#[test]
fn test_format_iteration_no_solution() {
    let mut report = sample_report();
    report.iteration_best = None;
    assert!(format_iteration(&report).contains("no solution"));
}

#[test]
fn test_format_ant_uses_sentinel() {
    let report = sample_report();
    assert!(format_ant(&report.ants[0]).contains("0 -> 1 -> 2"));
    assert!(format_ant(&report.ants[1]).contains("-1.000"));
}

#[test]
fn test_format_history() {
    assert_eq!(
        format_history(&[Some(3.0), None, Some(2.25)]),
        "1: 3.000, 2: -, 3: 2.250"
    );
    assert_eq!(format_history(&[]), "");
}

#[test]
fn test_format_header() {
    let header = format_header(&square(), TraversalMode::Cycle, 42);
    assert!(header.contains("4 vertices, 12 edges"));
    assert!(header.contains("Mode:  cycle"));
    assert!(header.contains("Seed:  42"));
}
