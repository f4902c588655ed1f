//! CLI command handlers.
//!
//! The step loop lives here, outside the library core: start the colony,
//! step until it stops itself, pause between steps, and give up after too
//! many iterations without a solution.

use std::path::Path;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::colony::ColonyOptimizer;
use crate::config::RunConfig;
use crate::engine::rng::SimRng;
use crate::error::ColonyResult;
use crate::generator::InstanceGenerator;
use crate::graph::GraphModel;

use super::output::{
    format_header, print_help, print_iteration, print_pheromones, print_summary, print_version,
};
use super::{Args, Command, RunOptions};

/// Outcome of a driven run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Iterations executed.
    pub iterations: usize,
    /// Iteration-best history.
    pub history: Vec<Option<f64>>,
    /// Shortest distance seen.
    pub best_distance: Option<f64>,
    /// Best path on the graph at the end.
    pub best_path: Vec<usize>,
    /// True if the patience limit ended the run.
    pub gave_up: bool,
}

impl RunSummary {
    /// Exit code: success when a best path exists.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        if self.best_path.is_empty() {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            graph_path,
            options,
        } => run_graph(&graph_path, &options),
        Command::Generate { vertices, options } => run_generated(vertices, &options),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Load `path` and run the colony on it.
#[must_use]
pub fn run_graph(path: &Path, options: &RunOptions) -> ExitCode {
    let config = match load_run_config(options) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let mut graph = GraphModel::new();
    if let Err(e) = graph.load_file(path) {
        eprintln!("Error loading '{}': {e}", path.display());
        return ExitCode::from(1);
    }

    run_on(graph, config, options)
}

/// Generate an instance and run cycle mode on it.
#[must_use]
pub fn run_generated(vertices: Option<usize>, options: &RunOptions) -> ExitCode {
    let config = match load_run_config(options) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let requested = vertices.unwrap_or(config.colony.vertex_target);
    let placement_rng = SimRng::new(config.colony.seed).fork();
    let graph = InstanceGenerator::from_rng(placement_rng).generate(requested, &config.generator);
    if graph.vertex_count() < requested {
        println!(
            "Placed {} of {requested} vertices (area too crowded)",
            graph.vertex_count()
        );
    }

    run_on(graph, config, options)
}

fn run_on(graph: GraphModel, config: RunConfig, options: &RunOptions) -> ExitCode {
    println!("{}", format_header(&graph, options.mode, config.colony.seed));

    let mut colony = match ColonyOptimizer::new(graph, config.colony) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let summary = drive(&mut colony, options);
    print_summary(&summary);
    if options.show_pheromones {
        print_pheromones(&colony.pheromone_snapshot());
    }
    summary.exit_code()
}

/// Read the config file (or defaults) and apply command-line overrides.
///
/// # Errors
///
/// Any error from [`RunConfig::load`].
pub fn load_run_config(options: &RunOptions) -> ColonyResult<RunConfig> {
    let mut config = match &options.config_path {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(seed) = options.seed_override {
        config.colony.seed = seed;
    }
    if let Some(n) = options.iterations {
        config.colony.iteration_limit = n;
    }
    Ok(config)
}

/// Initialize pheromones, start, and step until the colony stops.
pub fn drive(colony: &mut ColonyOptimizer, options: &RunOptions) -> RunSummary {
    colony.init_pheromones();
    colony.start();

    let mut iterations = 0;
    let mut without_solution = 0;
    let mut gave_up = false;

    while colony.is_running() {
        let report = colony.run_iteration(options.mode);
        iterations += 1;
        print_iteration(&report, options.verbose);

        if report.iteration_best.is_some() {
            without_solution = 0;
        } else {
            without_solution += 1;
            if options.patience.is_some_and(|p| without_solution >= p) {
                warn!(iterations = without_solution, "no solution within patience, stopping");
                colony.stop();
                gave_up = true;
                break;
            }
        }

        if colony.is_running() && options.delay_ms > 0 {
            thread::sleep(Duration::from_millis(options.delay_ms));
        }
    }

    RunSummary {
        iterations,
        history: colony.history().to_vec(),
        best_distance: colony.best_distance(),
        best_path: colony.best_path().to_vec(),
        gave_up,
    }
}
