//! CLI output formatting.
//!
//! Line builders return `String`s so tests can check them; the `print_*`
//! functions write them to stdout.

use crate::colony::{format_path, AntResult, StepReport, TraversalMode};
use crate::graph::{GraphModel, Matrix};

use super::commands::RunSummary;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print version information.
pub fn print_version() {
    println!("antcolony {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"antcolony - Ant Colony Optimization over weighted graphs

USAGE:
    antcolony <COMMAND> [OPTIONS]

COMMANDS:
    run <graph.json>            Load a graph description and run the colony
        --mode <path|cycle>     Traversal mode (default: path)

    generate                    Generate a random instance and run cycle mode
        -n, --vertices <N>      Vertex count (default: colony.vertex_target)

    help                        Show this help message
    version                     Show version information

OPTIONS (run, generate):
    -c, --config <run.yaml>     Run configuration
    --seed <N>                  Override the configured seed
    -i, --iterations <N>        Override the iteration limit
    --delay-ms <N>              Pause between iterations (default: 0)
    --patience <N>              Stop after N iterations without a solution
    --pheromones                Print the pheromone matrix after the run
    -v, --verbose               Print every ant and enable debug logging

EXAMPLES:
    antcolony run demos/diamond.json --config demos/colony.yaml
    antcolony run demos/diamond.json --mode cycle --seed 7
    antcolony generate --vertices 20 --iterations 50

Logging honours RUST_LOG (for example RUST_LOG=antcolony=trace).
"
    );
}

/// Header block for a run.
#[must_use]
pub fn format_header(graph: &GraphModel, mode: TraversalMode, seed: u64) -> String {
    let mode = match mode {
        TraversalMode::PointToPoint => "point-to-point",
        TraversalMode::Cycle => "cycle",
    };
    format!(
        "{RULE}\nGraph: {} vertices, {} edges\nMode:  {mode}\nSeed:  {seed}\n{RULE}",
        graph.vertex_count(),
        graph.edge_count(),
    )
}

/// One line per iteration.
#[must_use]
pub fn format_iteration(report: &StepReport) -> String {
    let best = report
        .iteration_best
        .map_or_else(|| "no solution".to_string(), |d| format!("{d:.3}"));
    format!(
        "iter {:>4}  ants ok {:>3}/{:<3}  best {best}",
        report.iteration,
        report.successes(),
        report.ants.len(),
    )
}

/// One line per ant.
#[must_use]
pub fn format_ant(result: &AntResult) -> String {
    format!(
        "    ant {:>3}  {:>10.3}  {}",
        result.ant,
        result.distance_or_sentinel(),
        result.path_string()
    )
}

/// Print an iteration line, with every ant when `verbose`.
pub fn print_iteration(report: &StepReport, verbose: bool) {
    println!("{}", format_iteration(report));
    if verbose {
        for ant in &report.ants {
            println!("{}", format_ant(ant));
        }
    }
}

/// History as `1: 12.000, 2: -, 3: 11.500`.
#[must_use]
pub fn format_history(history: &[Option<f64>]) -> String {
    history
        .iter()
        .enumerate()
        .map(|(i, d)| match d {
            Some(d) => format!("{}: {d:.3}", i + 1),
            None => format!("{}: -", i + 1),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print the end-of-run summary.
pub fn print_summary(summary: &RunSummary) {
    println!("\n{RULE}");
    println!("Iterations:    {}", summary.iterations);
    println!("History:       {}", format_history(&summary.history));
    match (summary.best_distance, summary.best_path.is_empty()) {
        (Some(d), false) => {
            println!("Best distance: {d:.3}");
            println!("Best path:     {}", format_path(&summary.best_path));
        }
        _ => println!("No path found"),
    }
    if summary.gave_up {
        println!("Stopped early: no solution within patience");
    }
    println!("{RULE}");
}

/// Print the pheromone matrix table.
pub fn print_pheromones(pheromones: &Matrix) {
    println!("\nPheromones:");
    println!("{pheromones}");
}
