//! CLI argument parsing.
//!
//! Arguments are parsed by hand into [`Command`] so the parser can be
//! driven from tests with any iterator of strings.

use std::path::PathBuf;

use crate::colony::TraversalMode;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Options shared by every command that runs the colony.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Run configuration YAML.
    pub config_path: Option<PathBuf>,
    /// Traversal mode.
    pub mode: TraversalMode,
    /// Seed override.
    pub seed_override: Option<u64>,
    /// Iteration limit override.
    pub iterations: Option<usize>,
    /// Pause between iterations, in milliseconds.
    pub delay_ms: u64,
    /// Give up after this many consecutive iterations without a solution.
    pub patience: Option<usize>,
    /// Dump the pheromone matrix after the run.
    pub show_pheromones: bool,
    /// Print every ant's trip and enable debug logging.
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a graph file and run the colony on it
    Run {
        /// Path to the graph description.
        graph_path: PathBuf,
        /// Run options.
        options: RunOptions,
    },
    /// Generate a random instance and run cycle mode on it
    Generate {
        /// Vertex count override.
        vertices: Option<usize>,
        /// Run options.
        options: RunOptions,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// True if the command asked for verbose output.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        match &self.command {
            Command::Run { options, .. } | Command::Generate { options, .. } => options.verbose,
            Command::Help | Command::Version => false,
        }
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "generate" | "gen" => Self::parse_generate_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 || args[2].starts_with('-') {
            eprintln!("Error: 'run' command requires a graph file path");
            return Command::Help;
        }

        let mut options = RunOptions::default();
        let mut i = 3;
        while i < args.len() {
            match Self::parse_option(args, i, &mut options) {
                Some(next) => i = next,
                None => return Command::Help,
            }
        }

        Command::Run {
            graph_path: PathBuf::from(&args[2]),
            options,
        }
    }

    fn parse_generate_command(args: &[String]) -> Command {
        let mut options = RunOptions {
            mode: TraversalMode::Cycle,
            ..RunOptions::default()
        };
        let mut vertices = None;

        let mut i = 2;
        while i < args.len() {
            if matches!(args[i].as_str(), "--vertices" | "-n") {
                vertices = args.get(i + 1).and_then(|v| v.parse().ok());
                i += 2;
                continue;
            }
            match Self::parse_option(args, i, &mut options) {
                Some(next) => i = next,
                None => return Command::Help,
            }
        }
        // Generated instances are complete graphs meant for tours.
        options.mode = TraversalMode::Cycle;

        Command::Generate { vertices, options }
    }

    /// Apply the option at `args[i]`, returning the index of the next one.
    ///
    /// Unparsable numeric values are ignored, like unknown flags. An
    /// unknown traversal mode aborts parsing.
    fn parse_option(args: &[String], i: usize, options: &mut RunOptions) -> Option<usize> {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--config" | "-c" => {
                options.config_path = value.map(PathBuf::from);
                Some(i + 2)
            }
            "--mode" | "-m" => {
                let raw = value.map_or("", String::as_str);
                match raw.parse() {
                    Ok(mode) => {
                        options.mode = mode;
                        Some(i + 2)
                    }
                    Err(e) => {
                        eprintln!("Error: {e} (expected 'path' or 'cycle')");
                        None
                    }
                }
            }
            "--seed" => {
                if let Some(seed) = value.and_then(|v| v.parse().ok()) {
                    options.seed_override = Some(seed);
                }
                Some(i + 2)
            }
            "--iterations" | "-i" => {
                if let Some(n) = value.and_then(|v| v.parse().ok()) {
                    options.iterations = Some(n);
                }
                Some(i + 2)
            }
            "--delay-ms" => {
                if let Some(ms) = value.and_then(|v| v.parse().ok()) {
                    options.delay_ms = ms;
                }
                Some(i + 2)
            }
            "--patience" => {
                if let Some(n) = value.and_then(|v| v.parse().ok()) {
                    options.patience = Some(n);
                }
                Some(i + 2)
            }
            "--pheromones" => {
                options.show_pheromones = true;
                Some(i + 1)
            }
            "-v" | "--verbose" => {
                options.verbose = true;
                Some(i + 1)
            }
            _ => Some(i + 1),
        }
    }
}
