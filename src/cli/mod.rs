//! Command-line front end.
//!
//! All CLI logic lives here so `main.rs` only sets up logging and calls
//! [`run_cli`] with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunOptions};
pub use commands::{drive, load_run_config, run_cli, run_generated, run_graph, RunSummary};
pub use output::{
    format_ant, format_header, format_history, format_iteration, print_help, print_version,
};

#[cfg(test)]
mod tests;
