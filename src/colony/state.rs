//! Run state, per-ant results, and the per-step report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance shown for an ant that did not complete its trip.
pub const FAILED_DISTANCE: f64 = -1.0;

/// Which traversal each ant performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalMode {
    /// From the start vertex to the finish vertex.
    #[default]
    PointToPoint,
    /// Closed tour through every vertex, returning to the start.
    Cycle,
}

impl std::str::FromStr for TraversalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" | "point-to-point" | "p2p" => Ok(Self::PointToPoint),
            "cycle" | "salesman" | "tsp" => Ok(Self::Cycle),
            other => Err(format!("unknown traversal mode '{other}'")),
        }
    }
}

/// Optimizer lifecycle.
///
/// ```text
/// Idle --start/step--> Running --stop / limit overrun--> Stopped --reset--> Idle
///                                                        Stopped --start--> Running
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Not started, iteration counter at zero.
    #[default]
    Idle,
    /// Stepping.
    Running,
    /// Halted by the caller or by the iteration limit.
    Stopped,
}

/// Why an ant gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadEndReason {
    /// Every neighbour is visited or unreachable; the selection weights
    /// summed to zero.
    NoEligibleVertex,
    /// Path grew past `N + 1` vertices without reaching the goal.
    StepLimit,
    /// Cycle visited everything but has no edge back to the start.
    ClosingEdgeMissing,
}

impl fmt::Display for DeadEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEligibleVertex => write!(f, "no eligible next vertex"),
            Self::StepLimit => write!(f, "step limit exceeded"),
            Self::ClosingEdgeMissing => write!(f, "no edge back to start"),
        }
    }
}

/// How one ant's trip ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TripOutcome {
    /// Reached the goal; total edge weight of the path.
    Completed(f64),
    /// Got stuck.
    DeadEnd(DeadEndReason),
}

impl TripOutcome {
    /// Path distance if the trip completed.
    #[must_use]
    pub const fn distance(&self) -> Option<f64> {
        match self {
            Self::Completed(d) => Some(*d),
            Self::DeadEnd(_) => None,
        }
    }

    /// True if the trip completed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// One ant's trip in the most recent iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntResult {
    /// Ant index within the iteration.
    pub ant: usize,
    /// Vertices visited, in order. Partial for failed ants.
    pub path: Vec<usize>,
    /// Outcome.
    pub outcome: TripOutcome,
}

impl AntResult {
    /// Distance, or [`FAILED_DISTANCE`] for a dead end.
    #[must_use]
    pub fn distance_or_sentinel(&self) -> f64 {
        self.outcome.distance().unwrap_or(FAILED_DISTANCE)
    }

    /// Path as `0 -> 3 -> 2`.
    #[must_use]
    pub fn path_string(&self) -> String {
        format_path(&self.path)
    }
}

/// Render a vertex sequence as `a -> b -> c`.
#[must_use]
pub fn format_path(path: &[usize]) -> String {
    path.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// What one step reports back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Every ant's trip, in ant order.
    pub ants: Vec<AntResult>,
    /// Shortest successful distance this iteration.
    pub iteration_best: Option<f64>,
    /// Best path known after this step.
    pub best_path: Vec<usize>,
    /// Iteration counter after advancing (zero after an auto-stop).
    pub iteration: usize,
    /// Whether the optimizer is still running.
    pub is_running: bool,
}

impl StepReport {
    /// Number of ants that completed their trip.
    #[must_use]
    pub fn successes(&self) -> usize {
        self.ants.iter().filter(|a| a.outcome.is_success()).count()
    }
}
