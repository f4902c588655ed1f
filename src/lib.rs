//! # antcolony
//!
//! Ant Colony Optimization over weighted graphs.
//!
//! Two traversal modes share one engine:
//! - Point-to-point: shortest path from a start vertex to a finish vertex
//! - Cycle: closed tour through every vertex (a traveling-salesman variant)
//!
//! Runs are fully reproducible: every random draw comes from a single
//! seeded PCG generator owned by the optimizer.
//!
//! ## Example
//!
//! ```rust
//! use antcolony::prelude::*;
//!
//! let graph = GraphModel::from_description(r#"{
//!     vertices: [ {X: 0, Y: 0}, {X: 4, Y: 0}, {X: 4, Y: 3} ],
//!     edges: [
//!         {vertex1: 0, vertex2: 1, weight: "4", isDirected: false},
//!         {vertex1: 1, vertex2: 2, weight: "3", isDirected: false},
//!         {vertex1: 0, vertex2: 2, weight: "",  isDirected: true},
//!     ],
//! }"#).unwrap();
//!
//! let config = ColonyConfig::builder().ant_count(5).route(0, 2).seed(7).build();
//! let mut colony = ColonyOptimizer::new(graph, config).unwrap();
//! colony.init_pheromones();
//!
//! let report = colony.step(TraversalMode::PointToPoint);
//! assert_eq!(report.ants.len(), 5);
//! assert!(!colony.best_path().is_empty());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
    clippy::needless_range_loop,
)]

pub mod cli;
pub mod colony;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod graph;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::colony::{
        AntResult, ColonyOptimizer, DeadEndReason, RunPhase, StepReport, TraversalMode,
        TripOutcome, FAILED_DISTANCE,
    };
    pub use crate::config::{ColonyConfig, ColonyConfigBuilder, GeneratorConfig, Placement, RunConfig};
    pub use crate::engine::rng::SimRng;
    pub use crate::error::{ColonyError, ColonyResult};
    pub use crate::generator::{generate_instance, InstanceGenerator};
    pub use crate::graph::{GraphModel, Matrix, Point};
}

/// Re-export for public API
pub use error::{ColonyError, ColonyResult};
