//! Run configuration with YAML loading and validation.
//!
//! Field-level limits are checked by `validator`; checks that need the bound
//! graph (vertex ranges, graph size) live in [`ColonyConfig::validate_for`].
//!
//! # Example YAML
//!
//! ```yaml
//! colony:
//!   ant_count: 20
//!   iteration_limit: 50
//!   tau0: 1.0
//!   ant_deposit: 10.0
//!   evaporation: 0.1
//!   alpha: 1.0
//!   beta: 2.0
//!   start: 0
//!   finish: 13
//!   seed: 42
//! generator:
//!   width: 800
//!   height: 600
//!   min_separation: 50
//!   placement: separated
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{ColonyError, ColonyResult, VertexRole};
use crate::graph::GraphModel;

/// Top-level run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Colony parameters.
    #[validate(nested)]
    #[serde(default)]
    pub colony: ColonyConfig,

    /// Synthetic instance parameters.
    #[validate(nested)]
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl RunConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed, or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> ColonyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> ColonyResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.generator.check_area()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> ColonyResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Colony parameters. Mutable only while the optimizer is not running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ColonyConfig {
    /// Ants per iteration.
    #[validate(range(min = 1))]
    #[serde(default = "default_ant_count")]
    pub ant_count: usize,

    /// Iteration counter value past which the run stops itself.
    #[serde(default = "default_iteration_limit")]
    pub iteration_limit: usize,

    /// Initial pheromone on every existing edge.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_tau0")]
    pub tau0: f64,

    /// Pheromone budget each successful ant spreads over its path.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_ant_deposit")]
    pub ant_deposit: f64,

    /// Fraction of pheromone removed from every cell per iteration.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_evaporation")]
    pub evaporation: f64,

    /// Pheromone exponent.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_exponent")]
    pub alpha: f64,

    /// Visibility (inverse weight) exponent.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_exponent")]
    pub beta: f64,

    /// Start vertex for both modes.
    #[serde(default)]
    pub start: usize,

    /// Goal vertex for point-to-point mode.
    #[serde(default = "default_finish")]
    pub finish: usize,

    /// Vertex count requested from the instance generator.
    #[validate(range(min = 1))]
    #[serde(default = "default_vertex_target")]
    pub vertex_target: usize,

    /// Master seed for the run's random source.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_ant_count() -> usize {
    1
}

const fn default_iteration_limit() -> usize {
    3
}

const fn default_tau0() -> f64 {
    10.0
}

const fn default_ant_deposit() -> f64 {
    10.0
}

const fn default_evaporation() -> f64 {
    0.1
}

const fn default_exponent() -> f64 {
    1.0
}

const fn default_finish() -> usize {
    1
}

const fn default_vertex_target() -> usize {
    10
}

const fn default_seed() -> u64 {
    42
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            ant_count: default_ant_count(),
            iteration_limit: default_iteration_limit(),
            tau0: default_tau0(),
            ant_deposit: default_ant_deposit(),
            evaporation: default_evaporation(),
            alpha: default_exponent(),
            beta: default_exponent(),
            start: 0,
            finish: default_finish(),
            vertex_target: default_vertex_target(),
            seed: default_seed(),
        }
    }
}

impl ColonyConfig {
    /// Create a builder starting from defaults.
    #[must_use]
    pub fn builder() -> ColonyConfigBuilder {
        ColonyConfigBuilder::default()
    }

    /// Check field limits and the constraints that depend on `graph`.
    ///
    /// # Errors
    ///
    /// - `ZeroAnts` for an ant count of zero
    /// - `Validation` for out-of-range rates or exponents
    /// - `GraphTooSmall` for graphs under two vertices
    /// - `VertexOutOfRange` for start or finish outside the graph
    /// - `StartEqualsFinish` when the point-to-point trip would be empty
    pub fn validate_for(&self, graph: &GraphModel) -> ColonyResult<()> {
        if self.ant_count == 0 {
            return Err(ColonyError::ZeroAnts);
        }
        self.validate()?;

        let vertex_count = graph.vertex_count();
        if vertex_count < 2 {
            return Err(ColonyError::GraphTooSmall { vertex_count });
        }
        for (role, vertex) in [(VertexRole::Start, self.start), (VertexRole::Finish, self.finish)] {
            if vertex >= vertex_count {
                return Err(ColonyError::VertexOutOfRange {
                    role,
                    vertex,
                    vertex_count,
                });
            }
        }
        if self.start == self.finish {
            return Err(ColonyError::StartEqualsFinish { vertex: self.start });
        }
        Ok(())
    }
}

/// Builder for [`ColonyConfig`].
#[derive(Debug, Default)]
pub struct ColonyConfigBuilder {
    config: ColonyConfig,
}

impl ColonyConfigBuilder {
    /// Ants per iteration.
    #[must_use]
    pub const fn ant_count(mut self, n: usize) -> Self {
        self.config.ant_count = n;
        self
    }

    /// Iteration limit.
    #[must_use]
    pub const fn iteration_limit(mut self, n: usize) -> Self {
        self.config.iteration_limit = n;
        self
    }

    /// Initial pheromone.
    #[must_use]
    pub const fn tau0(mut self, tau0: f64) -> Self {
        self.config.tau0 = tau0;
        self
    }

    /// Per-ant deposit budget.
    #[must_use]
    pub const fn ant_deposit(mut self, q: f64) -> Self {
        self.config.ant_deposit = q;
        self
    }

    /// Evaporation rate.
    #[must_use]
    pub const fn evaporation(mut self, p: f64) -> Self {
        self.config.evaporation = p;
        self
    }

    /// Pheromone and visibility exponents.
    #[must_use]
    pub const fn exponents(mut self, alpha: f64, beta: f64) -> Self {
        self.config.alpha = alpha;
        self.config.beta = beta;
        self
    }

    /// Start and finish vertices.
    #[must_use]
    pub const fn route(mut self, start: usize, finish: usize) -> Self {
        self.config.start = start;
        self.config.finish = finish;
        self
    }

    /// Generator vertex target.
    #[must_use]
    pub const fn vertex_target(mut self, n: usize) -> Self {
        self.config.vertex_target = n;
        self
    }

    /// Random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ColonyConfig {
        self.config
    }
}

/// How the instance generator places vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Rejection sampling with a minimum pairwise separation.
    #[default]
    Separated,
    /// Independent uniform draws.
    Uniform,
    /// Jittered grid.
    Grid,
}

/// Synthetic instance parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Area width.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_width")]
    pub width: f64,

    /// Area height.
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default = "default_height")]
    pub height: f64,

    /// Minimum distance between accepted points (`separated` only).
    #[validate(range(min = 0.0))]
    #[serde(default = "default_min_separation")]
    pub min_separation: f64,

    /// Consecutive rejected draws before giving up (`separated` only).
    #[validate(range(min = 1))]
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Placement strategy.
    #[serde(default)]
    pub placement: Placement,
}

const fn default_width() -> f64 {
    800.0
}

const fn default_height() -> f64 {
    600.0
}

const fn default_min_separation() -> f64 {
    50.0
}

const fn default_max_attempts() -> usize {
    1000
}

impl GeneratorConfig {
    /// Reject a separation no two points in the area can satisfy.
    ///
    /// # Errors
    ///
    /// `Config` when `min_separation` exceeds the area diagonal under
    /// separated placement.
    pub fn check_area(&self) -> ColonyResult<()> {
        let diagonal = self.width.hypot(self.height);
        if self.placement == Placement::Separated && self.min_separation > diagonal {
            return Err(ColonyError::config(format!(
                "min_separation {} exceeds the {}x{} area diagonal",
                self.min_separation, self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            min_separation: default_min_separation(),
            max_attempts: default_max_attempts(),
            placement: Placement::default(),
        }
    }
}
