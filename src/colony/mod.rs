//! Ant colony optimizer.
//!
//! Drives `ant_count` ants per iteration over a [`GraphModel`], either from
//! the start vertex to the finish vertex or around a closed tour, and keeps
//! the pheromone field, best path, and per-iteration results up to date.
//!
//! # Iteration
//!
//! ```text
//! for ant in 0..ant_count:
//!     trip (taboo list = visited vertices)
//!     on success: τ[a][b] += Q / L   for every edge a -> b of the path
//! τ *= (1 - P)                        once, after every ant
//! ```
//!
//! Ants run strictly in index order and each deposit lands before the next
//! ant starts, so later ants in the same iteration see earlier trails.
//! Every random draw comes from one [`SimRng`] seeded from the config, so a
//! seed fully determines a run.
//!
//! # Example
//!
//! ```
//! use antcolony::colony::{ColonyOptimizer, TraversalMode};
//! use antcolony::config::ColonyConfig;
//! use antcolony::graph::{GraphModel, Point};
//!
//! let graph = GraphModel::complete(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(3.0, 0.0),
//!     Point::new(3.0, 4.0),
//!     Point::new(0.0, 4.0),
//! ]);
//! let config = ColonyConfig::builder().ant_count(4).route(0, 2).build();
//! let mut colony = ColonyOptimizer::new(graph, config).unwrap();
//! colony.init_pheromones();
//!
//! let report = colony.step(TraversalMode::Cycle);
//! assert_eq!(report.ants.len(), 4);
//! assert!(report.iteration_best.is_some());
//! ```

pub mod pheromone;
pub mod rules;
pub mod state;

use tracing::{debug, info};

use crate::config::ColonyConfig;
use crate::engine::rng::SimRng;
use crate::error::ColonyResult;
use crate::graph::{GraphModel, Matrix};
pub use state::{
    format_path, AntResult, DeadEndReason, RunPhase, StepReport, TraversalMode, TripOutcome,
    FAILED_DISTANCE,
};

/// Optimizer bound to one graph.
#[derive(Debug, Clone)]
pub struct ColonyOptimizer {
    graph: GraphModel,
    config: ColonyConfig,
    rng: SimRng,
    phase: RunPhase,
    iteration: usize,
    iteration_best: Option<f64>,
    history: Vec<Option<f64>>,
    results: Vec<AntResult>,
}

impl ColonyOptimizer {
    /// Bind `config` to `graph`.
    ///
    /// The pheromone field is left as the graph has it; call
    /// [`Self::init_pheromones`] before stepping.
    ///
    /// # Errors
    ///
    /// Any configuration error from [`ColonyConfig::validate_for`].
    pub fn new(graph: GraphModel, config: ColonyConfig) -> ColonyResult<Self> {
        config.validate_for(&graph)?;
        Ok(Self {
            rng: SimRng::new(config.seed),
            graph,
            config,
            phase: RunPhase::Idle,
            iteration: 0,
            iteration_best: None,
            history: Vec::new(),
            results: Vec::new(),
        })
    }

    /// Replace the configuration.
    ///
    /// Ignored while running (returns `Ok(false)`). Otherwise the new
    /// config is validated against the bound graph, installed, and the
    /// random source is reseeded from it.
    ///
    /// # Errors
    ///
    /// Any configuration error; the old config stays in place.
    pub fn configure(&mut self, config: ColonyConfig) -> ColonyResult<bool> {
        if self.is_running() {
            debug!("configure ignored while running");
            return Ok(false);
        }
        config.validate_for(&self.graph)?;
        self.rng = SimRng::new(config.seed);
        self.config = config;
        Ok(true)
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &ColonyConfig {
        &self.config
    }

    /// Bind to a new graph, keeping the configuration.
    ///
    /// Resets run state to idle. Pheromones are whatever `graph` carries.
    ///
    /// # Errors
    ///
    /// Configuration error if the current config does not fit `graph`;
    /// nothing changes in that case.
    pub fn rebind(&mut self, graph: GraphModel) -> ColonyResult<()> {
        self.config.validate_for(&graph)?;
        self.graph = graph;
        self.reset();
        Ok(())
    }

    /// Bind to a new graph with a new configuration.
    ///
    /// # Errors
    ///
    /// Configuration error if `config` does not fit `graph`; nothing
    /// changes in that case.
    pub fn rebind_with(&mut self, graph: GraphModel, config: ColonyConfig) -> ColonyResult<()> {
        config.validate_for(&graph)?;
        self.graph = graph;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Set every existing edge to the configured `tau0`.
    pub fn init_pheromones(&mut self) {
        self.graph.init_pheromones(self.config.tau0);
    }

    /// Enter the running phase.
    pub fn start(&mut self) {
        self.phase = RunPhase::Running;
    }

    /// Leave the running phase. The iteration counter is kept.
    pub fn stop(&mut self) {
        if self.phase == RunPhase::Running {
            self.phase = RunPhase::Stopped;
        }
    }

    /// Back to idle: counter, results, and history cleared, random source
    /// reseeded. Pheromones and the best path are kept.
    pub fn reset(&mut self) {
        self.phase = RunPhase::Idle;
        self.iteration = 0;
        self.iteration_best = None;
        self.history.clear();
        self.results.clear();
        self.rng = SimRng::new(self.config.seed);
    }

    /// True while in the running phase.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Mark running and run one iteration.
    pub fn step(&mut self, mode: TraversalMode) -> StepReport {
        self.start();
        self.run_iteration(mode)
    }

    /// Run every ant once, evaporate, and advance the counter.
    ///
    /// Stops the run and resets the counter to zero once the counter
    /// passes `iteration_limit`. Does not change the phase otherwise.
    pub fn run_iteration(&mut self, mode: TraversalMode) -> StepReport {
        self.results.clear();
        let mut best: Option<(f64, usize)> = None;

        for ant in 0..self.config.ant_count {
            let (path, outcome) = match mode {
                TraversalMode::PointToPoint => self.ant_trip_from_to(),
                TraversalMode::Cycle => self.ant_trip_salesman(self.config.start),
            };
            debug!(
                iteration = self.iteration,
                ant,
                path = %format_path(&path),
                distance = outcome.distance().unwrap_or(FAILED_DISTANCE),
                "ant finished"
            );
            if let TripOutcome::Completed(d) = outcome {
                if best.map_or(true, |(b, _)| d < b) {
                    best = Some((d, ant));
                }
            }
            self.results.push(AntResult { ant, path, outcome });
        }

        if let Some((distance, ant)) = best {
            self.offer_best_path(distance, ant);
        }
        pheromone::evaporate(&mut self.graph, self.config.evaporation);

        self.iteration_best = best.map(|(d, _)| d);
        self.history.push(self.iteration_best);
        let successes = self
            .results
            .iter()
            .filter(|r| r.outcome.is_success())
            .count();
        info!(
            iteration = self.iteration,
            best = ?self.iteration_best,
            successes,
            "iteration complete"
        );

        self.iteration += 1;
        if self.iteration > self.config.iteration_limit {
            info!(limit = self.config.iteration_limit, "iteration limit reached, stopping");
            self.stop();
            self.iteration = 0;
        }

        StepReport {
            ants: self.results.clone(),
            iteration_best: self.iteration_best,
            best_path: self.graph.best_path().to_vec(),
            iteration: self.iteration,
            is_running: self.is_running(),
        }
    }

    fn offer_best_path(&mut self, distance: f64, ant: usize) {
        let current = self.graph.best_path();
        if !current.is_empty() && distance >= self.graph.path_length(current) {
            return;
        }
        if let Some(result) = self.results.get(ant) {
            debug!(distance, path = %format_path(&result.path), "new best path");
            self.graph.set_best_path(result.path.clone());
        }
    }

    /// Walk one ant from `start` to `finish`.
    ///
    /// Visited vertices are taboo. The trip fails when no vertex is
    /// eligible or when the path would exceed `N + 1` vertices. A
    /// successful path has its edges reinforced before returning.
    pub fn ant_trip_from_to(&mut self) -> (Vec<usize>, TripOutcome) {
        let n = self.graph.vertex_count();
        let (start, finish) = (self.config.start, self.config.finish);
        let mut visited = vec![false; n];
        let mut path = vec![start];
        if let Some(v) = visited.get_mut(start) {
            *v = true;
        }

        let mut cur = start;
        while cur != finish {
            if path.len() > n {
                return (path, TripOutcome::DeadEnd(DeadEndReason::StepLimit));
            }
            let Some(next) = self.choose_next(cur, &visited) else {
                return (path, TripOutcome::DeadEnd(DeadEndReason::NoEligibleVertex));
            };
            visited[next] = true;
            path.push(next);
            cur = next;
        }

        let distance = self.graph.path_length(&path);
        pheromone::deposit(&mut self.graph, &path, self.config.ant_deposit, distance);
        (path, TripOutcome::Completed(distance))
    }

    /// Walk one ant through every vertex and back to `start`.
    ///
    /// A successful path has `N + 1` entries and starts and ends at
    /// `start`. Fails when stuck before visiting everything or when there
    /// is no edge back to `start`.
    pub fn ant_trip_salesman(&mut self, start: usize) -> (Vec<usize>, TripOutcome) {
        let n = self.graph.vertex_count();
        if start >= n {
            return (Vec::new(), TripOutcome::DeadEnd(DeadEndReason::NoEligibleVertex));
        }
        let mut visited = vec![false; n];
        visited[start] = true;
        let mut path = Vec::with_capacity(n + 1);
        path.push(start);

        let mut cur = start;
        while path.len() < n {
            let Some(next) = self.choose_next(cur, &visited) else {
                return (path, TripOutcome::DeadEnd(DeadEndReason::NoEligibleVertex));
            };
            visited[next] = true;
            path.push(next);
            cur = next;
        }
        if !self.graph.has_edge(cur, start) {
            return (path, TripOutcome::DeadEnd(DeadEndReason::ClosingEdgeMissing));
        }
        path.push(start);

        let distance = self.graph.path_length(&path);
        pheromone::deposit(&mut self.graph, &path, self.config.ant_deposit, distance);
        (path, TripOutcome::Completed(distance))
    }

    fn choose_next(&mut self, cur: usize, visited: &[bool]) -> Option<usize> {
        let probabilities = rules::probabilities(
            &self.graph,
            cur,
            visited,
            self.config.alpha,
            self.config.beta,
        )?;
        rules::select_next(&probabilities, &mut self.rng)
    }

    /// Iteration-best distances so far, `None` for iterations where no ant
    /// succeeded.
    #[must_use]
    pub fn history(&self) -> &[Option<f64>] {
        &self.history
    }

    /// Shortest iteration-best distance in the history.
    #[must_use]
    pub fn best_distance(&self) -> Option<f64> {
        self.history
            .iter()
            .flatten()
            .copied()
            .min_by(f64::total_cmp)
    }

    /// Best distance of the most recent iteration.
    #[must_use]
    pub const fn iteration_best(&self) -> Option<f64> {
        self.iteration_best
    }

    /// Per-ant results of the most recent iteration.
    #[must_use]
    pub fn last_results(&self) -> &[AntResult] {
        &self.results
    }

    /// Copy of the pheromone matrix.
    #[must_use]
    pub fn pheromone_snapshot(&self) -> Matrix {
        self.graph.pheromone_snapshot()
    }

    /// Best path found so far.
    #[must_use]
    pub fn best_path(&self) -> &[usize] {
        self.graph.best_path()
    }

    /// Iteration counter.
    #[must_use]
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// The bound graph.
    #[must_use]
    pub const fn graph(&self) -> &GraphModel {
        &self.graph
    }

    /// Unbind and return the graph.
    #[must_use]
    pub fn into_graph(self) -> GraphModel {
        self.graph
    }
}
