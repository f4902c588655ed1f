//! Graph model: topology, pheromone field, and best known path.
//!
//! Topology (vertex coordinates plus the weighted edge matrix) is replaced
//! wholesale by a load or by instance generation and is otherwise fixed for
//! the run. The pheromone matrix is the mutable part the colony works on.
//!
//! # Invariants
//!
//! - `edges` and `pheromones` are both `n × n` with `n = vertices.len()`
//! - `pheromones[i][j] > 0` only where `edges[i][j] > 0`
//! - `best_path`, when non-empty, only steps along existing edges
//!
//! `Clone` is a deep copy: a saved graph never observes later mutation of
//! the running one.

pub mod loader;
pub mod matrix;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{ColonyError, ColonyResult};
pub use loader::{parse_description, GraphDescription, ParsedGraph, DEFAULT_WEIGHT};
pub use matrix::Matrix;

/// A 2D vertex position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point at `(x, y)`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Weighted graph with a pheromone field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
    vertices: Vec<Point>,
    edges: Matrix,
    pheromones: Matrix,
    best_path: Vec<usize>,
}

impl GraphModel {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from vertices and an edge matrix.
    ///
    /// # Errors
    ///
    /// Returns `MalformedGraph` if the matrix side differs from the vertex
    /// count or any weight is negative or not finite.
    pub fn from_parts(vertices: Vec<Point>, edges: Matrix) -> ColonyResult<Self> {
        if edges.dim() != vertices.len() {
            return Err(ColonyError::malformed(format!(
                "edge matrix is {0}x{0} but there are {1} vertices",
                edges.dim(),
                vertices.len()
            )));
        }
        if let Some(bad) = edges.as_slice().iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ColonyError::malformed(format!("edge weight {bad} is invalid")));
        }
        let n = vertices.len();
        Ok(Self {
            vertices,
            edges,
            pheromones: Matrix::zeros(n),
            best_path: Vec::new(),
        })
    }

    /// Build a complete graph whose weights are Euclidean distances.
    #[must_use]
    pub fn complete(vertices: Vec<Point>) -> Self {
        let n = vertices.len();
        let mut edges = Matrix::zeros(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = vertices[i].distance_to(&vertices[j]);
                edges[(i, j)] = d;
                edges[(j, i)] = d;
            }
        }
        Self {
            vertices,
            edges,
            pheromones: Matrix::zeros(n),
            best_path: Vec::new(),
        }
    }

    /// Parse a graph description into a new graph.
    ///
    /// # Errors
    ///
    /// Any load error from [`parse_description`].
    pub fn from_description(text: &str) -> ColonyResult<Self> {
        let mut graph = Self::new();
        graph.load_str(text)?;
        Ok(graph)
    }

    /// Replace the topology with the one described in `text`.
    ///
    /// On success the pheromone field is reset to zeros of the new size and
    /// the best path is cleared; call [`Self::init_pheromones`] before
    /// running ants. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Any load error from [`parse_description`].
    pub fn load_str(&mut self, text: &str) -> ColonyResult<()> {
        let ParsedGraph { vertices, edges } = parse_description(text)?;
        let n = vertices.len();
        self.vertices = vertices;
        self.edges = edges;
        self.pheromones = Matrix::zeros(n);
        self.best_path.clear();
        info!(
            vertices = n,
            edges = self.edge_count(),
            "graph loaded"
        );
        Ok(())
    }

    /// Replace the topology with the one in the file at `path`.
    ///
    /// # Errors
    ///
    /// - `GraphNotFound` if the file does not exist
    /// - `Io` if it cannot be read
    /// - any load error from [`parse_description`]
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> ColonyResult<()> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "graph file not found");
            return Err(ColonyError::GraphNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        self.load_str(&text).map_err(|e| {
            warn!(path = %path.display(), error = %e, "graph file rejected");
            e
        })
    }

    /// Set every existing edge to `tau0` and every non-edge to zero.
    ///
    /// No-op on a graph without vertices.
    pub fn init_pheromones(&mut self, tau0: f64) {
        let n = self.vertices.len();
        if n == 0 {
            return;
        }
        let mut pheromones = Matrix::zeros(n);
        for (cell, &weight) in pheromones
            .as_mut_slice()
            .iter_mut()
            .zip(self.edges.as_slice())
        {
            if weight != 0.0 {
                *cell = tau0;
            }
        }
        self.pheromones = pheromones;
    }

    /// Euclidean distance between vertices `a` and `b`.
    ///
    /// Returns `None` if either id is out of range. This is geometry only;
    /// routing cost comes from [`Self::weight`].
    #[must_use]
    pub fn distance(&self, a: usize, b: usize) -> Option<f64> {
        Some(self.vertices.get(a)?.distance_to(self.vertices.get(b)?))
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges with non-zero weight.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.count_nonzero()
    }

    /// Vertex coordinates in id order.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Edge weight matrix.
    #[must_use]
    pub const fn edges(&self) -> &Matrix {
        &self.edges
    }

    /// Weight of edge `a -> b`, `0.0` if absent.
    #[must_use]
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        self.edges.get(a, b)
    }

    /// True if `a -> b` exists.
    #[must_use]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.weight(a, b) > 0.0
    }

    /// Pheromone matrix.
    #[must_use]
    pub const fn pheromones(&self) -> &Matrix {
        &self.pheromones
    }

    /// Pheromone matrix, mutable. Only the colony's update rules write here.
    pub(crate) fn pheromones_mut(&mut self) -> &mut Matrix {
        &mut self.pheromones
    }

    /// Copy of the pheromone matrix for visualization.
    #[must_use]
    pub fn pheromone_snapshot(&self) -> Matrix {
        self.pheromones.clone()
    }

    /// Best path found so far, empty if none.
    #[must_use]
    pub fn best_path(&self) -> &[usize] {
        &self.best_path
    }

    /// Replace the best path.
    pub(crate) fn set_best_path(&mut self, path: Vec<usize>) {
        self.best_path = path;
    }

    /// Forget the best path.
    pub fn clear_best_path(&mut self) {
        self.best_path.clear();
    }

    /// True if every consecutive pair of `path` is an existing edge.
    #[must_use]
    pub fn is_valid_path(&self, path: &[usize]) -> bool {
        let n = self.vertex_count();
        path.iter().all(|&v| v < n) && path.windows(2).all(|w| self.has_edge(w[0], w[1]))
    }

    /// Sum of edge weights along `path`.
    #[must_use]
    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.weight(w[0], w[1])).sum()
    }
}
