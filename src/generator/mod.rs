//! Synthetic instance generation for cycle mode.
//!
//! Places points in a `width × height` area and joins every pair with an
//! edge weighted by their Euclidean distance.
//!
//! Three placements are available:
//!
//! - [`Placement::Separated`]: rejection sampling against a [`QuadTree`];
//!   every accepted pair is at least `min_separation` apart
//! - [`Placement::Uniform`]: independent uniform draws
//! - [`Placement::Grid`]: a `k × m` grid with each node jittered inside its cell
//!
//! The rejection sampler gives up after `max_attempts` consecutive rejected
//! draws and returns what it has, so callers must accept fewer vertices
//! than requested.

pub mod quadtree;

use tracing::{info, warn};

use crate::config::{GeneratorConfig, Placement};
use crate::engine::rng::SimRng;
use crate::graph::{GraphModel, Point};
pub use quadtree::{QuadTree, Rect};

/// Divisor of the smaller grid step giving the jitter radius.
const GRID_JITTER_DIVISOR: f64 = 2.2;

/// Consecutive rejections tolerated by [`generate_instance`].
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Seeded point placer.
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    rng: SimRng,
}

impl InstanceGenerator {
    /// Generator with its own random source seeded from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SimRng::new(seed),
        }
    }

    /// Generator drawing from an existing random source.
    #[must_use]
    pub const fn from_rng(rng: SimRng) -> Self {
        Self { rng }
    }

    /// Up to `n` points, each pair at least `min_separation` apart.
    ///
    /// Each candidate is checked only against the points the quad-tree
    /// returns for the square of half-side `min_separation` around it. The
    /// failure counter resets whenever a point is accepted.
    pub fn sample_separated(
        &mut self,
        n: usize,
        width: f64,
        height: f64,
        min_separation: f64,
        max_attempts: usize,
    ) -> Vec<Point> {
        let mut tree = QuadTree::new(Rect::new(0.0, 0.0, width, height));
        let mut points = Vec::with_capacity(n);
        let mut failures = 0;

        while points.len() < n && failures < max_attempts {
            let candidate = Point::new(
                self.rng.gen_range_f64(0.0, width),
                self.rng.gen_range_f64(0.0, height),
            );
            let nearby = tree.query(&Rect::around(candidate.x, candidate.y, min_separation));
            if nearby
                .iter()
                .any(|p| p.distance_to(&candidate) < min_separation)
            {
                failures += 1;
                continue;
            }
            tree.insert(candidate);
            points.push(candidate);
            failures = 0;
        }

        if points.len() < n {
            warn!(
                requested = n,
                placed = points.len(),
                min_separation,
                "attempt budget exhausted, returning partial instance"
            );
        }
        points
    }

    /// `n` independent uniform points.
    pub fn sample_uniform(&mut self, n: usize, width: f64, height: f64) -> Vec<Point> {
        (0..n)
            .map(|_| {
                Point::new(
                    self.rng.gen_range_f64(0.0, width),
                    self.rng.gen_range_f64(0.0, height),
                )
            })
            .collect()
    }

    /// `n` points on a jittered grid.
    ///
    /// Columns `k` and rows `m` follow the area's aspect ratio with
    /// `k · m ≥ n`. Nodes are laid out row by row and each is moved by up
    /// to `min(dx, dy) / 2.2` in a random direction, then clamped to the
    /// area.
    pub fn sample_grid(&mut self, n: usize, width: f64, height: f64) -> Vec<Point> {
        if n == 0 {
            return Vec::new();
        }
        let (cols, rows) = grid_shape(n, width / height);
        let dx = width / (cols - 1) as f64;
        let dy = if rows > 1 {
            height / (rows - 1) as f64
        } else {
            height
        };
        let radius = dx.min(dy) / GRID_JITTER_DIVISOR;

        (0..n)
            .map(|i| {
                let (row, col) = (i / cols, i % cols);
                let angle = self.rng.gen_range_f64(0.0, std::f64::consts::TAU);
                let r = self.rng.gen_range_f64(0.0, radius);
                let x = (col as f64).mul_add(dx, r * angle.sin());
                let y = (row as f64).mul_add(dy, r * angle.cos());
                Point::new(x.clamp(0.0, width), y.clamp(0.0, height))
            })
            .collect()
    }

    /// Up to `n` points placed as `config.placement` says.
    pub fn points(&mut self, n: usize, config: &GeneratorConfig) -> Vec<Point> {
        match config.placement {
            Placement::Separated => self.sample_separated(
                n,
                config.width,
                config.height,
                config.min_separation,
                config.max_attempts,
            ),
            Placement::Uniform => self.sample_uniform(n, config.width, config.height),
            Placement::Grid => self.sample_grid(n, config.width, config.height),
        }
    }

    /// Complete Euclidean graph over up to `n` placed points.
    ///
    /// The returned graph is a fresh value; pheromones are zero until
    /// initialized.
    pub fn generate(&mut self, n: usize, config: &GeneratorConfig) -> GraphModel {
        let points = self.points(n, config);
        let graph = GraphModel::complete(points);
        info!(
            requested = n,
            vertices = graph.vertex_count(),
            placement = ?config.placement,
            "instance generated"
        );
        graph
    }
}

/// Columns and rows for `n` grid nodes in an area of the given aspect ratio.
fn grid_shape(n: usize, ratio: f64) -> (usize, usize) {
    let mut cols = ((n as f64 * ratio).sqrt().floor() as usize).max(1);
    let mut rows = n.div_ceil(cols);
    while cols * rows < n {
        cols += 1;
        rows = n.div_ceil(cols);
    }
    (cols.max(2), rows)
}

/// Complete graph over up to `n` points in `width × height`, pairwise at
/// least `min_separation` apart, using a generator seeded from `seed`.
#[must_use]
pub fn generate_instance(
    n: usize,
    width: f64,
    height: f64,
    min_separation: f64,
    seed: u64,
) -> GraphModel {
    let config = GeneratorConfig {
        width,
        height,
        min_separation,
        max_attempts: DEFAULT_MAX_ATTEMPTS,
        placement: Placement::Separated,
    };
    InstanceGenerator::new(seed).generate(n, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn min_pairwise(points: &[Point]) -> f64 {
        let mut min = f64::INFINITY;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                min = min.min(a.distance_to(b));
            }
        }
        min
    }

    fn in_area(points: &[Point], width: f64, height: f64) -> bool {
        points
            .iter()
            .all(|p| (0.0..=width).contains(&p.x) && (0.0..=height).contains(&p.y))
    }

    #[test]
    fn test_separated_respects_distance() {
        let mut g = InstanceGenerator::new(7);
        let pts = g.sample_separated(30, 800.0, 600.0, 50.0, 1000);
        assert_eq!(pts.len(), 30);
        assert!(min_pairwise(&pts) >= 50.0);
        assert!(in_area(&pts, 800.0, 600.0));
    }

    #[test]
    fn test_separated_returns_partial_when_crowded() {
        let mut g = InstanceGenerator::new(7);
        // At most a handful of points fit 60 apart in a 100 × 100 box.
        let pts = g.sample_separated(50, 100.0, 100.0, 60.0, 200);
        assert!(!pts.is_empty());
        assert!(pts.len() < 50);
        assert!(min_pairwise(&pts) >= 60.0);
    }

    #[test]
    fn test_separated_zero_requested() {
        let mut g = InstanceGenerator::new(1);
        assert!(g.sample_separated(0, 10.0, 10.0, 1.0, 10).is_empty());
    }

    #[test]
    fn test_uniform_count_and_area() {
        let mut g = InstanceGenerator::new(3);
        let pts = g.sample_uniform(100, 50.0, 20.0);
        assert_eq!(pts.len(), 100);
        assert!(in_area(&pts, 50.0, 20.0));
    }

    #[test]
    fn test_grid_count_and_area() {
        let mut g = InstanceGenerator::new(3);
        for n in [1, 2, 5, 10, 17, 40] {
            let pts = g.sample_grid(n, 800.0, 600.0);
            assert_eq!(pts.len(), n);
            assert!(in_area(&pts, 800.0, 600.0));
        }
    }

    #[test]
    fn test_grid_shape_covers_n() {
        for n in 1..60 {
            let (cols, rows) = grid_shape(n, 4.0 / 3.0);
            assert!(cols * rows >= n, "n={n} cols={cols} rows={rows}");
            assert!(cols >= 2);
        }
    }

    #[test]
    fn test_grid_nodes_distinct() {
        let mut g = InstanceGenerator::new(11);
        let pts = g.sample_grid(12, 800.0, 600.0);
        assert!(min_pairwise(&pts) > 0.0);
    }

    #[test]
    fn test_same_seed_same_points() {
        let config = GeneratorConfig::default();
        let a = InstanceGenerator::new(99).points(10, &config);
        let b = InstanceGenerator::new(99).points(10, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_is_complete_graph() {
        let graph = generate_instance(6, 800.0, 600.0, 50.0, 5);
        let n = graph.vertex_count();
        assert_eq!(n, 6);
        assert_eq!(graph.edge_count(), n * (n - 1));
        for i in 0..n {
            for j in 0..n {
                let expected = graph.distance(i, j).unwrap();
                assert!((graph.weight(i, j) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_generate_follows_placement() {
        let config = GeneratorConfig {
            placement: Placement::Grid,
            ..GeneratorConfig::default()
        };
        let graph = InstanceGenerator::new(2).generate(9, &config);
        assert_eq!(graph.vertex_count(), 9);
    }
}
