//! End-to-end colony scenarios.
//!
//! Each test drives the optimizer through its public surface only: build or
//! load a graph, configure, initialize pheromones, step, inspect.

use antcolony::prelude::*;

fn unit_complete(n: usize) -> GraphModel {
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
        .collect();
    GraphModel::from_parts(vec![Point::default(); n], Matrix::from_rows(&rows).unwrap()).unwrap()
}

/// Single ant on a unit-weight K4 from 0 to 3 with no evaporation: every
/// edge of its path gains `budget / edges`, every other edge stays at tau0.
#[test]
fn single_ant_reinforces_only_its_path() {
    for seed in [1, 2, 3, 42] {
        let budget = 9.0;
        let config = ColonyConfig::builder()
            .ant_count(1)
            .tau0(1.0)
            .ant_deposit(budget)
            .evaporation(0.0)
            .exponents(1.0, 1.0)
            .route(0, 3)
            .seed(seed)
            .build();
        let mut colony = ColonyOptimizer::new(unit_complete(4), config).unwrap();
        colony.init_pheromones();
        let report = colony.step(TraversalMode::PointToPoint);

        let path = report.ants[0].path.clone();
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&3));
        let edges = (path.len() - 1) as f64;
        assert_eq!(report.iteration_best, Some(edges));

        let p = colony.pheromone_snapshot();
        for a in 0..4 {
            for b in 0..4 {
                if a == b {
                    continue;
                }
                let on_path = path.windows(2).any(|w| w == [a, b]);
                let expected = if on_path { 1.0 + budget / edges } else { 1.0 };
                assert!(
                    (p[(a, b)] - expected).abs() < 1e-12,
                    "seed {seed}: edge {a}->{b} = {}, expected {expected}",
                    p[(a, b)]
                );
            }
        }
    }
}

/// Forcing the three-edge route gives each edge exactly `1 + budget / 3`.
#[test]
fn three_edge_path_scenario() {
    let graph = GraphModel::from_description(
        r#"{
            Vertices: [ {X: 0, Y: 0}, {X: 1, Y: 0}, {X: 2, Y: 0}, {X: 3, Y: 0} ],
            Edges: [
                {Vertex1: 0, Vertex2: 1, Weight: "1", IsDirected: true},
                {Vertex1: 1, Vertex2: 2, Weight: "1", IsDirected: true},
                {Vertex1: 2, Vertex2: 3, Weight: "1", IsDirected: true},
            ],
        }"#,
    )
    .unwrap();
    let config = ColonyConfig::builder()
        .tau0(1.0)
        .ant_deposit(12.0)
        .evaporation(0.0)
        .route(0, 3)
        .build();
    let mut colony = ColonyOptimizer::new(graph, config).unwrap();
    colony.init_pheromones();
    colony.step(TraversalMode::PointToPoint);

    let p = colony.pheromone_snapshot();
    for i in 0..3 {
        assert!((p[(i, i + 1)] - 5.0).abs() < 1e-12);
    }
    assert_eq!(colony.best_path(), &[0, 1, 2, 3]);
}

#[test]
fn unreachable_finish_terminates_with_dead_end() {
    // Two components: {0, 1, 2} and {3, 4}.
    let graph = GraphModel::from_description(
        r#"{
            vertices: [ {x:0,y:0}, {x:1,y:0}, {x:2,y:0}, {x:5,y:5}, {x:6,y:5} ],
            edges: [
                {vertex1: 0, vertex2: 1, weight: "1"},
                {vertex1: 1, vertex2: 2, weight: "1"},
                {vertex1: 0, vertex2: 2, weight: "3"},
                {vertex1: 3, vertex2: 4, weight: "1"},
            ],
        }"#,
    )
    .unwrap();
    let n = graph.vertex_count();
    let config = ColonyConfig::builder().ant_count(10).route(0, 4).build();
    let mut colony = ColonyOptimizer::new(graph, config).unwrap();
    colony.init_pheromones();

    for _ in 0..3 {
        let report = colony.step(TraversalMode::PointToPoint);
        assert_eq!(report.successes(), 0);
        for ant in &report.ants {
            assert!(ant.path.len() <= n + 1);
            assert!(matches!(ant.outcome, TripOutcome::DeadEnd(_)));
            assert!((ant.distance_or_sentinel() - FAILED_DISTANCE).abs() < f64::EPSILON);
        }
    }
    assert!(colony.best_path().is_empty());
    assert!(colony.history().iter().all(Option::is_none));
    assert!(colony.best_distance().is_none());
}

#[test]
fn cycle_on_complete_graph_is_hamiltonian() {
    let graph = generate_instance(9, 800.0, 600.0, 40.0, 3);
    let n = graph.vertex_count();
    let config = ColonyConfig::builder()
        .ant_count(10)
        .route(4, 0)
        .seed(5)
        .build();
    let mut colony = ColonyOptimizer::new(graph, config).unwrap();
    colony.init_pheromones();

    let report = colony.step(TraversalMode::Cycle);
    assert_eq!(report.successes(), 10);
    for ant in &report.ants {
        let path = &ant.path;
        assert_eq!(path.len(), n + 1);
        assert_eq!(path[0], 4);
        assert_eq!(path[n], 4);
        let mut inner = path[..n].to_vec();
        inner.sort_unstable();
        inner.dedup();
        assert_eq!(inner.len(), n);
        let d = ant.outcome.distance().unwrap();
        assert!((colony.graph().path_length(path) - d).abs() < 1e-9);
    }
    assert!(colony.graph().is_valid_path(colony.best_path()));
}

#[test]
fn best_path_tracks_shortest_iteration_best() {
    let graph = generate_instance(8, 800.0, 600.0, 40.0, 17);
    let config = ColonyConfig::builder()
        .ant_count(5)
        .iteration_limit(30)
        .evaporation(0.2)
        .exponents(1.0, 3.0)
        .seed(17)
        .build();
    let mut colony = ColonyOptimizer::new(graph, config).unwrap();
    colony.init_pheromones();

    for _ in 0..15 {
        colony.step(TraversalMode::Cycle);
    }
    let best = colony.best_distance().unwrap();
    let len = colony.graph().path_length(colony.best_path());
    assert!((best - len).abs() < 1e-9);
    assert!(colony
        .history()
        .iter()
        .flatten()
        .all(|&d| d >= best - 1e-9));
}

#[test]
fn auto_stop_and_reset_cycle() {
    let config = ColonyConfig::builder().iteration_limit(1).build();
    let mut colony = ColonyOptimizer::new(unit_complete(3), config).unwrap();
    colony.init_pheromones();
    assert_eq!(colony.phase(), RunPhase::Idle);

    let first = colony.step(TraversalMode::PointToPoint);
    assert!(first.is_running);
    let second = colony.run_iteration(TraversalMode::PointToPoint);
    assert!(!second.is_running);
    assert_eq!(second.iteration, 0);
    assert_eq!(colony.phase(), RunPhase::Stopped);

    colony.reset();
    assert_eq!(colony.phase(), RunPhase::Idle);
    assert!(colony.history().is_empty());
    assert!(colony.last_results().is_empty());
}

#[test]
fn regenerated_graph_is_independent_copy() {
    let config = ColonyConfig::builder().ant_count(3).build();
    let mut colony = ColonyOptimizer::new(generate_instance(6, 400.0, 300.0, 30.0, 1), config)
        .unwrap();
    colony.init_pheromones();
    let saved = colony.graph().clone();

    colony.step(TraversalMode::Cycle);
    assert_ne!(colony.graph().pheromones(), saved.pheromones());
    assert!(saved.best_path().is_empty());

    colony.rebind(generate_instance(7, 400.0, 300.0, 30.0, 2)).unwrap();
    assert_eq!(colony.graph().vertex_count(), 7);
    assert_eq!(colony.iteration(), 0);
    assert!(!colony.is_running());
}
