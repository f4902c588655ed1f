//! Pheromone update rules.

use crate::graph::GraphModel;

/// Add `budget / distance` to every directed edge along `path`.
///
/// Every edge gets the same bonus regardless of its own length, so the
/// total laid down scales with the quality of the whole path. Does nothing
/// for a non-positive or non-finite distance.
pub fn deposit(graph: &mut GraphModel, path: &[usize], budget: f64, distance: f64) {
    if !(distance > 0.0 && distance.is_finite()) {
        return;
    }
    let amount = budget / distance;
    let pheromones = graph.pheromones_mut();
    let n = pheromones.dim();
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a < n && b < n {
            pheromones[(a, b)] += amount;
        }
    }
}

/// Multiply every cell by `1 - rate`.
///
/// `rate` is clamped to `[0, 1]`, so cells never turn negative.
pub fn evaporate(graph: &mut GraphModel, rate: f64) {
    let keep = 1.0 - rate.clamp(0.0, 1.0);
    graph.pheromones_mut().scale(keep);
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::graph::Point;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_pheromones_stay_non_negative(
            rate in 0.0f64..=1.0,
            rounds in 1usize..40,
            tau0 in 0.0f64..100.0,
            budget in 0.0f64..50.0,
        ) {
            let mut g = GraphModel::complete(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
            ]);
            g.init_pheromones(tau0);
            for round in 0..rounds {
                if round % 2 == 0 {
                    let d = g.path_length(&[0, 1, 2]);
                    deposit(&mut g, &[0, 1, 2], budget, d);
                }
                evaporate(&mut g, rate);
                prop_assert!(g.pheromones().as_slice().iter().all(|&c| c >= 0.0));
            }
        }
    }
}
