//! Transition rule: selection weights and roulette draw.
//!
//! ```text
//! score(i)  = τ[cur][i]^α · (1 / w[cur][i])^β    for unvisited i with w[cur][i] > 0
//! p(i)      = score(i) / Σ score
//! ```

use tracing::trace;

use crate::engine::rng::SimRng;
use crate::graph::GraphModel;

/// Selection probabilities for every vertex id from `cur`.
///
/// Vertices without an edge from `cur`, and vertices marked in `visited`,
/// get probability zero. Returns `None` when no vertex has a positive finite
/// score, so the distribution is never built from a zero or non-finite sum.
#[must_use]
pub fn probabilities(
    graph: &GraphModel,
    cur: usize,
    visited: &[bool],
    alpha: f64,
    beta: f64,
) -> Option<Vec<f64>> {
    let n = graph.vertex_count();
    let pheromones = graph.pheromones();
    let mut scores = vec![0.0; n];
    let mut sum = 0.0;

    for (i, score) in scores.iter_mut().enumerate() {
        let weight = graph.weight(cur, i);
        if weight <= 0.0 || visited.get(i).copied().unwrap_or(false) {
            continue;
        }
        let visibility = 1.0 / weight;
        *score = pheromones.get(cur, i).powf(alpha) * visibility.powf(beta);
        sum += *score;
    }

    if !(sum > 0.0 && sum.is_finite()) {
        trace!(cur, sum, "no eligible next vertex");
        return None;
    }

    for score in &mut scores {
        *score /= sum;
    }
    trace!(cur, probabilities = ?scores, "transition probabilities");
    Some(scores)
}

/// Roulette draw over `probabilities`.
///
/// Draws one uniform value `r` in `[0, 1)` and returns the first id whose
/// cumulative probability reaches `r`. Zero-probability ids are never
/// returned. If rounding leaves the total just short of `r`, the last id
/// with positive probability is returned. `None` only when every entry is
/// zero.
pub fn select_next(probabilities: &[f64], rng: &mut SimRng) -> Option<usize> {
    let draw = rng.gen_f64();
    let mut cumulative = 0.0;
    let mut last_eligible = None;

    for (i, &p) in probabilities.iter().enumerate() {
        if p <= 0.0 {
            continue;
        }
        cumulative += p;
        last_eligible = Some(i);
        if draw <= cumulative {
            return Some(i);
        }
    }
    last_eligible
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_select_in_range(
            weights in proptest::collection::vec(0.0f64..10.0, 1..30),
            seed in 0u64..u64::MAX,
        ) {
            let total: f64 = weights.iter().sum();
            prop_assume!(total > 0.0);
            let probs: Vec<f64> = weights.iter().map(|w| w / total).collect();
            let mut rng = SimRng::new(seed);
            for _ in 0..20 {
                let pick = select_next(&probs, &mut rng);
                prop_assert!(pick.is_some());
                let i = pick.unwrap_or(usize::MAX);
                prop_assert!(i < probs.len());
                prop_assert!(probs[i] > 0.0);
            }
        }
    }
}
