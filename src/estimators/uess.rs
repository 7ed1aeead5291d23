use itertools::Itertools;
use rand::{Rng, RngCore};
use std::collections::{HashMap, HashSet};

use super::TriangleEstimator;
use crate::{CsrGraph, NodeId, TrialParameters};

/// Uniform edge sampling: draw `walk_length` adjacency slots uniformly, count
/// the triangles among the distinct sampled edges and scale by the inverse
/// probability that all three edges of a triangle were drawn.
///
/// Slots are drawn from the stored graph, so the estimator always uses the
/// exact edge count.
pub struct UessEstimator;

impl TriangleEstimator for UessEstimator {
    fn estimate(&self, graph: &CsrGraph, params: &TrialParameters, rng: &mut dyn RngCore) -> f64 {
        let slots = graph.num_edges();
        if slots == 0 || params.walk_length == 0 {
            return 0.0;
        }

        let mut sampled = HashSet::new();
        for _ in 0..params.walk_length {
            let (u, v) = graph.slot_endpoints(rng.gen_range(0..slots as usize));
            sampled.insert((std::cmp::min(u, v), std::cmp::max(u, v)));
        }

        let triangles = count_triangles(&sampled);
        let kept = inclusion_probability(slots, params.walk_length);
        triangles as f64 / kept.powi(3)
    }
}

/// Probability that a given undirected edge is among `draws` uniform slot draws.
fn inclusion_probability(slots: u64, draws: u64) -> f64 {
    let miss = 1.0 - 2.0 / slots as f64;
    1.0 - miss.powf(draws as f64)
}

/// Triangles of the graph formed by `edges`, each stored as `(low, high)`.
fn count_triangles(edges: &HashSet<(NodeId, NodeId)>) -> u64 {
    let mut higher: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for &(u, v) in edges {
        higher.entry(u).or_default().push(v);
    }
    higher.values_mut().for_each(|neighbors| neighbors.sort_unstable());

    let empty = Vec::new();
    edges
        .iter()
        .map(|(u, v)| {
            let a = &higher[u];
            let b = higher.get(v).unwrap_or(&empty);
            a.iter()
                .merge_join_by(b.iter(), |x, y| x.cmp(y))
                .filter(|pair| pair.is_both())
                .count() as u64
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::tests::{complete_graph, params_for};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_count_triangles_of_sample() {
        let edges: HashSet<_> = [(0, 1), (1, 2), (0, 2), (2, 3), (1, 3), (3, 4)]
            .into_iter()
            .collect();
        assert_eq!(count_triangles(&edges), 2);
    }

    #[test]
    fn test_inclusion_probability() {
        assert_eq!(inclusion_probability(2, 1), 1.0);
        assert!((inclusion_probability(100, 1) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_saturated_sample_is_exact() {
        let graph = complete_graph(10);
        let params = params_for(&graph, 1000.0, 1.0, &[]);
        let mut rng = StdRng::seed_from_u64(9);
        let estimate = UessEstimator.estimate(&graph, &params, &mut rng);
        assert!((estimate - 120.0).abs() < 1e-6, "{}", estimate);
    }
}
