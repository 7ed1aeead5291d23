use rand::{Rng, RngCore};

use super::edge_count::normalization;
use super::walk::walks_from_seeds;
use super::TriangleEstimator;
use crate::{CsrGraph, TrialParameters};

/// Vertex Markov chain: at every visited vertex, test whether two random
/// neighbours are adjacent.
///
/// A vertex `v` is visited with probability `d / E` and closes a wedge with
/// probability `t(v) / C(d, 2)`, so weighting hits by `(d - 1) * E / 2`
/// recovers `3T`.
pub struct VertexMcmcEstimator;

impl TriangleEstimator for VertexMcmcEstimator {
    fn estimate(&self, graph: &CsrGraph, params: &TrialParameters, rng: &mut dyn RngCore) -> f64 {
        let walks = walks_from_seeds(graph, &params.seed_vertices, params.walk_length, rng);

        let mut visited = 0u64;
        let mut weighted_hits = 0.0;
        for step in walks.iter().flat_map(|walk| walk.steps.iter()) {
            visited += 1;
            let neighbors = graph.neighbors(step.to);
            let d = neighbors.len();
            if d < 2 {
                continue;
            }
            let i = rng.gen_range(0..d);
            let mut j = rng.gen_range(0..d - 1);
            if j >= i {
                j += 1;
            }
            if graph.has_edge(neighbors[i], neighbors[j]) {
                weighted_hits += (d - 1) as f64;
            }
        }
        if visited == 0 {
            return 0.0;
        }

        let edge_slots = normalization(graph, params, &walks);
        weighted_hits / visited as f64 * edge_slots / 2.0 / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::tests::{complete_graph, params_for};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_exact_on_complete_graph() {
        // Every wedge of a complete graph is closed.
        let graph = complete_graph(10);
        let params = params_for(&graph, 0.5, 1.0, &[0, 9]);
        let mut rng = StdRng::seed_from_u64(4);
        let estimate = VertexMcmcEstimator.estimate(&graph, &params, &mut rng);
        assert!((estimate - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_star_has_no_triangles() {
        let edges: Vec<_> = (1..20).map(|v| (0, v)).collect();
        let graph = CsrGraph::from_edges(20, &edges).unwrap();
        let params = params_for(&graph, 5.0, 1.0, &[0]);
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(VertexMcmcEstimator.estimate(&graph, &params, &mut rng), 0.0);
    }
}
