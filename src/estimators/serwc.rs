use rand::RngCore;

use super::edge_count::normalization;
use super::walk::walks_from_seeds;
use super::TriangleEstimator;
use crate::{CsrGraph, TrialParameters};

/// Random walk over edges, counting the triangles on every visited edge.
///
/// Visited edges are uniform in the stationary regime and every triangle sits
/// on six directed edges, so `E * mean(t(e)) / 6` is unbiased.
pub struct SerwcEstimator;

impl TriangleEstimator for SerwcEstimator {
    fn estimate(&self, graph: &CsrGraph, params: &TrialParameters, rng: &mut dyn RngCore) -> f64 {
        let walks = walks_from_seeds(graph, &params.seed_vertices, params.walk_length, rng);
        let (visited, incident) = walks
            .iter()
            .flat_map(|walk| walk.steps.iter())
            .fold((0u64, 0u64), |(visited, incident), step| {
                (
                    visited + 1,
                    incident + graph.common_neighbors(step.from, step.to) as u64,
                )
            });
        if visited == 0 {
            return 0.0;
        }
        normalization(graph, params, &walks) * incident as f64 / visited as f64 / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::edge_count::{estimate_edge_slots, MIXING_GAP};
    use crate::estimators::tests::{complete_graph, params_for, relative_error};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_exact_on_complete_graph() {
        // Every edge of K_10 sits on 8 triangles.
        let graph = complete_graph(10);
        let params = params_for(&graph, 0.5, 1.0, &[3]);
        let mut rng = StdRng::seed_from_u64(2);
        let estimate = SerwcEstimator.estimate(&graph, &params, &mut rng);
        assert!((estimate - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_withheld_edge_count_is_estimated_from_walk() {
        let graph = complete_graph(10);
        let mut params = params_for(&graph, 200.0, 1.0, &[3]);
        params.normalization_count_available = false;

        let estimate = SerwcEstimator.estimate(&graph, &params, &mut StdRng::seed_from_u64(6));

        // Replays the same walk, the kernel draws nothing else.
        let walks = walks_from_seeds(
            &graph,
            &params.seed_vertices,
            params.walk_length,
            &mut StdRng::seed_from_u64(6),
        );
        let edge_slots = estimate_edge_slots(&walks, MIXING_GAP);
        assert!((estimate - edge_slots * 8.0 / 6.0).abs() < 1e-9);
        assert!(relative_error(estimate, 120) < 0.1, "{}", estimate);
    }

    #[test]
    fn test_no_seeds_gives_zero() {
        let graph = complete_graph(5);
        let params = params_for(&graph, 1.0, 1.0, &[]);
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(SerwcEstimator.estimate(&graph, &params, &mut rng), 0.0);
    }
}
