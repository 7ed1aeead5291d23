//! TETRIS: random walk, then importance-weighted edge subsampling.
//!
//! The walk collects edges `R`. Each subsample picks an edge `e` of `R` with
//! probability proportional to `d_e = min(deg u, deg v)`, picks a random
//! neighbour of the lower-degree endpoint and checks whether it closes a
//! triangle for which `e` is the designated edge. Each triangle has exactly
//! one designated edge, the one with the smallest `(d_e, endpoints)` key.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, RngCore};

use super::edge_count::normalization;
use super::walk::{walks_from_seeds, WalkStep};
use super::TriangleEstimator;
use crate::{CsrGraph, NodeId, TrialParameters};

pub struct TetrisEstimator;

impl TriangleEstimator for TetrisEstimator {
    fn estimate(&self, graph: &CsrGraph, params: &TrialParameters, rng: &mut dyn RngCore) -> f64 {
        let walks = walks_from_seeds(graph, &params.seed_vertices, params.walk_length, rng);
        let steps: Vec<WalkStep> = walks
            .iter()
            .flat_map(|walk| walk.steps.iter().copied())
            .collect();
        if steps.is_empty() || params.subsample_size == 0 {
            return 0.0;
        }

        let weights: Vec<u64> = steps
            .iter()
            .map(|step| edge_key(graph, step.from, step.to).0 as u64)
            .collect();
        let total_weight: u64 = weights.iter().sum();
        let dist = match WeightedIndex::new(&weights) {
            Ok(dist) => dist,
            Err(_) => return 0.0,
        };

        let mut hits = 0u64;
        for _ in 0..params.subsample_size {
            let step = steps[dist.sample(rng)];
            let (low, high) = order_by_degree(graph, step.from, step.to);
            let neighbors = graph.neighbors(low);
            let w = neighbors[rng.gen_range(0..neighbors.len())];
            if w != high && graph.has_edge(w, high) && is_designated(graph, low, high, w) {
                hits += 1;
            }
        }

        let edges = normalization(graph, params, &walks) / 2.0;
        edges / steps.len() as f64 * total_weight as f64 * hits as f64
            / params.subsample_size as f64
    }
}

/// Ordering key of an undirected edge: `(d_e, smaller id, larger id)`.
fn edge_key(graph: &CsrGraph, u: NodeId, v: NodeId) -> (usize, NodeId, NodeId) {
    let d = std::cmp::min(graph.degree(u), graph.degree(v));
    (d, std::cmp::min(u, v), std::cmp::max(u, v))
}

/// Endpoints ordered by `(degree, id)`, lower one first.
fn order_by_degree(graph: &CsrGraph, u: NodeId, v: NodeId) -> (NodeId, NodeId) {
    if (graph.degree(u), u) <= (graph.degree(v), v) {
        (u, v)
    } else {
        (v, u)
    }
}

/// Whether `{u, v}` is the designated edge of triangle `{u, v, w}`.
fn is_designated(graph: &CsrGraph, u: NodeId, v: NodeId, w: NodeId) -> bool {
    let key = edge_key(graph, u, v);
    key < edge_key(graph, u, w) && key < edge_key(graph, v, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::tests::{complete_graph, params_for, relative_error};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_one_designated_edge_per_triangle() {
        let graph = CsrGraph::from_edges(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)])
            .unwrap();
        for (u, v, w) in [(0, 1, 2), (2, 3, 4)] {
            let designated = [(u, v, w), (u, w, v), (v, w, u)]
                .iter()
                .filter(|(a, b, c)| is_designated(&graph, *a, *b, *c))
                .count();
            assert_eq!(designated, 1);
        }
    }

    #[test]
    fn test_estimate_on_complete_graph() {
        let graph = complete_graph(10);
        let params = params_for(&graph, 20.0, 5.0, &[0]);
        let mut rng = StdRng::seed_from_u64(17);
        let estimate = TetrisEstimator.estimate(&graph, &params, &mut rng);
        assert!(relative_error(estimate, 120) < 0.1, "{}", estimate);
    }

    #[test]
    fn test_triangle_free_graph() {
        let graph = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let params = params_for(&graph, 10.0, 1.0, &[0, 2]);
        let mut rng = StdRng::seed_from_u64(17);
        assert_eq!(TetrisEstimator.estimate(&graph, &params, &mut rng), 0.0);
    }
}
