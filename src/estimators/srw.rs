use rand::RngCore;

use super::edge_count::normalization;
use super::walk::walks_from_seeds;
use super::TriangleEstimator;
use crate::{CsrGraph, TrialParameters};

/// SRW1: subgraph random walk over consecutive vertex triples.
///
/// A window `(a, b, c)` of the walk is a triangle when `a` and `c` are
/// distinct and adjacent. Its stationary probability is `1 / (E * deg b)`,
/// hence the `deg b` weight.
pub struct Srw1Estimator;

impl TriangleEstimator for Srw1Estimator {
    fn estimate(&self, graph: &CsrGraph, params: &TrialParameters, rng: &mut dyn RngCore) -> f64 {
        let walks = walks_from_seeds(graph, &params.seed_vertices, params.walk_length, rng);

        let mut windows = 0u64;
        let mut weighted_hits = 0u64;
        for walk in &walks {
            let vertices: Vec<_> = walk.vertices().collect();
            for window in vertices.windows(3) {
                let (a, b, c) = (window[0], window[1], window[2]);
                windows += 1;
                if a != c && graph.has_edge(a, c) {
                    weighted_hits += graph.degree(b) as u64;
                }
            }
        }
        if windows == 0 {
            return 0.0;
        }

        normalization(graph, params, &walks) * weighted_hits as f64 / windows as f64 / 6.0
    }
}
