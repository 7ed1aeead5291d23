use rand::{Rng, RngCore};
use std::iter;

use crate::{CsrGraph, NodeId};

/// One traversal of a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkStep {
    pub from: NodeId,
    pub to: NodeId,
    /// Adjacency slot of `from -> to`, see [`CsrGraph::edge_slot`].
    pub slot: usize,
}

/// Simple random walk from a single seed.
#[derive(Debug, Clone)]
pub struct Walk {
    pub start: NodeId,
    pub steps: Vec<WalkStep>,
}

impl Walk {
    /// Visited vertices, starting with the seed.
    pub fn vertices(&self) -> impl Iterator<Item = NodeId> + '_ {
        iter::once(self.start).chain(self.steps.iter().map(|step| step.to))
    }
}

/// Splits `total` steps over `seeds` walks. The first `total % seeds` walks get
/// one extra step.
pub fn walk_budgets(total: u64, seeds: usize) -> Vec<u64> {
    if seeds == 0 {
        return Vec::new();
    }
    let share = total / seeds as u64;
    let remainder = (total % seeds as u64) as usize;
    (0..seeds)
        .map(|i| share + if i < remainder { 1 } else { 0 })
        .collect()
}

/// Walks `steps` steps from `start`. A seed without neighbours, or outside
/// the graph, yields an empty walk.
pub fn random_walk(graph: &CsrGraph, start: NodeId, steps: u64, rng: &mut dyn RngCore) -> Walk {
    let mut walk = Walk {
        start,
        steps: Vec::new(),
    };
    if start as usize >= graph.num_vertices() || graph.degree(start) == 0 {
        return walk;
    }

    walk.steps.reserve(steps as usize);
    let mut current = start;
    for _ in 0..steps {
        let index = rng.gen_range(0..graph.degree(current));
        let next = graph.neighbors(current)[index];
        walk.steps.push(WalkStep {
            from: current,
            to: next,
            slot: graph.edge_slot(current, index),
        });
        current = next;
    }
    walk
}

/// One walk per seed vertex, sharing a budget of `total_steps` steps.
pub fn walks_from_seeds(
    graph: &CsrGraph,
    seeds: &[NodeId],
    total_steps: u64,
    rng: &mut dyn RngCore,
) -> Vec<Walk> {
    seeds
        .iter()
        .zip(walk_budgets(total_steps, seeds.len()))
        .map(|(&seed, steps)| random_walk(graph, seed, steps, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_walk_budgets() {
        assert_eq!(walk_budgets(10, 3), vec![4, 3, 3]);
        assert_eq!(walk_budgets(2, 4), vec![1, 1, 0, 0]);
        assert!(walk_budgets(10, 0).is_empty());
    }

    #[test]
    fn test_walk_follows_edges() {
        let graph = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let walk = random_walk(&graph, 2, 100, &mut rng);

        assert_eq!(walk.steps.len(), 100);
        assert_eq!(walk.steps[0].from, 2);
        for pair in walk.steps.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        for step in &walk.steps {
            assert!(graph.has_edge(step.from, step.to));
            assert_eq!(graph.slot_endpoints(step.slot), (step.from, step.to));
        }
        assert_eq!(walk.vertices().count(), 101);
    }

    #[test]
    fn test_isolated_seed_walks_nowhere() {
        let graph = CsrGraph::from_edges(3, &[(0, 1)]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let walks = walks_from_seeds(&graph, &[2, 0], 10, &mut rng);
        assert!(walks[0].steps.is_empty());
        assert_eq!(walks[1].steps.len(), 5);
    }
}
