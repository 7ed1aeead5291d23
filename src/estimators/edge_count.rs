use itertools::Itertools;
use std::collections::HashMap;

use super::walk::Walk;
use crate::{CsrGraph, TrialParameters};

/// Minimum distance between two positions of the same walk for the pair to
/// be treated as independent samples.
pub const MIXING_GAP: usize = 32;

/// Estimates the number of adjacency slots from collisions among walk steps.
///
/// In the stationary regime every slot is equally likely, so the expected
/// number of colliding pairs is `pairs / slots`. Pairs are taken across walks
/// and, within a walk, at least `gap` steps apart. Without any collision the
/// number of pairs is returned as a lower bound.
pub fn estimate_edge_slots(walks: &[Walk], gap: usize) -> f64 {
    let gap = std::cmp::max(gap, 1) as u64;
    let lengths = walks.iter().map(|walk| walk.steps.len() as u64).collect_vec();
    let total: u64 = lengths.iter().sum();
    let squares: u64 = lengths.iter().map(|len| len * len).sum();
    let within: u64 = lengths
        .iter()
        .filter(|&&len| len > gap)
        .map(|len| (len - gap) * (len - gap + 1) / 2)
        .sum();
    let pairs = (total * total - squares) / 2 + within;

    let mut positions: HashMap<usize, Vec<(usize, usize)>> = HashMap::new();
    for (w, walk) in walks.iter().enumerate() {
        for (pos, step) in walk.steps.iter().enumerate() {
            positions.entry(step.slot).or_default().push((w, pos));
        }
    }

    let collisions: u64 = positions
        .values()
        .map(|occurrences| count_collisions(occurrences, gap as usize))
        .sum();

    pairs as f64 / std::cmp::max(collisions, 1) as f64
}

/// Colliding pairs among the `(walk, position)` occurrences of one slot.
/// Occurrences are sorted by walk, then position.
fn count_collisions(occurrences: &[(usize, usize)], gap: usize) -> u64 {
    let k = occurrences.len() as u64;
    let mut squares = 0u64;
    let mut within = 0u64;

    let runs = occurrences.iter().group_by(|(walk, _)| *walk);
    for (_, run) in &runs {
        let run = run.map(|(_, pos)| *pos).collect_vec();
        squares += (run.len() * run.len()) as u64;

        let mut lo = 0;
        for j in 0..run.len() {
            while lo < j && run[j] - run[lo] >= gap {
                lo += 1;
            }
            within += lo as u64;
        }
    }

    (k * k - squares) / 2 + within
}

/// Adjacency slot count used to scale estimates.
///
/// The exact count when it is available to the trial, otherwise the
/// collision estimate from the trial's walks.
pub fn normalization(graph: &CsrGraph, params: &TrialParameters, walks: &[Walk]) -> f64 {
    if params.normalization_count_available {
        graph.num_edges() as f64
    } else {
        estimate_edge_slots(walks, MIXING_GAP)
    }
}
