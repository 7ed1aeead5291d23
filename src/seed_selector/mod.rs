//! Selection of the vertices a trial's random walks start from.
//!
//! Two disciplines exist. Uniform seeding draws ids from the whole vertex
//! range. Degree-stratified seeding groups vertices into logarithmic degree
//! buckets and draws from every non-empty bucket, so rare high-degree
//! vertices are represented.

use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::RngCore;

use crate::{CsrGraph, NodeId};

/// Seeds drawn from every non-empty degree bucket.
pub const SEEDS_PER_BUCKET: usize = 5;

/// Seeds of a bucket that are dispatched as trials. The last sampled seed of
/// each bucket is kept but never dispatched.
pub const DISPATCHED_SEEDS_PER_BUCKET: usize = 4;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SeedError {
    #[error("cannot select seed vertices from a graph without vertices")]
    EmptyGraph,
}

/// Draws `seed_count` ids uniformly from `[0, V)`, with replacement.
pub fn select_uniform_seeds(
    graph: &CsrGraph,
    seed_count: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<NodeId>, SeedError> {
    let num_vertices = graph.num_vertices();
    if num_vertices == 0 {
        return Err(SeedError::EmptyGraph);
    }
    let dist = Uniform::new(0, num_vertices);
    Ok((0..seed_count)
        .map(|_| dist.sample(rng) as NodeId)
        .collect())
}

/// Number of logarithmic degree buckets of a graph, `floor(log10(V))`.
pub fn num_buckets(num_vertices: usize) -> usize {
    match num_vertices {
        0 => 0,
        n => n.ilog10() as usize,
    }
}

/// Bucket of a vertex with positive `degree`, clipped to the last bucket.
///
/// # Panics
///
/// Panics if `degree` is zero.
pub fn bucket_of(degree: usize, num_buckets: usize) -> usize {
    std::cmp::min(degree.ilog10() as usize, num_buckets.saturating_sub(1))
}

/// Vertices grouped by `floor(log10(degree))`. Isolated vertices are left out.
///
/// The table can reference every non-isolated vertex of the graph, so it is
/// consumed by [`DegreeBinTable::sample`].
#[derive(Debug)]
pub struct DegreeBinTable {
    bins: Vec<Vec<NodeId>>,
}

impl DegreeBinTable {
    pub fn build(graph: &CsrGraph) -> Self {
        let num_buckets = num_buckets(graph.num_vertices());
        let mut bins = vec![Vec::new(); num_buckets];
        if num_buckets > 0 {
            for v in 0..graph.num_vertices() as NodeId {
                let degree = graph.degree(v);
                if degree != 0 {
                    bins[bucket_of(degree, num_buckets)].push(v);
                }
            }
        }
        Self { bins }
    }

    pub fn num_buckets(&self) -> usize {
        self.bins.len()
    }

    pub fn bucket(&self, index: usize) -> &[NodeId] {
        &self.bins[index]
    }

    /// Draws [`SEEDS_PER_BUCKET`] vertices with replacement from every
    /// non-empty bucket and releases the table.
    pub fn sample(self, rng: &mut dyn RngCore) -> StratifiedSeeds {
        let num_buckets = self.bins.len();
        let buckets = self
            .bins
            .into_iter()
            .enumerate()
            .filter(|(_, bin)| !bin.is_empty())
            .map(|(bucket, bin)| {
                let dist = Uniform::new(0, bin.len());
                let seeds = (0..SEEDS_PER_BUCKET)
                    .map(|_| bin[dist.sample(rng)])
                    .collect();
                debug!("Bucket {} holds {} vertices", bucket, bin.len());
                BucketSeeds { bucket, seeds }
            })
            .collect();
        StratifiedSeeds {
            num_buckets,
            buckets,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketSeeds {
    pub bucket: usize,
    pub seeds: Vec<NodeId>,
}

impl BucketSeeds {
    /// Seeds that are dispatched as separate trials.
    pub fn dispatched(&self) -> &[NodeId] {
        &self.seeds[..std::cmp::min(DISPATCHED_SEEDS_PER_BUCKET, self.seeds.len())]
    }
}

/// Result of degree-stratified seeding for one graph.
#[derive(Debug, Clone, PartialEq)]
pub struct StratifiedSeeds {
    pub num_buckets: usize,
    /// Non-empty buckets in increasing bucket order.
    pub buckets: Vec<BucketSeeds>,
}

/// Builds the degree-bin table, samples it and drops it before returning.
pub fn select_stratified_seeds(graph: &CsrGraph, rng: &mut dyn RngCore) -> StratifiedSeeds {
    DegreeBinTable::build(graph).sample(rng)
}
