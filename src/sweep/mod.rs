//! Sweep controller: runs every input graph through the configured matrix of
//! algorithms, sparsification probabilities and seed counts.
//!
//! Per graph the controller loads the graph, builds the parameters of every
//! condition, selects seeds and hands the trial to a [`Dispatcher`]. Seeds are
//! uniform unless `degree_bin_seed` is set, in which case degree-stratified
//! seeds are drawn once per graph and every dispatched seed becomes its own
//! trial.
//!
//! A graph that fails to load ends the sweep. An unknown algorithm name only
//! skips its trials.

mod plan;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Instant;

use crate::estimators::statistics::run_trial;
use crate::seed_selector::{select_stratified_seeds, select_uniform_seeds, StratifiedSeeds};
use crate::{
    Algorithm, CsrGraph, GraphError, GraphLoader, Reporter, SweepConfiguration,
    TrialParameterBuilder, TrialParameters,
};

pub use plan::{SweepPlan, TrialCondition};

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("failed to load graph {path:?}: {source}")]
    GraphLoad {
        path: String,
        #[source]
        source: GraphError,
    },
}

/// Receives every trial of a sweep.
pub trait Dispatcher {
    fn dispatch(
        &mut self,
        algorithm: Algorithm,
        graph: &CsrGraph,
        params: &TrialParameters,
        ground_truth: u64,
        rng: &mut dyn RngCore,
    );
}

/// Runs the estimator kernel of each trial and reports its summary.
pub struct KernelDispatcher {
    reporter: Reporter,
}

impl KernelDispatcher {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }
}

impl Dispatcher for KernelDispatcher {
    fn dispatch(
        &mut self,
        algorithm: Algorithm,
        graph: &CsrGraph,
        params: &TrialParameters,
        ground_truth: u64,
        rng: &mut dyn RngCore,
    ) {
        let summary = run_trial(algorithm.estimator(), graph, params, ground_truth, rng);
        if params.print_to_console {
            self.reporter.print_to_console(&summary);
        }
        if params.print_to_file {
            match self.reporter.write_to_file(&summary) {
                Ok(path) => debug!("Appended {} to {:?}", summary.algo_name, path),
                Err(e) => error!("Failed writing results of {}: {}", summary.algo_name, e),
            }
        }
    }
}

/// What a completed sweep did.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SweepSummary {
    pub graphs: usize,
    pub dispatched: usize,
    /// Algorithm names that were skipped, once per skipped condition.
    pub skipped: Vec<String>,
}

pub struct SweepController<'a, L: GraphLoader, D: Dispatcher> {
    config: &'a SweepConfiguration,
    loader: L,
    dispatcher: D,
    run_seed: u64,
    rng: StdRng,
    show_progress: bool,
}

impl<'a, L: GraphLoader, D: Dispatcher> SweepController<'a, L, D> {
    /// `run_seed` overrides the configured seed. Without either, the run
    /// seed is drawn from entropy.
    pub fn new(
        config: &'a SweepConfiguration,
        loader: L,
        dispatcher: D,
        run_seed: Option<u64>,
    ) -> Self {
        let run_seed = run_seed
            .or(config.rng_seed)
            .unwrap_or_else(rand::random);
        info!("Run seed is {}", run_seed);
        Self {
            config,
            loader,
            dispatcher,
            run_seed,
            rng: StdRng::seed_from_u64(run_seed),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Runs the whole sweep. Stops at the first graph that fails to load.
    pub fn run(&mut self) -> Result<SweepSummary, SweepError> {
        let plan = SweepPlan::new(self.config);
        let graphs = plan.graphs().collect_vec();
        let mut summary = SweepSummary::default();

        for (graph_index, &(filename, ground_truth)) in graphs.iter().enumerate() {
            println!(
                "{} Loading graph {}...",
                style(format!("[{}/{}]", graph_index + 1, graphs.len()))
                    .bold()
                    .dim(),
                style(filename).cyan()
            );
            let now = Instant::now();
            let graph = self
                .loader
                .load(filename)
                .map_err(|source| SweepError::GraphLoad {
                    path: filename.to_string(),
                    source,
                })?;
            println!(
                "    Time to load graph = {} seconds",
                now.elapsed().as_secs()
            );
            println!(
                "    #Vertices = {}, #Edges = {}",
                graph.num_vertices(),
                graph.num_edges()
            );
            summary.graphs += 1;

            self.run_graph(&plan, graph_index, filename, ground_truth, &graph, &mut summary);
        }

        Ok(summary)
    }

    fn run_graph(
        &mut self,
        plan: &SweepPlan<'a>,
        graph_index: usize,
        filename: &str,
        ground_truth: u64,
        graph: &CsrGraph,
        summary: &mut SweepSummary,
    ) {
        let builder = TrialParameterBuilder::new(self.config, filename, graph.num_edges());

        // Independent of algorithm, probability and seed count.
        let stratified = if self.config.degree_bin_seed {
            let seeds = select_stratified_seeds(graph, &mut self.rng);
            if seeds.num_buckets == 0 {
                warn!(
                    "{} has {} vertices, too few for degree buckets. No trials will run.",
                    filename,
                    graph.num_vertices()
                );
            }
            Some(seeds)
        } else {
            None
        };

        let pb = self.progress_bar(plan.conditions_per_graph() as u64);
        for condition in plan.conditions() {
            pb.inc(1);
            pb.set_message(condition.algo_name.to_string());

            let algorithm = match condition.algo_name.parse::<Algorithm>() {
                Ok(algorithm) if stratified.is_none() || algorithm.supports_degree_bins() => {
                    algorithm
                }
                _ => {
                    println!(
                        "    {} {}",
                        style("Unknown algorithm option.").red(),
                        condition.algo_name
                    );
                    warn!("Skipping unknown algorithm option {:?}", condition.algo_name);
                    summary.skipped.push(condition.algo_name.to_string());
                    continue;
                }
            };

            let coordinates = [
                graph_index,
                condition.algo_index,
                condition.prob_index,
                condition.seed_count_index,
            ];
            let params = builder.build(
                condition.algo_name,
                condition.sparsification_prob,
                condition.seed_count,
            );
            match &stratified {
                None => self.uniform_trial(algorithm, graph, params, ground_truth, &coordinates, summary),
                Some(seeds) => self.stratified_trials(
                    algorithm,
                    graph,
                    &params,
                    seeds,
                    ground_truth,
                    &coordinates,
                    summary,
                ),
            }
        }
        pb.finish_and_clear();
    }

    fn uniform_trial(
        &mut self,
        algorithm: Algorithm,
        graph: &CsrGraph,
        mut params: TrialParameters,
        ground_truth: u64,
        coordinates: &[usize],
        summary: &mut SweepSummary,
    ) {
        let mut trial_rng = self.trial_rng(coordinates);
        let rng: &mut dyn RngCore = match trial_rng.as_mut() {
            Some(rng) => rng,
            None => &mut self.rng,
        };

        match select_uniform_seeds(graph, params.seed_count, rng) {
            Ok(seeds) => params.seed_vertices = seeds,
            Err(e) => {
                warn!("Skipping {} on {}: {}", params.algo_name, params.filename, e);
                return;
            }
        }

        self.dispatcher
            .dispatch(algorithm, graph, &params, ground_truth, rng);
        summary.dispatched += 1;
    }

    #[allow(clippy::too_many_arguments)]
    fn stratified_trials(
        &mut self,
        algorithm: Algorithm,
        graph: &CsrGraph,
        params: &TrialParameters,
        seeds: &StratifiedSeeds,
        ground_truth: u64,
        coordinates: &[usize],
        summary: &mut SweepSummary,
    ) {
        for bucket in &seeds.buckets {
            for (slot, &seed) in bucket.dispatched().iter().enumerate() {
                let mut params = params.clone();
                params.seed_vertices = vec![seed];
                params.decorate_with_bucket(algorithm.name(), bucket.bucket);

                let trial_coordinates = [coordinates, &[bucket.bucket + 1, slot + 1][..]].concat();
                let mut trial_rng = self.trial_rng(&trial_coordinates);
                let rng: &mut dyn RngCore = match trial_rng.as_mut() {
                    Some(rng) => rng,
                    None => &mut self.rng,
                };

                self.dispatcher
                    .dispatch(algorithm, graph, &params, ground_truth, rng);
                summary.dispatched += 1;
            }
        }
    }

    /// A generator of its own for the trial at `coordinates`, when trials are
    /// reseeded. `None` means the shared generator is used.
    fn trial_rng(&self, coordinates: &[usize]) -> Option<StdRng> {
        if !self.config.reseed_per_trial {
            return None;
        }
        let seed = coordinates
            .iter()
            .fold(self.run_seed, |acc, &c| mix(acc ^ (c as u64).wrapping_add(GOLDEN_GAMMA)));
        Some(StdRng::seed_from_u64(seed))
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:20.cyan/blue} {pos:>7}/{len:7} {msg}")
                .progress_chars("##-"),
        );
        pb
    }
}

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
