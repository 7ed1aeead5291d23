use log::debug;
use rand::RngCore;
use std::time::{Duration, Instant};

use super::TriangleEstimator;
use crate::{CsrGraph, NodeId, TrialParameters};

/// Aggregate of the repeated estimations of one trial.
#[derive(Debug, Clone)]
pub struct EstimateSummary {
    pub filename: String,
    pub algo_name: String,
    pub sparsification_prob: f64,
    pub walk_length: u64,
    pub subsample_size: u64,
    pub seed_vertices: Vec<NodeId>,
    pub estimates: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
    /// Ground truth, when the trial may use it.
    pub ground_truth: Option<u64>,
    /// Mean of `|estimate - truth| / truth` over the repeats.
    pub mean_relative_error: Option<f64>,
    /// `|mean - truth| / truth`.
    pub relative_error_of_mean: Option<f64>,
    pub elapsed: Duration,
}

/// Runs `estimator` `params.no_of_repeat` times with the same seeds.
pub fn run_trial(
    estimator: &dyn TriangleEstimator,
    graph: &CsrGraph,
    params: &TrialParameters,
    ground_truth: u64,
    rng: &mut dyn RngCore,
) -> EstimateSummary {
    let now = Instant::now();
    let estimates: Vec<f64> = (0..params.no_of_repeat)
        .map(|repeat| {
            let estimate = estimator.estimate(graph, params, rng);
            debug!("{} repeat {}: {}", params.algo_name, repeat, estimate);
            estimate
        })
        .collect();
    let elapsed = now.elapsed();

    let (mean, std_dev) = mean_and_std_dev(&estimates);
    let ground_truth = Some(ground_truth).filter(|&t| params.normalization_count_available && t > 0);
    let mean_relative_error = ground_truth.filter(|_| !estimates.is_empty()).map(|t| {
        estimates
            .iter()
            .map(|e| relative_error(*e, t))
            .sum::<f64>()
            / estimates.len() as f64
    });
    let relative_error_of_mean = ground_truth
        .filter(|_| !estimates.is_empty())
        .map(|t| relative_error(mean, t));

    EstimateSummary {
        filename: params.filename.clone(),
        algo_name: params.algo_name.clone(),
        sparsification_prob: params.sparsification_prob,
        walk_length: params.walk_length,
        subsample_size: params.subsample_size,
        seed_vertices: params.seed_vertices.clone(),
        estimates,
        mean,
        std_dev,
        ground_truth,
        mean_relative_error,
        relative_error_of_mean,
        elapsed,
    }
}

fn relative_error(estimate: f64, truth: u64) -> f64 {
    (estimate - truth as f64).abs() / truth as f64
}

/// Population mean and standard deviation. Both are zero for no values.
fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::tests::{complete_graph, params_for};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Returns 10, 20, 30, ... on successive calls.
    struct Counting(std::cell::Cell<f64>);

    impl TriangleEstimator for Counting {
        fn estimate(&self, _: &CsrGraph, _: &TrialParameters, _: &mut dyn RngCore) -> f64 {
            self.0.set(self.0.get() + 10.0);
            self.0.get()
        }
    }

    #[test]
    fn test_mean_and_std_dev() {
        assert_eq!(mean_and_std_dev(&[]), (0.0, 0.0));
        assert_eq!(mean_and_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), (5.0, 2.0));
    }

    #[test]
    fn test_repeats_are_delegated() {
        let graph = complete_graph(4);
        let mut params = params_for(&graph, 1.0, 1.0, &[0]);
        params.no_of_repeat = 3;
        let mut rng = StdRng::seed_from_u64(0);

        let summary = run_trial(&Counting(Default::default()), &graph, &params, 40, &mut rng);
        assert_eq!(summary.estimates, vec![10.0, 20.0, 30.0]);
        assert_eq!(summary.mean, 20.0);
        assert_eq!(summary.ground_truth, Some(40));
        assert_eq!(summary.relative_error_of_mean, Some(0.5));
        let expected = (0.75 + 0.5 + 0.25) / 3.0;
        assert!((summary.mean_relative_error.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_errors_need_ground_truth() {
        let graph = complete_graph(4);
        let mut params = params_for(&graph, 1.0, 1.0, &[0]);
        let mut rng = StdRng::seed_from_u64(0);

        let summary = run_trial(&Counting(Default::default()), &graph, &params, 0, &mut rng);
        assert_eq!(summary.ground_truth, None);
        assert_eq!(summary.mean_relative_error, None);

        params.normalization_count_available = false;
        let summary = run_trial(&Counting(Default::default()), &graph, &params, 4, &mut rng);
        assert_eq!(summary.ground_truth, None);
        assert_eq!(summary.relative_error_of_mean, None);
    }
}
