use crate::{NodeId, SweepConfiguration};

/// Everything one estimator invocation needs to know about its trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialParameters {
    pub filename: String,
    /// Algorithm name as reported, possibly decorated with a bucket suffix.
    pub algo_name: String,
    pub no_of_repeat: usize,
    pub sparsification_prob: f64,
    pub walk_length: u64,
    pub subsample_size: u64,
    pub seed_count: usize,
    pub seed_vertices: Vec<NodeId>,
    pub print_to_console: bool,
    pub print_to_file: bool,
    /// Whether the exact edge count and the ground truth may be used.
    pub normalization_count_available: bool,
}

/// Number of walk steps for a graph with `edge_count` adjacency slots.
///
/// Truncates toward zero. Negative products saturate at zero, products
/// above `edge_count` pass through.
pub fn walk_length(edge_count: u64, sparsification_prob: f64) -> u64 {
    (edge_count as f64 * sparsification_prob) as u64
}

pub fn subsample_size(walk_length: u64, subsample_prob: f64) -> u64 {
    (walk_length as f64 * subsample_prob) as u64
}

/// Builds [`TrialParameters`] for one graph of a sweep.
pub struct TrialParameterBuilder<'a> {
    config: &'a SweepConfiguration,
    filename: &'a str,
    edge_count: u64,
}

impl<'a> TrialParameterBuilder<'a> {
    pub fn new(config: &'a SweepConfiguration, filename: &'a str, edge_count: u64) -> Self {
        Self {
            config,
            filename,
            edge_count,
        }
    }

    /// Parameters with derived budgets and an empty seed sequence.
    pub fn build(&self, algo_name: &str, sparsification_prob: f64, seed_count: usize) -> TrialParameters {
        let walk_length = walk_length(self.edge_count, sparsification_prob);
        TrialParameters {
            filename: self.filename.to_string(),
            algo_name: algo_name.to_string(),
            no_of_repeat: self.config.no_of_repeats,
            sparsification_prob,
            walk_length,
            subsample_size: subsample_size(walk_length, self.config.subsample_prob),
            seed_count,
            seed_vertices: Vec::with_capacity(seed_count),
            print_to_console: self.config.print_to_console,
            print_to_file: self.config.print_to_file,
            normalization_count_available: self.config.edge_count_available,
        }
    }
}

impl TrialParameters {
    /// Tags the algorithm name with the degree bucket the seed came from.
    pub fn decorate_with_bucket(&mut self, algorithm: &str, bucket: usize) {
        self.algo_name = format!("{}_{}", algorithm, bucket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_walk_length_bounds() {
        assert_eq!(walk_length(5000, 0.0), 0);
        assert_eq!(walk_length(5000, 1.0), 5000);
        assert_eq!(walk_length(5000, 0.2), 1000);
        assert_eq!(walk_length(7, 0.5), 3);
    }

    #[test]
    fn test_out_of_range_probabilities_pass_through() {
        assert_eq!(walk_length(100, 1.5), 150);
        assert_eq!(walk_length(100, -0.5), 0);
    }

    #[test]
    fn test_subsample_never_exceeds_walk() {
        for edge_count in [0u64, 1, 17, 5000, 123_456_789] {
            for p in [0.0, 0.01, 0.3, 1.0] {
                let walk = walk_length(edge_count, p);
                for q in [0.0, 0.1, 0.5, 1.0] {
                    let subsample = subsample_size(walk, q);
                    assert!(subsample <= walk);
                    assert_eq!(subsample, (walk as f64 * q) as u64);
                }
            }
        }
    }

    #[test]
    fn test_builder_copies_sweep_values() -> Result<(), Box<dyn std::error::Error>> {
        let config = SweepConfiguration::from_yaml(indoc! {"
            input_files: [g.edges]
            triangle_count: [1]
            algo_names: [TETRIS]
            sparsification_prob: [0.2]
            seed_count: [10]
            no_of_repeats: 3
            subsample_prob: 0.5
            edge_count_available: false
        "})?;
        let builder = TrialParameterBuilder::new(&config, "g.edges", 5000);
        let mut params = builder.build("TETRIS", 0.2, 10);

        assert_eq!(params.filename, "g.edges");
        assert_eq!(params.walk_length, 1000);
        assert_eq!(params.subsample_size, 500);
        assert_eq!(params.no_of_repeat, 3);
        assert_eq!(params.seed_count, 10);
        assert!(params.seed_vertices.is_empty());
        assert!(!params.normalization_count_available);

        params.decorate_with_bucket("TETRIS", 4);
        assert_eq!(params.algo_name, "TETRIS_4");
        Ok(())
    }
}
