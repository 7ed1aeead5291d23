use itertools::iproduct;

use crate::SweepConfiguration;

/// One (algorithm, probability, seed count) cell of the sweep for a graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialCondition<'a> {
    pub algo_index: usize,
    pub algo_name: &'a str,
    pub prob_index: usize,
    pub sparsification_prob: f64,
    pub seed_count_index: usize,
    pub seed_count: usize,
}

/// Lazy cross-product of the sweep axes.
///
/// Graphs vary slowest, then algorithms, probabilities and seed counts.
pub struct SweepPlan<'a> {
    config: &'a SweepConfiguration,
}

impl<'a> SweepPlan<'a> {
    pub fn new(config: &'a SweepConfiguration) -> Self {
        Self { config }
    }

    /// Input graphs with their ground truth.
    pub fn graphs(&self) -> impl Iterator<Item = (&'a str, u64)> + 'a {
        self.config
            .input_files
            .iter()
            .map(String::as_str)
            .zip(self.config.triangle_count.iter().copied())
    }

    /// Conditions every graph is run under.
    pub fn conditions(&self) -> impl Iterator<Item = TrialCondition<'a>> + 'a {
        let config = self.config;
        iproduct!(
            config.algo_names.iter().enumerate(),
            config.sparsification_prob.iter().copied().enumerate(),
            config.seed_count.iter().copied().enumerate()
        )
        .map(
            |((algo_index, algo_name), (prob_index, sparsification_prob), (seed_count_index, seed_count))| {
                TrialCondition {
                    algo_index,
                    algo_name: algo_name.as_str(),
                    prob_index,
                    sparsification_prob,
                    seed_count_index,
                    seed_count,
                }
            },
        )
    }

    pub fn conditions_per_graph(&self) -> usize {
        self.config.algo_names.len()
            * self.config.sparsification_prob.len()
            * self.config.seed_count.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use itertools::Itertools;

    #[test]
    fn test_conditions_in_sweep_order() -> Result<(), Box<dyn std::error::Error>> {
        let config = SweepConfiguration::from_yaml(indoc! {"
            input_files: [a.edges, b.edges]
            triangle_count: [3, 4]
            algo_names: [TETRIS, SRW1]
            sparsification_prob: [0.1, 0.2, 0.3]
            seed_count: [1, 10]
        "})?;
        let plan = SweepPlan::new(&config);

        assert_eq!(plan.graphs().collect_vec(), vec![("a.edges", 3), ("b.edges", 4)]);
        assert_eq!(plan.conditions_per_graph(), 12);

        let conditions = plan.conditions().collect_vec();
        assert_eq!(conditions.len(), 12);
        assert_eq!(
            (conditions[0].algo_name, conditions[0].sparsification_prob, conditions[0].seed_count),
            ("TETRIS", 0.1, 1)
        );
        assert_eq!(
            (conditions[1].algo_name, conditions[1].sparsification_prob, conditions[1].seed_count),
            ("TETRIS", 0.1, 10)
        );
        assert_eq!(
            (conditions[11].algo_name, conditions[11].prob_index, conditions[11].seed_count_index),
            ("SRW1", 2, 1)
        );
        Ok(())
    }

    #[test]
    fn test_empty_axis_yields_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let config = SweepConfiguration::from_yaml(indoc! {"
            input_files: [a.edges]
            triangle_count: [3]
            algo_names: [TETRIS]
            sparsification_prob: []
            seed_count: [1]
        "})?;
        assert_eq!(SweepPlan::new(&config).conditions().count(), 0);
        Ok(())
    }
}
