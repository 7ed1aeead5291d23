mod estimators;
mod graph_caches;
mod graph_utils;
mod report;
mod seed_selector;
mod sweep;
mod sweep_config;
pub mod trial_params;

pub use estimators::statistics::{run_trial, EstimateSummary};
pub use estimators::{
    Algorithm, SerwcEstimator, Srw1Estimator, TetrisEstimator, TriangleEstimator, UessEstimator,
    UnknownAlgorithm, VertexMcmcEstimator,
};
pub use graph_caches::snapshot_cache::SnapshotCache;
pub use graph_caches::GraphCache;
pub use graph_utils::{read_graph, CsrGraph, FileGraphLoader, GraphError, GraphFormat, GraphLoader, NodeId};
pub use report::Reporter;
pub use seed_selector::{
    select_stratified_seeds, select_uniform_seeds, BucketSeeds, DegreeBinTable, SeedError,
    StratifiedSeeds, DISPATCHED_SEEDS_PER_BUCKET, SEEDS_PER_BUCKET,
};
pub use sweep::{
    Dispatcher, KernelDispatcher, SweepController, SweepError, SweepPlan, SweepSummary,
    TrialCondition,
};
pub use sweep_config::{ConfigError, SweepConfiguration};
pub use trial_params::{TrialParameterBuilder, TrialParameters};
