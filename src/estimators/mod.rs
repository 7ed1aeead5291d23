pub mod edge_count;
mod serwc;
mod srw;
pub mod statistics;
mod tetris;
mod uess;
mod vertex_mcmc;
pub mod walk;

use rand::RngCore;
use std::fmt;
use std::str::FromStr;

use crate::{CsrGraph, TrialParameters};

pub use serwc::SerwcEstimator;
pub use srw::Srw1Estimator;
pub use tetris::TetrisEstimator;
pub use uess::UessEstimator;
pub use vertex_mcmc::VertexMcmcEstimator;

/// A randomized triangle-count estimator.
///
/// One call is one estimation. Implementations read the graph and the trial
/// parameters and never modify them.
pub trait TriangleEstimator {
    fn estimate(&self, graph: &CsrGraph, params: &TrialParameters, rng: &mut dyn RngCore) -> f64;
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("unknown algorithm option {0:?}")]
pub struct UnknownAlgorithm(pub String);

/// Recognized estimator kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Tetris,
    Serwc,
    Uess,
    VertexMcmc,
    Srw1,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Tetris,
        Algorithm::Serwc,
        Algorithm::Uess,
        Algorithm::VertexMcmc,
        Algorithm::Srw1,
    ];

    /// Name used in sweep configurations and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Tetris => "TETRIS",
            Algorithm::Serwc => "SERWC",
            Algorithm::Uess => "UESS",
            Algorithm::VertexMcmc => "VertexMCMC",
            Algorithm::Srw1 => "SRW1",
        }
    }

    pub fn estimator(&self) -> &'static dyn TriangleEstimator {
        match self {
            Algorithm::Tetris => &TetrisEstimator,
            Algorithm::Serwc => &SerwcEstimator,
            Algorithm::Uess => &UessEstimator,
            Algorithm::VertexMcmc => &VertexMcmcEstimator,
            Algorithm::Srw1 => &Srw1Estimator,
        }
    }

    /// Whether the kernel can run with degree-stratified seeds.
    pub fn supports_degree_bins(&self) -> bool {
        *self == Algorithm::Tetris
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    /// Matches names exactly, case included.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
