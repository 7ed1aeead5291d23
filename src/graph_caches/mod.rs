use std::path::Path;

use crate::{CsrGraph, GraphFormat};

pub mod snapshot_cache;

/// Storage for parsed graphs, keyed by the file they were parsed from and
/// the format it was parsed in.
pub trait GraphCache {
    fn read_graph(
        &self,
        source: &Path,
        format: GraphFormat,
    ) -> Result<CsrGraph, Box<dyn std::error::Error>>;
    fn write_graph(
        &mut self,
        source: &Path,
        format: GraphFormat,
        graph: &CsrGraph,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
