mod csr_graph;

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::GraphCache;

pub use csr_graph::{CsrGraph, NodeId, MAX_VERTICES};

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("could not read graph: {0}")]
    Io(#[from] io::Error),
    #[error("malformed line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error("vertex {vertex} is out of range for a graph with {num_vertices} vertices")]
    VertexOutOfRange { vertex: u64, num_vertices: usize },
    #[error("{declared} vertices declared, at most {} are supported", MAX_VERTICES)]
    TooManyVertices { declared: u64 },
}

/// Loading mode of a graph file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphFormat {
    /// First data line holds `n m`, followed by `m` lines of `u v`.
    Escape,
    /// Lines of `u v` only. The vertex count is the largest id plus one.
    EdgeList,
}

impl Default for GraphFormat {
    fn default() -> Self {
        GraphFormat::Escape
    }
}

/// Source of graph handles for a sweep.
pub trait GraphLoader {
    fn load(&mut self, path: &str) -> Result<CsrGraph, GraphError>;
}

/// Reads graphs from the filesystem, optionally through a snapshot cache.
pub struct FileGraphLoader<C: GraphCache> {
    format: GraphFormat,
    cache: Option<C>,
}

impl<C: GraphCache> FileGraphLoader<C> {
    pub fn new(format: GraphFormat, cache: Option<C>) -> Self {
        Self { format, cache }
    }
}

impl<C: GraphCache> GraphLoader for FileGraphLoader<C> {
    fn load(&mut self, path: &str) -> Result<CsrGraph, GraphError> {
        let path = Path::new(path);
        if let Some(cache) = &self.cache {
            match cache.read_graph(path, self.format) {
                Ok(graph) => {
                    info!("Found the graph {:?} from the cache!", path);
                    return Ok(graph);
                }
                Err(e) => debug!("Cache miss for {:?}: {}", path, e),
            }
        }

        let reader = BufReader::new(File::open(path)?);
        let graph = read_graph(reader, self.format)?;

        if let Some(cache) = &mut self.cache {
            if let Err(e) = cache.write_graph(path, self.format, &graph) {
                error!("Failed writing the graph {:?} to the cache: {}", path, e);
            } else {
                info!("Wrote the graph {:?} to the cache!", path);
            }
        }

        Ok(graph)
    }
}

const EDGE_RESERVE_LIMIT: u64 = 1 << 20;

/// Parses a graph from any buffered reader.
///
/// Lines starting with `#` or `%` are comments. Columns after the first two
/// are ignored so weighted edge lists can be read as they are.
pub fn read_graph<R: BufRead>(reader: R, format: GraphFormat) -> Result<CsrGraph, GraphError> {
    let mut declared_vertices = None;
    let mut edges = Vec::new();
    let mut max_id = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
            continue;
        }

        let (a, b) = parse_pair(trimmed).ok_or_else(|| GraphError::MalformedLine {
            line: i + 1,
            content: line.clone(),
        })?;

        if format == GraphFormat::Escape && declared_vertices.is_none() {
            if a > MAX_VERTICES as u64 {
                return Err(GraphError::TooManyVertices { declared: a });
            }
            declared_vertices = Some(a as usize);
            // The declared edge count is only a hint.
            edges.reserve(std::cmp::min(b, EDGE_RESERVE_LIMIT) as usize);
            continue;
        }

        let (u, v) = match (NodeId::try_from(a), NodeId::try_from(b)) {
            (Ok(u), Ok(v)) => (u, v),
            _ => {
                return Err(GraphError::VertexOutOfRange {
                    vertex: std::cmp::max(a, b),
                    num_vertices: NodeId::MAX as usize,
                })
            }
        };
        max_id = std::cmp::max(max_id, Some(std::cmp::max(u, v)));
        edges.push((u, v));
    }

    let num_vertices = match format {
        GraphFormat::Escape => declared_vertices.unwrap_or(0),
        GraphFormat::EdgeList => max_id.map_or(0, |id| id as usize + 1),
    };

    CsrGraph::from_edges(num_vertices, &edges)
}

fn parse_pair(line: &str) -> Option<(u64, u64)> {
    let mut words = line.split_ascii_whitespace();
    let a = words.next()?.parse().ok()?;
    let b = words.next()?.parse().ok()?;
    Some((a, b))
}
