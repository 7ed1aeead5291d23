use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::GraphError;

/// Vertex identifier. Fits graphs with up to 4 billion vertices.
pub type NodeId = u32;

/// Largest supported vertex count. Both the count and every id fit in
/// [`NodeId`].
pub const MAX_VERTICES: usize = NodeId::MAX as usize;

/// Undirected graph in compressed sparse row format.
///
/// Every undirected edge `{u, v}` is stored twice, once in the row of `u` and
/// once in the row of `v`. Rows are sorted, free of duplicates and free of
/// self loops.
///
/// The graph is never mutated after construction.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct CsrGraph {
    offsets: Vec<usize>,
    targets: Vec<NodeId>,
}

impl CsrGraph {
    /// Builds a graph with `num_vertices` vertices from an undirected edge list.
    ///
    /// Edges are symmetrized. Parallel edges and self loops are dropped.
    pub fn from_edges(num_vertices: usize, edges: &[(NodeId, NodeId)]) -> Result<Self, GraphError> {
        if num_vertices > MAX_VERTICES {
            return Err(GraphError::TooManyVertices {
                declared: num_vertices as u64,
            });
        }
        if let Some(&(u, v)) = edges
            .iter()
            .find(|(u, v)| *u as usize >= num_vertices || *v as usize >= num_vertices)
        {
            return Err(GraphError::VertexOutOfRange {
                vertex: std::cmp::max(u, v) as u64,
                num_vertices,
            });
        }

        let mut arcs = Vec::with_capacity(edges.len() * 2);
        for &(u, v) in edges.iter().filter(|(u, v)| u != v) {
            arcs.push((u, v));
            arcs.push((v, u));
        }
        arcs.sort_unstable();
        arcs.dedup();

        let mut offsets = vec![0usize; num_vertices + 1];
        for &(u, _) in arcs.iter() {
            offsets[u as usize + 1] += 1;
        }
        for i in 0..num_vertices {
            offsets[i + 1] += offsets[i];
        }
        let targets = arcs.into_iter().map(|(_, v)| v).collect_vec();

        Ok(Self { offsets, targets })
    }

    /// Number of vertices `V`.
    pub fn num_vertices(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of adjacency slots, i.e. twice the number of undirected edges.
    pub fn num_edges(&self) -> u64 {
        self.targets.len() as u64
    }

    pub fn degree(&self, v: NodeId) -> usize {
        let v = v as usize;
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Sorted neighbours of `v`.
    pub fn neighbors(&self, v: NodeId) -> &[NodeId] {
        let v = v as usize;
        &self.targets[self.offsets[v]..self.offsets[v + 1]]
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        // Search the shorter row.
        let (a, b) = if self.degree(u) <= self.degree(v) {
            (u, v)
        } else {
            (v, u)
        };
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Counts the triangles incident on edge `{u, v}` by merging both rows.
    pub fn common_neighbors(&self, u: NodeId, v: NodeId) -> usize {
        let (a, b) = (self.neighbors(u), self.neighbors(v));
        let (mut i, mut j, mut count) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    count += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        count
    }

    /// Global slot of the `index`th neighbour of `v`.
    ///
    /// Slots identify directed edges and lie in `[0, num_edges)`.
    pub fn edge_slot(&self, v: NodeId, index: usize) -> usize {
        self.offsets[v as usize] + index
    }

    /// Returns the `(source, target)` pair stored at `slot`.
    pub fn slot_endpoints(&self, slot: usize) -> (NodeId, NodeId) {
        // The source row is the last one starting at or before `slot`.
        let source = self.offsets.partition_point(|&offset| offset <= slot) - 1;
        (source as NodeId, self.targets[slot])
    }
}
