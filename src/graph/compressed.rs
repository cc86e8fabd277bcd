//! Memory-efficient undirected graph representation

use std::mem;

/// Compressed sparse representation of an undirected, weighted threshold graph.
///
/// Every edge is stored in both endpoints' adjacency lists. Nodes are kept in
/// lexicographic order of their sample names, and each adjacency list is sorted
/// by neighbor index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdGraph {
    /// Distance cutoff the graph was built with (inclusive)
    pub threshold: u32,

    /// Sample name of each node, sorted
    pub node_ids: Vec<String>,

    /// Offset array: offsets[i] to offsets[i+1] defines the edge range for node i
    pub offsets: Vec<u32>,

    /// Edge array: concatenated lists of neighbor nodes
    pub edges: Vec<u32>,

    /// Distance attached to each entry of `edges`
    pub weights: Vec<u32>,
}

impl ThresholdGraph {
    /// Create an empty graph with pre-allocated capacity
    pub fn with_capacity(threshold: u32, node_count: usize, edge_count: usize) -> Self {
        Self {
            threshold,
            node_ids: Vec::with_capacity(node_count),
            offsets: Vec::with_capacity(node_count + 1),
            edges: Vec::with_capacity(edge_count * 2),
            weights: Vec::with_capacity(edge_count * 2),
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    pub fn node_ids(&self) -> &[String] {
        &self.node_ids
    }

    pub fn node_id(&self, node: usize) -> &str {
        &self.node_ids[node]
    }

    /// Look up a node by sample name
    pub fn node_index(&self, sample: &str) -> Option<usize> {
        self.node_ids
            .binary_search_by(|probe| probe.as_str().cmp(sample))
            .ok()
    }

    /// Neighbors of a node
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Edge distances, parallel to `neighbors(node)`
    pub fn neighbor_weights(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.weights[start..end]
    }

    pub fn degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    /// Check if there's an edge between two nodes
    pub fn has_edge(&self, a: usize, b: u32) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Distance on the edge between two nodes, if they are linked
    pub fn edge_weight(&self, a: usize, b: u32) -> Option<u32> {
        let pos = self.neighbors(a).binary_search(&b).ok()?;
        Some(self.neighbor_weights(a)[pos])
    }

    /// Each undirected edge once, as `(a, b, distance)` with `a < b`
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        (0..self.node_count()).flat_map(move |a| {
            self.neighbors(a)
                .iter()
                .zip(self.neighbor_weights(a))
                .filter(move |(&b, _)| (a as u32) < b)
                .map(move |(&b, &w)| (a as u32, b, w))
        })
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let edges = self.edges.capacity() * mem::size_of::<u32>();
        let weights = self.weights.capacity() * mem::size_of::<u32>();
        let ids = self.node_ids.iter().map(|s| s.capacity()).sum::<usize>();

        base + offsets + edges + weights + ids
    }
}
