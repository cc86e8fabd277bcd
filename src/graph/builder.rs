//! Graph construction module

use crate::graph::ThresholdGraph;
use std::collections::HashMap;

/// Builder for incrementally constructing a ThresholdGraph
pub struct GraphBuilder {
    /// Distance cutoff recorded on the built graph
    threshold: u32,

    /// Mapping from sample names to node indices
    id_to_index: HashMap<String, u32>,

    /// Sample names in insertion order
    node_ids: Vec<String>,

    /// Adjacency lists for each node as (neighbor, distance)
    adjacency_lists: Vec<Vec<(u32, u32)>>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(threshold: u32, capacity: usize) -> Self {
        Self {
            threshold,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
        }
    }

    /// Get or create a node for the given sample name
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency_lists.push(Vec::new());

        idx
    }

    /// Add an undirected edge weighted by the pair's distance
    pub fn add_edge(&mut self, a: &str, b: &str, distance: u32) {
        let a_idx = self.get_or_create_node(a);
        let b_idx = self.get_or_create_node(b);

        self.adjacency_lists[a_idx as usize].push((b_idx, distance));
        self.adjacency_lists[b_idx as usize].push((a_idx, distance));
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Build the compressed graph, renumbering nodes into sorted name order
    pub fn build(self) -> ThresholdGraph {
        let node_count = self.node_ids.len();
        let edge_count: usize = self.adjacency_lists.iter().map(Vec::len).sum::<usize>() / 2;

        let mut order: Vec<usize> = (0..node_count).collect();
        order.sort_by(|&a, &b| self.node_ids[a].cmp(&self.node_ids[b]));

        let mut old_to_new = vec![0u32; node_count];
        for (new_idx, &old_idx) in order.iter().enumerate() {
            old_to_new[old_idx] = new_idx as u32;
        }

        let mut graph = ThresholdGraph::with_capacity(self.threshold, node_count, edge_count);
        graph.offsets.push(0);
        let mut offset = 0u32;

        for &old_idx in &order {
            let mut list: Vec<(u32, u32)> = self.adjacency_lists[old_idx]
                .iter()
                .map(|&(neighbor, distance)| (old_to_new[neighbor as usize], distance))
                .collect();
            // Sort for binary search in has_edge
            list.sort_unstable();

            for (neighbor, distance) in list {
                graph.edges.push(neighbor);
                graph.weights.push(distance);
                offset += 1;
            }

            graph.offsets.push(offset);
            graph.node_ids.push(self.node_ids[old_idx].clone());
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sorts_nodes_and_neighbors() {
        let mut builder = GraphBuilder::with_capacity(5, 4);
        builder.add_edge("delta", "alpha", 3);
        builder.add_edge("charlie", "alpha", 1);
        builder.get_or_create_node("bravo");
        assert_eq!(builder.node_count(), 4);

        let graph = builder.build();
        assert_eq!(graph.node_ids(), &["alpha", "bravo", "charlie", "delta"]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(0), &[2, 3]);
        assert_eq!(graph.neighbor_weights(0), &[1, 3]);
        assert_eq!(graph.degree(1), 0);
        assert!(graph.has_edge(3, 0));
        assert_eq!(graph.edge_weight(2, 0), Some(1));
        assert_eq!(graph.edge_weight(1, 0), None);
    }

    #[test]
    fn test_repeated_nodes_are_reused() {
        let mut builder = GraphBuilder::with_capacity(0, 2);
        let a = builder.get_or_create_node("a");
        assert_eq!(builder.get_or_create_node("a"), a);
        assert_eq!(builder.node_count(), 1);
    }
}
