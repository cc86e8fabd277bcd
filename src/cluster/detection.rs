//! Connected component extraction

use crate::cluster::Cluster;
use crate::graph::ThresholdGraph;
use std::collections::HashMap;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set, valid at roots (for union by size)
    size: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure with every node in its own set
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            size: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut node = x;
        while node != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach the smaller tree under the root of the larger one
        let (large, small) = if self.size[root_x as usize] >= self.size[root_y as usize] {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[small as usize] = large;
        self.size[large as usize] += self.size[small as usize];
    }

    /// Get the size of the set containing x
    pub fn set_size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.size[root as usize]
    }
}

/// Find the connected components of the graph.
///
/// Clusters are ordered by their first member in node order, and members
/// within a cluster follow node order, so the result is fully determined by
/// the graph. Isolated nodes come back as clusters of one.
pub fn get_clusters(graph: &ThresholdGraph) -> Vec<Cluster> {
    let node_count = graph.node_count();
    let mut sets = DisjointSets::new(node_count);

    for (a, b, _) in graph.edges() {
        sets.union(a, b);
    }

    let mut root_to_group: HashMap<u32, usize> = HashMap::new();
    let mut groups: Vec<Vec<u32>> = Vec::new();

    for node in 0..node_count as u32 {
        let root = sets.find(node);
        let group = *root_to_group.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[group].push(node);
    }

    let clusters: Vec<Cluster> = groups
        .into_iter()
        .enumerate()
        .map(|(i, nodes)| Cluster {
            id: i + 1,
            members: nodes
                .iter()
                .map(|&node| graph.node_id(node as usize).to_string())
                .collect(),
            nodes,
        })
        .collect();

    log::debug!(
        "Extracted {} clusters from {} nodes",
        clusters.len(),
        node_count
    );

    clusters
}
