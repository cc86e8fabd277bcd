//! Cluster statistics and metrics

use crate::cluster::Cluster;
use crate::graph::ThresholdGraph;
use serde::Serialize;
use statrs::statistics::{Data, Median};

/// Number of most connected samples reported per cluster
const CENTRAL_SAMPLE_COUNT: usize = 5;

/// Summary statistics for one cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMetrics {
    pub id: usize,
    pub size: usize,

    /// Qualifying links inside the cluster
    pub edge_count: usize,

    /// Links present / links possible; 1.0 for singletons
    pub density: f64,

    /// Link distances; `None` for singletons
    pub min_distance: Option<u32>,
    pub max_distance: Option<u32>,
    pub mean_distance: Option<f64>,
    pub median_distance: Option<f64>,

    /// Samples with the most links inside the cluster
    pub central_samples: Vec<String>,
}

/// Calculate metrics for a cluster extracted from `graph`
pub fn calculate_cluster_metrics(cluster: &Cluster, graph: &ThresholdGraph) -> ClusterMetrics {
    // Components are closed under adjacency, so every neighbor is a member
    let distances: Vec<u32> = cluster
        .nodes
        .iter()
        .flat_map(|&node| {
            graph
                .neighbors(node as usize)
                .iter()
                .zip(graph.neighbor_weights(node as usize))
                .filter(move |(&other, _)| node < other)
                .map(|(_, &w)| w)
        })
        .collect();

    let size = cluster.size();
    let edge_count = distances.len();

    ClusterMetrics {
        id: cluster.id,
        size,
        edge_count,
        density: calculate_density(size, edge_count),
        min_distance: distances.iter().copied().min(),
        max_distance: distances.iter().copied().max(),
        mean_distance: mean(&distances),
        median_distance: median(&distances),
        central_samples: central_samples(cluster, graph),
    }
}

/// Metrics for every cluster, in cluster order
pub fn calculate_all_metrics(clusters: &[Cluster], graph: &ThresholdGraph) -> Vec<ClusterMetrics> {
    clusters
        .iter()
        .map(|cluster| calculate_cluster_metrics(cluster, graph))
        .collect()
}

/// Calculate density (actual links / potential links) of an undirected cluster
pub fn calculate_density(size: usize, edge_count: usize) -> f64 {
    if size <= 1 {
        return 1.0;
    }
    let potential_edges = size * (size - 1) / 2;
    edge_count as f64 / potential_edges as f64
}

fn mean(distances: &[u32]) -> Option<f64> {
    use statrs::statistics::Statistics;

    if distances.is_empty() {
        return None;
    }
    Some(distances.iter().map(|&d| d as f64).collect::<Vec<_>>().mean())
}

fn median(distances: &[u32]) -> Option<f64> {
    if distances.is_empty() {
        return None;
    }
    let data = Data::new(distances.iter().map(|&d| d as f64).collect::<Vec<_>>());
    Some(data.median())
}

/// Highest-degree members; ties keep member order
fn central_samples(cluster: &Cluster, graph: &ThresholdGraph) -> Vec<String> {
    if cluster.is_singleton() {
        return Vec::new();
    }

    let mut by_degree: Vec<(u32, usize)> = cluster
        .nodes
        .iter()
        .map(|&node| (node, graph.degree(node as usize)))
        .collect();
    by_degree.sort_by(|a, b| b.1.cmp(&a.1));

    by_degree
        .iter()
        .take(CENTRAL_SAMPLE_COUNT)
        .map(|&(node, _)| graph.node_id(node as usize).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::get_clusters;
    use crate::data::parse_matrix;
    use crate::graph::build_graph;

    fn star_graph() -> ThresholdGraph {
        // hub links to every leaf; leaves are far from each other
        let text = "\
,hub,l1,l2,l3,solo
hub,0,1,2,6,40
l1,1,0,20,20,40
l2,2,20,0,20,40
l3,6,20,20,0,40
solo,40,40,40,40,0
";
        let matrix = parse_matrix(text.as_bytes(), b',', "test").unwrap();
        build_graph(&matrix, 10, true)
    }

    #[test]
    fn test_star_cluster_metrics() {
        let graph = star_graph();
        let clusters = get_clusters(&graph);
        assert_eq!(clusters.len(), 2);

        let metrics = calculate_cluster_metrics(&clusters[0], &graph);
        assert_eq!(metrics.size, 4);
        assert_eq!(metrics.edge_count, 3);
        assert!((metrics.density - 0.5).abs() < 1e-9);
        assert_eq!(metrics.min_distance, Some(1));
        assert_eq!(metrics.max_distance, Some(6));
        assert!((metrics.mean_distance.unwrap() - 3.0).abs() < 1e-9);
        assert!((metrics.median_distance.unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(metrics.central_samples[0], "hub");
        assert_eq!(metrics.central_samples.len(), 4);
    }

    #[test]
    fn test_singleton_metrics() {
        let graph = star_graph();
        let all = calculate_all_metrics(&get_clusters(&graph), &graph);
        let solo = &all[1];
        assert_eq!(solo.size, 1);
        assert_eq!(solo.edge_count, 0);
        assert_eq!(solo.density, 1.0);
        assert_eq!(solo.min_distance, None);
        assert_eq!(solo.mean_distance, None);
        assert!(solo.central_samples.is_empty());
    }

    #[test]
    fn test_density() {
        assert_eq!(calculate_density(0, 0), 1.0);
        assert_eq!(calculate_density(2, 1), 1.0);
        assert!((calculate_density(3, 2) - 2.0 / 3.0).abs() < 1e-9);
    }
}
