//! Clustering one matrix at several thresholds

use crate::cluster::{get_clusters, Cluster};
use crate::data::DistanceMatrix;
use crate::graph::build_graph;
use rayon::prelude::*;
use serde::Serialize;

/// Clusters obtained at a single threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThresholdClustering {
    pub threshold: u32,
    pub clusters: Vec<Cluster>,
}

impl ThresholdClustering {
    pub fn largest_cluster_size(&self) -> usize {
        self.clusters.iter().map(Cluster::size).max().unwrap_or(0)
    }
}

/// Cluster `matrix` at every distinct threshold in parallel.
///
/// Results are sorted by threshold. Each threshold builds its own graph, so the
/// output matches running the pipeline once per threshold.
pub fn threshold_sweep(
    matrix: &DistanceMatrix,
    thresholds: &[u32],
    include_singletons: bool,
) -> Vec<ThresholdClustering> {
    let mut thresholds = thresholds.to_vec();
    thresholds.sort_unstable();
    thresholds.dedup();

    log::info!(
        "Sweeping {} thresholds over {} samples",
        thresholds.len(),
        matrix.len()
    );

    thresholds
        .into_par_iter()
        .map(|threshold| {
            let graph = build_graph(matrix, threshold, include_singletons);
            ThresholdClustering {
                threshold,
                clusters: get_clusters(&graph),
            }
        })
        .collect()
}
