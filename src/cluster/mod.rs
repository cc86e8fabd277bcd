//! Cluster analysis module

pub mod detection;
pub mod format;
pub mod metrics;
pub mod sweep;

pub use detection::get_clusters;
pub use format::format_clusters;

use crate::config::Config;
use crate::data::{load_matrix, DistanceMatrix};
use crate::error::Result;
use crate::graph::{build_graph, ThresholdGraph};
use serde::Serialize;
use std::path::Path;

/// A connected component of the threshold graph: a putative transmission group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    /// 1-based position in extraction order
    pub id: usize,

    /// Sample names, sorted
    pub members: Vec<String>,

    /// Node indices in the graph the cluster was extracted from
    #[serde(skip)]
    pub nodes: Vec<u32>,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    pub fn contains(&self, sample: &str) -> bool {
        self.members
            .binary_search_by(|probe| probe.as_str().cmp(sample))
            .is_ok()
    }
}

/// Everything produced by one clustering run
#[derive(Debug, Clone)]
pub struct ClusteringResult {
    pub matrix: DistanceMatrix,
    pub graph: ThresholdGraph,
    pub clusters: Vec<Cluster>,
}

impl ClusteringResult {
    /// Cluster an already loaded matrix
    pub fn from_matrix(matrix: DistanceMatrix, threshold: u32, include_singletons: bool) -> Self {
        let graph = build_graph(&matrix, threshold, include_singletons);
        let clusters = get_clusters(&graph);
        Self {
            matrix,
            graph,
            clusters,
        }
    }

    /// Render the clusters as the tab-separated text report
    pub fn report(&self) -> String {
        format_clusters(&self.clusters)
    }
}

/// Load a matrix file and cluster it with the given configuration
pub fn cluster_matrix_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<ClusteringResult> {
    let matrix = load_matrix(path, config.delimiter, &config.value_label)?;
    log::info!(
        "Clustering {} samples at threshold {} (singletons {})",
        matrix.len(),
        config.threshold,
        if config.include_singletons { "included" } else { "excluded" }
    );

    let result = ClusteringResult::from_matrix(matrix, config.threshold, config.include_singletons);
    log::info!("Found {} clusters", result.clusters.len());

    Ok(result)
}
