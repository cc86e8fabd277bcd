//! Text report of clusters

use crate::cluster::Cluster;
use itertools::Itertools;

/// One line per cluster, numbered from 1 in the given order:
/// `Cluster #1:\tsampleA\tsampleB`. Lines are joined with `\n`.
pub fn format_clusters(clusters: &[Cluster]) -> String {
    clusters
        .iter()
        .enumerate()
        .map(|(i, cluster)| format!("Cluster #{}:\t{}", i + 1, cluster.members.iter().join("\t")))
        .join("\n")
}
