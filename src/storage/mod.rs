//! Results persistence module

use crate::cluster::metrics::calculate_all_metrics;
use crate::cluster::sweep::ThresholdClustering;
use crate::cluster::ClusteringResult;
use crate::config::Config;
use crate::data::DistanceMatrix;
use crate::graph::ThresholdGraph;
use anyhow::{Context, Result};
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Degree buckets in graph_stats.json; the last one collects everything above
const DEGREE_BUCKETS: usize = 101;

/// Save clustering results to the specified directory
pub fn save_results(result: &ClusteringResult, config: &Config, output_dir: &str) -> Result<()> {
    log::info!("Saving {} clusters to {}", result.clusters.len(), output_dir);

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory '{}'", output_dir))?;

    save_report(result, output_dir)?;
    save_clusters(result, output_dir)?;
    save_summary(result, config, output_dir)?;
    save_graph_stats(&result.graph, output_dir)?;
    save_pairs(&result.matrix, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save the tab-separated cluster report
fn save_report(result: &ClusteringResult, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("clusters.txt");
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;

    let report = result.report();
    file.write_all(report.as_bytes())?;
    if !report.is_empty() {
        writeln!(file)?;
    }

    Ok(())
}

/// Save every cluster with its members and metrics
fn save_clusters(result: &ClusteringResult, output_dir: &str) -> Result<()> {
    log::debug!("Saving cluster membership and metrics");

    let path = Path::new(output_dir).join("clusters.json");
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;

    let metrics = calculate_all_metrics(&result.clusters, &result.graph);

    let clusters_json = json!({
        "threshold": result.graph.threshold,
        "clusters": result.clusters.iter().zip(&metrics).map(|(cluster, metrics)| {
            json!({
                "id": cluster.id,
                "size": cluster.size(),
                "members": cluster.members,
                "metrics": metrics,
            })
        }).collect::<Vec<_>>()
    });

    file.write_all(to_string_pretty(&clusters_json)?.as_bytes())?;

    Ok(())
}

/// Save summary information
fn save_summary(result: &ClusteringResult, config: &Config, output_dir: &str) -> Result<()> {
    log::debug!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;

    let clusters = &result.clusters;
    let clustered_samples: usize = clusters.iter().map(|c| c.size()).sum();

    let summary = json!({
        "config": {
            "delimiter": (config.delimiter as char).to_string(),
            "threshold": config.threshold,
            "include_singletons": config.include_singletons,
            "value_label": config.value_label,
        },
        "matrix_stats": {
            "label": result.matrix.label(),
            "sample_count": result.matrix.len(),
            "pair_count": result.matrix.pair_count(),
        },
        "cluster_stats": {
            "edge_count": result.graph.edge_count(),
            "cluster_count": clusters.len(),
            "singleton_count": clusters.iter().filter(|c| c.is_singleton()).count(),
            "clustered_samples": clustered_samples,
            "largest_cluster_size": clusters.iter().map(|c| c.size()).max().unwrap_or(0),
            "avg_cluster_size": clustered_samples as f64 /
                                if clusters.is_empty() { 1.0 } else { clusters.len() as f64 },
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save graph statistics
fn save_graph_stats(graph: &ThresholdGraph, output_dir: &str) -> Result<()> {
    log::debug!("Saving graph statistics");

    let path = Path::new(output_dir).join("graph_stats.json");
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;

    let avg_degree = if graph.node_count() == 0 {
        0.0
    } else {
        graph.edges.len() as f64 / graph.node_count() as f64
    };

    let stats = json!({
        "threshold": graph.threshold,
        "node_count": graph.node_count(),
        "edge_count": graph.edge_count(),
        "degree_distribution": degree_distribution(graph),
        "avg_degree": avg_degree,
    });

    file.write_all(to_string_pretty(&stats)?.as_bytes())?;

    Ok(())
}

/// Count nodes per degree, 0..=100 with 100 meaning 100 or more
pub fn degree_distribution(graph: &ThresholdGraph) -> Vec<usize> {
    let mut distribution = vec![0; DEGREE_BUCKETS];
    for node in 0..graph.node_count() {
        let bucket = std::cmp::min(graph.degree(node), DEGREE_BUCKETS - 1);
        distribution[bucket] += 1;
    }
    distribution
}

/// Save the upper triangle as a long table: sample1, sample2, <label>
fn save_pairs(matrix: &DistanceMatrix, output_dir: &str) -> Result<()> {
    log::debug!("Saving {} sample pairs", matrix.pair_count());

    let path = Path::new(output_dir).join("pairs.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;

    writer.write_record(["sample1", "sample2", matrix.label()])?;
    for pair in matrix.pairs() {
        let distance = pair.distance.to_string();
        writer.write_record([pair.sample1, pair.sample2, distance.as_str()])?;
    }
    writer.flush()?;

    Ok(())
}

/// Save the result of a threshold sweep
pub fn save_sweep(sweep: &[ThresholdClustering], output_dir: &str) -> Result<()> {
    log::info!("Saving sweep over {} thresholds to {}", sweep.len(), output_dir);

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory '{}'", output_dir))?;

    let path = Path::new(output_dir).join("sweep.json");
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;

    let sweep_json = json!({
        "thresholds": sweep.iter().map(|entry| {
            json!({
                "threshold": entry.threshold,
                "cluster_count": entry.clusters.len(),
                "largest_cluster_size": entry.largest_cluster_size(),
                "clusters": entry.clusters.iter().map(|c| &c.members).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>()
    });

    file.write_all(to_string_pretty(&sweep_json)?.as_bytes())?;

    Ok(())
}
