//! Linking samples whose distance is within a threshold

use crate::data::DistanceMatrix;
use crate::graph::builder::GraphBuilder;
use crate::graph::ThresholdGraph;

/// Build the graph linking every pair of samples with `distance <= threshold`.
///
/// With `include_singletons`, every sample in the matrix becomes a node even
/// when it has no qualifying link; otherwise only linked samples appear.
pub fn build_graph(
    matrix: &DistanceMatrix,
    threshold: u32,
    include_singletons: bool,
) -> ThresholdGraph {
    log::debug!(
        "Building threshold graph over {} samples at distance <= {}",
        matrix.len(),
        threshold
    );

    let mut builder = GraphBuilder::with_capacity(threshold, matrix.len());

    if include_singletons {
        for sample in matrix.samples() {
            builder.get_or_create_node(sample);
        }
    }

    for pair in matrix.pairs().filter(|pair| pair.distance <= threshold) {
        builder.add_edge(pair.sample1, pair.sample2, pair.distance);
    }

    let graph = builder.build();

    log::debug!(
        "Threshold graph has {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_matrix;

    fn abc_matrix() -> DistanceMatrix {
        parse_matrix(",A,B,C\nA,0,2,10\nB,2,0,9\nC,10,9,0\n".as_bytes(), b',', "test").unwrap()
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let matrix = abc_matrix();

        let at = build_graph(&matrix, 9, false);
        let b = at.node_index("B").unwrap();
        let c = at.node_index("C").unwrap() as u32;
        assert!(at.has_edge(b, c));
        assert_eq!(at.edge_weight(b, c), Some(9));

        let below = build_graph(&matrix, 8, false);
        let b = below.node_index("B").unwrap();
        assert!(below.node_index("C").is_none());
        assert_eq!(below.degree(b), 1);
    }

    #[test]
    fn test_singletons_are_optional() {
        let matrix = abc_matrix();

        let with = build_graph(&matrix, 3, true);
        assert_eq!(with.node_ids(), &["A", "B", "C"]);
        assert_eq!(with.edge_count(), 1);
        assert_eq!(with.degree(with.node_index("C").unwrap()), 0);

        let without = build_graph(&matrix, 3, false);
        assert_eq!(without.node_ids(), &["A", "B"]);
        assert_eq!(without.edge_count(), 1);
    }

    #[test]
    fn test_edges_listed_once() {
        let matrix = abc_matrix();
        let graph = build_graph(&matrix, 100, true);
        let edges: Vec<(u32, u32, u32)> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 1, 2), (0, 2, 10), (1, 2, 9)]);
    }

    #[test]
    fn test_fresh_graph_per_call() {
        let matrix = abc_matrix();
        let first = build_graph(&matrix, 3, true);
        let _wider = build_graph(&matrix, 100, true);
        let again = build_graph(&matrix, 3, true);
        assert_eq!(first, again);
        assert_eq!(first.threshold, 3);
    }

    #[test]
    fn test_no_edges_without_singletons_is_empty() {
        let matrix = abc_matrix();
        let graph = build_graph(&matrix, 0, false);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}
