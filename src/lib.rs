//! Threshold clustering of samples from a pairwise distance matrix
//!
//! The pipeline runs one way: a delimited matrix file is loaded into a
//! validated [`DistanceMatrix`], pairs at or below a threshold become edges of a
//! [`ThresholdGraph`], and the connected components of that graph are the
//! clusters reported by [`format_clusters`].

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod storage;

pub use cluster::{cluster_matrix_file, format_clusters, get_clusters, Cluster, ClusteringResult};
pub use config::Config;
pub use data::{load_matrix, DistanceMatrix};
pub use error::{ErrorKind, MatrixError, Result};
pub use graph::{build_graph, ThresholdGraph};
