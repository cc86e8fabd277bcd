//! Distance matrix loading and representation

pub mod loader;
pub mod matrix;

pub use loader::{load_matrix, parse_matrix};
pub use matrix::{DistanceMatrix, PairDistance};
