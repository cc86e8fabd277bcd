//! Error types for matrix loading

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Broad category of a loading failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unreadable file, empty input or unparsable content
    InputFormat,
    /// The values parse but violate the zero-diagonal or symmetry invariants
    MalformedMatrix,
    /// Wrong number of values in a row, or wrong number of rows
    RowShape,
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("failed to read distance matrix '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("distance matrix is empty")]
    Empty,

    #[error("distance matrix header has no sample names")]
    NoSamples,

    #[error("header column {0} has an empty sample name")]
    EmptySampleName(usize),

    #[error("sample '{0}' appears more than once in the header")]
    DuplicateSample(String),

    #[error("line {line}: row is labelled '{found}' but the header expects '{expected}'")]
    RowLabelMismatch {
        line: u64,
        expected: String,
        found: String,
    },

    #[error("line {line}, column '{column}': '{value}' is not a non-negative integer distance")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    #[error("line {line}: row has {found} values, expected {expected}")]
    RowLength {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("matrix has {found} data rows, expected {expected}")]
    RowCount { expected: usize, found: usize },

    #[error("distance matrix diagonal is not all zero: '{sample}' has self-distance {value}")]
    NonZeroDiagonal { sample: String, value: u32 },

    #[error("distance matrix is not symmetric: {a}->{b} is {ab} but {b}->{a} is {ba}")]
    Asymmetric {
        a: String,
        b: String,
        ab: u32,
        ba: u32,
    },

    #[error("matrix shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::Io { .. }
            | MatrixError::Csv(_)
            | MatrixError::Empty
            | MatrixError::NoSamples
            | MatrixError::EmptySampleName(_)
            | MatrixError::DuplicateSample(_)
            | MatrixError::RowLabelMismatch { .. }
            | MatrixError::InvalidValue { .. } => ErrorKind::InputFormat,
            MatrixError::NonZeroDiagonal { .. } | MatrixError::Asymmetric { .. } => {
                ErrorKind::MalformedMatrix
            }
            MatrixError::RowLength { .. } | MatrixError::RowCount { .. } | MatrixError::Shape(_) => {
                ErrorKind::RowShape
            }
        }
    }

    /// True for the two validation failures that point at a corrupted upstream computation
    pub fn is_malformed(&self) -> bool {
        self.kind() == ErrorKind::MalformedMatrix
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;
