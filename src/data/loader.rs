//! Delimited distance matrix parsing and validation

use crate::data::DistanceMatrix;
use crate::error::{MatrixError, Result};
use itertools::Itertools;
use ndarray::{Array2, Axis};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load a square distance matrix from a delimited text file.
///
/// The first line is a header: a placeholder field followed by one sample name
/// per column. Every following line is a sample name followed by one integer
/// distance per header column. Rows and columns are reordered by sample name,
/// then the diagonal and symmetry are checked before the upper triangle is kept.
pub fn load_matrix<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
    value_label: &str,
) -> Result<DistanceMatrix> {
    let path = path.as_ref();
    log::info!("Reading distance matrix: {}", path.display());

    let file = File::open(path).map_err(|source| MatrixError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_matrix(BufReader::new(file), delimiter, value_label)
}

/// Parse a distance matrix from any reader. See [`load_matrix`].
pub fn parse_matrix<R: Read>(
    reader: R,
    delimiter: u8,
    value_label: &str,
) -> Result<DistanceMatrix> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = csv_reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(MatrixError::Empty),
    };
    let names = parse_header(&header)?;
    let n = names.len();

    let mut values: Vec<u32> = Vec::with_capacity(n * n);
    let mut row_count = 0;

    for record in records {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        let found = record.len().saturating_sub(1);
        if found != n {
            return Err(MatrixError::RowLength {
                line,
                expected: n,
                found,
            });
        }

        if row_count < n {
            let label = record.get(0).unwrap_or_default();
            if label != names[row_count] {
                return Err(MatrixError::RowLabelMismatch {
                    line,
                    expected: names[row_count].clone(),
                    found: label.to_string(),
                });
            }
        }

        for (column, field) in names.iter().zip(record.iter().skip(1)) {
            let distance = field.parse::<u32>().map_err(|_| MatrixError::InvalidValue {
                line,
                column: column.clone(),
                value: field.to_string(),
            })?;
            values.push(distance);
        }

        row_count += 1;
    }

    if row_count != n {
        return Err(MatrixError::RowCount {
            expected: n,
            found: row_count,
        });
    }

    let raw = Array2::from_shape_vec((n, n), values)?;

    // Canonical order: rows and columns sorted by sample name
    let order: Vec<usize> = (0..n).sorted_by(|&a, &b| names[a].cmp(&names[b])).collect();
    let sorted = raw.select(Axis(0), &order).select(Axis(1), &order);
    let sorted_names: Vec<String> = order.iter().map(|&i| names[i].clone()).collect();

    check_diagonal(&sorted, &sorted_names)?;
    check_symmetry(&sorted, &sorted_names)?;

    log::debug!(
        "Loaded {} samples ({} pairs) labelled '{}'",
        n,
        n * n.saturating_sub(1) / 2,
        value_label
    );

    Ok(DistanceMatrix::from_square(sorted_names, &sorted, value_label))
}

fn parse_header(header: &csv::StringRecord) -> Result<Vec<String>> {
    let names: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

    if names.is_empty() {
        return Err(MatrixError::NoSamples);
    }

    let mut seen = HashSet::with_capacity(names.len());
    for (column, name) in names.iter().enumerate() {
        if name.is_empty() {
            return Err(MatrixError::EmptySampleName(column + 1));
        }
        if !seen.insert(name.as_str()) {
            return Err(MatrixError::DuplicateSample(name.clone()));
        }
    }

    Ok(names)
}

fn check_diagonal(matrix: &Array2<u32>, names: &[String]) -> Result<()> {
    match matrix.diag().iter().position(|&value| value != 0) {
        Some(i) => Err(MatrixError::NonZeroDiagonal {
            sample: names[i].clone(),
            value: matrix[[i, i]],
        }),
        None => Ok(()),
    }
}

fn check_symmetry(matrix: &Array2<u32>, names: &[String]) -> Result<()> {
    let n = names.len();
    for (i, j) in (0..n).tuple_combinations() {
        let ab = matrix[[i, j]];
        let ba = matrix[[j, i]];
        if ab != ba {
            return Err(MatrixError::Asymmetric {
                a: names[i].clone(),
                b: names[j].clone(),
                ab,
                ba,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    fn parse(text: &str) -> Result<DistanceMatrix> {
        parse_matrix(text.as_bytes(), b',', "test")
    }

    #[test]
    fn test_parse_example_matrix() {
        let matrix = parse(",sampleA,sampleB,sampleC\nsampleA,0,5,12\nsampleB,5,0,9\nsampleC,12,9,0\n").unwrap();
        assert_eq!(matrix.samples(), &["sampleA", "sampleB", "sampleC"]);
        assert_eq!(matrix.label(), "test");
        assert_eq!(matrix.distance("sampleA", "sampleB"), Some(5));
        assert_eq!(matrix.distance("sampleC", "sampleA"), Some(12));
        assert_eq!(matrix.distance("sampleB", "sampleC"), Some(9));
        assert_eq!(matrix.pair_count(), 3);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let ordered = parse(",A,B,C\nA,0,2,10\nB,2,0,9\nC,10,9,0").unwrap();
        let shuffled = parse(",C,A,B\nC,0,10,9\nA,10,0,2\nB,9,2,0").unwrap();
        assert_eq!(ordered, shuffled);
        assert_eq!(shuffled.samples(), &["A", "B", "C"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let matrix = parse_matrix("\tx\ty\nx\t0\t3\ny\t3\t0\n".as_bytes(), b'\t', "tsv").unwrap();
        assert_eq!(matrix.distance("x", "y"), Some(3));
    }

    #[test]
    fn test_rejects_non_zero_diagonal() {
        let err = parse(",A,B\nA,1,5\nB,5,0").unwrap_err();
        assert!(matches!(
            err,
            MatrixError::NonZeroDiagonal { ref sample, value: 1 } if sample == "A"
        ));
        assert_eq!(err.kind(), ErrorKind::MalformedMatrix);
    }

    #[test]
    fn test_rejects_asymmetric_matrix() {
        let err = parse(",A,B\nA,0,5\nB,6,0").unwrap_err();
        match &err {
            MatrixError::Asymmetric { a, b, ab, ba } => {
                assert_eq!((a.as_str(), b.as_str(), *ab, *ba), ("A", "B", 5, 6));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.is_malformed());
    }

    #[test]
    fn test_rejects_short_and_long_rows() {
        let short = parse(",A,B\nA,0\nB,5,0").unwrap_err();
        assert!(matches!(short, MatrixError::RowLength { line: 2, expected: 2, found: 1 }));
        assert_eq!(short.kind(), ErrorKind::RowShape);

        let long = parse(",A,B\nA,0,5\nB,5,0,7").unwrap_err();
        assert!(matches!(long, MatrixError::RowLength { line: 3, expected: 2, found: 3 }));
    }

    #[test]
    fn test_rejects_wrong_row_count() {
        let err = parse(",A,B,C\nA,0,1,2\nB,1,0,3").unwrap_err();
        assert!(matches!(err, MatrixError::RowCount { expected: 3, found: 2 }));
        assert_eq!(err.kind(), ErrorKind::RowShape);
    }

    #[test]
    fn test_rejects_empty_input_and_bad_header() {
        assert!(matches!(parse("").unwrap_err(), MatrixError::Empty));
        assert!(matches!(parse("placeholder\n").unwrap_err(), MatrixError::NoSamples));
        assert!(matches!(parse(",A,,B\n").unwrap_err(), MatrixError::EmptySampleName(2)));
        assert_eq!(parse("").unwrap_err().kind(), ErrorKind::InputFormat);
    }

    #[test]
    fn test_rejects_duplicate_samples() {
        let err = parse(",A,A\nA,0,1\nA,1,0").unwrap_err();
        assert!(matches!(err, MatrixError::DuplicateSample(ref name) if name == "A"));
    }

    #[test]
    fn test_rejects_mislabelled_row() {
        let err = parse(",A,B\nB,0,5\nA,5,0").unwrap_err();
        assert!(matches!(err, MatrixError::RowLabelMismatch { line: 2, .. }));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let negative = parse(",A,B\nA,0,-5\nB,-5,0").unwrap_err();
        assert!(matches!(negative, MatrixError::InvalidValue { ref column, .. } if column == "B"));

        let fractional = parse(",A,B\nA,0,1.5\nB,1.5,0").unwrap_err();
        assert_eq!(fractional.kind(), ErrorKind::InputFormat);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ",s2,s1\ns2,0,4\ns1,4,0\n").unwrap();
        file.flush().unwrap();

        let first = load_matrix(file.path(), b',', "nanopore").unwrap();
        let second = load_matrix(file.path(), b',', "nanopore").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.samples(), &["s1", "s2"]);
        assert_eq!(first.distance("s1", "s2"), Some(4));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_matrix(dir.path().join("missing.csv"), b',', "x").unwrap_err();
        assert!(matches!(err, MatrixError::Io { .. }));
        assert_eq!(err.kind(), ErrorKind::InputFormat);
    }
}
