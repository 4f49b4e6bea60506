//! Labelled CSV records → training samples.
//!
//! Format (MNIST-style, one sample per line):
//! - field 0 is an integer class label in `0..n_classes`
//! - the remaining fields are intensities in `[0, 255]`
//! - an optional first line with no numeric cells is skipped as a header
//!
//! Targets use 0.01 / 0.99 instead of 0 / 1 and intensities are squeezed into
//! `[0.01, 1.0]`, so the sigmoid is never asked to reach its flat extremes.

use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::error::DataError;

const OFF_TARGET: f64 = 0.01;
const ON_TARGET: f64 = 0.99;
const MAX_INTENSITY: f64 = 255.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Sample {
        Sample { input, target }
    }
}

/// Parses a single record. Errors report the record as line 1.
pub fn parse_record(line: &str, n_classes: usize) -> Result<Sample, DataError> {
    parse_numbered(line, 1, n_classes)
}

/// Parses every non-blank line of `reader`; errors carry 1-based line numbers.
pub fn read_records<R: BufRead>(reader: R, n_classes: usize) -> Result<Vec<Sample>, DataError> {
    let mut samples = Vec::new();
    let mut seen_data = false;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !seen_data && is_header(line) {
            seen_data = true;
            continue;
        }
        seen_data = true;
        samples.push(parse_numbered(line, idx + 1, n_classes)?);
    }

    Ok(samples)
}

pub fn load_records(path: &str, n_classes: usize) -> Result<Vec<Sample>, DataError> {
    let file = File::open(path)?;
    read_records(BufReader::new(file), n_classes)
}

/// The four XOR cases in the 0.01 / 0.99 encoding.
pub fn xor_samples() -> Vec<Sample> {
    [
        ([OFF_TARGET, OFF_TARGET], OFF_TARGET),
        ([ON_TARGET, OFF_TARGET], ON_TARGET),
        ([OFF_TARGET, ON_TARGET], ON_TARGET),
        ([ON_TARGET, ON_TARGET], OFF_TARGET),
    ]
    .into_iter()
    .map(|(input, target)| Sample::new(input.to_vec(), vec![target]))
    .collect()
}

fn parse_numbered(line: &str, line_no: usize, n_classes: usize) -> Result<Sample, DataError> {
    let mut cells = line.split(',').map(str::trim);

    let label_cell = cells.next().unwrap_or_default();
    let label: usize = label_cell.parse().map_err(|_| DataError::Parse {
        line: line_no,
        message: format!("label '{label_cell}' is not a non-negative integer"),
    })?;
    if label >= n_classes {
        return Err(DataError::Label { line: line_no, label, n_classes });
    }

    let input = cells
        .map(|cell| normalise(cell, line_no))
        .collect::<Result<Vec<f64>, DataError>>()?;
    if input.is_empty() {
        return Err(DataError::Parse {
            line: line_no,
            message: "record has a label but no values".into(),
        });
    }

    let mut target = vec![OFF_TARGET; n_classes];
    target[label] = ON_TARGET;

    Ok(Sample { input, target })
}

/// `(v / 255) * 0.99 + 0.01`
fn normalise(cell: &str, line_no: usize) -> Result<f64, DataError> {
    let value: f64 = cell.parse().map_err(|_| DataError::Parse {
        line: line_no,
        message: format!("'{cell}' is not a valid number"),
    })?;
    if !(0.0..=MAX_INTENSITY).contains(&value) {
        return Err(DataError::Parse {
            line: line_no,
            message: format!("intensity {value} is outside 0..=255"),
        });
    }
    Ok(value / MAX_INTENSITY * ON_TARGET + OFF_TARGET)
}

/// A header has no numeric cells at all; a row with some numbers is data,
/// even if malformed.
fn is_header(line: &str) -> bool {
    line.split(',').all(|cell| cell.trim().parse::<f64>().is_err())
}
