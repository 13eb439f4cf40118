//! Training data helpers.

use crate::error::{DeltaGridError, Result};
use rand::Rng;
use std::path::Path;

/// Parses feature vectors, one per line.
///
/// Values are separated by commas and/or whitespace. Blank lines and lines
/// starting with `#` are skipped. All vectors must have the same length.
pub fn parse_vectors(text: &str) -> Result<Vec<Vec<f64>>> {
    let mut vectors: Vec<Vec<f64>> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let vector = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .map(|field| {
                field.parse::<f64>().map_err(|e| {
                    DeltaGridError::Parse(format!("line {}: '{}': {}", line_no + 1, field, e))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        if let Some(first) = vectors.first() {
            if first.len() != vector.len() {
                return Err(DeltaGridError::Parse(format!(
                    "line {}: expected {} values, found {}",
                    line_no + 1,
                    first.len(),
                    vector.len()
                )));
            }
        }
        vectors.push(vector);
    }

    Ok(vectors)
}

/// Reads feature vectors from a file. See [`parse_vectors`].
pub fn load_vectors(path: &Path) -> Result<Vec<Vec<f64>>> {
    let content = std::fs::read_to_string(path)?;
    parse_vectors(&content)
}

/// Draws `count` random RGB colors with channels in `[0, 1)`.
pub fn random_colors<R: Rng>(count: usize, rng: &mut R) -> Vec<Vec<f64>> {
    (0..count)
        .map(|_| (0..3).map(|_| rng.gen::<f64>()).collect())
        .collect()
}
