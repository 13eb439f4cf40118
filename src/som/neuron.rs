//! A single cell of the Self-Organizing Map.

use serde::{Deserialize, Serialize};

/// A neuron in the Self-Organizing Map.
///
/// Each neuron has a position on the 2D grid and a feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    /// Row position on the grid.
    pub row: usize,
    /// Column position on the grid.
    pub col: usize,
    /// Feature vector.
    pub weights: Vec<f64>,
}

impl Neuron {
    /// Creates a new neuron with zero weights.
    pub fn new_zeros(row: usize, col: usize, feature_dim: usize) -> Self {
        Self {
            row,
            col,
            weights: vec![0.0; feature_dim],
        }
    }

    /// Computes the Euclidean distance between this neuron's weights and an input vector.
    pub fn distance(&self, input: &[f64]) -> f64 {
        self.distance_squared(input).sqrt()
    }

    /// Computes the squared Euclidean distance (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, input: &[f64]) -> f64 {
        debug_assert_eq!(
            self.weights.len(),
            input.len(),
            "Weight and input dimensions must match"
        );

        self.weights
            .iter()
            .zip(input.iter())
            .map(|(w, i)| (w - i).powi(2))
            .sum()
    }

    /// Computes the Euclidean distance between the grid positions of two neurons.
    pub fn grid_distance(&self, other: &Neuron) -> f64 {
        self.grid_distance_squared(other).sqrt()
    }

    /// Computes the squared grid distance.
    #[inline]
    pub fn grid_distance_squared(&self, other: &Neuron) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        dr * dr + dc * dc
    }

    /// Moves the weights toward an input vector.
    ///
    /// Each weight becomes `w + learning_rate * neighborhood * (input - w)`.
    pub fn update_weights(&mut self, input: &[f64], learning_rate: f64, neighborhood: f64) {
        let influence = learning_rate * neighborhood;

        for (w, i) in self.weights.iter_mut().zip(input.iter()) {
            *w += influence * (i - *w);
        }
    }
}
