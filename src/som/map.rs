//! Self-Organizing Map grid.

use crate::config::SomConfig;
use crate::error::{DeltaGridError, Result};
use crate::som::{DecaySchedule, InitStrategy, Neuron};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A Self-Organizing Map.
///
/// A `height x width` grid of neurons, each holding a feature vector of
/// `feature_dim` values. The grid shape never changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Som {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
    /// Feature vector dimensionality.
    pub feature_dim: usize,
    /// The neurons in the grid (row-major order).
    pub neurons: Vec<Neuron>,
}

/// A copy of the grid weights at one point of training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
    /// Feature vector dimensionality.
    pub feature_dim: usize,
    /// Flattened weights, row-major, `feature_dim` values per cell.
    pub weights: Vec<f64>,
}

impl GridSnapshot {
    /// Feature vector of the cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&[f64]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let offset = (row * self.width + col) * self.feature_dim;
        Some(&self.weights[offset..offset + self.feature_dim])
    }
}

impl Som {
    /// Creates a new SOM with zero-initialized weights.
    pub fn new(height: usize, width: usize, feature_dim: usize) -> Self {
        let neurons: Vec<Neuron> = (0..height * width)
            .map(|i| Neuron::new_zeros(i / width, i % width, feature_dim))
            .collect();

        Self {
            height,
            width,
            feature_dim,
            neurons,
        }
    }

    /// Creates a zeroed SOM with the grid shape of a configuration.
    pub fn from_config(config: &SomConfig) -> Self {
        Self::new(config.height, config.width, config.feature_dim)
    }

    /// Returns the total number of neurons.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.neurons.len()
    }

    /// Gets a neuron by its 2D position.
    #[inline]
    pub fn get_at(&self, row: usize, col: usize) -> Option<&Neuron> {
        if row < self.height && col < self.width {
            Some(&self.neurons[row * self.width + col])
        } else {
            None
        }
    }

    /// Gets a mutable reference to a neuron by its 2D position.
    #[inline]
    pub fn get_at_mut(&mut self, row: usize, col: usize) -> Option<&mut Neuron> {
        if row < self.height && col < self.width {
            Some(&mut self.neurons[row * self.width + col])
        } else {
            None
        }
    }

    /// Draws every weight from an initialization strategy.
    pub fn init<R: Rng + 'static>(&mut self, strategy: &InitStrategy, rng: &mut R) -> Result<()> {
        let mut sample = strategy.sampler::<R>()?;
        self.init_with(rng, |_, _, _, rng| sample(rng));
        Ok(())
    }

    /// Sets every weight from a caller-supplied initializer.
    ///
    /// The initializer receives `(row, col, feature, rng)` and is called in
    /// row-major cell order, features innermost.
    pub fn init_with<R, F>(&mut self, rng: &mut R, mut init: F)
    where
        R: Rng,
        F: FnMut(usize, usize, usize, &mut R) -> f64,
    {
        for neuron in &mut self.neurons {
            let (row, col) = (neuron.row, neuron.col);
            for (feature, w) in neuron.weights.iter_mut().enumerate() {
                *w = init(row, col, feature, &mut *rng);
            }
        }
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.feature_dim {
            return Err(DeltaGridError::DimensionMismatch {
                expected: self.feature_dim,
                actual: input.len(),
            });
        }
        if self.neurons.is_empty() {
            return Err(DeltaGridError::Som("Empty SOM".to_string()));
        }
        Ok(())
    }

    /// Finds the Best Matching Unit (BMU) for an input vector.
    ///
    /// Returns the row-major index of the neuron closest to `input`. Ties go
    /// to the lowest index, so this is always the head of [`Som::find_bmus`].
    pub fn find_bmu(&self, input: &[f64]) -> Result<usize> {
        self.check_input(input)?;

        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;
        for (i, neuron) in self.neurons.iter().enumerate() {
            let dist = neuron.distance(input);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        Ok(best_idx)
    }

    /// Ranks every neuron by its distance to `input`.
    ///
    /// Returns `(index, distance)` pairs sorted by distance; equal distances
    /// keep row-major order.
    pub fn find_bmus(&self, input: &[f64]) -> Result<Vec<(usize, f64)>> {
        self.check_input(input)?;

        let mut distances: Vec<(usize, f64)> = self
            .neurons
            .iter()
            .enumerate()
            .map(|(i, n)| (i, n.distance(input)))
            .collect();

        distances.sort_by(|a, b| a.1.total_cmp(&b.1));

        Ok(distances)
    }

    /// Gaussian neighborhood weight of a neuron relative to the BMU.
    pub fn neighborhood(&self, bmu_idx: usize, neuron_idx: usize, radius: f64) -> f64 {
        let dist = self.neurons[bmu_idx].grid_distance(&self.neurons[neuron_idx]);
        DecaySchedule::theta(dist, radius)
    }

    /// Pulls every neuron toward `input`.
    ///
    /// Each neuron moves by `theta * learning_rate * (input - w)`, where
    /// `theta` is its Gaussian neighborhood weight around `bmu_idx`.
    pub fn update(&mut self, input: &[f64], bmu_idx: usize, learning_rate: f64, radius: f64) {
        for idx in 0..self.neurons.len() {
            let theta = self.neighborhood(bmu_idx, idx, radius);
            self.neurons[idx].update_weights(input, learning_rate, theta);
        }
    }

    /// Copies the current weights.
    pub fn snapshot(&self) -> GridSnapshot {
        let mut weights = Vec::with_capacity(self.neurons.len() * self.feature_dim);
        for neuron in &self.neurons {
            weights.extend_from_slice(&neuron.weights);
        }

        GridSnapshot {
            height: self.height,
            width: self.width,
            feature_dim: self.feature_dim,
            weights,
        }
    }

    /// Converts a row-major index to 2D coordinates.
    #[inline]
    pub fn index_to_coords(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }
}
