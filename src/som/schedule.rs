//! Exponential decay of the neighborhood radius and the learning rate.

use serde::{Deserialize, Serialize};

/// Largest step count whose neighbors are still distinct `f64` values (2^53).
const MAX_EXACT_STEP: f64 = 9_007_199_254_740_992.0;

/// Radius and learning-rate schedule of one training run.
///
/// Both quantities decay as `x0 * exp(-t / lambda)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecaySchedule {
    /// Neighborhood radius at step 0.
    pub sigma0: f64,
    /// Learning rate at step 0.
    pub initial_learning_rate: f64,
    /// Decay time constant.
    pub lambda: f64,
}

impl DecaySchedule {
    /// Creates a schedule.
    pub fn new(sigma0: f64, initial_learning_rate: f64, lambda: f64) -> Self {
        Self {
            sigma0,
            initial_learning_rate,
            lambda,
        }
    }

    #[inline]
    fn decay(&self, step: usize) -> f64 {
        (-(step as f64) / self.lambda).exp()
    }

    /// Neighborhood radius at `step`.
    #[inline]
    pub fn sigma(&self, step: usize) -> f64 {
        self.sigma0 * self.decay(step)
    }

    /// Learning rate at `step`.
    #[inline]
    pub fn learning_rate(&self, step: usize) -> f64 {
        self.initial_learning_rate * self.decay(step)
    }

    /// Gaussian neighborhood weight for a grid distance under a given radius.
    #[inline]
    pub fn theta(dist: f64, radius: f64) -> f64 {
        (-(dist * dist) / (2.0 * radius * radius)).exp()
    }

    /// Whether training stops at `step`.
    #[inline]
    pub fn is_converged(&self, step: usize) -> bool {
        self.sigma(step) < 1.0
    }

    /// First step at which the radius drops below 1.0.
    ///
    /// `None` when the schedule never gets there (non-positive or non-finite
    /// `lambda`, non-finite `sigma0`) or only gets there past 2^53 steps.
    pub fn convergence_step(&self) -> Option<usize> {
        if !self.lambda.is_finite() || self.lambda <= 0.0 || !self.sigma0.is_finite() {
            return None;
        }
        if self.sigma0 < 1.0 {
            return Some(0);
        }

        // sigma0 * exp(-t / lambda) < 1  <=>  t > lambda * ln(sigma0)
        let bound = (self.lambda * self.sigma0.ln()).floor() + 1.0;
        if !bound.is_finite() || bound >= MAX_EXACT_STEP {
            return None;
        }

        let mut step = bound as usize;
        while step > 0 && self.is_converged(step - 1) {
            step -= 1;
        }
        while !self.is_converged(step) {
            step = step.checked_add(1)?;
        }
        Some(step)
    }
}
