//! Configuration for the difference engine, the SOM trainer and the renderer.

use crate::diff::DiffRule;
use crate::error::{DeltaGridError, Result};
use crate::som::{DecaySchedule, InitStrategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration.
///
/// Every section and field falls back to its default when missing from a
/// configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Iterated difference configuration.
    pub diff: DiffConfig,

    /// Self-Organizing Map configuration.
    pub som: SomConfig,

    /// Frame rendering configuration.
    pub render: RenderConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// Iterated difference configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Upper bound (inclusive) of the primes fed to the engine.
    /// Default: 10,000.
    pub prime_limit: u64,

    /// Difference operator.
    /// Default: plain.
    pub rule: DiffRule,

    /// Directory receiving the numbered frames.
    /// Default: "frames".
    pub output_dir: PathBuf,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            prime_limit: 10_000,
            rule: DiffRule::Plain,
            output_dir: PathBuf::from("frames"),
        }
    }
}

/// Self-Organizing Map configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SomConfig {
    /// Number of grid rows.
    /// Default: 20.
    pub height: usize,

    /// Number of grid columns.
    /// Default: 20.
    pub width: usize,

    /// Dimensionality of each cell's feature vector.
    /// Default: 3 (RGB colors).
    pub feature_dim: usize,

    /// Initial neighborhood radius.
    /// Default: 10.0.
    pub sigma0: f64,

    /// Initial learning rate.
    /// Default: 0.1.
    pub initial_learning_rate: f64,

    /// Decay time constant shared by the radius and the learning rate.
    /// Default: 100.0.
    pub lambda: f64,

    /// Hard cap on the number of training steps.
    /// Default: 100,000.
    pub max_steps: usize,

    /// Grid initializer used at the start of training.
    /// Default: uniform in [0, 1).
    pub init: InitStrategy,

    /// Snapshot the grid after every step.
    /// Default: false.
    pub keep_history: bool,

    /// Log `t`, `sigma` and `lr` while training.
    /// Default: true.
    pub print_progress: bool,

    /// Steps between two progress lines.
    /// Default: 50.
    pub progress_interval: usize,

    /// Random seed for reproducibility.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            height: 20,
            width: 20,
            feature_dim: 3,
            sigma0: 10.0,
            initial_learning_rate: 0.1,
            lambda: 100.0,
            max_steps: 100_000,
            init: InitStrategy::default(),
            keep_history: false,
            print_progress: true,
            progress_interval: 50,
            seed: None,
        }
    }
}

impl SomConfig {
    /// Returns the total number of cells in the grid.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.height * self.width
    }

    /// Returns the decay schedule described by this configuration.
    pub fn schedule(&self) -> DecaySchedule {
        DecaySchedule::new(self.sigma0, self.initial_learning_rate, self.lambda)
    }

    /// Checks that training with this configuration is well defined.
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(DeltaGridError::Config(format!(
                "grid must have at least one cell, got {}x{}",
                self.height, self.width
            )));
        }
        if self.feature_dim == 0 {
            return Err(DeltaGridError::Config(
                "feature dimension must be positive".to_string(),
            ));
        }
        if !self.lambda.is_finite() || self.lambda <= 0.0 {
            return Err(DeltaGridError::Config(format!(
                "lambda must be finite and positive, got {}",
                self.lambda
            )));
        }
        if !self.sigma0.is_finite() || !self.initial_learning_rate.is_finite() {
            return Err(DeltaGridError::Config(
                "sigma0 and the initial learning rate must be finite".to_string(),
            ));
        }
        if self.progress_interval == 0 {
            return Err(DeltaGridError::Config(
                "progress interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Frame rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels.
    /// Default: 2000.
    pub width: u32,

    /// Image height in pixels.
    /// Default: 1000.
    pub height: u32,

    /// Blank border around the plot area in pixels.
    /// Default: 80.
    pub margin: u32,

    /// Radius of a point marker in pixels.
    /// Default: 3.
    pub marker_radius: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 1000,
            margin: 80,
            marker_radius: 3,
        }
    }
}
