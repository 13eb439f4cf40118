//! Grid initializers.

use crate::error::{DeltaGridError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};

/// How cell weights are drawn before training.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InitStrategy {
    /// Uniform in `[low, high)`.
    Uniform {
        /// Inclusive lower bound.
        low: f64,
        /// Exclusive upper bound.
        high: f64,
    },
    /// Normal distribution.
    Normal {
        /// Mean.
        mean: f64,
        /// Standard deviation.
        std_dev: f64,
    },
    /// All weights zero.
    Zeros,
}

impl Default for InitStrategy {
    fn default() -> Self {
        InitStrategy::Uniform { low: 0.0, high: 1.0 }
    }
}

impl InitStrategy {
    /// Returns a per-element sampler for this strategy.
    pub(crate) fn sampler<R: Rng + 'static>(&self) -> Result<Box<dyn FnMut(&mut R) -> f64>> {
        match *self {
            InitStrategy::Uniform { low, high } => {
                if !low.is_finite()
                    || !high.is_finite()
                    || low >= high
                    || !(high - low).is_finite()
                {
                    return Err(DeltaGridError::Config(format!(
                        "uniform initializer needs a finite span low < high, got [{}, {})",
                        low, high
                    )));
                }
                let dist = Uniform::new(low, high);
                Ok(Box::new(move |rng: &mut R| dist.sample(rng)))
            }
            InitStrategy::Normal { mean, std_dev } => {
                let dist = Normal::new(mean, std_dev)
                    .map_err(|e| DeltaGridError::Config(format!("normal initializer: {}", e)))?;
                Ok(Box::new(move |rng: &mut R| dist.sample(rng)))
            }
            InitStrategy::Zeros => Ok(Box::new(|_: &mut R| 0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_is_unit_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut sample = InitStrategy::default().sampler().unwrap();
        for _ in 0..1000 {
            let v = sample(&mut rng);
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_zeros() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut sample = InitStrategy::Zeros.sampler().unwrap();
        assert_eq!(sample(&mut rng), 0.0);
    }

    #[test]
    fn test_invalid_parameters() {
        let bad_uniform = InitStrategy::Uniform { low: 1.0, high: 1.0 };
        assert!(bad_uniform.sampler::<ChaCha8Rng>().is_err());
        let bad_normal = InitStrategy::Normal { mean: 0.0, std_dev: -1.0 };
        assert!(bad_normal.sampler::<ChaCha8Rng>().is_err());
        let overflowing = InitStrategy::Uniform { low: -1e308, high: 1e308 };
        assert!(matches!(
            overflowing.sampler::<ChaCha8Rng>(),
            Err(DeltaGridError::Config(_))
        ));
    }

    #[test]
    fn test_serde_tagged() {
        let normal = InitStrategy::Normal { mean: 0.0, std_dev: 0.1 };
        let json = serde_json::to_string(&normal).unwrap();
        assert!(json.contains("\"kind\":\"normal\""));
        let back: InitStrategy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, InitStrategy::Normal { mean: 0.0, std_dev: 0.1 });
    }
}
