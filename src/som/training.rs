//! Online SOM training.
//!
//! Each step samples one training vector uniformly with replacement, finds
//! its BMU and updates the whole grid with the current radius and learning
//! rate. Training stops as soon as the radius falls below 1.0, or when the
//! configured step budget runs out.

use crate::config::SomConfig;
use crate::error::{DeltaGridError, Result};
use crate::som::{DecaySchedule, GridSnapshot, Som};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Radius below which training stops.
pub const CONVERGENCE_RADIUS: f64 = 1.0;

/// Why a training run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The neighborhood radius decayed below [`CONVERGENCE_RADIUS`].
    Converged,
    /// `max_steps` updates were applied before the radius got there.
    StepBudgetExhausted,
}

/// State of one completed training step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Step counter `t`.
    pub step: usize,
    /// Neighborhood radius used by this step.
    pub sigma: f64,
    /// Learning rate used by this step.
    pub learning_rate: f64,
    /// Row-major index of the BMU.
    pub bmu: usize,
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Number of updates applied.
    pub steps: usize,
    /// Why training ended.
    pub stop: StopReason,
    /// Radius at the final step counter.
    pub final_sigma: f64,
    /// Learning rate at the final step counter.
    pub final_learning_rate: f64,
    /// Grid after initialization and after every step, when history is kept.
    pub history: Vec<GridSnapshot>,
}

/// SOM trainer with configurable hyperparameters.
pub struct SomTrainer {
    config: SomConfig,
    rng: ChaCha8Rng,
}

impl SomTrainer {
    /// Creates a new trainer with the given configuration.
    pub fn new(config: SomConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self { config, rng }
    }

    /// The trainer's configuration.
    pub fn config(&self) -> &SomConfig {
        &self.config
    }

    /// The decay schedule used for training.
    pub fn schedule(&self) -> DecaySchedule {
        self.config.schedule()
    }

    /// Initializes `som` with the configured strategy and trains it on `data`.
    pub fn train(&mut self, som: &mut Som, data: &[Vec<f64>]) -> Result<TrainingOutcome> {
        self.train_observed(som, data, |_| {})
    }

    /// Like [`SomTrainer::train`], calling `observer` after every step.
    pub fn train_observed<O>(
        &mut self,
        som: &mut Som,
        data: &[Vec<f64>],
        observer: O,
    ) -> Result<TrainingOutcome>
    where
        O: FnMut(&StepReport),
    {
        self.check(som, data)?;
        let strategy = self.config.init;
        som.init(&strategy, &mut self.rng)?;
        self.run(som, data, observer)
    }

    /// Trains `som` after initializing it with a caller-supplied initializer.
    ///
    /// The initializer receives `(row, col, feature, rng)`.
    pub fn train_with_initializer<F>(
        &mut self,
        som: &mut Som,
        data: &[Vec<f64>],
        init: F,
    ) -> Result<TrainingOutcome>
    where
        F: FnMut(usize, usize, usize, &mut ChaCha8Rng) -> f64,
    {
        self.check(som, data)?;
        som.init_with(&mut self.rng, init);
        self.run(som, data, |_| {})
    }

    fn check(&self, som: &Som, data: &[Vec<f64>]) -> Result<()> {
        self.config.validate()?;

        if som.total_neurons() == 0 {
            return Err(DeltaGridError::Som("Empty SOM".to_string()));
        }
        if data.is_empty() {
            return Err(DeltaGridError::EmptyInput(
                "No training vectors provided".to_string(),
            ));
        }
        if let Some(bad) = data.iter().find(|d| d.len() != som.feature_dim) {
            return Err(DeltaGridError::DimensionMismatch {
                expected: som.feature_dim,
                actual: bad.len(),
            });
        }
        Ok(())
    }

    fn run<O>(
        &mut self,
        som: &mut Som,
        data: &[Vec<f64>],
        mut observer: O,
    ) -> Result<TrainingOutcome>
    where
        O: FnMut(&StepReport),
    {
        let schedule = self.config.schedule();
        let keep_history = self.config.keep_history;
        let mut history = Vec::new();
        if keep_history {
            history.push(som.snapshot());
        }

        info!(
            "Starting SOM training: {}x{} grid, {} samples, sigma0={}, lr0={}, lambda={}",
            som.height,
            som.width,
            data.len(),
            schedule.sigma0,
            schedule.initial_learning_rate,
            schedule.lambda
        );

        let mut step = 0;
        loop {
            let sigma = schedule.sigma(step);
            let lr = schedule.learning_rate(step);
            let converged = sigma < CONVERGENCE_RADIUS;

            let periodic =
                self.config.print_progress && step % self.config.progress_interval == 0;
            if converged || periodic {
                info!("t: {} sigma: {:.4} lr: {:.6}", step, sigma, lr);
            }

            let stop = if converged {
                Some(StopReason::Converged)
            } else if step >= self.config.max_steps {
                Some(StopReason::StepBudgetExhausted)
            } else {
                None
            };

            if let Some(stop) = stop {
                match stop {
                    StopReason::Converged => info!("SOM training converged after {} steps", step),
                    StopReason::StepBudgetExhausted => warn!(
                        "SOM training hit the step budget of {} with sigma={:.4}",
                        self.config.max_steps, sigma
                    ),
                }
                return Ok(TrainingOutcome {
                    steps: step,
                    stop,
                    final_sigma: sigma,
                    final_learning_rate: lr,
                    history,
                });
            }

            let sample = &data[self.rng.gen_range(0..data.len())];
            let bmu = som.find_bmu(sample)?;
            som.update(sample, bmu, lr, sigma);
            debug!("t: {} bmu: {:?}", step, som.index_to_coords(bmu));

            if keep_history {
                history.push(som.snapshot());
            }

            observer(&StepReport {
                step,
                sigma,
                learning_rate: lr,
                bmu,
            });

            step += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::som::InitStrategy;

    fn test_config() -> SomConfig {
        SomConfig {
            height: 5,
            width: 5,
            feature_dim: 3,
            sigma0: 3.0,
            initial_learning_rate: 0.5,
            lambda: 50.0,
            seed: Some(42),
            print_progress: false,
            ..Default::default()
        }
    }

    fn colors() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ]
    }

    #[test]
    fn test_train_converges() {
        let config = test_config();
        let expected = config.schedule().convergence_step().unwrap();
        let mut som = Som::from_config(&config);
        let mut trainer = SomTrainer::new(config);

        let outcome = trainer.train(&mut som, &colors()).unwrap();
        assert_eq!(outcome.stop, StopReason::Converged);
        assert_eq!(outcome.steps, expected);
        assert!(outcome.final_sigma < 1.0);
        assert!(outcome.history.is_empty());
    }

    #[test]
    fn test_training_reduces_quantization_error() {
        let config = test_config();
        let data = colors();
        let mut som = Som::from_config(&config);
        let mut trainer = SomTrainer::new(config.clone());

        let mut initial = Som::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        initial.init(&config.init, &mut rng).unwrap();

        trainer.train(&mut som, &data).unwrap();

        let error = |som: &Som| -> f64 {
            data.iter()
                .map(|d| som.find_bmus(d).unwrap()[0].1)
                .sum::<f64>()
        };
        assert_eq!(som.neurons.len(), initial.neurons.len());
        assert!(error(&som) < error(&initial));
    }

    #[test]
    fn test_single_cell_moves_by_learning_rate() {
        let config = SomConfig {
            height: 1,
            width: 1,
            feature_dim: 2,
            keep_history: true,
            init: InitStrategy::Zeros,
            ..test_config()
        };
        let schedule = config.schedule();
        let mut som = Som::from_config(&config);
        let mut trainer = SomTrainer::new(config);
        let data = vec![vec![4.0, -2.0]];

        let outcome = trainer.train(&mut som, &data).unwrap();
        assert_eq!(outcome.history.len(), outcome.steps + 1);

        for t in 0..outcome.steps {
            let before = &outcome.history[t].weights;
            let after = &outcome.history[t + 1].weights;
            for f in 0..2 {
                let expected = before[f] + schedule.learning_rate(t) * (data[0][f] - before[f]);
                assert!((after[f] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            let config = test_config();
            let mut som = Som::from_config(&config);
            let mut bmus = Vec::new();
            SomTrainer::new(config)
                .train_observed(&mut som, &colors(), |r| bmus.push(r.bmu))
                .unwrap();
            (som, bmus)
        };

        let (som1, bmus1) = run();
        let (som2, bmus2) = run();
        assert_eq!(bmus1, bmus2);
        assert_eq!(som1, som2);
    }

    #[test]
    fn test_observer_sees_decaying_schedule() {
        let config = test_config();
        let mut som = Som::from_config(&config);
        let mut reports = Vec::new();
        SomTrainer::new(config)
            .train_observed(&mut som, &colors(), |r| reports.push(*r))
            .unwrap();

        assert_eq!(reports[0].step, 0);
        assert!((reports[0].sigma - 3.0).abs() < 1e-12);
        for pair in reports.windows(2) {
            assert_eq!(pair[1].step, pair[0].step + 1);
            assert!(pair[1].sigma < pair[0].sigma);
            assert!(pair[1].learning_rate < pair[0].learning_rate);
        }
    }

    #[test]
    fn test_step_budget() {
        let config = SomConfig {
            lambda: 1e12,
            max_steps: 7,
            ..test_config()
        };
        let mut som = Som::from_config(&config);
        let outcome = SomTrainer::new(config).train(&mut som, &colors()).unwrap();
        assert_eq!(outcome.stop, StopReason::StepBudgetExhausted);
        assert_eq!(outcome.steps, 7);
    }

    #[test]
    fn test_huge_lambda_is_bounded_by_budget() {
        let config = SomConfig {
            lambda: 1e19,
            max_steps: 12,
            ..test_config()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.schedule().convergence_step(), None);

        let mut som = Som::from_config(&config);
        let outcome = SomTrainer::new(config).train(&mut som, &colors()).unwrap();
        assert_eq!(outcome.stop, StopReason::StepBudgetExhausted);
        assert_eq!(outcome.steps, 12);
    }

    #[test]
    fn test_overflowing_uniform_span_is_an_error() {
        let config = SomConfig {
            init: InitStrategy::Uniform { low: -1e308, high: 1e308 },
            ..test_config()
        };
        let mut som = Som::from_config(&config);
        assert!(matches!(
            SomTrainer::new(config).train(&mut som, &colors()),
            Err(DeltaGridError::Config(_))
        ));
    }

    #[test]
    fn test_small_sigma0_stops_immediately() {
        let config = SomConfig {
            sigma0: 0.9,
            keep_history: true,
            ..test_config()
        };
        let mut som = Som::from_config(&config);
        let outcome = SomTrainer::new(config).train(&mut som, &colors()).unwrap();
        assert_eq!(outcome.steps, 0);
        assert_eq!(outcome.history.len(), 1);
        assert_eq!(outcome.history[0], som.snapshot());
    }

    #[test]
    fn test_custom_initializer() {
        let config = SomConfig {
            sigma0: 0.5,
            ..test_config()
        };
        let mut som = Som::from_config(&config);
        SomTrainer::new(config)
            .train_with_initializer(&mut som, &colors(), |row, col, _, _| (row + col) as f64)
            .unwrap();
        assert_eq!(som.get_at(2, 3).unwrap().weights, vec![5.0; 3]);
    }

    #[test]
    fn test_rejects_bad_input() {
        let config = test_config();
        let mut som = Som::from_config(&config);
        let mut trainer = SomTrainer::new(config.clone());

        assert!(matches!(
            trainer.train(&mut som, &[]),
            Err(DeltaGridError::EmptyInput(_))
        ));
        assert!(matches!(
            trainer.train(&mut som, &[vec![1.0, 2.0]]),
            Err(DeltaGridError::DimensionMismatch { expected: 3, actual: 2 })
        ));

        let mut zero_lambda = SomTrainer::new(SomConfig { lambda: 0.0, ..config });
        assert!(matches!(
            zero_lambda.train(&mut som, &colors()),
            Err(DeltaGridError::Config(_))
        ));
    }
}
