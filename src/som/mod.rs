//! Self-Organizing Map (SOM).
//!
//! A rectangular grid of feature vectors trained online: each step samples
//! one training vector, finds its Best Matching Unit and pulls every cell
//! toward the sample, weighted by a Gaussian of the grid distance to the BMU.
//! Radius and learning rate decay exponentially with the step counter.

pub mod data;
mod init;
mod map;
mod neuron;
mod schedule;
pub mod training;

pub use init::InitStrategy;
pub use map::{GridSnapshot, Som};
pub use neuron::Neuron;
pub use schedule::DecaySchedule;
pub use training::{SomTrainer, StepReport, StopReason, TrainingOutcome};
