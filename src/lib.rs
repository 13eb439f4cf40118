//! # deltagrid
//!
//! Two small numerical engines with PNG output:
//!
//! - an **iterated difference engine** that keeps replacing a sequence (the
//!   primes, by default) by its finite differences until it collapses, and
//!   renders every intermediate sequence as a numbered frame;
//! - a **Self-Organizing Map** trainer with Gaussian neighborhoods and an
//!   exponentially decaying radius and learning rate.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use deltagrid::{iterate_rule, primes_up_to, DiffRule, FrameWriter, RenderConfig, ScatterPlot};
//! use num_bigint::BigInt;
//!
//! let primes: Vec<BigInt> = primes_up_to(10_000).into_iter().map(BigInt::from).collect();
//! let plot = ScatterPlot::new(RenderConfig::default())?;
//! let mut frames = FrameWriter::new("frames")?;
//! for seq in iterate_rule(primes, DiffRule::Plain) {
//!     frames.write(&plot.render(&seq)?)?;
//! }
//! ```
//!
//! ## Training a SOM
//!
//! ```rust,ignore
//! use deltagrid::{Som, SomConfig, SomTrainer};
//!
//! let config = SomConfig { seed: Some(7), ..Default::default() };
//! let mut som = Som::from_config(&config);
//! let outcome = SomTrainer::new(config).train(&mut som, &colors)?;
//! println!("stopped after {} steps", outcome.steps);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod diff;
pub mod error;
pub mod primes;
pub mod render;
pub mod som;

// Re-export commonly used types
pub use config::{Config, DiffConfig, RenderConfig, SomConfig};
pub use diff::{frame_count, iterate_rule, steps_to_collapse, DiffRule, IteratedDifferences};
pub use error::{DeltaGridError, Result};
pub use primes::{first_primes, primes_up_to};
pub use render::{som_to_image, FrameWriter, PlotValue, ScatterPlot};
pub use som::{
    DecaySchedule, GridSnapshot, InitStrategy, Neuron, Som, SomTrainer, StepReport, StopReason,
    TrainingOutcome,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
