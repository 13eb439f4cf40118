//! Iterated finite differences.
//!
//! A sequence is repeatedly replaced by its finite differences until it
//! collapses to a single value (or to nothing, for the symmetrized operator
//! on an even-length input). Every intermediate sequence is yielded.
//!
//! ```rust
//! use deltagrid::diff::{iterate_rule, DiffRule};
//!
//! let frames: Vec<Vec<i64>> = iterate_rule(vec![2, 3, 5, 7, 11], DiffRule::Plain).collect();
//! assert_eq!(frames.last(), Some(&vec![3]));
//! ```

mod iterate;
mod rule;

pub use iterate::{frame_count, iterate_rule, steps_to_collapse, IteratedDifferences};
pub use rule::DiffRule;
