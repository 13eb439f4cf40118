//! Difference operators.

use crate::error::DeltaGridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

/// A finite-difference operator over an ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffRule {
    /// `out[i] = s[i + 1] - s[i]`, one element shorter than the input.
    #[default]
    Plain,
    /// `out[i] = s[i + 2] - s[i]`, two elements shorter than the input.
    Symmetric,
}

impl DiffRule {
    /// Number of elements one application removes.
    #[inline]
    pub fn shrink(&self) -> usize {
        match self {
            DiffRule::Plain => 1,
            DiffRule::Symmetric => 2,
        }
    }

    /// Human-readable operator name.
    pub fn name(&self) -> &'static str {
        match self {
            DiffRule::Plain => "differentiation operator",
            DiffRule::Symmetric => "symmetrized differentiation operator",
        }
    }

    /// Applies the operator once.
    ///
    /// Sequences shorter than the operator's stencil produce an empty vector.
    pub fn apply<T>(&self, seq: &[T]) -> Vec<T>
    where
        for<'a> &'a T: Sub<&'a T, Output = T>,
    {
        let k = self.shrink();
        seq.windows(k + 1).map(|w| &w[k] - &w[0]).collect()
    }
}

impl fmt::Display for DiffRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffRule::Plain => write!(f, "plain"),
            DiffRule::Symmetric => write!(f, "symmetric"),
        }
    }
}

impl FromStr for DiffRule {
    type Err = DeltaGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "diff" => Ok(DiffRule::Plain),
            "symmetric" | "sym" | "symmetrized" => Ok(DiffRule::Symmetric),
            other => Err(DeltaGridError::Parse(format!(
                "unknown difference rule '{}' (expected 'plain' or 'symmetric')",
                other
            ))),
        }
    }
}
