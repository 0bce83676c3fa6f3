//! Error types for the multi-start harness.
//!
//! Geometry and configuration problems are reported immediately at
//! construction time. The one runtime failure is a search that ends without
//! any retained solution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a multi-start search stopped.
///
/// Both variants are normal terminations; failures are reported through
/// [`MultistartError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopReason {
    /// Some attempt reached a value below the desired minimum.
    GoalReached,
    /// The attempt ceiling was passed before the goal was reached.
    MaxAttemptsExceeded,
}

impl StopReason {
    /// Returns true if the search found a value below the threshold.
    pub fn is_goal_reached(&self) -> bool {
        matches!(self, Self::GoalReached)
    }
}

/// Errors that can occur while setting up or running a search.
#[derive(Error, Debug)]
pub enum MultistartError {
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Invalid bounds: lower bound > upper bound in dimension {dim}")]
    InvalidBounds { dim: usize },

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("No solutions were found after {attempts} attempts")]
    EmptyResultSet { attempts: i64 },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MultistartError {
    /// Shorthand used by the geometry checks.
    pub(crate) fn mismatch(expected: usize, found: usize) -> Self {
        Self::DimensionMismatch { expected, found }
    }
}

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, MultistartError>;
