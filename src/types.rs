//! Core type definitions: objective signature, options, and search results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MultistartError, Result, StopReason};
use crate::solution::Solution;

// ──────────────────────────────────────────────────────────────────────────────
// Type Aliases
// ──────────────────────────────────────────────────────────────────────────────

/// Objective function signature.
///
/// - `x`: point to evaluate (dimension n)
/// - Returns: function value
///
/// Called concurrently from every worker, hence `Send + Sync`. The lifetime
/// lets borrowing closures be used as objectives.
pub type ObjectiveFn<'a> = dyn Fn(&[f64]) -> f64 + Send + Sync + 'a;

// ──────────────────────────────────────────────────────────────────────────────
// Options
// ──────────────────────────────────────────────────────────────────────────────

/// Default stopping threshold.
pub const DEFAULT_DESIRED_MIN: f64 = 1.0e-6;

/// Default ceiling on the number of local minimizations.
pub const DEFAULT_MAX_ATTEMPTS: i64 = 1_000_000;

/// Configuration for a multi-start search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultistartOptions {
    /// Stop once some attempt reaches a value strictly below this.
    /// Default: `1e-6`.
    pub desired_min: f64,

    /// Number of concurrent workers. 0 means one per rayon thread
    /// (`rayon::current_num_threads()`, which honors `RAYON_NUM_THREADS`).
    pub num_workers: usize,

    /// Stop once more than this many attempts have been recorded.
    /// Workers in flight still finish, so the final count can exceed the
    /// ceiling by up to the number of workers. A negative value stops the
    /// search before any attempt. Default: `1_000_000`.
    pub max_attempts: i64,

    /// How many of the best solutions to retain. 0 means the resolved worker
    /// count.
    pub capacity: usize,

    /// Seed for the shared random engine. `None` draws a seed from the
    /// thread-local generator.
    pub seed: Option<u64>,
}

impl Default for MultistartOptions {
    fn default() -> Self {
        Self {
            desired_min: DEFAULT_DESIRED_MIN,
            num_workers: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            capacity: 0,
            seed: None,
        }
    }
}

impl MultistartOptions {
    /// Reject settings that cannot describe a search.
    pub fn validate(&self) -> Result<()> {
        if self.desired_min.is_nan() {
            return Err(MultistartError::InvalidArgs(
                "desired_min must not be NaN".into(),
            ));
        }
        Ok(())
    }

    /// Worker count with the 0 default applied.
    pub fn resolved_workers(&self) -> usize {
        if self.num_workers == 0 {
            rayon::current_num_threads().max(1)
        } else {
            self.num_workers
        }
    }

    /// Store capacity with the 0 default applied.
    pub fn resolved_capacity(&self) -> usize {
        if self.capacity == 0 {
            self.resolved_workers()
        } else {
            self.capacity
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Result
// ──────────────────────────────────────────────────────────────────────────────

/// Outcome of a multi-start search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimizationResults {
    /// Retained solutions, best first.
    pub best_solutions: Vec<Solution>,

    /// Total number of local minimizations performed.
    pub num_attempts: i64,

    /// Why the search stopped.
    pub stop_reason: StopReason,
}

impl MinimizationResults {
    /// The best solution found.
    pub fn best(&self) -> Option<&Solution> {
        self.best_solutions.first()
    }

    /// Returns true if the threshold was reached.
    pub fn success(&self) -> bool {
        self.stop_reason.is_goal_reached()
    }
}

impl fmt::Display for MinimizationResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MinimizationResults {{")?;
        writeln!(f, "  success: {}", self.success())?;
        writeln!(f, "  stop_reason: {}", self.stop_reason)?;
        writeln!(f, "  num_attempts: {}", self.num_attempts)?;
        writeln!(f, "  retained: {}", self.best_solutions.len())?;
        if let Some(best) = self.best() {
            writeln!(f, "  fun: {:.15e}", best.value)?;
            write!(f, "  x: [")?;
            for (i, xi) in best.location.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.15e}", xi)?;
            }
            writeln!(f, "]")?;
        }
        write!(f, "}}")
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Display for StopReason
// ──────────────────────────────────────────────────────────────────────────────

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoalReached => write!(f, "Value below desired minimum found"),
            Self::MaxAttemptsExceeded => write!(f, "Maximum attempts reached"),
        }
    }
}
