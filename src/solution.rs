//! The record of one local minimization attempt.

use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{MultistartError, Result};

/// Milliseconds elapsed on the monotonic clock since the first call in this
/// process.
pub fn now_in_milliseconds() -> f64 {
    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    let origin = ORIGIN.get_or_init(Instant::now);
    origin.elapsed().as_secs_f64() * 1000.0
}

/// Starting point, refined point, and bookkeeping for a single attempt.
///
/// Solutions order by `value` ascending: the smallest value is the best.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Point the local minimizer started from.
    pub start: Vec<f64>,
    /// Objective value at `start`.
    pub start_value: f64,
    /// Point the local minimizer converged to.
    pub location: Vec<f64>,
    /// Objective value at `location`.
    pub value: f64,
    /// 1-based insertion order, assigned by the result store. -1 before
    /// insertion.
    pub index: i64,
    /// Clock sample taken just before minimization, in milliseconds.
    pub start_time: f64,
    /// Clock sample taken just after minimization, in milliseconds.
    pub end_time: f64,
    /// Minimizer iterations, or -1 if the minimizer does not report them.
    pub steps: i64,
}

impl Solution {
    /// Create an unindexed solution with no timing or step information.
    ///
    /// # Errors
    /// `DimensionMismatch` if `start` and `location` differ in length.
    pub fn new(start: Vec<f64>, start_value: f64, location: Vec<f64>, value: f64) -> Result<Self> {
        if start.len() != location.len() {
            return Err(MultistartError::mismatch(start.len(), location.len()));
        }
        Ok(Self {
            start,
            start_value,
            location,
            value,
            index: -1,
            start_time: 0.0,
            end_time: 0.0,
            steps: -1,
        })
    }

    /// Dimensionality of the problem this solution belongs to.
    pub fn ndims(&self) -> usize {
        self.location.len()
    }

    /// Euclidean distance travelled by the local minimizer.
    pub fn distance(&self) -> f64 {
        self.start
            .iter()
            .zip(&self.location)
            .map(|(s, x)| (s - x) * (s - x))
            .sum::<f64>()
            .sqrt()
    }

    /// Total order on `value`; NaN sorts after every number.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        self.value.total_cmp(&other.value)
    }

    /// Wall-clock time spent in the local minimizer, in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// One tab-separated report row:
/// `index, start_time, start.., start_value, end_time, location.., value, dist, steps`.
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{:.17e}", self.index, self.start_time)?;
        for s in &self.start {
            write!(f, "\t{:.17e}", s)?;
        }
        write!(f, "\t{:.17e}\t{:.17e}", self.start_value, self.end_time)?;
        for x in &self.location {
            write!(f, "\t{:.17e}", x)?;
        }
        write!(
            f,
            "\t{:.17e}\t{:.17e}\t{}",
            self.value,
            self.distance(),
            self.steps
        )
    }
}
