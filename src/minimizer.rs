//! The contract between the harness and a local minimization algorithm.
//!
//! The harness never looks inside the minimizer. It hands over a starting
//! point, lets the minimizer refine it in place, and records whatever value
//! comes back. A minimizer that fails to converge simply reports a poor
//! value; the stopping rule decides whether that is good enough.

use crate::types::ObjectiveFn;

/// What a local minimizer reports about the point it refined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalMinimum {
    /// Objective value at the refined point.
    pub value: f64,
    /// Iterations taken, or -1 if unknown.
    pub steps: i64,
}

impl LocalMinimum {
    pub fn new(value: f64, steps: i64) -> Self {
        Self { value, steps }
    }

    /// A result from a minimizer that does not count its iterations.
    pub fn without_steps(value: f64) -> Self {
        Self { value, steps: -1 }
    }
}

/// A local minimization algorithm.
///
/// `minimize` overwrites `x` with the refined point. Implementations are
/// shared by all workers and may be called concurrently.
pub trait LocalMinimizer: Sync {
    fn minimize(&self, objective: &ObjectiveFn<'_>, x: &mut [f64]) -> LocalMinimum;
}

impl<M> LocalMinimizer for M
where
    M: for<'o> Fn(&ObjectiveFn<'o>, &mut [f64]) -> LocalMinimum + Sync,
{
    fn minimize(&self, objective: &ObjectiveFn<'_>, x: &mut [f64]) -> LocalMinimum {
        self(objective, x)
    }
}
