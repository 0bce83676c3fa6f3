//! The sample, minimize, record, decide loop run by each worker.
//!
//! A worker repeats until the store reports done:
//!
//! 1. draw a starting point from the shared region using the shared RNG,
//! 2. run the local minimizer from that point (no lock is held here),
//! 3. insert the resulting [`Solution`] into the store,
//! 4. ask the store whether the search is done.
//!
//! The check happens before each attempt, so a worker that started an attempt
//! just before another worker reached the goal will finish that attempt and
//! record it. No minimization is ever interrupted.

use rand::RngCore;
use tracing::debug;

use crate::minimizer::LocalMinimizer;
use crate::random::SharedRng;
use crate::region::Region;
use crate::solution::{now_in_milliseconds, Solution};
use crate::store::SharedResultStore;
use crate::types::ObjectiveFn;

/// Run one local minimization from `start` and package the outcome.
///
/// The start value is evaluated first; the timestamps bracket only the
/// minimizer call.
pub fn do_one_minimization<M>(
    objective: &ObjectiveFn<'_>,
    minimizer: &M,
    start: Vec<f64>,
) -> Solution
where
    M: LocalMinimizer + ?Sized,
{
    let start_value = objective(&start);
    let mut location = start.clone();

    let start_time = now_in_milliseconds();
    let outcome = minimizer.minimize(objective, &mut location);
    let end_time = now_in_milliseconds();

    Solution {
        start,
        start_value,
        location,
        value: outcome.value,
        index: -1,
        start_time,
        end_time,
        steps: outcome.steps,
    }
}

/// One worker's view of the shared search state.
pub struct Worker<'a, M: ?Sized, R> {
    id: usize,
    objective: &'a ObjectiveFn<'a>,
    minimizer: &'a M,
    store: &'a SharedResultStore,
    region: &'a Region,
    rng: &'a SharedRng<R>,
    max_attempts: i64,
}

impl<'a, M, R> Worker<'a, M, R>
where
    M: LocalMinimizer + ?Sized,
    R: RngCore,
{
    pub fn new(
        id: usize,
        objective: &'a ObjectiveFn<'a>,
        minimizer: &'a M,
        store: &'a SharedResultStore,
        region: &'a Region,
        rng: &'a SharedRng<R>,
        max_attempts: i64,
    ) -> Self {
        Self {
            id,
            objective,
            minimizer,
            store,
            region,
            rng,
            max_attempts,
        }
    }

    /// Sample a start point, minimize from it, and record the result.
    pub fn attempt(&self) {
        let start = self.region.sample(&mut &*self.rng);
        let solution = do_one_minimization(self.objective, self.minimizer, start);
        debug!(
            worker = self.id,
            value = solution.value,
            steps = solution.steps,
            elapsed_ms = solution.elapsed_ms(),
            "attempt finished"
        );
        self.store.insert(solution);
    }

    /// Attempt until the store says stop. Returns how many attempts this
    /// worker made.
    pub fn run(&self) -> usize {
        let mut attempts = 0;
        while !self.store.is_done(self.max_attempts) {
            self.attempt();
            attempts += 1;
        }
        debug!(worker = self.id, attempts, "worker finished");
        attempts
    }
}
