//! Parallel multi-start search: launch the workers, wait, drain the store.
//!
//! [`find_global_minimum`] builds one [`SharedResultStore`], one
//! [`SharedRng`], and a rayon pool with exactly as many threads as workers.
//! All workers run inside a single `ThreadPool::scope`, so every borrow of
//! the store, region, engine, and objective ends before the function returns.
//!
//! ```
//! use multistart::{LocalMinimum, MultistartBuilder, ObjectiveFn, Region};
//!
//! // A "minimizer" that jumps straight to the origin.
//! fn to_origin(f: &ObjectiveFn<'_>, x: &mut [f64]) -> LocalMinimum {
//!     x.iter_mut().for_each(|v| *v = 0.0);
//!     LocalMinimum::new(f(x), 1)
//! }
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! let region = Region::cube(2, -5.0, 5.0).unwrap();
//! let results = MultistartBuilder::new(sphere, to_origin, region)
//!     .workers(2)
//!     .seed(1)
//!     .minimize()
//!     .unwrap();
//! assert!(results.success());
//! assert_eq!(results.best().unwrap().value, 0.0);
//! ```

use rand::RngCore;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::error::{MultistartError, Result, StopReason};
use crate::minimizer::LocalMinimizer;
use crate::random::SharedRng;
use crate::region::Region;
use crate::solution::now_in_milliseconds;
use crate::store::SharedResultStore;
use crate::types::{MinimizationResults, MultistartOptions, ObjectiveFn};
use crate::worker::Worker;

/// Run a parallel multi-start search for a value below
/// `options.desired_min`, drawing starting points from `region`.
///
/// Blocks until every worker has stopped. The returned solutions are sorted
/// ascending by value.
///
/// # Errors
/// - `InvalidArgs` for unusable options.
/// - `ThreadPool` if the worker pool cannot be created.
/// - `EmptyResultSet` if no attempt was recorded (only possible with a
///   negative `max_attempts`).
pub fn find_global_minimum<F, M>(
    objective: F,
    minimizer: &M,
    region: &Region,
    options: &MultistartOptions,
) -> Result<MinimizationResults>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
    M: LocalMinimizer + ?Sized,
{
    options.validate()?;
    let seed = options.seed.unwrap_or_else(rand::random);
    let rng = SharedRng::<ChaCha8Rng>::seed_from_u64(seed);
    find_global_minimum_with_rng(&objective, minimizer, region, options, &rng)
}

/// Same as [`find_global_minimum`], drawing starting points from a
/// caller-supplied engine. `options.seed` is ignored.
pub fn find_global_minimum_with_rng<M, R>(
    objective: &ObjectiveFn<'_>,
    minimizer: &M,
    region: &Region,
    options: &MultistartOptions,
    rng: &SharedRng<R>,
) -> Result<MinimizationResults>
where
    M: LocalMinimizer + ?Sized,
    R: RngCore + Send,
{
    options.validate()?;
    let workers = options.resolved_workers();
    let capacity = options.resolved_capacity();
    let store = SharedResultStore::new(options.desired_min, capacity)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("multistart-worker-{i}"))
        .build()?;

    info!(
        workers,
        capacity,
        ndim = region.ndims(),
        desired_min = options.desired_min,
        max_attempts = options.max_attempts,
        "starting multi-start search"
    );
    let started = now_in_milliseconds();

    pool.scope(|scope| {
        for id in 0..workers {
            let worker = Worker::new(
                id,
                objective,
                minimizer,
                &store,
                region,
                rng,
                options.max_attempts,
            );
            scope.spawn(move |_| {
                worker.run();
            });
        }
    });

    let num_attempts = store.num_attempts();
    let stop_reason = if store.is_goal_reached() {
        StopReason::GoalReached
    } else {
        StopReason::MaxAttemptsExceeded
    };
    let mut best_solutions = store.solutions();
    best_solutions.sort_by(|a, b| a.cmp_value(b));

    info!(
        num_attempts,
        retained = best_solutions.len(),
        best = best_solutions.first().map(|s| s.value),
        elapsed_ms = now_in_milliseconds() - started,
        %stop_reason,
        "multi-start search finished"
    );

    if best_solutions.is_empty() {
        return Err(MultistartError::EmptyResultSet {
            attempts: num_attempts,
        });
    }

    Ok(MinimizationResults {
        best_solutions,
        num_attempts,
        stop_reason,
    })
}

// ──────────────────────────────────────────────────────────────────────────────
// Builder
// ──────────────────────────────────────────────────────────────────────────────

/// Fluent front end for [`find_global_minimum`].
pub struct MultistartBuilder<F, M> {
    objective: F,
    minimizer: M,
    region: Region,
    options: MultistartOptions,
}

impl<F, M> MultistartBuilder<F, M>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
    M: LocalMinimizer,
{
    pub fn new(objective: F, minimizer: M, region: Region) -> Self {
        Self {
            objective,
            minimizer,
            region,
            options: MultistartOptions::default(),
        }
    }

    /// Stop once a value strictly below `desired_min` is found.
    pub fn desired_min(mut self, desired_min: f64) -> Self {
        self.options.desired_min = desired_min;
        self
    }

    /// Number of concurrent workers (0 = one per rayon thread).
    pub fn workers(mut self, num_workers: usize) -> Self {
        self.options.num_workers = num_workers;
        self
    }

    /// Attempt ceiling.
    pub fn max_attempts(mut self, max_attempts: i64) -> Self {
        self.options.max_attempts = max_attempts;
        self
    }

    /// How many best solutions to retain (0 = worker count).
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.options.capacity = capacity;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    /// Replace all options at once.
    pub fn options(mut self, options: MultistartOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the search.
    pub fn minimize(self) -> Result<MinimizationResults> {
        find_global_minimum(self.objective, &self.minimizer, &self.region, &self.options)
    }
}
