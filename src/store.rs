//! Thread-safe bounded store of the best solutions seen so far.
//!
//! [`SharedResultStore`] keeps at most `capacity` solutions. While it is
//! filling up, inserts are plain pushes. The insert that brings it to
//! `capacity` entries sorts the collection once; from then on (the "steady
//! state") every insert either discards the newcomer or places it by binary
//! search and evicts the current worst.
//!
//! A single mutex guards the count, the done flag, and the collection
//! together. Every public method takes that lock exactly once and never
//! calls another public method while holding it.
//!
//! The done flag is checked and set under the lock, but workers check it
//! between attempts rather than during one, so a worker may start one more
//! attempt after another worker has already reached the goal. That attempt
//! is recorded like any other.

use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::error::{MultistartError, Result};
use crate::report::ReportWriter;
use crate::solution::Solution;

#[derive(Debug, Default)]
struct StoreState {
    results: Vec<Solution>,
    count: i64,
    done: bool,
}

impl StoreState {
    /// The collection has been filled and sorted at least once.
    fn is_sorted(&self, capacity: usize) -> bool {
        self.count as u64 > capacity as u64
    }
}

/// Shared collection of the best `capacity` solutions plus the stopping
/// predicate.
///
/// Not `Clone`: share it by reference (or `Arc`).
#[derive(Debug)]
pub struct SharedResultStore {
    desired_min: f64,
    capacity: usize,
    state: Mutex<StoreState>,
}

impl SharedResultStore {
    /// Create an empty store that reports done once a value below
    /// `desired_min` is inserted, and retains the best `capacity` entries.
    ///
    /// # Errors
    /// `InvalidArgs` if `capacity == 0` or `desired_min` is NaN.
    pub fn new(desired_min: f64, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MultistartError::InvalidArgs(
                "result store capacity must be > 0".into(),
            ));
        }
        if desired_min.is_nan() {
            return Err(MultistartError::InvalidArgs(
                "desired minimum must not be NaN".into(),
            ));
        }
        Ok(Self {
            desired_min,
            capacity,
            state: Mutex::new(StoreState::default()),
        })
    }

    /// The stopping threshold.
    pub fn desired_min(&self) -> f64 {
        self.desired_min
    }

    /// Maximum number of retained solutions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one attempt.
    ///
    /// Assigns `solution.index` (1-based, in insertion order), flips the done
    /// flag if `solution.value < desired_min`, and retains the solution only
    /// if it is among the best `capacity` seen so far. Among equal values the
    /// earlier insertion ranks first.
    pub fn insert(&self, mut solution: Solution) {
        let mut state = self.lock();
        state.count += 1;
        solution.index = state.count;

        if solution.value < self.desired_min && !state.done {
            trace!(index = state.count, value = solution.value, "goal reached");
            state.done = true;
        }

        if state.results.is_empty() {
            state.results.push(solution);
            return;
        }

        if state.is_sorted(self.capacity) {
            // Not strictly better than the worst: drop it.
            let better = state
                .results
                .last()
                .is_some_and(|worst| solution.cmp_value(worst).is_lt());
            if !better {
                return;
            }
            let pos = state
                .results
                .partition_point(|r| r.cmp_value(&solution).is_le());
            state.results.insert(pos, solution);
            state.results.pop();
            return;
        }

        state.results.push(solution);
        if state.count as u64 == self.capacity as u64 {
            state.results.sort_by(Solution::cmp_value);
        }
    }

    /// A copy of the best solution, or `None` if nothing was inserted.
    pub fn best(&self) -> Option<Solution> {
        let state = self.lock();
        if state.count as u64 >= self.capacity as u64 {
            return state.results.first().cloned();
        }
        state
            .results
            .iter()
            .min_by(|a, b| a.cmp_value(b))
            .cloned()
    }

    /// True once the goal was reached or more than `max_attempts` attempts
    /// were recorded.
    pub fn is_done(&self, max_attempts: i64) -> bool {
        let state = self.lock();
        state.done || state.count > max_attempts
    }

    /// True once any inserted solution had `value < desired_min`.
    pub fn is_goal_reached(&self) -> bool {
        self.lock().done
    }

    /// True once the retained collection is kept sorted.
    pub fn is_sorted(&self) -> bool {
        self.lock().is_sorted(self.capacity)
    }

    /// Snapshot of the retained solutions. Sorted ascending by value once
    /// the store has filled up; in insertion order before that.
    pub fn solutions(&self) -> Vec<Solution> {
        self.lock().results.clone()
    }

    /// Total number of `insert` calls so far.
    pub fn num_attempts(&self) -> i64 {
        self.lock().count
    }

    /// True if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.lock().results.is_empty()
    }

    /// Write the retained solutions as a tab-separated report while holding
    /// the lock.
    pub fn write_report<W: Write>(&self, writer: W) -> Result<()> {
        let state = self.lock();
        ReportWriter::new(writer).write_solutions(&state.results)
    }
}
