//! # multistart: parallel multi-start global minimization
//!
//! A harness for running many independent randomized local searches for the
//! global minimum of a scalar function over an n-dimensional box, in
//! parallel, stopping as soon as any search finds a value below a target
//! threshold or an attempt budget runs out.
//!
//! ## Overview
//!
//! The crate supplies the coordination machinery; the objective and the
//! local minimization algorithm are plugged in from outside.
//!
//! - [`Region`]: an axis-aligned box with bisection ([`Region::split`],
//!   [`make_splits`]), containment ([`within`]) and uniform sampling.
//! - [`SharedRng`]: one random engine behind a mutex, shared by all workers.
//! - [`Solution`]: the record of one local minimization attempt.
//! - [`SharedResultStore`]: a thread-safe top-K store with a monotonic
//!   "done" predicate.
//! - [`Worker`]: the sample → minimize → record → decide loop.
//! - [`find_global_minimum`] / [`MultistartBuilder`]: launch `P` workers on a
//!   dedicated rayon pool, wait for all of them, and return the best
//!   solutions.
//!
//! ## Stopping
//!
//! Workers check the store between attempts. A worker that began an attempt
//! before another worker reached the goal finishes and records it, so a
//! search may perform up to `P - 1` extra attempts after the goal is met.
//! Minimizations in progress are never cancelled.
//!
//! ## Logging
//!
//! Progress is reported through [`tracing`] events; install a subscriber in
//! the application to see them.

pub mod error;
pub mod minimizer;
pub mod objectives;
pub mod random;
pub mod region;
pub mod report;
pub mod search;
pub mod solution;
pub mod store;
pub mod types;
pub mod worker;

// Re-export main types
pub use error::{MultistartError, Result, StopReason};
pub use minimizer::{LocalMinimizer, LocalMinimum};
pub use random::SharedRng;
pub use region::{make_splits, within, Region};
pub use report::{print_report, ReportWriter};
pub use search::{find_global_minimum, find_global_minimum_with_rng, MultistartBuilder};
pub use solution::{now_in_milliseconds, Solution};
pub use store::SharedResultStore;
pub use types::{
    MinimizationResults, MultistartOptions, ObjectiveFn, DEFAULT_DESIRED_MIN, DEFAULT_MAX_ATTEMPTS,
};
pub use worker::{do_one_minimization, Worker};
