//! Standard test objectives for exercising the harness.
//!
//! These are pure functions of their argument and safe to call from any
//! number of threads. [`CountedObjective`] adds a call counter without
//! giving up that property.

use std::f64::consts::{FRAC_1_PI, PI};
use std::sync::atomic::{AtomicU64, Ordering};

/// Rastrigin function in `x.len()` dimensions. Global minimum 0 at the
/// origin.
pub fn rastrigin(x: &[f64]) -> f64 {
    let mut sum = 10.0 * x.len() as f64;
    for &xi in x {
        sum += xi * xi - 10.0 * (2.0 * PI * xi).cos();
    }
    sum
}

#[inline]
fn square(x: f64) -> f64 {
    x * x
}

/// Two-dimensional Rosenbrock valley. Global minimum 0 at (1, 1).
pub fn rosenbrock(x: f64, y: f64) -> f64 {
    square(1.0 - x) + 100.0 * square(y - square(x))
}

/// Rosenbrock function in `x.len()` dimensions, summed over consecutive
/// pairs. Global minimum 0 at (1, ..., 1).
pub fn vec_rosenbrock(x: &[f64]) -> f64 {
    x.windows(2).map(|w| rosenbrock(w[0], w[1])).sum()
}

/// Angle helper for the helical valley, in turns.
pub fn theta(x: f64, y: f64) -> f64 {
    let mut v = y.atan2(x);
    if x < 0.0 {
        v += PI;
    }
    0.5 * FRAC_1_PI * v
}

/// Fletcher-Powell helical valley in 3 dimensions. Global minimum 0 at
/// (1, 0, 0). Only the first three coordinates are read.
///
/// # Panics
/// Panics if `arg.len() < 3`.
pub fn helical_valley(arg: &[f64]) -> f64 {
    let (x, y, z) = (arg[0], arg[1], arg[2]);
    let t2 = z - 10.0 * theta(x, y);
    let t3 = x.hypot(y) - 1.0;
    let t1 = t2 * t2 + t3 * t3;
    100.0 * t1 + z * z
}

/// Wraps an objective and counts how many times it is called.
#[derive(Debug)]
pub struct CountedObjective<F> {
    func: F,
    ncalls: AtomicU64,
}

impl<F: Fn(&[f64]) -> f64> CountedObjective<F> {
    pub fn new(func: F) -> Self {
        Self {
            func,
            ncalls: AtomicU64::new(0),
        }
    }

    /// Evaluate the wrapped objective, bumping the counter.
    pub fn call(&self, x: &[f64]) -> f64 {
        self.ncalls.fetch_add(1, Ordering::Relaxed);
        (self.func)(x)
    }

    /// Number of evaluations so far.
    pub fn ncalls(&self) -> u64 {
        self.ncalls.load(Ordering::Relaxed)
    }

    /// Borrow as a plain closure, for APIs that take `Fn(&[f64]) -> f64`.
    pub fn as_fn(&self) -> impl Fn(&[f64]) -> f64 + '_ {
        move |x: &[f64]| self.call(x)
    }
}
