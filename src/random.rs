//! A pseudo-random generator shared between worker threads.
//!
//! [`SharedRng`] puts one engine behind a mutex. The lock is held for exactly
//! one draw, so a worker sampling an n-dimensional point takes and releases
//! it n times and workers interleave at the granularity of single words.
//!
//! `&SharedRng<R>` implements [`RngCore`], which makes a shared reference
//! usable anywhere a `&mut impl Rng` is expected:
//!
//! ```
//! use multistart::{Region, SharedRng};
//!
//! let rng: SharedRng = SharedRng::seed_from_u64(42);
//! let region = Region::cube(3, -1.0, 1.0).unwrap();
//! let point = region.sample(&mut &rng);
//! assert_eq!(point.len(), 3);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Mutex-guarded random engine. Defaults to [`ChaCha8Rng`].
#[derive(Debug)]
pub struct SharedRng<R = ChaCha8Rng> {
    engine: Mutex<R>,
}

impl<R: RngCore> SharedRng<R> {
    /// Smallest value `next_u64` can return.
    pub const MIN: u64 = u64::MIN;
    /// Largest value `next_u64` can return.
    pub const MAX: u64 = u64::MAX;

    /// Wrap an existing engine.
    pub fn new(engine: R) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Declared minimum of the output range.
    pub fn min() -> u64 {
        Self::MIN
    }

    /// Declared maximum of the output range.
    pub fn max() -> u64 {
        Self::MAX
    }

    /// Advance the engine once and return the word.
    pub fn next(&self) -> u64 {
        self.lock().next_u64()
    }

    /// Unwrap the engine.
    pub fn into_inner(self) -> R {
        self.engine
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, R> {
        // A panic elsewhere cannot leave the engine half-advanced.
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: RngCore + SeedableRng> SharedRng<R> {
    /// Build the engine from a 64-bit seed.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self::new(R::seed_from_u64(seed))
    }
}

impl<R: RngCore> RngCore for &SharedRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.lock().next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.lock().next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.lock().fill_bytes(dst)
    }
}

impl<R: RngCore> RngCore for SharedRng<R> {
    fn next_u32(&mut self) -> u32 {
        (&*self).next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        (&*self).next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        (&*self).fill_bytes(dst)
    }
}
