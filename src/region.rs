//! Axis-aligned boxes in R^n: bisection, containment, and uniform sampling.
//!
//! A [`Region`] is immutable once built. Splitting always produces two new
//! regions and leaves the parent untouched, so regions can be shared across
//! worker threads by reference without locking.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MultistartError, Result};

/// An axis-aligned box given by its lower and upper corners.
///
/// Invariants: both corners have the same length `n >= 1`, and
/// `lower[i] <= upper[i]` in every dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Region {
    /// Create a region spanning `lower..=upper`.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the corners differ in length.
    /// - `InvalidArgs` if the corners are empty.
    /// - `InvalidBounds` if `lower[i] > upper[i]`, or either bound is not
    ///   finite.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(MultistartError::mismatch(lower.len(), upper.len()));
        }
        if lower.is_empty() {
            return Err(MultistartError::InvalidArgs(
                "region must have at least one dimension".into(),
            ));
        }
        for (dim, (lo, hi)) in lower.iter().zip(&upper).enumerate() {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(MultistartError::InvalidBounds { dim });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Create a region from `(lower, upper)` pairs, one per dimension.
    pub fn from_bounds(bounds: &[(f64, f64)]) -> Result<Self> {
        let (lower, upper) = bounds.iter().copied().unzip();
        Self::new(lower, upper)
    }

    /// A box with the same `[low, high]` extent in each of `ndim` dimensions.
    pub fn cube(ndim: usize, low: f64, high: f64) -> Result<Self> {
        Self::new(vec![low; ndim], vec![high; ndim])
    }

    /// Dimensionality of the region.
    pub fn ndims(&self) -> usize {
        self.lower.len()
    }

    /// The lower corner.
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// The upper corner.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Extent of the region in dimension `i`. Panics if `i >= ndims()`.
    /// Overflows to infinity for bounds near `f64::MAX` of opposite sign.
    #[inline]
    pub fn width(&self, i: usize) -> f64 {
        self.upper[i] - self.lower[i]
    }

    /// Product of the widths in every dimension.
    pub fn volume(&self) -> f64 {
        (0..self.ndims()).map(|i| self.width(i)).product()
    }

    /// Index of the widest dimension. The lowest index wins ties.
    pub fn split_dimension(&self) -> usize {
        let mut split_index = 0;
        let mut max_width = self.width(0);
        for i in 1..self.ndims() {
            let w = self.width(i);
            if w > max_width {
                max_width = w;
                split_index = i;
            }
        }
        split_index
    }

    /// Bisect the region across its widest dimension.
    ///
    /// The first half keeps the lower part (`upper[d]` becomes the midpoint),
    /// the second keeps the upper part (`lower[d]` becomes the midpoint).
    /// Every other dimension is copied unchanged into both halves.
    pub fn split(&self) -> (Region, Region) {
        let d = self.split_dimension();
        let mid = 0.5 * self.lower[d] + 0.5 * self.upper[d];

        let mut a = self.clone();
        let mut b = self.clone();
        a.upper[d] = mid;
        b.lower[d] = mid;
        (a, b)
    }

    /// Draw a point uniformly from the region.
    ///
    /// Each coordinate lies in `(lower[i], upper[i]]`: a point is never placed
    /// exactly on the lower boundary of a dimension with nonzero width. One
    /// value is drawn from `rng` per dimension (more only in the rare case
    /// where rounding lands on the lower bound and the draw is repeated).
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.ndims())
            .map(|i| {
                let (lo, hi) = (self.lower[i], self.upper[i]);
                if lo == hi {
                    return lo;
                }
                loop {
                    // random::<f64>() is in [0, 1); flip it to (0, 1].
                    // Interpolate instead of lo + u * width, which overflows
                    // when the bounds span more than f64::MAX.
                    let u = 1.0 - rng.random::<f64>();
                    let val = u * hi + (1.0 - u) * lo;
                    if val > lo {
                        break val.min(hi);
                    }
                }
            })
            .collect()
    }

    /// Returns true if `point` lies inside the region, borders included.
    ///
    /// # Errors
    /// `DimensionMismatch` if `point` has the wrong length.
    pub fn contains(&self, point: &[f64]) -> Result<bool> {
        within(point, self)
    }
}

/// Returns true if `point` lies in `[lower[i], upper[i]]` in every dimension.
///
/// # Errors
/// `DimensionMismatch` if `point.len() != region.ndims()`.
pub fn within(point: &[f64], region: &Region) -> Result<bool> {
    if point.len() != region.ndims() {
        return Err(MultistartError::mismatch(region.ndims(), point.len()));
    }
    Ok(point
        .iter()
        .zip(region.lower.iter().zip(&region.upper))
        .all(|(p, (lo, hi))| lo <= p && p <= hi))
}

/// Split every region `generations` times.
///
/// Each generation replaces every region by its two halves, in order, so a
/// single input yields `2^generations` regions of equal volume. With
/// `generations == 0` the input is returned unchanged.
pub fn make_splits(generations: u32, regions: Vec<Region>) -> Vec<Region> {
    if generations == 0 {
        return regions;
    }
    let mut next = Vec::with_capacity(2 * regions.len());
    for r in &regions {
        let (a, b) = r.split();
        next.push(a);
        next.push(b);
    }
    make_splits(generations - 1, next)
}

fn write_corner(f: &mut fmt::Formatter<'_>, corner: &[f64]) -> fmt::Result {
    for (i, x) in corner.iter().enumerate() {
        if i > 0 {
            write!(f, "\t")?;
        }
        write!(f, "{:.17e}", x)?;
    }
    Ok(())
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_corner(f, &self.lower)?;
        write!(f, ") (")?;
        write_corner(f, &self.upper)?;
        write!(f, ")")
    }
}
