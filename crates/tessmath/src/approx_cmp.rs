//! Approximate comparison functions that automatically use [`EPSILON`].

pub use approx::AbsDiffEq;
use num_traits::Zero;

use crate::{Float, EPSILON};

/// Compares two numbers, but considers them equal if they are separated by
/// less than `EPSILON`.
///
/// Handles infinity specially.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float>>(a: &T, b: &T) -> bool {
    // use native float equality to handle infinities
    a == b || approx::abs_diff_eq!(a, b, epsilon = EPSILON)
}

/// Returns whether one number is less than another or within `EPSILON` of it.
pub fn approx_lt_eq<T: AbsDiffEq<Epsilon = Float> + PartialOrd>(a: &T, b: &T) -> bool {
    a < b || approx_eq(a, b)
}

/// Returns whether one number is greater than another or within `EPSILON` of
/// it.
pub fn approx_gt_eq<T: AbsDiffEq<Epsilon = Float> + PartialOrd>(a: &T, b: &T) -> bool {
    a > b || approx_eq(a, b)
}

/// Returns whether `x` has an absolute value greater than `EPSILON`.
pub fn is_approx_nonzero<T: AbsDiffEq<Epsilon = Float> + Zero>(x: &T) -> bool {
    !approx_eq(x, &T::zero())
}

/// Returns whether `x` is greater than `EPSILON`.
pub fn is_approx_positive<T: AbsDiffEq<Epsilon = Float> + PartialOrd + Zero>(x: &T) -> bool {
    x > &T::zero() && !approx_eq(x, &T::zero())
}
