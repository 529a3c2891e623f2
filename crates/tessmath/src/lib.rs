//! Vector, matrix, and metric-geometry primitives for discrete-group
//! tessellation.
//!
//! Points are represented in homogeneous coordinates: a point in _n_-space is
//! an (_n_+1)-component vector and an isometry is an (_n_+1)×(_n_+1) matrix.
//! The [`Metric`] enum selects which bilinear form governs distances and
//! isometry checks.

pub use {approx, smallvec};

/// Floating-point type used for geometry (either `f32` or `f64`).
pub type Float = f64;

/// Small floating-point value used for comparisons and tiny offsets.
///
/// Matrix-equality hashing, distance gates, and isometry checks all share
/// this tolerance.
pub const EPSILON: Float = 1e-7;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

pub mod approx_cmp;
pub mod collections;
pub mod matrix;
pub mod metric;
pub mod vector;

/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::approx_cmp::*;
    pub use crate::collections::{ApproxHashMap, ApproxHashMapKey};
    pub use crate::matrix::Matrix;
    pub use crate::metric::Metric;
    pub use crate::vector::Vector;
    pub use crate::{Float, EPSILON};
}
pub use prelude::*;
