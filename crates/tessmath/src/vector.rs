//! N-dimensional vector math.

use std::fmt;
use std::iter::Sum;
use std::ops::*;

use smallvec::SmallVec;

use crate::Float;

/// Constructs an N-dimensional vector, using the same syntax as `vec![]`.
#[macro_export]
macro_rules! vector {
    [$($tok:tt)*] => {
        $crate::Vector($crate::smallvec::smallvec![$($tok)*])
    };
}

/// N-dimensional vector. Indexing out of bounds returns zero.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Vector(pub SmallVec<[Float; 4]>);

impl Vector {
    /// Vector with zero components.
    pub const EMPTY: Self = Vector(SmallVec::new_const());

    /// Constructs the zero vector with `ndim` components.
    pub fn zero(ndim: u8) -> Self {
        vector![0.0; ndim as usize]
    }
    /// Constructs a unit vector along `axis` with `ndim` components.
    pub fn unit(ndim: u8, axis: u8) -> Self {
        let mut ret = Self::zero(ndim);
        if axis < ndim {
            ret.0[axis as usize] = 1.0;
        }
        ret
    }
    /// Constructs the homogeneous representation of the origin of `ndim`-space:
    /// `(0, …, 0, 1)` with `ndim + 1` components.
    pub fn origin(ndim: u8) -> Self {
        Self::unit(ndim + 1, ndim)
    }

    /// Returns the number of components in the vector.
    pub fn ndim(&self) -> u8 {
        self.0.len() as u8
    }

    /// Returns a component of the vector. If the index is out of bounds,
    /// returns zero.
    pub fn get(&self, idx: u8) -> Float {
        self.0.get(idx as usize).copied().unwrap_or(0.0)
    }

    /// Returns an iterator over the components of the vector.
    pub fn iter(&self) -> impl '_ + Iterator<Item = Float> {
        self.0.iter().copied()
    }
    /// Returns an iterator over the components of the vector, padded with
    /// zeros up to `ndim`.
    pub fn iter_ndim(&self, ndim: u8) -> impl '_ + Iterator<Item = Float> {
        (0..ndim).map(|i| self.get(i))
    }

    /// Returns the dot product of this vector with another.
    pub fn dot(&self, rhs: &Vector) -> Float {
        std::iter::zip(self.iter(), rhs.iter()).map(|(l, r)| l * r).sum()
    }
    /// Returns the squared Euclidean magnitude of the vector.
    pub fn mag2(&self) -> Float {
        self.dot(self)
    }
    /// Returns the Euclidean magnitude of the vector.
    pub fn mag(&self) -> Float {
        self.mag2().sqrt()
    }

    /// Returns a scaled copy of the vector.
    #[must_use]
    pub fn scale(&self, scalar: Float) -> Vector {
        self.iter().map(|x| x * scalar).collect()
    }
    /// Returns a normalized copy of the vector, or `None` if it is zero.
    #[must_use]
    pub fn normalize(&self) -> Option<Vector> {
        let mult = 1.0 / self.mag();
        mult.is_finite().then(|| self.scale(mult))
    }

    /// Interprets the vector as a homogeneous point and returns its affine
    /// part: the first `ndim - 1` components divided by the last one.
    ///
    /// Returns `None` for a point at infinity (last component approximately
    /// zero).
    pub fn dehomogenize(&self) -> Option<Vector> {
        let last = self.get(self.ndim().saturating_sub(1));
        let mult = 1.0 / last;
        mult.is_finite()
            .then(|| self.iter().take(self.ndim() as usize - 1).map(|x| x * mult).collect())
    }

    /// Returns the Chebyshev (L∞) distance to another vector.
    pub fn chebyshev_distance(&self, rhs: &Vector) -> Float {
        let ndim = std::cmp::max(self.ndim(), rhs.ndim());
        (0..ndim)
            .map(|i| (self.get(i) - rhs.get(i)).abs())
            .fold(0.0, Float::max)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut first = true;
        for x in self.iter() {
            if !std::mem::take(&mut first) {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}

impl FromIterator<Float> for Vector {
    fn from_iter<T: IntoIterator<Item = Float>>(iter: T) -> Self {
        Vector(iter.into_iter().collect())
    }
}

impl Index<u8> for Vector {
    type Output = Float;

    fn index(&self, index: u8) -> &Self::Output {
        &self.0[index as usize]
    }
}
impl IndexMut<u8> for Vector {
    fn index_mut(&mut self, index: u8) -> &mut Self::Output {
        &mut self.0[index as usize]
    }
}

impl Add<&Vector> for &Vector {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Vector {
        let ndim = std::cmp::max(self.ndim(), rhs.ndim());
        (0..ndim).map(|i| self.get(i) + rhs.get(i)).collect()
    }
}
impl Sub<&Vector> for &Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Vector {
        let ndim = std::cmp::max(self.ndim(), rhs.ndim());
        (0..ndim).map(|i| self.get(i) - rhs.get(i)).collect()
    }
}
impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.iter().map(|x| -x).collect()
    }
}
impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        &self + &rhs
    }
}
impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        &self - &rhs
    }
}
impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        -&self
    }
}
impl Mul<Float> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: Float) -> Vector {
        self.scale(rhs)
    }
}
impl Mul<Float> for Vector {
    type Output = Vector;

    fn mul(self, rhs: Float) -> Vector {
        self.scale(rhs)
    }
}
impl Sum for Vector {
    fn sum<I: Iterator<Item = Vector>>(iter: I) -> Self {
        iter.fold(Vector::EMPTY, |a, b| a + b)
    }
}

impl approx::AbsDiffEq for Vector {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        crate::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let ndim = std::cmp::max(self.ndim(), other.ndim());
        std::iter::zip(self.iter_ndim(ndim), other.iter_ndim(ndim))
            .all(|(a, b)| a.abs_diff_eq(&b, epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_indexing_out_of_bounds() {
        let v = vector![1.0, 2.0];
        assert_eq!(v.get(5), 0.0);
        assert_eq!(v.dot(&vector![3.0, 4.0, 100.0]), 11.0);
    }

    #[test]
    fn test_dehomogenize() {
        assert_eq!(
            vector![2.0, 4.0, 6.0, 2.0].dehomogenize(),
            Some(vector![1.0, 2.0, 3.0]),
        );
        assert_eq!(vector![1.0, 0.0, 0.0, 0.0].dehomogenize(), None);
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = vector![1.0, -2.0, 0.0];
        let b = vector![0.5, 3.0, 0.0];
        assert_eq!(a.chebyshev_distance(&b), 5.0);
    }
}
