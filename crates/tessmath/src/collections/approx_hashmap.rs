//! Approximate hash map for floating-point values such as vectors and
//! matrices, using a `BTreeMap` to record arbitrary hash values for floats.

pub use std::collections::hash_map::{Entry, OccupiedEntry, VacantEntry};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::marker::PhantomData;

use float_ord::FloatOrd;
use smallvec::SmallVec;

use crate::{Float, Matrix, Vector, EPSILON};

/// Arbitrary hash value for a float.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FloatHash(u32);

/// Approximate hash map for objects with floating-point values.
///
/// Each distinct float (up to [`EPSILON`]) is interned to an arbitrary
/// [`FloatHash`]; keys are hashed by their sequence of interned floats, so two
/// keys whose components pairwise coincide within tolerance collide and the
/// first-inserted entry wins.
#[derive(Debug, Clone)]
pub struct ApproxHashMap<K: ApproxHashMapKey, V> {
    pub(crate) inner: HashMap<K::Hash, V>,
    float_hashes: BTreeMap<FloatOrd<Float>, FloatHash>,
    _phantom: PhantomData<K>,
}

impl<K: ApproxHashMapKey, V> Default for ApproxHashMap<K, V> {
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
            float_hashes: BTreeMap::new(),
            _phantom: PhantomData,
        }
    }
}

impl<K: ApproxHashMapKey, V> ApproxHashMap<K, V> {
    /// Constructs an empty map.
    pub fn new() -> Self {
        ApproxHashMap::default()
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.inner.len()
    }
    /// Returns whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Inserts an entry into the map and returns the old value, if any.
    pub fn insert(&mut self, key: &K, value: V) -> Option<V> {
        let hash_key = key.approx_hash(|x| self.hash_float(x));
        self.inner.insert(hash_key, value)
    }
    /// Returns the entry for a key, which may match any existing key within
    /// tolerance.
    pub fn entry(&mut self, key: &K) -> Entry<'_, K::Hash, V> {
        let hash_key = key.approx_hash(|x| self.hash_float(x));
        self.inner.entry(hash_key)
    }

    /// Search for an existing hash value for a float that is approximately
    /// equal to `x` and return it if found; otherwise assign a new hash value
    /// to `x` and return that.
    fn hash_float(&mut self, x: Float) -> FloatHash {
        self.float_hashes
            .range(FloatOrd(x - EPSILON)..=FloatOrd(x + EPSILON))
            .next()
            .map(|(_, &hash)| hash)
            .unwrap_or_else(|| {
                let new_hash = FloatHash(self.float_hashes.len() as u32);
                self.float_hashes.insert(FloatOrd(x), new_hash);
                new_hash
            })
    }
}

/// Type that can be used as a key in an [`ApproxHashMap`].
pub trait ApproxHashMapKey {
    /// Hashable representation of the type, using [`FloatHash`] instead of
    /// any floating-point values.
    type Hash: Eq + Hash;

    /// Returns a hashable representation of a value.
    fn approx_hash(&self, float_hash_fn: impl FnMut(Float) -> FloatHash) -> Self::Hash;
}

/// Value derived from a vector that can be hashed. Don't use this directly;
/// use via [`ApproxHashMap`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct VectorHash(SmallVec<[FloatHash; 4]>);

impl ApproxHashMapKey for Vector {
    type Hash = VectorHash;

    fn approx_hash(&self, float_hash_fn: impl FnMut(Float) -> FloatHash) -> Self::Hash {
        VectorHash(self.iter().map(float_hash_fn).collect())
    }
}

/// Value derived from a matrix that can be hashed. Don't use this directly;
/// use via [`ApproxHashMap`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct MatrixHash {
    ndim: u8,
    elems: SmallVec<[FloatHash; 16]>,
}

impl ApproxHashMapKey for Matrix {
    type Hash = MatrixHash;

    fn approx_hash(&self, float_hash_fn: impl FnMut(Float) -> FloatHash) -> Self::Hash {
        MatrixHash {
            ndim: self.ndim(),
            elems: self.as_slice().iter().copied().map(float_hash_fn).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{row_matrix, vector};

    #[test]
    fn test_approx_vector_keys() {
        let mut map = ApproxHashMap::new();
        assert_eq!(map.insert(&vector![1.0, 2.0], "a"), None);
        // Within tolerance of the first key.
        assert_eq!(map.insert(&vector![1.0 + 1e-9, 2.0 - 1e-9], "b"), Some("a"));
        // Outside tolerance.
        assert_eq!(map.insert(&vector![1.0 + 1e-3, 2.0], "c"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_approx_matrix_entry() {
        let mut map = ApproxHashMap::new();
        let m = row_matrix![[0., -1.], [1., 0.]];
        let nearly_m = row_matrix![[1e-10, -1.], [1., -1e-10]];

        assert!(matches!(map.entry(&m), Entry::Vacant(_)));
        map.insert(&m, 7);
        assert!(matches!(map.entry(&nearly_m), Entry::Occupied(_)));
    }
}
