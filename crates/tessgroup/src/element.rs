//! Group elements tagged with their generating word.

use std::fmt;

use tessmath::approx::AbsDiffEq;
use tessmath::{Matrix, Metric, Vector, EPSILON};

use crate::common::{GroupError, GroupResult};

/// A group element: a homogeneous transformation matrix together with the
/// word that produced it.
///
/// Elements are immutable in practice: once emitted by the enumeration engine
/// the word and matrix are fixed. Two elements whose matrices agree within
/// [`EPSILON`] are the same group element regardless of word.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupElement {
    /// Isometry of the group's ambient space, in homogeneous coordinates.
    pub matrix: Matrix,
    /// Word over the generator alphabet; empty for the identity.
    pub word: String,
    /// Metric of the group's ambient space.
    pub metric: Metric,
    /// Optional color tag, assigned during enumeration from the generator
    /// that produced the element.
    pub color_index: Option<u16>,
}

impl GroupElement {
    /// Constructs the identity element of `ndim`-dimensional space (so the
    /// matrix is (`ndim`+1)×(`ndim`+1)).
    pub fn identity(metric: Metric, ndim: u8) -> Self {
        Self {
            matrix: Matrix::ident(ndim + 1),
            word: String::new(),
            metric,
            color_index: None,
        }
    }

    /// Constructs a generator element from a matrix and a one-letter name.
    ///
    /// Returns an error if the name is not a single letter or the matrix is
    /// not an isometry of `metric` within tolerance.
    pub fn generator(matrix: Matrix, name: char, metric: Metric) -> GroupResult<Self> {
        if !name.is_ascii_alphabetic() {
            return Err(GroupError::BadGeneratorWord(name.to_string()));
        }
        if !metric.is_isometry(&matrix) {
            return Err(GroupError::InvalidGenerator(name.to_string()));
        }
        Ok(Self {
            matrix,
            word: name.to_string(),
            metric,
            color_index: None,
        })
    }

    /// Returns the element's depth: the length of its generating word.
    pub fn depth(&self) -> usize {
        self.word.chars().count()
    }

    /// Returns whether this is the identity element (word aside).
    pub fn is_identity(&self) -> bool {
        let ndim = self.matrix.ndim();
        self.matrix.abs_diff_eq(&Matrix::ident(ndim), EPSILON)
    }

    /// Right-multiplies by a generator, producing the candidate element with
    /// word `self.word + generator.word`.
    #[must_use]
    pub fn apply(&self, generator: &GroupElement) -> GroupElement {
        GroupElement {
            matrix: &self.matrix * &generator.matrix,
            word: format!("{}{}", self.word, generator.word),
            metric: self.metric,
            color_index: generator.color_index,
        }
    }

    /// Applies the element's matrix to a homogeneous point.
    pub fn transform_point(&self, point: &Vector) -> Vector {
        self.matrix.transform(point)
    }
}

impl fmt::Display for GroupElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.word.as_str() {
            "" => write!(f, "1"),
            word => write!(f, "{word}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use tessmath::row_matrix;

    use super::*;

    #[test]
    fn test_generator_validation() {
        let scale = row_matrix![[2., 0., 0.], [0., 2., 0.], [0., 0., 1.]];
        assert_eq!(
            GroupElement::generator(scale, 'a', Metric::Euclidean),
            Err(GroupError::InvalidGenerator("a".to_string())),
        );

        let rot = row_matrix![[0., -1., 0.], [1., 0., 0.], [0., 0., 1.]];
        assert_eq!(
            GroupElement::generator(rot.clone(), '?', Metric::Euclidean),
            Err(GroupError::BadGeneratorWord("?".to_string())),
        );
        assert!(GroupElement::generator(rot, 'a', Metric::Euclidean).is_ok());
    }

    #[test]
    fn test_apply_concatenates_words() {
        let t = row_matrix![[1., 0., 1.], [0., 1., 0.], [0., 0., 1.]];
        let g = GroupElement::generator(t, 't', Metric::Euclidean).unwrap();
        let id = GroupElement::identity(Metric::Euclidean, 2);
        let tt = id.apply(&g).apply(&g);
        assert_eq!(tt.word, "tt");
        assert_eq!(tt.depth(), 2);
        assert_eq!(tt.matrix.get(0, 2), 2.0);
        assert!(!tt.is_identity());
        assert!(id.is_identity());
    }
}
