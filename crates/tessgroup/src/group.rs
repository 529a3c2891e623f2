//! Discrete group aggregation: generators, automaton, constraint, and the
//! cached element list.

use std::collections::HashMap;

use tessmath::{Matrix, Metric, Vector};

use crate::automaton::FiniteStateAutomaton;
use crate::common::{GroupError, GroupResult};
use crate::constraint::{Constraint, SimpleConstraint};
use crate::element::GroupElement;
use crate::enumerate::{self, Enumerator};

/// A discrete group of isometries, configured by generators and a constraint,
/// producing a lazily cached element list.
///
/// Every mutator bumps a configuration stamp; the cached element list records
/// the stamp (and the constraint's own version counter) it was computed at
/// and is regenerated on access whenever either has moved. No concurrent
/// mutation is supported: the cache model assumes exclusive single-writer
/// access.
pub struct DiscreteGroup {
    generators: Vec<GroupElement>,
    automaton: Option<FiniteStateAutomaton>,
    constraint: Box<dyn Constraint>,
    metric: Metric,
    dimension: u8,
    change_of_basis: Matrix,
    center_point: Vector,

    elements: Vec<GroupElement>,
    config_stamp: u64,
    /// `(config_stamp, constraint version)` the cached list was computed at.
    cached_at: Option<(u64, u64)>,

    /// Memoized generator-inverse table; see
    /// [`DiscreteGroup::generator_inverse()`].
    inverse_table: Option<Vec<usize>>,
    /// Memoized letter → generator-index table.
    letter_table: Option<HashMap<char, usize>>,
}

impl Default for DiscreteGroup {
    fn default() -> Self {
        Self::new(Metric::Euclidean, 3)
    }
}

impl DiscreteGroup {
    /// Constructs an empty group of `dimension`-dimensional space with an
    /// unbounded [`SimpleConstraint`].
    pub fn new(metric: Metric, dimension: u8) -> Self {
        Self {
            generators: Vec::new(),
            automaton: None,
            constraint: Box::new(SimpleConstraint::new()),
            metric,
            dimension,
            change_of_basis: Matrix::ident(dimension + 1),
            center_point: Vector::origin(dimension),
            elements: Vec::new(),
            config_stamp: 0,
            cached_at: None,
            inverse_table: None,
            letter_table: None,
        }
    }

    /// Returns the group's generators.
    pub fn generators(&self) -> &[GroupElement] {
        &self.generators
    }
    /// Returns the group's metric.
    pub fn metric(&self) -> Metric {
        self.metric
    }
    /// Returns the dimension of the group's ambient space.
    pub fn dimension(&self) -> u8 {
        self.dimension
    }
    /// Returns the reference point used for fundamental-domain construction.
    pub fn center_point(&self) -> &Vector {
        &self.center_point
    }
    /// Returns the group's constraint.
    pub fn constraint(&self) -> &dyn Constraint {
        &*self.constraint
    }
    /// Returns the group's constraint mutably. Changes made through the
    /// constraint's setters bump its version counter, which dirties the
    /// cached element list.
    pub fn constraint_mut(&mut self) -> &mut dyn Constraint {
        &mut *self.constraint
    }

    /// Replaces the generator set. Each generator must be an isometry of the
    /// group's metric; its `metric` tag is overwritten with the group's.
    ///
    /// Invalidates the cached element list and the memoized lookup tables.
    pub fn set_generators(&mut self, generators: Vec<GroupElement>) -> GroupResult<()> {
        for g in &generators {
            if !self.metric.is_isometry(&g.matrix) {
                return Err(GroupError::InvalidGenerator(g.word.clone()));
            }
        }
        self.generators = generators;
        for g in &mut self.generators {
            g.metric = self.metric;
        }
        self.inverse_table = None;
        self.letter_table = None;
        self.touch();
        Ok(())
    }

    /// Sets or clears the word acceptor.
    pub fn set_automaton(&mut self, automaton: Option<FiniteStateAutomaton>) {
        self.automaton = automaton;
        self.touch();
    }

    /// Replaces the constraint.
    pub fn set_constraint(&mut self, constraint: Box<dyn Constraint>) {
        self.constraint = constraint;
        self.touch();
    }

    /// Sets the change-of-basis matrix. Every element matrix in the generated
    /// list is conjugated by it.
    ///
    /// Returns an error if the matrix is singular.
    pub fn set_change_of_basis(&mut self, matrix: Matrix) -> GroupResult<()> {
        if matrix.inverse().is_none() {
            return Err(GroupError::SingularChangeOfBasis);
        }
        self.change_of_basis = matrix;
        self.touch();
        Ok(())
    }

    /// Sets the reference point used for fundamental-domain construction.
    pub fn set_center_point(&mut self, center_point: Vector) {
        self.center_point = center_point;
        self.touch();
    }

    /// Explicitly marks the cached element list as out of date.
    pub fn invalidate(&mut self) {
        self.touch();
    }

    fn touch(&mut self) {
        self.config_stamp += 1;
    }

    /// Returns whether the cached element list is out of date.
    pub fn is_dirty(&self) -> bool {
        self.cached_at != Some((self.config_stamp, self.constraint.version()))
    }

    /// Regenerates the cached element list if the configuration changed since
    /// it was last computed.
    pub fn update(&mut self) -> GroupResult<()> {
        if !self.is_dirty() {
            return Ok(());
        }

        let inverse_table = self.inverse_table()?.to_vec();
        let enumerator = Enumerator::with_inverse_table(
            &self.generators,
            inverse_table,
            self.automaton.as_ref(),
            &mut *self.constraint,
            self.metric,
            self.dimension,
        );
        let mut elements = enumerator.run();

        let ndim = self.dimension + 1;
        if self.change_of_basis != Matrix::ident(ndim) {
            let inverse = self
                .change_of_basis
                .inverse()
                .ok_or(GroupError::SingularChangeOfBasis)?;
            for element in &mut elements {
                element.matrix = &(&self.change_of_basis * &element.matrix) * &inverse;
            }
        }

        self.elements = elements;
        self.cached_at = Some((self.config_stamp, self.constraint.version()));
        Ok(())
    }

    /// Returns the ordered element list, regenerating it first if the
    /// configuration changed.
    pub fn element_list(&mut self) -> GroupResult<&[GroupElement]> {
        self.update()?;
        Ok(&self.elements)
    }

    /// Returns the inverse of a generator, by index into
    /// [`DiscreteGroup::generators()`].
    ///
    /// The underlying table is built once: a generator whose word is the
    /// inverted-case word is the explicit inverse; a generator that squares
    /// to the identity is its own inverse; a generator with neither is a
    /// fatal error.
    pub fn generator_inverse(&mut self, index: usize) -> GroupResult<&GroupElement> {
        let inverse_index = self.inverse_table()?[index];
        Ok(&self.generators[inverse_index])
    }

    /// Returns the generator with the given one-letter name, if any.
    pub fn generator_by_letter(&mut self, letter: char) -> Option<&GroupElement> {
        let table = self.letter_table.get_or_insert_with(|| {
            self.generators
                .iter()
                .enumerate()
                .filter_map(|(i, g)| g.word.chars().next().map(|c| (c, i)))
                .collect()
        });
        let index = *table.get(&letter)?;
        Some(&self.generators[index])
    }

    fn inverse_table(&mut self) -> GroupResult<&[usize]> {
        if self.inverse_table.is_none() {
            self.inverse_table = Some(enumerate::generator_inverses(&self.generators)?);
        }
        Ok(self.inverse_table.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use tessmath::approx::AbsDiffEq;
    use tessmath::{row_matrix, vector, EPSILON};

    use super::*;

    fn translation_generators() -> Vec<GroupElement> {
        let t = row_matrix![[1., 0., 1.], [0., 1., 0.], [0., 0., 1.]];
        let t_inv = row_matrix![[1., 0., -1.], [0., 1., 0.], [0., 0., 1.]];
        vec![
            GroupElement::generator(t, 't', Metric::Euclidean).unwrap(),
            GroupElement::generator(t_inv, 'T', Metric::Euclidean).unwrap(),
        ]
    }

    fn bounded_group(max_word_length: usize) -> DiscreteGroup {
        let mut group = DiscreteGroup::new(Metric::Euclidean, 2);
        group.set_generators(translation_generators()).unwrap();
        let mut constraint = SimpleConstraint::new();
        constraint.set_max_word_length(Some(max_word_length));
        group.set_constraint(Box::new(constraint));
        group
    }

    #[test]
    fn test_lazy_cache_regeneration() -> eyre::Result<()> {
        let mut group = bounded_group(2);
        assert!(group.is_dirty());
        assert_eq!(group.element_list()?.len(), 5); // "", t, T, tt, TT
        assert!(!group.is_dirty());

        // Mutating the constraint through the group dirties the cache via the
        // constraint's version counter.
        group.constraint_mut().set_max_element_count(3);
        assert!(group.is_dirty());
        assert_eq!(group.element_list()?.len(), 3);

        group.invalidate();
        assert!(group.is_dirty());
        Ok(())
    }

    #[test]
    fn test_invalid_generator_rejected() {
        let scale = row_matrix![[3., 0., 0.], [0., 3., 0.], [0., 0., 1.]];
        let mut group = DiscreteGroup::new(Metric::Euclidean, 2);
        let bad = GroupElement {
            matrix: scale,
            word: "s".to_string(),
            metric: Metric::Euclidean,
            color_index: None,
        };
        assert_eq!(
            group.set_generators(vec![bad]),
            Err(GroupError::InvalidGenerator("s".to_string())),
        );
    }

    #[test]
    fn test_generator_inverse_lookup() -> eyre::Result<()> {
        let mut group = bounded_group(1);
        assert_eq!(group.generator_inverse(0)?.word, "T");
        assert_eq!(group.generator_inverse(1)?.word, "t");

        // A reflection with no partner letter is its own inverse.
        let mirror = row_matrix![[-1., 0., 0.], [0., 1., 0.], [0., 0., 1.]];
        let mut group = DiscreteGroup::new(Metric::Euclidean, 2);
        group.set_generators(vec![GroupElement::generator(
            mirror,
            'm',
            Metric::Euclidean,
        )?])?;
        assert_eq!(group.generator_inverse(0)?.word, "m");
        Ok(())
    }

    #[test]
    fn test_missing_inverse_surfaces_on_update() {
        let mut generators = translation_generators();
        generators.truncate(1);
        let mut group = DiscreteGroup::new(Metric::Euclidean, 2);
        group.set_generators(generators).unwrap();
        assert_eq!(
            group.element_list().map(<[GroupElement]>::len),
            Err(GroupError::MissingInverse("t".to_string())),
        );
    }

    #[test]
    fn test_generator_by_letter() {
        let mut group = bounded_group(1);
        assert_eq!(group.generator_by_letter('t').map(|g| &*g.word), Some("t"));
        assert_eq!(group.generator_by_letter('x'), None);
    }

    #[test]
    fn test_change_of_basis_conjugates_elements() -> eyre::Result<()> {
        // A quarter turn about the origin, conjugated by a unit translation,
        // becomes a quarter turn about the translated point.
        let quarter = row_matrix![[0., -1., 0.], [1., 0., 0.], [0., 0., 1.]];
        let quarter_inv = quarter.transpose();
        let mut group = DiscreteGroup::new(Metric::Euclidean, 2);
        group.set_generators(vec![
            GroupElement::generator(quarter, 'r', Metric::Euclidean)?,
            GroupElement::generator(quarter_inv, 'R', Metric::Euclidean)?,
        ])?;
        group.set_change_of_basis(row_matrix![[1., 0., 1.], [0., 1., 0.], [0., 0., 1.]])?;

        let fixed_point = vector![1.0, 0.0, 1.0];
        for element in group.element_list()? {
            let image = element.transform_point(&fixed_point);
            assert!(image.abs_diff_eq(&fixed_point, EPSILON));
        }
        assert_eq!(group.element_list()?.len(), 4);

        assert_eq!(
            group.set_change_of_basis(row_matrix![[1., 1.], [1., 1.]]),
            Err(GroupError::SingularChangeOfBasis),
        );
        Ok(())
    }
}
