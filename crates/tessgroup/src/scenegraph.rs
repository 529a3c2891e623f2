//! Flat scene-graph output.
//!
//! Consumers place one transformed copy of a fundamental domain per group
//! element; this module flattens the element list into plain placement
//! records so the rendering layer never touches group internals.

use tessmath::Matrix;

use crate::common::GroupResult;
use crate::element::GroupElement;
use crate::group::DiscreteGroup;

/// One transformed copy of the fundamental domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Transformation to apply to the fundamental domain, in homogeneous
    /// coordinates.
    pub matrix: Matrix,
    /// Word of the element that produced this placement.
    pub word: String,
    /// Color tag, if the element carries one.
    pub color_index: Option<u16>,
    /// Word length of the element.
    pub depth: usize,
}

impl From<&GroupElement> for Placement {
    fn from(element: &GroupElement) -> Self {
        Self {
            matrix: element.matrix.clone(),
            word: element.word.clone(),
            color_index: element.color_index,
            depth: element.depth(),
        }
    }
}

/// Maps the group's element list onto a flat list of placements,
/// regenerating the list first if the configuration changed.
pub fn placements(group: &mut DiscreteGroup) -> GroupResult<Vec<Placement>> {
    Ok(group.element_list()?.iter().map(Placement::from).collect())
}

/// Returns the number of elements at each depth (word length), indexed by
/// depth.
pub fn depth_histogram(elements: &[GroupElement]) -> Vec<usize> {
    let mut counts = Vec::new();
    for element in elements {
        let depth = element.depth();
        if counts.len() <= depth {
            counts.resize(depth + 1, 0);
        }
        counts[depth] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use tessmath::{row_matrix, Metric};

    use super::*;
    use crate::constraint::SimpleConstraint;

    fn translation_group() -> DiscreteGroup {
        let t = row_matrix![[1., 0., 1.], [0., 1., 0.], [0., 0., 1.]];
        let t_inv = row_matrix![[1., 0., -1.], [0., 1., 0.], [0., 0., 1.]];
        let mut group = DiscreteGroup::new(Metric::Euclidean, 2);
        group
            .set_generators(vec![
                GroupElement::generator(t, 't', Metric::Euclidean).unwrap(),
                GroupElement::generator(t_inv, 'T', Metric::Euclidean).unwrap(),
            ])
            .unwrap();
        let mut constraint = SimpleConstraint::new();
        constraint.set_max_word_length(Some(2));
        group.set_constraint(Box::new(constraint));
        group
    }

    #[test]
    fn test_placements_mirror_element_list() -> eyre::Result<()> {
        let mut group = translation_group();
        let placements = placements(&mut group)?;
        assert_eq!(placements.len(), 5);
        assert_eq!(placements[0].word, "");
        assert_eq!(placements[0].depth, 0);
        assert!(placements.iter().skip(1).all(|p| p.color_index.is_some()));
        Ok(())
    }

    #[test]
    fn test_depth_histogram() -> eyre::Result<()> {
        let mut group = translation_group();
        let histogram = depth_histogram(group.element_list()?);
        assert_eq!(histogram, vec![1, 2, 2]);
        Ok(())
    }
}
