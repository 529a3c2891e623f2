//! Dirichlet fundamental domains.
//!
//! The Dirichlet domain around a base point `c` is the set of points at least
//! as close to `c` as to any translate `g·c`. For the flat metric its walls
//! are the perpendicular-bisector half-spaces between `c` and each translate;
//! the general-metric membership predicate compares distances directly.

use float_ord::FloatOrd;
use tessmath::approx::AbsDiffEq;
use tessmath::approx_cmp::approx_lt_eq;
use tessmath::{Float, Vector, EPSILON};

use crate::element::GroupElement;

/// Euclidean half-space `normal · x ≤ distance` with a normalized normal.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfSpace {
    /// Normalized normal vector, pointing out of the domain.
    pub normal: Vector,
    /// Distance from the origin to the boundary plane, along the normal.
    pub distance: Float,
}

impl HalfSpace {
    /// Constructs the half-space of points at least as close to `center` as
    /// to `image` (both in affine coordinates). Returns `None` if the two
    /// points approximately coincide.
    pub fn bisector(center: &Vector, image: &Vector) -> Option<Self> {
        let normal = (image - center).normalize()?;
        let midpoint = (center + image) * 0.5;
        let distance = normal.dot(&midpoint);
        Some(Self { normal, distance })
    }

    /// Returns whether an affine point is inside the half-space (boundary
    /// included, within tolerance).
    pub fn contains(&self, point: &Vector) -> bool {
        approx_lt_eq(&self.normal.dot(point), &self.distance)
    }

    /// Signed distance from an affine point to the boundary plane; negative
    /// inside.
    pub fn signed_distance(&self, point: &Vector) -> Float {
        self.normal.dot(point) - self.distance
    }
}

impl AbsDiffEq for HalfSpace {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.normal.abs_diff_eq(&other.normal, epsilon)
            && self.distance.abs_diff_eq(&other.distance, epsilon)
    }
}

/// Computes the bounding half-spaces of the Dirichlet domain around `center`
/// (a homogeneous point) for the flat metric: one perpendicular bisector per
/// non-identity element that moves the center, nearest walls first, with
/// duplicate walls removed.
pub fn dirichlet_half_spaces(elements: &[GroupElement], center: &Vector) -> Vec<HalfSpace> {
    let Some(center_affine) = center.dehomogenize() else {
        return Vec::new();
    };

    let mut walls: Vec<HalfSpace> = Vec::new();
    for element in elements {
        let Some(image) = element.transform_point(center).dehomogenize() else {
            continue;
        };
        // Elements fixing the center (the identity among them) contribute no
        // wall.
        let Some(wall) = HalfSpace::bisector(&center_affine, &image) else {
            continue;
        };
        if !walls.iter().any(|w| w.abs_diff_eq(&wall, EPSILON)) {
            walls.push(wall);
        }
    }

    walls.sort_by_key(|w| FloatOrd(w.signed_distance(&center_affine).abs()));
    walls
}

/// Returns whether a homogeneous point lies in the Dirichlet domain around
/// `center`, for any metric: no translate of the center is strictly closer.
pub fn in_dirichlet_domain(
    elements: &[GroupElement],
    center: &Vector,
    point: &Vector,
) -> bool {
    let Some(first) = elements.first() else {
        return true;
    };
    let metric = first.metric;
    let base_distance = metric.distance(point, center);
    elements.iter().all(|element| {
        let image = element.transform_point(center);
        approx_lt_eq(&base_distance, &metric.distance(point, &image))
    })
}

#[cfg(test)]
mod tests {
    use tessmath::{row_matrix, vector, Metric};

    use super::*;
    use crate::constraint::SimpleConstraint;
    use crate::enumerate::generate_elements;

    fn lattice_elements() -> Vec<GroupElement> {
        let t = row_matrix![[1., 0., 1.], [0., 1., 0.], [0., 0., 1.]];
        let t_inv = row_matrix![[1., 0., -1.], [0., 1., 0.], [0., 0., 1.]];
        let u = row_matrix![[1., 0., 0.], [0., 1., 1.], [0., 0., 1.]];
        let u_inv = row_matrix![[1., 0., 0.], [0., 1., -1.], [0., 0., 1.]];
        let generators: Vec<GroupElement> = [(t, 't'), (t_inv, 'T'), (u, 'u'), (u_inv, 'U')]
            .into_iter()
            .map(|(m, name)| GroupElement::generator(m, name, Metric::Euclidean).unwrap())
            .collect();
        let mut constraint = SimpleConstraint::new();
        constraint.set_max_word_length(Some(2));
        generate_elements(&generators, None, &mut constraint).unwrap()
    }

    #[test]
    fn test_unit_lattice_walls() {
        let center = vector![0.0, 0.0, 1.0];
        let walls = dirichlet_half_spaces(&lattice_elements(), &center);

        // The four nearest walls bound the unit square around the origin.
        assert!(walls.len() >= 4);
        for wall in &walls[..4] {
            tessmath::assert_approx_eq!(wall.signed_distance(&vector![0.0, 0.0]).abs(), 0.5);
        }

        let inside = vector![0.2, 0.2];
        let outside = vector![0.7, 0.0];
        assert!(walls.iter().all(|w| w.contains(&inside)));
        assert!(!walls.iter().all(|w| w.contains(&outside)));
    }

    #[test]
    fn test_domain_membership_predicate() {
        let elements = lattice_elements();
        let center = vector![0.0, 0.0, 1.0];
        assert!(in_dirichlet_domain(&elements, &center, &vector![0.2, 0.2, 1.0]));
        assert!(!in_dirichlet_domain(&elements, &center, &vector![0.7, 0.0, 1.0]));
        // Boundary points belong to the domain.
        assert!(in_dirichlet_domain(&elements, &center, &vector![0.5, 0.0, 1.0]));
    }

    #[test]
    fn test_bisector_of_coincident_points_is_none() {
        let p = vector![1.0, 2.0];
        assert_eq!(HalfSpace::bisector(&p, &p), None);
    }
}
