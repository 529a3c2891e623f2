//! Pruning predicates applied to candidate elements during enumeration.
//!
//! Every constraint combines a predicate with a capacity gate: once the
//! running accepted-count reaches the element cap, all further candidates are
//! rejected until [`Constraint::update()`] resets the counter at the start of
//! the next enumeration pass. Thresholds are `Option`s; `None` means
//! unbounded.

use tessmath::approx_cmp::{approx_eq, approx_lt_eq};
use tessmath::{Float, Vector};

use crate::element::GroupElement;

/// Predicate plus capacity gate deciding whether a candidate element is kept
/// during enumeration.
///
/// Constraints are stateful: they count accepted elements, and they carry a
/// version counter that setters bump so that an owning [`DiscreteGroup`] can
/// poll for configuration changes instead of subscribing to notifications.
///
/// [`DiscreteGroup`]: crate::group::DiscreteGroup
pub trait Constraint {
    /// Returns whether `element` should be kept, counting it against the
    /// element cap if so.
    fn accept_element(&mut self, element: &GroupElement) -> bool;

    /// Returns the maximum number of elements this constraint will accept in
    /// one enumeration pass.
    fn max_element_count(&self) -> usize;
    /// Sets the maximum number of elements to accept in one pass.
    fn set_max_element_count(&mut self, n: usize);

    /// Resets the running accepted-count. Called once at the start of each
    /// enumeration pass.
    fn update(&mut self);

    /// Returns a counter that increases whenever a setter changes the
    /// constraint's configuration.
    fn version(&self) -> u64;
}

/// General-purpose constraint gating on word length, distance of the
/// transformed center point, and element count.
///
/// A `None` threshold is unbounded for that dimension; if both thresholds are
/// `None`, every candidate is accepted (subject to the element cap).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct SimpleConstraint {
    max_distance: Option<Float>,
    max_word_length: Option<usize>,
    max_element_count: usize,
    /// Reference point for distance measurement, in homogeneous coordinates.
    center: Vector,
    /// Measure Chebyshev (L∞) distance instead of metric distance.
    manhattan: bool,
    /// When false, evaluation is "dry": acceptance does not consume capacity.
    count_accepted: bool,
    accepted: usize,
    version: u64,
}

impl Default for SimpleConstraint {
    fn default() -> Self {
        Self {
            max_distance: None,
            max_word_length: None,
            max_element_count: usize::MAX,
            center: Vector::origin(3),
            manhattan: false,
            count_accepted: true,
            accepted: 0,
            version: 0,
        }
    }
}

impl SimpleConstraint {
    /// Constructs an unbounded constraint centered on the origin of 3-space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the metric-distance threshold (`None` = unbounded).
    pub fn set_max_distance(&mut self, d: Option<Float>) {
        self.max_distance = d;
        self.version += 1;
    }
    /// Sets the word-length threshold (`None` = unbounded).
    pub fn set_max_word_length(&mut self, n: Option<usize>) {
        self.max_word_length = n;
        self.version += 1;
    }
    /// Sets the reference point for distance measurement.
    pub fn set_center(&mut self, center: Vector) {
        self.center = center;
        self.version += 1;
    }
    /// Selects Chebyshev (L∞) distance instead of metric distance.
    pub fn set_manhattan(&mut self, manhattan: bool) {
        self.manhattan = manhattan;
        self.version += 1;
    }
    /// When `false`, acceptance does not consume capacity (dry evaluation).
    pub fn set_count_accepted(&mut self, count_accepted: bool) {
        self.count_accepted = count_accepted;
        self.version += 1;
    }

    fn distance_ok(&self, element: &GroupElement) -> bool {
        let Some(max_distance) = self.max_distance else {
            return true;
        };
        let transformed = element.transform_point(&self.center);
        let d = if self.manhattan {
            element.metric.chebyshev_distance(&self.center, &transformed)
        } else {
            element.metric.distance(&self.center, &transformed)
        };
        approx_lt_eq(&d, &max_distance)
    }
}

impl Constraint for SimpleConstraint {
    fn accept_element(&mut self, element: &GroupElement) -> bool {
        if self.accepted >= self.max_element_count {
            return false;
        }
        let word_ok = self
            .max_word_length
            .map_or(true, |max| element.depth() <= max);
        let ok = word_ok && self.distance_ok(element);
        if ok && self.count_accepted {
            self.accepted += 1;
        }
        ok
    }

    fn max_element_count(&self) -> usize {
        self.max_element_count
    }
    fn set_max_element_count(&mut self, n: usize) {
        self.max_element_count = n;
        self.version += 1;
    }

    fn update(&mut self) {
        self.accepted = 0;
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Constraint accepting only pure translations: elements whose linear block
/// is the identity.
///
/// Useful for extracting the translation lattice of a crystallographic group.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TranslationConstraint {
    max_element_count: usize,
    accepted: usize,
    version: u64,
}

impl Default for TranslationConstraint {
    fn default() -> Self {
        Self {
            max_element_count: usize::MAX,
            accepted: 0,
            version: 0,
        }
    }
}

impl TranslationConstraint {
    /// Constructs an unbounded translation constraint.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Constraint for TranslationConstraint {
    fn accept_element(&mut self, element: &GroupElement) -> bool {
        if self.accepted >= self.max_element_count {
            return false;
        }
        let n = element.matrix.ndim();
        let linear_ok = (0..n.saturating_sub(1)).all(|r| {
            (0..n.saturating_sub(1))
                .all(|c| approx_eq(&element.matrix.get(r, c), &((r == c) as u8 as Float)))
        });
        if linear_ok {
            self.accepted += 1;
        }
        linear_ok
    }

    fn max_element_count(&self) -> usize {
        self.max_element_count
    }
    fn set_max_element_count(&mut self, n: usize) {
        self.max_element_count = n;
        self.version += 1;
    }

    fn update(&mut self) {
        self.accepted = 0;
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Constraint gating on word length only.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct WordLengthConstraint {
    max_word_length: usize,
    max_element_count: usize,
    accepted: usize,
    version: u64,
}

impl WordLengthConstraint {
    /// Constructs a constraint accepting words of at most `max_word_length`
    /// letters.
    pub fn new(max_word_length: usize) -> Self {
        Self {
            max_word_length,
            max_element_count: usize::MAX,
            accepted: 0,
            version: 0,
        }
    }

    /// Sets the word-length threshold.
    pub fn set_max_word_length(&mut self, n: usize) {
        self.max_word_length = n;
        self.version += 1;
    }
}

impl Constraint for WordLengthConstraint {
    fn accept_element(&mut self, element: &GroupElement) -> bool {
        if self.accepted >= self.max_element_count {
            return false;
        }
        let ok = element.depth() <= self.max_word_length;
        if ok {
            self.accepted += 1;
        }
        ok
    }

    fn max_element_count(&self) -> usize {
        self.max_element_count
    }
    fn set_max_element_count(&mut self, n: usize) {
        self.max_element_count = n;
        self.version += 1;
    }

    fn update(&mut self) {
        self.accepted = 0;
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Constraint accepting only orientation-preserving elements (positive
/// determinant).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct DirectIsometryConstraint {
    max_element_count: usize,
    accepted: usize,
    version: u64,
}

impl Default for DirectIsometryConstraint {
    fn default() -> Self {
        Self {
            max_element_count: usize::MAX,
            accepted: 0,
            version: 0,
        }
    }
}

impl DirectIsometryConstraint {
    /// Constructs an unbounded direct-isometry constraint.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Constraint for DirectIsometryConstraint {
    fn accept_element(&mut self, element: &GroupElement) -> bool {
        if self.accepted >= self.max_element_count {
            return false;
        }
        let ok = element.matrix.determinant() > 0.0;
        if ok {
            self.accepted += 1;
        }
        ok
    }

    fn max_element_count(&self) -> usize {
        self.max_element_count
    }
    fn set_max_element_count(&mut self, n: usize) {
        self.max_element_count = n;
        self.version += 1;
    }

    fn update(&mut self) {
        self.accepted = 0;
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use tessmath::{row_matrix, vector, Metric};

    use super::*;

    fn translation(x: Float, y: Float) -> GroupElement {
        let m = row_matrix![[1., 0., x], [0., 1., y], [0., 0., 1.]];
        GroupElement {
            matrix: m,
            word: "t".to_string(),
            metric: Metric::Euclidean,
            color_index: None,
        }
    }

    fn rotation_90() -> GroupElement {
        let m = row_matrix![[0., -1., 0.], [1., 0., 0.], [0., 0., 1.]];
        GroupElement {
            matrix: m,
            word: "r".to_string(),
            metric: Metric::Euclidean,
            color_index: None,
        }
    }

    #[test]
    fn test_simple_constraint_cap() {
        let mut c = SimpleConstraint::new();
        c.set_max_element_count(2);
        c.update();
        let e = translation(1.0, 0.0);
        assert!(c.accept_element(&e));
        assert!(c.accept_element(&e));
        assert!(!c.accept_element(&e));
        // Reset restores capacity.
        c.update();
        assert!(c.accept_element(&e));
    }

    #[test]
    fn test_simple_constraint_distance() {
        let mut c = SimpleConstraint::new();
        c.set_center(vector![0.0, 0.0, 1.0]);
        c.set_max_distance(Some(1.0));
        c.update();

        assert!(c.accept_element(&translation(1.0, 0.0)));
        assert!(!c.accept_element(&translation(1.0, 1.0))); // L2 = √2

        // Chebyshev distance of (1, 1) is 1.
        c.set_manhattan(true);
        c.update();
        assert!(c.accept_element(&translation(1.0, 1.0)));
    }

    #[test]
    fn test_simple_constraint_word_length() {
        let mut c = SimpleConstraint::new();
        c.set_max_word_length(Some(0));
        c.update();
        let id = GroupElement::identity(Metric::Euclidean, 2);
        assert!(c.accept_element(&id));
        assert!(!c.accept_element(&translation(1.0, 0.0)));
    }

    #[test]
    fn test_simple_constraint_dry_run() {
        let mut c = SimpleConstraint::new();
        c.set_max_element_count(1);
        c.set_count_accepted(false);
        c.update();
        let e = translation(1.0, 0.0);
        assert!(c.accept_element(&e));
        assert!(c.accept_element(&e)); // dry evaluation never consumes capacity
    }

    #[test]
    fn test_translation_constraint() {
        let mut c = TranslationConstraint::new();
        c.update();
        assert!(c.accept_element(&translation(2.0, 3.0)));
        assert!(!c.accept_element(&rotation_90()));
    }

    #[test]
    fn test_direct_isometry_constraint() {
        let reflection = GroupElement {
            matrix: row_matrix![[-1., 0., 0.], [0., 1., 0.], [0., 0., 1.]],
            word: "m".to_string(),
            metric: Metric::Euclidean,
            color_index: None,
        };
        let mut c = DirectIsometryConstraint::new();
        c.update();
        assert!(c.accept_element(&rotation_90()));
        assert!(!c.accept_element(&reflection));
    }

    #[test]
    fn test_version_bumps_on_setters() {
        let mut c = SimpleConstraint::new();
        let v0 = c.version();
        c.set_max_distance(Some(2.0));
        c.set_manhattan(true);
        assert!(c.version() > v0);
    }
}
