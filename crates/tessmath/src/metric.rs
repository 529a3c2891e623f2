//! Metric signatures for the three constant-curvature geometries.

use approx::AbsDiffEq;

use crate::approx_cmp::approx_eq;
use crate::{Float, Matrix, Vector, EPSILON};

/// Geometric signature governing distances and isometry checks for a group's
/// ambient space.
///
/// Points live in homogeneous coordinates, so a point in _n_-space has _n_+1
/// components. The signature fixes the bilinear form on those coordinates:
/// the last coordinate contributes with weight +1 (elliptic), -1 (hyperbolic),
/// or 0 (Euclidean, where distances are measured after dehomogenizing).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Flat geometry; isometries are rigid motions of affine space.
    #[default]
    Euclidean,
    /// Negatively curved geometry; isometries preserve the Minkowski form.
    Hyperbolic,
    /// Positively curved geometry; isometries are orthogonal.
    Elliptic,
}

impl Metric {
    /// Weight of the last homogeneous coordinate in the bilinear form.
    pub fn signature(self) -> Float {
        match self {
            Metric::Euclidean => 0.0,
            Metric::Hyperbolic => -1.0,
            Metric::Elliptic => 1.0,
        }
    }

    /// Returns the bilinear form applied to two homogeneous points.
    pub fn inner_product(self, u: &Vector, v: &Vector) -> Float {
        let ndim = std::cmp::max(u.ndim(), v.ndim());
        if ndim == 0 {
            return 0.0;
        }
        let last = ndim - 1;
        let spatial: Float = (0..last).map(|i| u.get(i) * v.get(i)).sum();
        spatial + self.signature() * u.get(last) * v.get(last)
    }

    /// Returns the metric distance between two homogeneous points.
    ///
    /// Points at Euclidean infinity (or past the hyperbolic absolute) yield
    /// `Float::INFINITY` rather than an error.
    pub fn distance(self, p: &Vector, q: &Vector) -> Float {
        match self {
            Metric::Euclidean => match (p.dehomogenize(), q.dehomogenize()) {
                (Some(a), Some(b)) => (&a - &b).mag(),
                _ => Float::INFINITY,
            },
            Metric::Hyperbolic => {
                let pp = self.inner_product(p, p);
                let qq = self.inner_product(q, q);
                let pq = self.inner_product(p, q);
                // Timelike vectors have negative self-product; anything else
                // is on or past the absolute.
                if pp >= -EPSILON || qq >= -EPSILON {
                    return Float::INFINITY;
                }
                let cosh = -pq / (pp * qq).sqrt();
                cosh.max(1.0).acosh()
            }
            Metric::Elliptic => {
                let pp = self.inner_product(p, p);
                let qq = self.inner_product(q, q);
                let pq = self.inner_product(p, q);
                // Antipodal points are identified, hence the absolute value.
                let cos = (pq / (pp * qq).sqrt()).abs();
                cos.min(1.0).acos()
            }
        }
    }

    /// Returns the Chebyshev (L∞) distance between the dehomogenized points,
    /// regardless of metric.
    pub fn chebyshev_distance(self, p: &Vector, q: &Vector) -> Float {
        match (p.dehomogenize(), q.dehomogenize()) {
            (Some(a), Some(b)) => a.chebyshev_distance(&b),
            _ => Float::INFINITY,
        }
    }

    /// Returns whether `m` is an isometry of this metric, up to [`EPSILON`].
    ///
    /// For the elliptic and hyperbolic signatures this checks `Mᵀ J M ≈ J`
    /// where `J` is the diagonal form of the metric. The Euclidean form is
    /// degenerate, so instead the last row must be `(0, …, 0, 1)` and the
    /// linear block must be orthogonal.
    pub fn is_isometry(self, m: &Matrix) -> bool {
        let ndim = m.ndim();
        if ndim == 0 {
            return true;
        }
        match self {
            Metric::Euclidean => {
                let last = ndim - 1;
                let last_row_ok = (0..ndim)
                    .all(|c| approx_eq(&m.get(last, c), &((c == last) as u8 as Float)));
                last_row_ok && {
                    let linear = Matrix::from_fn(last, |r, c| m.get(r, c));
                    (&linear.transpose() * &linear).abs_diff_eq(&Matrix::ident(last), EPSILON)
                }
            }
            Metric::Hyperbolic | Metric::Elliptic => {
                let j = Matrix::from_fn(ndim, |r, c| {
                    if r != c {
                        0.0
                    } else if r == ndim - 1 {
                        self.signature()
                    } else {
                        1.0
                    }
                });
                (&(&m.transpose() * &j) * m).abs_diff_eq(&j, EPSILON)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{row_matrix, vector};

    fn translation_x(t: Float) -> Matrix {
        row_matrix![[1., 0., t], [0., 1., 0.], [0., 0., 1.]]
    }

    #[test]
    fn test_euclidean_distance() {
        let p = vector![0.0, 0.0, 1.0];
        let q = vector![3.0, 4.0, 1.0];
        crate::assert_approx_eq!(Metric::Euclidean.distance(&p, &q), 5.0);
        crate::assert_approx_eq!(Metric::Euclidean.chebyshev_distance(&p, &q), 4.0);

        let infinity = vector![1.0, 0.0, 0.0];
        assert_eq!(Metric::Euclidean.distance(&p, &infinity), Float::INFINITY);
    }

    #[test]
    fn test_hyperbolic_distance() {
        // Boost along the x-axis moves the origin by exactly the rapidity.
        let rapidity: Float = 0.75;
        let origin = vector![0.0, 1.0];
        let moved = vector![rapidity.sinh(), rapidity.cosh()];
        crate::assert_approx_eq!(Metric::Hyperbolic.distance(&origin, &moved), rapidity);
    }

    #[test]
    fn test_elliptic_distance_antipodal() {
        let p = vector![0.0, 1.0];
        crate::assert_approx_eq!(Metric::Elliptic.distance(&p, &-&p), 0.0);
    }

    #[test]
    fn test_euclidean_isometry_check() {
        assert!(Metric::Euclidean.is_isometry(&translation_x(2.5)));
        assert!(!Metric::Euclidean.is_isometry(&row_matrix![
            [2., 0., 0.],
            [0., 1., 0.],
            [0., 0., 1.],
        ]));
    }

    #[test]
    fn test_hyperbolic_isometry_check() {
        let rapidity: Float = 1.25;
        let boost = row_matrix![
            [rapidity.cosh(), rapidity.sinh()],
            [rapidity.sinh(), rapidity.cosh()],
        ];
        assert!(Metric::Hyperbolic.is_isometry(&boost));
        assert!(!Metric::Elliptic.is_isometry(&boost));
        assert!(!Metric::Hyperbolic.is_isometry(&translation_x(1.0)));
    }
}
