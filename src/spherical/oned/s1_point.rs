use approx::{AbsDiffEq, RelativeEq};
use crate::float_types::{PI, Real, TAU, normalize_angle};
use nalgebra::Vector2;

/// A point on the unit circle.
///
/// The azimuthal angle is normalized into `[0, 2π)` at construction; the
/// matching unit vector is kept alongside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct S1Point {
    alpha: Real,
    vector: Vector2<Real>,
}

impl S1Point {
    pub fn new(alpha: Real) -> Self {
        // rounding in the normalization can land one ulp outside of [0, 2π)
        let mut alpha = normalize_angle(alpha, PI);
        if alpha < 0.0 {
            alpha += TAU;
        }
        if alpha >= TAU {
            alpha = 0.0;
        }
        Self {
            alpha,
            vector: Vector2::new(alpha.cos(), alpha.sin()),
        }
    }

    /// Undefined point, used as the barycenter of the full circle
    pub fn nan() -> Self {
        Self {
            alpha: Real::NAN,
            vector: Vector2::new(Real::NAN, Real::NAN),
        }
    }

    /// Azimuthal angle, in `[0, 2π)`
    pub const fn alpha(&self) -> Real {
        self.alpha
    }

    pub const fn vector(&self) -> &Vector2<Real> {
        &self.vector
    }

    pub fn is_nan(&self) -> bool {
        self.alpha.is_nan()
    }

    /// Angular distance along the shortest path, in `[0, π]`.
    pub fn distance(&self, other: &S1Point) -> Real {
        PI - (PI - (self.alpha - other.alpha).abs()).abs()
    }
}

impl From<Real> for S1Point {
    fn from(alpha: Real) -> Self {
        S1Point::new(alpha)
    }
}

impl AbsDiffEq for S1Point {
    type Epsilon = Real;
    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.distance(other) <= epsilon
    }
}

impl RelativeEq for S1Point {
    fn default_max_relative() -> Self::Epsilon {
        Real::default_max_relative()
    }

    // angles wrap at 2π, so the scale is the full turn rather than the angles themselves
    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        let distance = self.distance(other);
        distance <= epsilon || distance <= max_relative * TAU
    }
}
