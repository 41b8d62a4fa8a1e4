use approx::{AbsDiffEq, RelativeEq};
use crate::errors::GeometryError;
use crate::float_types::{PI, Real, TAU, normalize_angle};
use crate::partitioning::Location;
use crate::spherical::oned::S1Point;

/// A closed arc of the circle, from `lower` to `upper` counterclockwise.
///
/// `lower` lies in `[0, 2π)` and `upper - lower` in `[0, 2π]`, so `upper`
/// may exceed `2π` when the arc crosses angle `0`. An arc whose bounds are
/// equal, or at least `2π` apart, covers the whole circle and is stored as
/// `[0, 2π]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    lower: Real,
    upper: Real,
    middle: Real,
    tolerance: Real,
}

impl Arc {
    pub fn new(lower: Real, upper: Real, tolerance: Real) -> Result<Self, GeometryError> {
        if lower == upper || upper - lower >= TAU {
            Ok(Self::full_circle(tolerance))
        } else if lower <= upper {
            Ok(Self::normalized(lower, upper, tolerance))
        } else {
            Err(GeometryError::NotAnInterval { lower, upper })
        }
    }

    /// The whole circle, `[0, 2π]`
    pub const fn full_circle(tolerance: Real) -> Self {
        Self {
            lower: 0.0,
            upper: TAU,
            middle: PI,
            tolerance,
        }
    }

    /// Arc from bounds already known to be ordered
    pub(crate) fn normalized(lower: Real, upper: Real, tolerance: Real) -> Self {
        let normalized_lower = S1Point::new(lower).alpha();
        let normalized_upper = normalized_lower + (upper - lower);
        Self {
            lower: normalized_lower,
            upper: normalized_upper,
            middle: 0.5 * (normalized_lower + normalized_upper),
            tolerance,
        }
    }

    /// Lower bound, in `[0, 2π)`
    pub const fn inf(&self) -> Real {
        self.lower
    }

    /// Upper bound, in `[inf, inf + 2π]`
    pub const fn sup(&self) -> Real {
        self.upper
    }

    pub fn size(&self) -> Real {
        self.upper - self.lower
    }

    /// Middle of the arc
    pub const fn barycenter(&self) -> Real {
        self.middle
    }

    pub const fn tolerance(&self) -> Real {
        self.tolerance
    }

    /// Location of an angle with respect to the arc.
    ///
    /// Angles closer than the tolerance to a bound are on the boundary,
    /// unless the arc covers the whole circle (up to the tolerance).
    pub fn check_point(&self, point: Real) -> Location {
        let normalized = normalize_angle(point, self.middle);
        if normalized < self.lower - self.tolerance || normalized > self.upper + self.tolerance {
            Location::Outside
        } else if normalized > self.lower + self.tolerance && normalized < self.upper - self.tolerance {
            Location::Inside
        } else if self.size() >= TAU - self.tolerance {
            Location::Inside
        } else {
            Location::Boundary
        }
    }
}

impl AbsDiffEq for Arc {
    type Epsilon = Real;
    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.lower.abs_diff_eq(&other.lower, epsilon) && self.upper.abs_diff_eq(&other.upper, epsilon)
    }
}

impl RelativeEq for Arc {
    fn default_max_relative() -> Self::Epsilon {
        Real::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.lower.relative_eq(&other.lower, epsilon, max_relative)
            && self.upper.relative_eq(&other.upper, epsilon, max_relative)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn regular_arc() {
        let arc = Arc::new(2.3, 5.7, 1.0e-10).unwrap();
        assert_relative_eq!(arc.size(), 3.4, epsilon = 1e-10);
        assert_relative_eq!(arc.barycenter(), 4.0, epsilon = 1e-10);
        assert_eq!(arc.check_point(2.3), Location::Boundary);
        assert_eq!(arc.check_point(5.7), Location::Boundary);
        assert_eq!(arc.check_point(1.2), Location::Outside);
        assert_eq!(arc.check_point(8.5), Location::Outside);
        assert_eq!(arc.check_point(8.7), Location::Inside);
        assert_eq!(arc.check_point(3.0), Location::Inside);
    }

    #[test]
    fn wrapping_arc() {
        let arc = Arc::new(5.7 - TAU, 2.3, 1.0e-10).unwrap();
        assert_relative_eq!(arc.inf(), 5.7, epsilon = 1e-10);
        assert_relative_eq!(arc.sup(), 2.3 + TAU, epsilon = 1e-10);
        assert_relative_eq!(arc.size(), TAU - 3.4, epsilon = 1e-10);
        assert_eq!(arc.check_point(1.2), Location::Inside);
        assert_eq!(arc.check_point(3.0), Location::Outside);
    }

    #[test]
    fn equal_bounds_cover_the_circle() {
        let arc = Arc::new(1.0, 1.0, 1.0e-10).unwrap();
        assert_eq!(arc.inf(), 0.0);
        assert_eq!(arc.sup(), TAU);
        for k in 0..60 {
            assert_eq!(arc.check_point(-3.0 + 0.1 * k as Real), Location::Inside);
        }
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        assert_eq!(
            Arc::new(1.2, 0.0, 1.0e-10),
            Err(GeometryError::NotAnInterval {
                lower: 1.2,
                upper: 0.0
            })
        );
    }
}
