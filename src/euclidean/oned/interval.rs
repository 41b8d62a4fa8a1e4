use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::partitioning::Location;

/// A closed interval `[lower, upper]` of the real line, bounds may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lower: Real,
    upper: Real,
}

impl Interval {
    pub fn new(lower: Real, upper: Real) -> Result<Self, GeometryError> {
        if upper < lower {
            return Err(GeometryError::NotAnInterval { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub const fn inf(&self) -> Real {
        self.lower
    }

    pub const fn sup(&self) -> Real {
        self.upper
    }

    pub fn size(&self) -> Real {
        self.upper - self.lower
    }

    /// Middle of the interval
    pub fn barycenter(&self) -> Real {
        0.5 * (self.lower + self.upper)
    }

    pub fn check_point(&self, point: Real, tolerance: Real) -> Location {
        if point < self.lower - tolerance || point > self.upper + tolerance {
            Location::Outside
        } else if point > self.lower + tolerance && point < self.upper - tolerance {
            Location::Inside
        } else {
            Location::Boundary
        }
    }
}
