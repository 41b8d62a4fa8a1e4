//! Hyperplanes of the real line

use crate::euclidean::oned::{IntervalsSet, Point1D};
use crate::float_types::Real;
use crate::partitioning::{Hyperplane, Side, SplitSubHyperplane, SubHyperplane, Transform};

/// A point of the line with an orientation.
///
/// A direct oriented point has the abscissas larger than its location on its
/// plus side; an indirect one has them on its minus side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedPoint {
    location: Point1D,
    direct: bool,
    tolerance: Real,
}

impl OrientedPoint {
    pub const fn new(location: Point1D, direct: bool, tolerance: Real) -> Self {
        Self {
            location,
            direct,
            tolerance,
        }
    }

    pub const fn location(&self) -> &Point1D {
        &self.location
    }

    pub const fn is_direct(&self) -> bool {
        self.direct
    }

    /// Same location, opposite orientation
    pub const fn reversed(&self) -> Self {
        Self::new(self.location, !self.direct, self.tolerance)
    }
}

impl Hyperplane for OrientedPoint {
    type Point = Point1D;
    type Sub = SubOrientedPoint;
    type WholeSpace = IntervalsSet;

    fn offset(&self, point: &Point1D) -> Real {
        let delta = point.x - self.location.x;
        if self.direct { delta } else { -delta }
    }

    fn tolerance(&self) -> Real {
        self.tolerance
    }

    fn same_orientation_as(&self, other: &Self) -> bool {
        self.direct == other.direct
    }

    fn whole_hyperplane(&self) -> SubOrientedPoint {
        SubOrientedPoint::new(*self)
    }

    fn whole_space(&self) -> IntervalsSet {
        IntervalsSet::whole_line(self.tolerance)
    }
}

/// The zero-dimensional remaining part of an [`OrientedPoint`]: the point itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubOrientedPoint {
    hyperplane: OrientedPoint,
}

impl SubOrientedPoint {
    pub const fn new(hyperplane: OrientedPoint) -> Self {
        Self { hyperplane }
    }
}

impl SubHyperplane for SubOrientedPoint {
    type Hyperplane = OrientedPoint;

    fn hyperplane(&self) -> &OrientedPoint {
        &self.hyperplane
    }

    fn size(&self) -> Real {
        0.0
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn side(&self, hyperplane: &OrientedPoint) -> Side {
        hyperplane.side_of_point(self.hyperplane.location())
    }

    fn split(&self, hyperplane: &OrientedPoint) -> SplitSubHyperplane<Self> {
        match self.side(hyperplane) {
            Side::Plus => SplitSubHyperplane::new(Some(*self), None),
            Side::Minus => SplitSubHyperplane::new(None, Some(*self)),
            _ => SplitSubHyperplane::new(None, None),
        }
    }

    fn reunite(&self, _other: &Self) -> Self {
        *self
    }

    fn transformed(&self, transform: &dyn Transform<OrientedPoint>) -> Self {
        SubOrientedPoint::new(transform.apply_hyperplane(&self.hyperplane))
    }
}
