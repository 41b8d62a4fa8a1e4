//! Hyperplanes of the 1-sphere

use crate::float_types::Real;
use crate::partitioning::{Hyperplane, Side, SplitSubHyperplane, SubHyperplane, Transform};
use crate::spherical::oned::{ArcsSet, S1Point};

/// A single point on the circle acting as a hyperplane.
///
/// A direct chord has the angles larger than its location on its plus side,
/// an indirect one has them on its minus side. Angles are compared on their
/// `[0, 2π)` representation, so the circle behaves as if cut open at `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chord {
    location: S1Point,
    direct: bool,
    tolerance: Real,
}

impl Chord {
    pub const fn new(location: S1Point, direct: bool, tolerance: Real) -> Self {
        Self {
            location,
            direct,
            tolerance,
        }
    }

    pub const fn location(&self) -> &S1Point {
        &self.location
    }

    pub const fn is_direct(&self) -> bool {
        self.direct
    }

    /// Chord at the same location with the opposite orientation
    pub const fn reversed(&self) -> Self {
        Self::new(self.location, !self.direct, self.tolerance)
    }
}

impl Hyperplane for Chord {
    type Point = S1Point;
    type Sub = SubChord;
    type WholeSpace = ArcsSet;

    fn offset(&self, point: &S1Point) -> Real {
        let delta = point.alpha() - self.location.alpha();
        if self.direct { delta } else { -delta }
    }

    fn tolerance(&self) -> Real {
        self.tolerance
    }

    fn same_orientation_as(&self, other: &Self) -> bool {
        self.direct == other.direct
    }

    fn whole_hyperplane(&self) -> SubChord {
        SubChord::new(*self)
    }

    fn whole_space(&self) -> ArcsSet {
        ArcsSet::whole_circle(self.tolerance)
    }
}

/// The part of a [`Chord`] lying in a cell.
///
/// The sub-space of a point is zero-dimensional, so a sub-chord is either the
/// whole chord or nothing at all; absence is expressed by `None` in splits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubChord {
    chord: Chord,
}

impl SubChord {
    pub const fn new(chord: Chord) -> Self {
        Self { chord }
    }
}

impl SubHyperplane for SubChord {
    type Hyperplane = Chord;

    fn hyperplane(&self) -> &Chord {
        &self.chord
    }

    fn size(&self) -> Real {
        0.0
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn side(&self, hyperplane: &Chord) -> Side {
        hyperplane.side_of_point(self.chord.location())
    }

    fn split(&self, hyperplane: &Chord) -> SplitSubHyperplane<Self> {
        match self.side(hyperplane) {
            Side::Plus => SplitSubHyperplane::new(Some(*self), None),
            Side::Minus => SplitSubHyperplane::new(None, Some(*self)),
            _ => SplitSubHyperplane::new(None, None),
        }
    }

    fn reunite(&self, _other: &Self) -> Self {
        *self
    }

    fn transformed(&self, transform: &dyn Transform<Chord>) -> Self {
        SubChord::new(transform.apply_hyperplane(&self.chord))
    }
}
