//! Traits every concrete geometry implements to plug into the partitioning framework

use crate::float_types::Real;
use crate::partitioning::{Side, region::Region};
use std::fmt::Debug;

/// An oriented (D-1)-dimensional surface splitting a D-dimensional space in two.
///
/// Points with positive [offset](Hyperplane::offset) are on the plus side,
/// points with negative offset on the minus side.
pub trait Hyperplane: Clone + Debug {
    /// Point of the embedding space
    type Point: Clone + Debug;

    /// Part of this hyperplane remaining after being chopped by other hyperplanes
    type Sub: SubHyperplane<Hyperplane = Self>;

    /// Region type built on top of this hyperplane
    type WholeSpace: Region<Hyperplane = Self>;

    /// Signed offset of a point; sign gives the side, magnitude the distance.
    fn offset(&self, point: &Self::Point) -> Real;

    /// Tolerance below which points are considered to lie on the hyperplane.
    fn tolerance(&self) -> Real;

    /// Check if two hyperplanes sharing the same location also share the same orientation.
    fn same_orientation_as(&self, other: &Self) -> bool;

    /// Sub-hyperplane covering the entire hyperplane.
    fn whole_hyperplane(&self) -> Self::Sub;

    /// Region covering the entire space this hyperplane lives in.
    fn whole_space(&self) -> Self::WholeSpace;

    /// Side of a point, using the hyperplane tolerance.
    fn side_of_point(&self, point: &Self::Point) -> Side {
        let offset = self.offset(point);
        if offset > self.tolerance() {
            Side::Plus
        } else if offset < -self.tolerance() {
            Side::Minus
        } else {
            Side::Hyper
        }
    }
}

/// The two parts of a sub-hyperplane split by a hyperplane.
///
/// A missing part means nothing of the sub-hyperplane lies on that side.
#[derive(Debug, Clone)]
pub struct SplitSubHyperplane<S> {
    pub plus: Option<S>,
    pub minus: Option<S>,
}

impl<S> SplitSubHyperplane<S> {
    pub const fn new(plus: Option<S>, minus: Option<S>) -> Self {
        Self { plus, minus }
    }

    /// Side the split sub-hyperplane lay on
    pub fn side(&self) -> Side {
        match (&self.plus, &self.minus) {
            (Some(_), Some(_)) => Side::Both,
            (Some(_), None) => Side::Plus,
            (None, Some(_)) => Side::Minus,
            (None, None) => Side::Hyper,
        }
    }
}

/// The remaining part of a hyperplane within a cell.
///
/// In general the remaining part is itself a region of the hyperplane (one
/// dimension lower). On one-dimensional spaces hyperplanes are points, so the
/// remaining region degenerates to the point itself and a sub-hyperplane
/// either exists (the whole point) or is absent.
pub trait SubHyperplane: Clone + Debug + Sized {
    type Hyperplane: Hyperplane<Sub = Self>;

    /// Underlying hyperplane.
    fn hyperplane(&self) -> &Self::Hyperplane;

    /// Measure of the remaining region (0 for points).
    fn size(&self) -> Real;

    fn is_empty(&self) -> bool;

    /// Side of the instance with respect to a hyperplane.
    fn side(&self, hyperplane: &Self::Hyperplane) -> Side;

    /// Split the instance in the parts lying on each side of a hyperplane.
    fn split(&self, hyperplane: &Self::Hyperplane) -> SplitSubHyperplane<Self>;

    /// Union of the instance and another sub-hyperplane sharing the same hyperplane.
    fn reunite(&self, other: &Self) -> Self;

    /// Apply a transform to the instance.
    fn transformed(&self, transform: &dyn Transform<Self::Hyperplane>) -> Self;
}

/// A geometric transform mapping points and hyperplanes of a space onto itself.
pub trait Transform<H: Hyperplane> {
    fn apply_point(&self, point: &H::Point) -> H::Point;

    fn apply_hyperplane(&self, hyperplane: &H) -> H;
}
