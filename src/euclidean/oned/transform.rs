use crate::euclidean::oned::{OrientedPoint, Point1D};
use crate::float_types::Real;
use crate::partitioning::{Hyperplane, Transform};

/// `x -> scale * x + offset` on the real line.
///
/// Negative scales mirror the line, so oriented points flip their
/// orientation to keep the transformed region on the same side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform1D {
    pub scale: Real,
    pub offset: Real,
}

impl AffineTransform1D {
    pub const fn new(scale: Real, offset: Real) -> Self {
        Self { scale, offset }
    }

    pub const fn translation(offset: Real) -> Self {
        Self::new(1.0, offset)
    }
}

impl Transform<OrientedPoint> for AffineTransform1D {
    fn apply_point(&self, point: &Point1D) -> Point1D {
        Point1D::new(self.scale * point.x + self.offset)
    }

    fn apply_hyperplane(&self, hyperplane: &OrientedPoint) -> OrientedPoint {
        OrientedPoint::new(
            self.apply_point(hyperplane.location()),
            hyperplane.is_direct() != (self.scale < 0.0),
            hyperplane.tolerance(),
        )
    }
}
