//! The real line.
//!
//! Hyperplanes are [`OrientedPoint`]s, regions are finite unions of possibly
//! unbounded [`Interval`]s represented by an [`IntervalsSet`].

pub mod interval;
pub mod intervals_set;
pub mod oriented_point;
pub mod transform;

pub use interval::Interval;
pub use intervals_set::IntervalsSet;
pub use oriented_point::{OrientedPoint, SubOrientedPoint};
pub use transform::AffineTransform1D;

/// A point of the real line
pub type Point1D = nalgebra::Point1<crate::float_types::Real>;
