//! The 1-sphere: angles on the unit circle.
//!
//! Hyperplanes are single [`Chord`] points splitting the circle, regions are
//! finite unions of [`Arc`]s represented by an [`ArcsSet`].
//!
//! ```
//! use bspregion::partitioning::{Location, Region};
//! use bspregion::spherical::oned::{ArcsSet, S1Point};
//! use bspregion::float_types::PI;
//!
//! let half = ArcsSet::new(0.0, PI, 1.0e-10).unwrap();
//! assert_eq!(half.check_point(&S1Point::new(PI / 2.0)), Location::Inside);
//! assert_eq!(half.check_point(&S1Point::new(0.0)), Location::Boundary);
//! ```

pub mod arc;
pub mod arcs_set;
pub mod chord;
pub mod s1_point;

pub use arc::Arc;
pub use arcs_set::{ArcsSet, ArcsSplit};
pub use chord::{Chord, SubChord};
pub use s1_point::S1Point;
