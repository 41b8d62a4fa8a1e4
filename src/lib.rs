//! Regions of space stored as inside/outside labeled **Binary Space Partitioning (BSP)** trees,
//! with Boolean operations (*union*, *difference*, *intersection*, *xor*, *complement*),
//! point classification and boundary extraction.
//!
//! The [partitioning] framework is dimension independent; it is instantiated for
//! arcs on the unit circle ([`spherical::oned::ArcsSet`]) and intervals on the
//! real line ([`euclidean::oned::IntervalsSet`]).
//!
//! ```
//! use bspregion::partitioning::{Location, Region};
//! use bspregion::spherical::oned::{ArcsSet, S1Point};
//! use bspregion::traits::RegionOps;
//!
//! let a = ArcsSet::new(1.0, 6.0, 1.0e-10)?;
//! let b = ArcsSet::new(3.0, 5.0, 1.0e-10)?;
//! let a_minus_b = a.difference(&b);
//! assert_eq!(a_minus_b.as_list().len(), 2);
//! assert_eq!(a_minus_b.check_point(&S1Point::new(4.0)), Location::Outside);
//! # Ok::<(), bspregion::errors::GeometryError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod euclidean;
pub mod float_types;
pub mod partitioning;
pub mod spherical;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::GeometryError;
pub use euclidean::oned::IntervalsSet;
pub use partitioning::{BspTree, Location, Region, RegionFactory, Side};
pub use spherical::oned::ArcsSet;
pub use traits::RegionOps;
