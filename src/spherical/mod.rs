//! Spherical geometry.
//!
//! Only the 1-sphere (the unit circle) is provided: see [`oned`].

pub mod oned;
