//! Euclidean geometry.
//!
//! Only the real line is provided: see [`oned`].

pub mod oned;
