//! Geometry errors

use crate::float_types::Real;

/// All the possible failures raised while building or querying regions
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (NotAnInterval) The lower bound is greater than the upper bound
    #[error("(NotAnInterval) endpoints do not specify an interval: [{lower}, {upper}]")]
    NotAnInterval { lower: Real, upper: Real },
    /// (InconsistentStateAt2PiWrapping) The inside/outside states before the
    /// first limit and after the last limit of a circle partition differ
    #[error("(InconsistentStateAt2PiWrapping) inconsistent inside/outside state at 2π wrapping, tolerance may be too coarse")]
    InconsistentStateAt2PiWrapping,
    /// (Internal) A branch the algorithms rule out was reached
    #[error("(Internal) internal error: {0}, please file a bug report")]
    Internal(&'static str),
}
