// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized default tolerance used by the `Default` constructors of
/// the concrete regions. Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `BSPREGION_TOLERANCE` (e.g. `BSPREGION_TOLERANCE=1e-8 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before building any region
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-5
    }
    #[cfg(feature = "f64")]
    {
        1e-10
    }
}

/// Returns the current default tolerance.
/// If not set yet, it tries `BSPREGION_TOLERANCE` (parsed as the active `Real`) and
/// falls back to a sensible default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("BSPREGION_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the default tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `bspregion::float_types::set_tolerance(1e-8);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Smallest positive normal value; sizes below it are treated as zero.
pub const SAFE_MIN: Real = Real::MIN_POSITIVE;

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;

/// Normalize an angle into the `2π`-wide interval centered on `center`.
///
/// `normalize_angle(a, PI)` maps `a` into `[0, 2π)`,
/// `normalize_angle(a, 0.0)` into `[-π, π)`.
#[inline]
pub fn normalize_angle(angle: Real, center: Real) -> Real {
    angle - TAU * ((angle + PI - center) / TAU).floor()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_into_zero_two_pi() {
        for k in -3..4 {
            let shifted = 1.25 + k as Real * TAU;
            approx::assert_relative_eq!(normalize_angle(shifted, PI), 1.25, epsilon = 1e-9);
        }
        assert_eq!(normalize_angle(0.0, PI), 0.0);
    }

    #[test]
    fn normalize_around_zero() {
        approx::assert_relative_eq!(normalize_angle(3.0 * PI / 2.0, 0.0), -PI / 2.0, epsilon = 1e-12);
    }
}
