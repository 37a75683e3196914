//! Common Scaling Utilities
//!
//! Pure functions shared by every component of the meter. All of them clamp
//! rather than extrapolate: a current temperature above the reported daily
//! high behaves exactly like one equal to the high.
//!
//! ## Degenerate Ranges
//!
//! ```text
//! If old_max == old_min:
//!   - e.g. manual entry with low == high
//!   - no relative position exists
//!   - map to new_min (fraction 0)
//! ```

use crate::constants::meter::BASE_SCALE_MAX;
use crate::errors::{SimError, SimResult};

/// Position of `value` inside `[low, high]`, clamped to `[0, 1]`.
///
/// A zero-width (or inverted) range yields 0.
pub fn fraction_in_range(low: f64, high: f64, value: f64) -> f64 {
    let span = high - low;
    if !(span > 0.0) {
        return 0.0;
    }
    ((value - low) / span).clamp(0.0, 1.0)
}

/// Linear interpolation between `from` and `to`.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Map `value` from `[old_min, old_max]` onto `[new_min, new_max]`, clamped.
pub fn clamp_and_scale(
    old_min: f64,
    old_max: f64,
    new_min: f64,
    new_max: f64,
    value: f64,
) -> f64 {
    lerp(new_min, new_max, fraction_in_range(old_min, old_max, value))
}

/// Rescale a base-scale value onto a meter of `scale_max` segments.
pub fn rescale_to_meter(value: f64, scale_max: u8) -> f64 {
    value.clamp(0.0, BASE_SCALE_MAX) * f64::from(scale_max) / BASE_SCALE_MAX
}

/// Round half away from zero and clamp into `0..=scale_max`.
pub fn round_to_meter(value: f64, scale_max: u8) -> u8 {
    let rounded = value.round().clamp(0.0, f64::from(scale_max));
    rounded as u8
}

/// Round to a fixed number of decimal places.
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Reject NaN and infinities.
pub fn check_finite(value: f64, field: &'static str) -> SimResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidValue { field })
    }
}
