//! Sun Curve Parameters
//!
//! The sun component is a beta draw whose shape follows solar elevation.
//! Elevation runs from 0 at either horizon to 1 at solar noon:
//!
//! ```text
//! elevation = 1 - |2 * fraction - 1|
//! alpha     = lerp(ALPHA_HORIZON, ALPHA_NOON, elevation)
//! beta      = lerp(BETA_HORIZON,  BETA_NOON,  elevation)
//! ```
//!
//! | Elevation | alpha | beta | mean × 10 |
//! |-----------|-------|------|-----------|
//! | 0.0       | 1.00  | 5.50 | ~1.5      |
//! | 0.5       | 3.25  | 3.88 | ~4.6      |
//! | 1.0       | 5.50  | 2.25 | ~7.1      |

/// Beta alpha at sunrise / sunset.
pub const ALPHA_HORIZON: f64 = 1.0;

/// Beta alpha at solar noon.
pub const ALPHA_NOON: f64 = 5.5;

/// Beta beta at sunrise / sunset.
pub const BETA_HORIZON: f64 = 5.5;

/// Beta beta at solar noon.
pub const BETA_NOON: f64 = 2.25;

/// Fraction of the day, measured from either horizon, treated as dawn/dusk.
pub const HORIZON_WINDOW: f64 = 0.05;

/// Amount removed from a dawn/dusk draw that exceeds the penalty itself.
pub const HORIZON_PENALTY: f64 = 2.0;

// ===== SUN PHASES =====

/// Upper bound of the "Rising" phase (fraction of daylight).
pub const PHASE_RISING_END: f64 = 0.30;

/// Upper bound of the "At Apex" phase (fraction of daylight).
pub const PHASE_APEX_END: f64 = 0.70;
