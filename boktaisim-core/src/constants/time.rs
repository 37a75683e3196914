//! Time-Related Constants
//!
//! Polling intervals and unit conversions used by hosts that refresh the
//! meter on a timer.

// ===== TIME UNIT CONVERSIONS =====

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u64 = 60;

// ===== UPDATE INTERVALS =====

/// Default interval between meter refreshes (seconds).
///
/// Five minutes: the in-game sensor is sampled slowly and weather does not
/// move faster than that.
pub const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 5 * SECONDS_PER_MINUTE;

/// Default interval between weather refreshes (seconds).
///
/// Public weather APIs update roughly every fifteen minutes.
pub const DEFAULT_WEATHER_INTERVAL_SECS: u64 = 15 * SECONDS_PER_MINUTE;

/// Shortest refresh interval a configuration may request (seconds).
pub const MIN_UPDATE_INTERVAL_SECS: u64 = 1;
