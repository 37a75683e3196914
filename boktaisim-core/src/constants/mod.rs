//! Constants for boktaisim
//!
//! Centralized numeric values for the meter, the sun curve, and polling.
//!
//! ## Organization
//!
//! - **Meter**: scales, night cap, feature weights
//! - **Sun**: beta shape parameters and phase boundaries
//! - **Time**: refresh intervals
//!
//! The per-condition parameter table is data, not constants; it lives in
//! [`crate::condition::ConditionTable::standard`].

/// Meter scales, night mode cap, and averaging weights.
pub mod meter;

/// Sun curve shape parameters and phase boundaries.
pub mod sun;

/// Polling intervals.
pub mod time;

pub use meter::{
    BASE_SCALE_MAX, BOKTAI_1_SCALE_MAX, BOKTAI_2_SCALE_MAX, NIGHT_CAP_FRACTION,
};

pub use time::{DEFAULT_UPDATE_INTERVAL_SECS, DEFAULT_WEATHER_INTERVAL_SECS};
