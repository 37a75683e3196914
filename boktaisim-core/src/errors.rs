//! Error Types for Meter Calculation Failures
//!
//! Every failure here is a local validation failure: the calculator has no
//! network or disk dependency, so nothing is retried. The caller decides
//! whether to surface the error or fall back to a cached snapshot.
//!
//! ## Error Categories
//!
//! ### Snapshot Violations
//! - `InvalidTemperatureRange`: low temperature above high temperature
//! - `InvalidValue`: NaN or infinite temperature
//! - `InvalidSunPosition`: daylight fraction outside `[0, 1]`
//! - `InvalidDaylightWindow`: sunset not after sunrise
//!
//! ### Table Violations
//! - `InvalidCondition`: condition label unknown or missing from the table
//! - `InvalidParameters`: a table entry that cannot drive a distribution
//!
//! ### Mode Violations
//! - `InvalidEdition`: game edition outside 1..=3
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use boktaisim_core::{compute_reading, ConditionTable, ModeConfig, SimError, WeatherSnapshot};
//! use boktaisim_core::{Condition, SunPosition};
//!
//! let table = ConditionTable::standard();
//! let snapshot = WeatherSnapshot::new(18.0, 10.0, 25.0, Condition::Clear, SunPosition::Daylight(0.5));
//! let mut rng = rand::thread_rng();
//!
//! match compute_reading(&snapshot, &table, &ModeConfig::default(), &mut rng) {
//!     Ok(reading) => println!("enter {}", reading.value),
//!     Err(SimError::InvalidCondition { label }) => {
//!         // Table was loaded from a file that lacks this condition
//!         eprintln!("no parameters for {label}");
//!     }
//!     Err(e) => eprintln!("bad snapshot: {e}"),
//! }
//! ```

use thiserror::Error;

/// Result type for simulator operations
pub type SimResult<T> = Result<T, SimError>;

/// Validation errors raised synchronously to the caller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Condition label unknown, or absent from the parameter table
    #[error("Invalid weather condition: {label}")]
    InvalidCondition {
        /// The label or code that failed to resolve
        label: String,
    },

    /// Daylight fraction outside the `[0, 1]` domain
    #[error("Invalid sun position: {position} (expected 0.0..=1.0 or night)")]
    InvalidSunPosition {
        /// The rejected fraction
        position: f64,
    },

    /// Sunset at or before sunrise
    #[error("Invalid daylight window: sunset must be after sunrise")]
    InvalidDaylightWindow,

    /// Low temperature exceeds high temperature
    #[error("Invalid temperature range: low {low} > high {high}")]
    InvalidTemperatureRange {
        /// Reported daily low
        low: f64,
        /// Reported daily high
        high: f64,
    },

    /// Value makes no numeric sense (NaN, infinity)
    #[error("Invalid value for {field}: not a finite number")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
    },

    /// Condition parameters cannot form a valid distribution
    #[error("Invalid parameters for {condition}: {reason}")]
    InvalidParameters {
        /// Display name of the condition
        condition: String,
        /// What is wrong with the entry
        reason: String,
    },

    /// Game edition outside the supported series
    #[error("Invalid edition {edition}: must be between 1 and 3")]
    InvalidEdition {
        /// The rejected edition number
        edition: u8,
    },
}

impl SimError {
    /// Shorthand for an unknown condition label
    pub fn condition(label: impl Into<String>) -> Self {
        Self::InvalidCondition { label: label.into() }
    }

    /// Shorthand for a bad table entry
    pub fn parameters(condition: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            condition: condition.into(),
            reason: reason.into(),
        }
    }
}
