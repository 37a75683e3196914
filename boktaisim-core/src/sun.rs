//! Sun Position and the Sun Component Curve
//!
//! ## Position
//!
//! The sun's position is the fraction of daylight elapsed: 0 at sunrise,
//! 0.5 at solar noon, 1 at sunset. Outside that window it is
//! [`SunPosition::Night`].
//!
//! ## Curve
//!
//! The sun component is not a deterministic function of position. Each
//! evaluation draws from a beta distribution whose shape parameters follow
//! solar elevation (see [`crate::constants::sun`]), so the same position can
//! yield a different value on every call:
//!
//! ```text
//!  value
//!   10 ┤            ▁▃▅▇█▇▅▃▁          draws cluster high at noon
//!    5 ┤      ▁▃▅▇▇▇         ▇▇▇▅▃▁
//!    0 ┼▇▇▇▇▇                      ▇▇▇▇▇   and low near the horizons
//!      sunrise        noon         sunset
//! ```
//!
//! Within [`HORIZON_WINDOW`] of either horizon a draw above
//! [`HORIZON_PENALTY`] is reduced by it.
//!
//! At night the daytime curve does not apply: night mode draws from a fixed
//! dim distribution capped at [`NIGHT_CAP_FRACTION`] of the meter.

use chrono::NaiveDateTime;
use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};

use crate::constants::meter::{BASE_SCALE_MAX, NIGHT_CAP_FRACTION, NIGHT_SUN_ALPHA, NIGHT_SUN_BETA};
use crate::constants::sun::{
    ALPHA_HORIZON, ALPHA_NOON, BETA_HORIZON, BETA_NOON, HORIZON_PENALTY, HORIZON_WINDOW,
    PHASE_APEX_END, PHASE_RISING_END,
};
use crate::errors::{SimError, SimResult};
use crate::scale::lerp;

/// Progress through the sunrise-to-sunset cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunPosition {
    /// Fraction of daylight elapsed, `0.0..=1.0`
    Daylight(f64),
    /// Sun below the horizon
    Night,
}

impl SunPosition {
    /// Validated daylight position
    pub fn daylight(fraction: f64) -> SimResult<Self> {
        let position = Self::Daylight(fraction);
        position.validate()?;
        Ok(position)
    }

    /// Derive the position from sunrise, sunset and the current time.
    ///
    /// Before sunrise and from sunset onward it is night.
    pub fn from_times(
        sunrise: NaiveDateTime,
        sunset: NaiveDateTime,
        now: NaiveDateTime,
    ) -> SimResult<Self> {
        if sunset <= sunrise {
            return Err(SimError::InvalidDaylightWindow);
        }
        if now < sunrise || now >= sunset {
            return Ok(Self::Night);
        }
        let daylight_ms = (sunset - sunrise).num_milliseconds() as f64;
        let elapsed_ms = (now - sunrise).num_milliseconds() as f64;
        Ok(Self::Daylight((elapsed_ms / daylight_ms).clamp(0.0, 1.0)))
    }

    /// Check the fraction lies in its domain
    pub fn validate(&self) -> SimResult<()> {
        match *self {
            Self::Daylight(fraction) if !(0.0..=1.0).contains(&fraction) => {
                Err(SimError::InvalidSunPosition { position: fraction })
            }
            _ => Ok(()),
        }
    }

    /// Night, or the sunset instant itself (`Daylight(1.0)`)
    pub fn is_night(&self) -> bool {
        match *self {
            Self::Daylight(fraction) => fraction >= 1.0,
            Self::Night => true,
        }
    }

    /// Daylight fraction, `None` at night
    pub fn fraction(&self) -> Option<f64> {
        match *self {
            Self::Daylight(fraction) => Some(fraction),
            Self::Night => None,
        }
    }

    /// Solar elevation proxy: 0 at the horizons and at night, 1 at noon
    pub fn elevation(&self) -> f64 {
        match *self {
            Self::Daylight(fraction) => elevation(fraction),
            Self::Night => 0.0,
        }
    }

    pub fn phase(&self) -> SunPhase {
        match *self {
            Self::Daylight(f) if f <= PHASE_RISING_END => SunPhase::Rising,
            Self::Daylight(f) if f <= PHASE_APEX_END => SunPhase::AtApex,
            Self::Daylight(f) if f < 1.0 => SunPhase::Descending,
            _ => SunPhase::Moonlight,
        }
    }
}

/// Coarse phase shown next to the meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunPhase {
    Rising,
    AtApex,
    Descending,
    Moonlight,
}

impl SunPhase {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rising => "Rising",
            Self::AtApex => "At Apex",
            Self::Descending => "Descending",
            Self::Moonlight => "Moonlight",
        }
    }
}

impl std::fmt::Display for SunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn elevation(fraction: f64) -> f64 {
    (1.0 - (2.0 * fraction - 1.0).abs()).clamp(0.0, 1.0)
}

/// Shape of the sun component across the day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunCurve {
    pub alpha_horizon: f64,
    pub alpha_noon: f64,
    pub beta_horizon: f64,
    pub beta_noon: f64,
    /// Fraction of daylight near each horizon that gets the penalty
    pub horizon_window: f64,
    pub horizon_penalty: f64,
}

impl Default for SunCurve {
    fn default() -> Self {
        Self {
            alpha_horizon: ALPHA_HORIZON,
            alpha_noon: ALPHA_NOON,
            beta_horizon: BETA_HORIZON,
            beta_noon: BETA_NOON,
            horizon_window: HORIZON_WINDOW,
            horizon_penalty: HORIZON_PENALTY,
        }
    }
}

impl SunCurve {
    /// Beta `(alpha, beta)` for a daylight fraction
    pub fn shape(&self, fraction: f64) -> (f64, f64) {
        let e = elevation(fraction);
        (
            lerp(self.alpha_horizon, self.alpha_noon, e),
            lerp(self.beta_horizon, self.beta_noon, e),
        )
    }

    /// Draw the daytime sun component on the base scale
    pub fn sample_day<R: Rng + ?Sized>(&self, fraction: f64, rng: &mut R) -> SimResult<f64> {
        let (alpha, beta) = self.shape(fraction);
        let dist = Beta::new(alpha, beta).map_err(|e| SimError::parameters("sun curve", e.to_string()))?;
        let mut value = dist.sample(rng) * BASE_SCALE_MAX;

        let near_horizon = fraction <= self.horizon_window || fraction >= 1.0 - self.horizon_window;
        if near_horizon && value > self.horizon_penalty {
            value -= self.horizon_penalty;
        }
        Ok(value.clamp(0.0, BASE_SCALE_MAX))
    }

    /// Draw the night-mode sun component on the base scale
    pub fn sample_night<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<f64> {
        let dist = Beta::new(NIGHT_SUN_ALPHA, NIGHT_SUN_BETA)
            .map_err(|e| SimError::parameters("night curve", e.to_string()))?;
        Ok(dist.sample(rng) * BASE_SCALE_MAX * NIGHT_CAP_FRACTION)
    }
}
