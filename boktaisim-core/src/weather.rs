//! Weather Snapshots and Temperature Units
//!
//! A [`WeatherSnapshot`] is the immutable input to one meter calculation.
//! Temperatures may be in either unit as long as all three share it; the
//! calculator only ever looks at relative position inside `[low, high]`.

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::errors::{SimError, SimResult};
use crate::scale::{check_finite, fraction_in_range};
use crate::sun::SunPosition;

/// Observations for a single calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_current: f64,
    pub temperature_low: f64,
    pub temperature_high: f64,
    pub condition: Condition,
    pub sun_position: SunPosition,
}

impl WeatherSnapshot {
    pub fn new(
        temperature_current: f64,
        temperature_low: f64,
        temperature_high: f64,
        condition: Condition,
        sun_position: SunPosition,
    ) -> Self {
        Self {
            temperature_current,
            temperature_low,
            temperature_high,
            condition,
            sun_position,
        }
    }

    /// Check the snapshot is usable, without consulting a condition table
    pub fn validate(&self) -> SimResult<()> {
        check_finite(self.temperature_current, "temperature_current")?;
        check_finite(self.temperature_low, "temperature_low")?;
        check_finite(self.temperature_high, "temperature_high")?;

        if self.temperature_low > self.temperature_high {
            return Err(SimError::InvalidTemperatureRange {
                low: self.temperature_low,
                high: self.temperature_high,
            });
        }

        self.sun_position.validate()
    }

    /// Relative position of the current temperature, clamped to `[0, 1]`
    pub fn temperature_fraction(&self) -> f64 {
        fraction_in_range(self.temperature_low, self.temperature_high, self.temperature_current)
    }

    /// Same snapshot converted to another temperature unit
    pub fn converted(&self, from: TemperatureScale, to: TemperatureScale) -> Self {
        Self {
            temperature_current: from.convert(self.temperature_current, to),
            temperature_low: from.convert(self.temperature_low, to),
            temperature_high: from.convert(self.temperature_high, to),
            ..*self
        }
    }
}

/// Temperature unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureScale {
    #[default]
    #[serde(rename = "F")]
    Fahrenheit,
    #[serde(rename = "C")]
    Celsius,
}

impl TemperatureScale {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Fahrenheit => "°F",
            Self::Celsius => "°C",
        }
    }

    /// Convert `value` expressed in `self` into `target`
    pub fn convert(&self, value: f64, target: TemperatureScale) -> f64 {
        match (self, target) {
            (Self::Fahrenheit, Self::Celsius) => f_to_c(value),
            (Self::Celsius, Self::Fahrenheit) => c_to_f(value),
            _ => value,
        }
    }
}

impl std::str::FromStr for TemperatureScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "F" | "FAHRENHEIT" => Ok(Self::Fahrenheit),
            "C" | "CELSIUS" => Ok(Self::Celsius),
            other => Err(format!("unknown temperature scale `{other}`, expected F or C")),
        }
    }
}

pub fn f_to_c(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub fn c_to_f(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}
