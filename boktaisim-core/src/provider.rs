//! Weather Providers
//!
//! The calculator never fetches weather itself. A provider hands it a fresh
//! [`WeatherSnapshot`] for "now"; hosts poll the provider on a timer.
//!
//! ## Implementations
//!
//! - [`ManualProvider`]: the player types the day's low / average / high,
//!   the condition, and sunrise / sunset. Each snapshot draws a plausible
//!   current temperature from a triangular distribution peaking at the
//!   average, so the meter keeps moving without live data.
//! - [`StaticWeather`]: replays one snapshot, for hosts that fetched weather
//!   elsewhere.
//!
//! A network client would implement [`WeatherProvider`] the same way.

use chrono::NaiveTime;
use rand::Rng;
use rand_distr::{Distribution, Triangular};
use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::constants::meter::TEMPERATURE_DECIMALS;
use crate::errors::{SimError, SimResult};
use crate::scale::{check_finite, round_to_decimals};
use crate::sun::SunPosition;
use crate::time::Timestamp;
use crate::weather::WeatherSnapshot;

/// Source of weather snapshots
pub trait WeatherProvider {
    /// Snapshot valid at `now`
    fn snapshot(&mut self, now: Timestamp) -> SimResult<WeatherSnapshot>;
}

/// Weather entered by hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualWeather {
    pub temperature_low: f64,
    pub temperature_average: f64,
    pub temperature_high: f64,
    pub condition: Condition,
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
}

impl ManualWeather {
    pub fn new(
        temperature_low: f64,
        temperature_average: f64,
        temperature_high: f64,
        condition: Condition,
        sunrise: NaiveTime,
        sunset: NaiveTime,
    ) -> SimResult<Self> {
        let weather = Self {
            temperature_low,
            temperature_average,
            temperature_high,
            condition,
            sunrise,
            sunset,
        };
        weather.validate()?;
        Ok(weather)
    }

    pub fn validate(&self) -> SimResult<()> {
        check_finite(self.temperature_low, "temperature_low")?;
        check_finite(self.temperature_average, "temperature_average")?;
        check_finite(self.temperature_high, "temperature_high")?;

        if self.temperature_low > self.temperature_high {
            return Err(SimError::InvalidTemperatureRange {
                low: self.temperature_low,
                high: self.temperature_high,
            });
        }
        if !(self.temperature_low..=self.temperature_high).contains(&self.temperature_average) {
            return Err(SimError::parameters(
                "manual weather",
                "average temperature must lie between low and high",
            ));
        }
        if self.sunset <= self.sunrise {
            return Err(SimError::InvalidDaylightWindow);
        }
        Ok(())
    }

    /// Sun position on the same calendar day as `now`
    pub fn sun_position(&self, now: Timestamp) -> SimResult<SunPosition> {
        let day = now.date();
        SunPosition::from_times(day.and_time(self.sunrise), day.and_time(self.sunset), now)
    }

    /// Snapshot with a freshly drawn current temperature
    pub fn draw<R: Rng + ?Sized>(&self, now: Timestamp, rng: &mut R) -> SimResult<WeatherSnapshot> {
        self.validate()?;
        let sun_position = self.sun_position(now)?;
        if self.temperature_low == self.temperature_high {
            return Ok(WeatherSnapshot::new(
                self.temperature_low,
                self.temperature_low,
                self.temperature_high,
                self.condition,
                sun_position,
            ));
        }

        let dist = Triangular::new(
            self.temperature_low,
            self.temperature_high,
            self.temperature_average,
        )
        .map_err(|e| SimError::parameters("manual weather", e.to_string()))?;
        let current = round_to_decimals(dist.sample(rng), TEMPERATURE_DECIMALS)
            .clamp(self.temperature_low, self.temperature_high);

        Ok(WeatherSnapshot::new(
            current,
            self.temperature_low,
            self.temperature_high,
            self.condition,
            sun_position,
        ))
    }
}

/// Provider over manually entered weather
#[derive(Debug, Clone)]
pub struct ManualProvider<R> {
    weather: ManualWeather,
    rng: R,
}

impl<R: Rng> ManualProvider<R> {
    pub fn new(weather: ManualWeather, rng: R) -> Self {
        Self { weather, rng }
    }

    pub fn weather(&self) -> &ManualWeather {
        &self.weather
    }
}

impl<R: Rng> WeatherProvider for ManualProvider<R> {
    fn snapshot(&mut self, now: Timestamp) -> SimResult<WeatherSnapshot> {
        let snapshot = self.weather.draw(now, &mut self.rng)?;
        log::debug!(
            "manual weather: {:.2} in [{:.2}, {:.2}], {}, {:?}",
            snapshot.temperature_current,
            snapshot.temperature_low,
            snapshot.temperature_high,
            snapshot.condition,
            snapshot.sun_position,
        );
        Ok(snapshot)
    }
}

/// Provider that always returns the same snapshot
#[derive(Debug, Clone, Copy)]
pub struct StaticWeather(pub WeatherSnapshot);

impl WeatherProvider for StaticWeather {
    fn snapshot(&mut self, _now: Timestamp) -> SimResult<WeatherSnapshot> {
        Ok(self.0)
    }
}
