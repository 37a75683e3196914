//! Simulator Configuration
//!
//! A single JSON file holds the player's last manual entry plus the knobs a
//! host needs: edition, night mode, refresh intervals, display unit, and the
//! optional averaging extensions. Every field has a default, so a partial
//! file (or none at all) still loads.
//!
//! ```no_run
//! use boktaisim_core::config::SimConfig;
//!
//! let config = SimConfig::load("boktaisim.json")?
//!     .night_mode(true)
//!     .update_interval_secs(60);
//! config.save("boktaisim.json")?;
//! # Ok::<(), boktaisim_core::config::ConfigError>(())
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::condition::{Condition, ConditionTable};
use crate::constants::time::{
    DEFAULT_UPDATE_INTERVAL_SECS, DEFAULT_WEATHER_INTERVAL_SECS, MIN_UPDATE_INTERVAL_SECS,
};
use crate::errors::SimError;
use crate::mode::{Edition, FeatureWeights, ModeConfig};
use crate::provider::{ManualProvider, ManualWeather};
use crate::weather::TemperatureScale;

/// Accepted time-of-day formats, 24-hour first
const TIME_FORMATS: [&str; 3] = ["%H:%M", "%I:%M %p", "%I:%M%p"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("config I/O failed: {0}")]
    Io(#[from] io::Error),

    /// File is not valid JSON for this schema
    #[error("config JSON invalid: {0}")]
    Json(#[from] serde_json::Error),

    /// Values parse but make no sense together
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<SimError> for ConfigError {
    fn from(e: SimError) -> Self {
        Self::Invalid(e.to_string())
    }
}

/// Persisted simulator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub edition: Edition,
    pub night_mode: bool,

    /// Seconds between meter refreshes
    pub update_interval_secs: u64,
    /// Seconds a weather snapshot stays current before the provider is
    /// polled again; the sun position still moves on every meter refresh
    pub weather_interval_secs: u64,

    /// Unit the manual temperatures are entered in
    pub temp_scale: TemperatureScale,
    pub temperature_low: f64,
    pub temperature_average: f64,
    pub temperature_high: f64,

    /// Condition code or name, e.g. `"c"` or `"Clear"`
    pub condition: String,
    /// Time of day, `HH:MM` or `HH:MM AM`
    pub sunrise: String,
    pub sunset: String,

    pub weights: FeatureWeights,
    pub condition_modifiers: bool,

    /// Optional JSON condition table replacing the built-in one
    pub table: Option<PathBuf>,

    /// Default log filter for hosts
    pub logging_level: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            edition: Edition::default(),
            night_mode: false,
            update_interval_secs: DEFAULT_UPDATE_INTERVAL_SECS,
            weather_interval_secs: DEFAULT_WEATHER_INTERVAL_SECS,
            temp_scale: TemperatureScale::default(),
            temperature_low: 60.0,
            temperature_average: 70.0,
            temperature_high: 80.0,
            condition: Condition::Clear.code().to_string(),
            sunrise: "06:00".to_string(),
            sunset: "18:00".to_string(),
            weights: FeatureWeights::default(),
            condition_modifiers: false,
            table: None,
            logging_level: "info".to_string(),
        }
    }
}

impl SimConfig {
    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write pretty JSON to `path`, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::debug!("saved config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval_secs < MIN_UPDATE_INTERVAL_SECS {
            return Err(ConfigError::Invalid(format!(
                "update_interval_secs must be at least {MIN_UPDATE_INTERVAL_SECS}"
            )));
        }
        if self.weather_interval_secs < MIN_UPDATE_INTERVAL_SECS {
            return Err(ConfigError::Invalid(format!(
                "weather_interval_secs must be at least {MIN_UPDATE_INTERVAL_SECS}"
            )));
        }
        self.weights.validate()?;
        self.manual_weather()?;
        Ok(())
    }

    pub fn edition(mut self, edition: Edition) -> Self {
        self.edition = edition;
        self
    }

    pub fn night_mode(mut self, enabled: bool) -> Self {
        self.night_mode = enabled;
        self
    }

    pub fn update_interval_secs(mut self, secs: u64) -> Self {
        self.update_interval_secs = secs;
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = condition.code().to_string();
        self
    }

    pub fn temperatures(mut self, low: f64, average: f64, high: f64) -> Self {
        self.temperature_low = low;
        self.temperature_average = average;
        self.temperature_high = high;
        self
    }

    /// Calculation options derived from this config
    pub fn mode_config(&self) -> ModeConfig {
        ModeConfig::new(self.edition)
            .night_mode(self.night_mode)
            .weights(self.weights)
            .condition_modifiers(self.condition_modifiers)
    }

    /// Manual weather entry described by this config
    pub fn manual_weather(&self) -> Result<ManualWeather, ConfigError> {
        let condition: Condition = self.condition.parse()?;
        let weather = ManualWeather::new(
            self.temperature_low,
            self.temperature_average,
            self.temperature_high,
            condition,
            parse_time_of_day(&self.sunrise)?,
            parse_time_of_day(&self.sunset)?,
        )?;
        Ok(weather)
    }

    pub fn manual_provider<R: Rng>(&self, rng: R) -> Result<ManualProvider<R>, ConfigError> {
        Ok(ManualProvider::new(self.manual_weather()?, rng))
    }

    /// Configured condition table, or the built-in one
    pub fn condition_table(&self) -> Result<ConditionTable, ConfigError> {
        match &self.table {
            Some(path) => load_table(path),
            None => Ok(ConditionTable::standard()),
        }
    }
}

/// Read a condition table from a JSON file keyed by condition code
pub fn load_table(path: impl AsRef<Path>) -> Result<ConditionTable, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let table: ConditionTable = serde_json::from_str(&raw)?;
    log::info!("loaded {} conditions from {}", table.len(), path.display());
    Ok(table)
}

/// Parse `HH:MM` (24-hour) or `HH:MM AM` (12-hour)
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ConfigError> {
    let value = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| ConfigError::Invalid(format!("unrecognized time of day `{value}`")))
}
