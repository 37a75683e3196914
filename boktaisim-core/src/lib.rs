//! Core value calculator for boktaisim
//!
//! Simulates the solar sensor of the Boktai cartridges: weather and time of
//! day go in, one integer sunlight value comes out, ready to be typed into an
//! emulator that lacks the real sensor.
//!
//! Key constraints:
//! - Pure calculation, no I/O in the hot path
//! - Randomness always injected by the caller
//! - Output always on the edition's meter (0-8 or 0-10)
//!
//! ```no_run
//! use boktaisim_core::{ManualWeather, ManualProvider, ValueCalculator, WeatherProvider};
//! use boktaisim_core::{Clock, Condition, ConditionTable, Edition, ModeConfig, SystemClock};
//! use chrono::NaiveTime;
//!
//! let weather = ManualWeather::new(
//!     60.0, 72.0, 85.0,
//!     Condition::LightCloud,
//!     NaiveTime::from_hms_opt(6, 10, 0).unwrap(),
//!     NaiveTime::from_hms_opt(19, 40, 0).unwrap(),
//! )?;
//! let mut provider = ManualProvider::new(weather, rand::thread_rng());
//!
//! let table = ConditionTable::standard();
//! let calculator = ValueCalculator::new(&table, ModeConfig::new(Edition::Boktai1));
//!
//! let snapshot = provider.snapshot(SystemClock.now())?;
//! let reading = calculator.compute(&snapshot, &mut rand::thread_rng())?;
//! println!("sunlight: {}/{}", reading.value, reading.scale_max());
//! # Ok::<(), boktaisim_core::SimError>(())
//! ```

#![deny(unsafe_code)]

pub mod calculator;
pub mod condition;
pub mod config;
pub mod constants;
pub mod errors;
pub mod mode;
pub mod provider;
pub mod scale;
pub mod sun;
pub mod time;
pub mod weather;

// Public API
pub use calculator::{compute_reading, MeterReading, ReadingHistogram, ValueCalculator};
pub use condition::{Condition, ConditionParameters, ConditionTable, ScalingBounds, TriangularParams};
pub use config::{ConfigError, SimConfig};
pub use errors::{SimError, SimResult};
pub use mode::{Edition, FeatureWeights, ModeConfig};
pub use provider::{ManualProvider, ManualWeather, StaticWeather, WeatherProvider};
pub use sun::{SunCurve, SunPhase, SunPosition};
pub use time::{Clock, FixedClock, SystemClock, Timestamp};
pub use weather::{TemperatureScale, WeatherSnapshot};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
