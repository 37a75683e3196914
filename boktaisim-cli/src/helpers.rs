//! Session Helpers for the Command Line
//!
//! Combines the saved configuration, per-invocation overrides, the manual
//! weather provider and the calculator into one [`Session`], so every
//! subcommand reads the meter the same way.

use anyhow::{Context, Result};
use boktaisim_core::config::parse_time_of_day;
use boktaisim_core::{
    Condition, ConditionTable, Edition, FeatureWeights, ManualProvider, MeterReading,
    ReadingHistogram, SimConfig, SunPhase, TemperatureScale, Timestamp, ValueCalculator,
    WeatherProvider, WeatherSnapshot,
};
use chrono::NaiveTime;
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Weather and mode flags that override the config file for one run
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Game edition (1, 2 or 3)
    #[arg(long, value_parser = parse_edition)]
    pub edition: Option<Edition>,

    /// Allow readings after sunset (`--night-mode false` to disable)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub night_mode: Option<bool>,

    /// Condition code or name (c, lc, hc, s, lr, hr, t, h, sl, sn)
    #[arg(long)]
    pub condition: Option<Condition>,

    /// Daily low temperature
    #[arg(long, allow_negative_numbers = true)]
    pub low: Option<f64>,

    /// Daily average temperature
    #[arg(long, allow_negative_numbers = true)]
    pub avg: Option<f64>,

    /// Daily high temperature
    #[arg(long, allow_negative_numbers = true)]
    pub high: Option<f64>,

    /// Sunrise, HH:MM
    #[arg(long)]
    pub sunrise: Option<String>,

    /// Sunset, HH:MM
    #[arg(long)]
    pub sunset: Option<String>,

    /// Temperature unit of the entered values (F or C)
    #[arg(long)]
    pub unit: Option<TemperatureScale>,

    /// Use classic weights (sun-heavy) instead of a plain mean
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub classic_weights: Option<bool>,

    /// Add per-condition modifiers to the daytime average
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub modifiers: Option<bool>,
}

fn parse_edition(value: &str) -> Result<Edition, String> {
    let number: u8 = value
        .parse()
        .map_err(|_| format!("edition must be 1, 2 or 3, got `{value}`"))?;
    Edition::try_from(number).map_err(|e| e.to_string())
}

impl Overrides {
    /// Config with these overrides applied and re-validated
    pub fn apply(&self, mut config: SimConfig) -> Result<SimConfig> {
        if let Some(edition) = self.edition {
            config.edition = edition;
        }
        if let Some(enabled) = self.night_mode {
            config.night_mode = enabled;
        }
        if let Some(condition) = self.condition {
            config.condition = condition.code().to_string();
        }
        if let Some(low) = self.low {
            config.temperature_low = low;
        }
        if let Some(avg) = self.avg {
            config.temperature_average = avg;
        }
        if let Some(high) = self.high {
            config.temperature_high = high;
        }
        if let Some(sunrise) = &self.sunrise {
            config.sunrise = sunrise.clone();
        }
        if let Some(sunset) = &self.sunset {
            config.sunset = sunset.clone();
        }
        if let Some(unit) = self.unit {
            config.temp_scale = unit;
        }
        if let Some(classic) = self.classic_weights {
            config.weights = if classic {
                FeatureWeights::classic()
            } else {
                FeatureWeights::equal()
            };
        }
        if let Some(enabled) = self.modifiers {
            config.condition_modifiers = enabled;
        }

        config.validate().context("invalid settings after applying flags")?;
        Ok(config)
    }
}

/// Parse `--at` into a time today
pub fn time_today(value: &str, today: Timestamp) -> Result<Timestamp> {
    let time: NaiveTime = parse_time_of_day(value)?;
    Ok(today.date().and_time(time))
}

/// Serialized form of one reading for `--json`
#[derive(Debug, Serialize)]
pub struct ReadingReport {
    pub at: Timestamp,
    pub phase: SunPhase,
    pub unit: TemperatureScale,
    pub snapshot: WeatherSnapshot,
    pub reading: MeterReading,
}

impl ReadingReport {
    /// Same report with temperatures shown in `unit`
    pub fn in_unit(self, unit: TemperatureScale) -> Self {
        Self {
            snapshot: self.snapshot.converted(self.unit, unit),
            unit,
            ..self
        }
    }
}

/// Everything needed to produce readings from manual weather
pub struct Session {
    config: SimConfig,
    table: ConditionTable,
    provider: ManualProvider<ChaCha8Rng>,
    rng: ChaCha8Rng,
    /// Last polled snapshot and when it was taken
    current: Option<(Timestamp, WeatherSnapshot)>,
}

impl Session {
    /// Build from config; `seed` makes every draw reproducible
    pub fn new(config: SimConfig, seed: Option<u64>) -> Result<Self> {
        let table = config
            .condition_table()
            .context("failed to load condition table")?;

        let (weather_rng, rng) = match seed {
            Some(seed) => (
                ChaCha8Rng::seed_from_u64(seed),
                ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (ChaCha8Rng::from_entropy(), ChaCha8Rng::from_entropy()),
        };
        let provider = config.manual_provider(weather_rng)?;

        tracing::debug!(
            edition = %config.edition,
            night_mode = config.night_mode,
            conditions = table.len(),
            seeded = seed.is_some(),
            "session ready"
        );

        Ok(Self {
            config,
            table,
            provider,
            rng,
            current: None,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Weather for `now`, polling the provider once per weather interval
    fn snapshot(&mut self, now: Timestamp) -> Result<WeatherSnapshot> {
        if let Some((taken, snapshot)) = self.current {
            let fresh = u64::try_from((now - taken).num_seconds())
                .is_ok_and(|elapsed| elapsed < self.config.weather_interval_secs);
            if fresh {
                let sun_position = self.provider.weather().sun_position(now)?;
                return Ok(WeatherSnapshot {
                    sun_position,
                    ..snapshot
                });
            }
        }

        let snapshot = self.provider.snapshot(now)?;
        tracing::debug!(at = %now, "polled weather");
        self.current = Some((now, snapshot));
        Ok(snapshot)
    }

    /// Reading for `now`
    pub fn read(&mut self, now: Timestamp) -> Result<ReadingReport> {
        let snapshot = self.snapshot(now)?;
        let calculator = ValueCalculator::new(&self.table, self.config.mode_config());
        let reading = calculator.compute(&snapshot, &mut self.rng)?;

        Ok(ReadingReport {
            at: now,
            phase: snapshot.sun_position.phase(),
            unit: self.config.temp_scale,
            snapshot,
            reading,
        })
    }

    /// Sample `samples` readings from one snapshot taken at `now`
    pub fn distribution(
        &mut self,
        now: Timestamp,
        samples: usize,
    ) -> Result<(WeatherSnapshot, ReadingHistogram)> {
        let snapshot = self.snapshot(now)?;
        let calculator = ValueCalculator::new(&self.table, self.config.mode_config());
        let histogram = calculator.distribution(&snapshot, samples, &mut self.rng)?;
        Ok((snapshot, histogram))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> Timestamp {
        NaiveDate::from_ymd_opt(2021, 6, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn overrides_replace_config_values() {
        let overrides = Overrides {
            edition: Some(Edition::Boktai3),
            condition: Some(Condition::Snow),
            low: Some(-5.0),
            avg: Some(0.0),
            high: Some(3.0),
            unit: Some(TemperatureScale::Celsius),
            ..Overrides::default()
        };
        let config = overrides.apply(SimConfig::default()).unwrap();
        assert_eq!(config.edition, Edition::Boktai3);
        assert_eq!(config.condition, "sn");
        assert_eq!(config.temperature_low, -5.0);
        assert_eq!(config.temp_scale, TemperatureScale::Celsius);
        assert!(!config.night_mode);
    }

    #[test]
    fn toggles_switch_both_ways() {
        let saved = SimConfig::default().night_mode(true);
        let saved = SimConfig {
            condition_modifiers: true,
            weights: FeatureWeights::classic(),
            ..saved
        };

        let off = Overrides {
            night_mode: Some(false),
            classic_weights: Some(false),
            modifiers: Some(false),
            ..Overrides::default()
        };
        let config = off.apply(saved.clone()).unwrap();
        assert!(!config.night_mode);
        assert!(!config.condition_modifiers);
        assert_eq!(config.weights, FeatureWeights::equal());

        let untouched = Overrides::default().apply(saved.clone()).unwrap();
        assert_eq!(untouched, saved);
    }

    #[test]
    fn inconsistent_overrides_rejected() {
        let overrides = Overrides {
            low: Some(90.0),
            ..Overrides::default()
        };
        assert!(overrides.apply(SimConfig::default()).is_err());
    }

    #[test]
    fn edition_flag_parsing() {
        assert_eq!(parse_edition("2").unwrap(), Edition::Boktai2);
        assert!(parse_edition("4").is_err());
        assert!(parse_edition("two").is_err());
    }

    #[test]
    fn at_flag_keeps_date() {
        let at = time_today("06:30", noon()).unwrap();
        assert_eq!(at.date(), noon().date());
        assert_eq!(at.time(), NaiveTime::from_hms_opt(6, 30, 0).unwrap());
        assert!(time_today("dawn", noon()).is_err());
    }

    #[test]
    fn seeded_sessions_agree() {
        let mut a = Session::new(SimConfig::default(), Some(42)).unwrap();
        let mut b = Session::new(SimConfig::default(), Some(42)).unwrap();
        for _ in 0..10 {
            let ra = a.read(noon()).unwrap();
            let rb = b.read(noon()).unwrap();
            assert_eq!(ra.reading, rb.reading);
            assert_eq!(ra.snapshot, rb.snapshot);
        }
    }

    #[test]
    fn report_serializes() {
        let mut session = Session::new(SimConfig::default(), Some(1)).unwrap();
        let report = session.read(noon()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["phase"], "at_apex");
        assert_eq!(json["unit"], "F");
        assert!(json["reading"]["value"].as_u64().unwrap() <= 8);
    }

    #[test]
    fn weather_held_for_its_interval() {
        let config = SimConfig {
            weather_interval_secs: 900,
            ..SimConfig::default()
        };
        let mut session = Session::new(config, Some(5)).unwrap();
        let first = session.read(noon()).unwrap().snapshot;

        // Five minutes on: same weather, sun has moved
        let later = noon() + chrono::Duration::minutes(5);
        let second = session.read(later).unwrap().snapshot;
        assert_eq!(second.temperature_current, first.temperature_current);
        assert_ne!(second.sun_position, first.sun_position);

        // Redraws once the interval has passed
        let redraws = (1..=20)
            .map(|step| noon() + chrono::Duration::minutes(15 * step))
            .map(|at| session.read(at).unwrap().snapshot.temperature_current)
            .filter(|t| *t != first.temperature_current)
            .count();
        assert!(redraws > 0);
    }

    #[test]
    fn report_converts_units() {
        let mut session = Session::new(SimConfig::default().temperatures(50.0, 68.0, 86.0), Some(2)).unwrap();
        let report = session.read(noon()).unwrap();
        let fraction = report.snapshot.temperature_fraction();

        let celsius = report.in_unit(TemperatureScale::Celsius);
        assert_eq!(celsius.unit, TemperatureScale::Celsius);
        assert!((celsius.snapshot.temperature_low - 10.0).abs() < 1e-9);
        assert!((celsius.snapshot.temperature_high - 30.0).abs() < 1e-9);
        assert!((celsius.snapshot.temperature_fraction() - fraction).abs() < 1e-9);
    }

    #[test]
    fn distribution_counts_every_sample() {
        let mut session = Session::new(SimConfig::default(), Some(3)).unwrap();
        let (_, histogram) = session.distribution(noon(), 250).unwrap();
        assert_eq!(histogram.total(), 250);
        assert_eq!(histogram.counts().len(), 9);
    }
}
