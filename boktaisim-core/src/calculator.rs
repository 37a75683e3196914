//! The Value Calculator
//!
//! ## Overview
//!
//! Turns one [`WeatherSnapshot`] into one [`MeterReading`]. Four components
//! are computed on the 0-10 base scale:
//!
//! | Component   | Source                                   | Random? |
//! |-------------|------------------------------------------|---------|
//! | temperature | position of current temp in `[low, high]`| no      |
//! | weather     | same position, inside condition bounds   | no      |
//! | sun         | beta draw shaped by solar elevation      | yes     |
//! | random      | triangular draw from condition params    | yes     |
//!
//! The weighted mean (equal weights unless configured) is clamped, rescaled
//! to the edition's meter, and rounded to the integer the player enters.
//!
//! ## Night
//!
//! ```text
//! night, night mode off  → sun = 0, value = 0     (no play)
//! night, night mode on   → sun from the dim night curve,
//!                          value = mean × NIGHT_CAP_FRACTION
//! ```
//!
//! ## Randomness
//!
//! The generator is always passed in. Hosts use an entropy-seeded generator;
//! tests pass a seeded `ChaCha8Rng` and get reproducible readings.
//!
//! ## Usage Example
//!
//! ```rust
//! use boktaisim_core::{
//!     compute_reading, Condition, ConditionTable, Edition, ModeConfig, SunPosition,
//!     WeatherSnapshot,
//! };
//!
//! let table = ConditionTable::standard();
//! let mode = ModeConfig::new(Edition::Boktai2);
//! let snapshot = WeatherSnapshot::new(75.0, 60.0, 85.0, Condition::Clear, SunPosition::Daylight(0.5));
//!
//! let reading = compute_reading(&snapshot, &table, &mode, &mut rand::thread_rng())?;
//! assert!(reading.value <= 10);
//! # Ok::<(), boktaisim_core::SimError>(())
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::condition::ConditionTable;
use crate::constants::meter::{BASE_SCALE_MAX, NIGHT_CAP_FRACTION};
use crate::errors::SimResult;
use crate::mode::{Edition, ModeConfig};
use crate::scale::{lerp, rescale_to_meter, round_to_meter};
use crate::sun::{SunCurve, SunPosition};
use crate::weather::WeatherSnapshot;

/// One computed meter value with its diagnostic components
///
/// All values are on the edition's scale, `0..=scale_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    /// The number to enter into the emulator
    pub value: u8,
    /// Unrounded final value
    pub average: f64,
    pub temperature: f64,
    pub weather: f64,
    pub sun: f64,
    pub random: f64,
    pub edition: Edition,
    /// Taken while the sun was down
    pub night: bool,
}

impl MeterReading {
    pub fn scale_max(&self) -> u8 {
        self.edition.scale_max()
    }

    /// Components in display order: temperature, weather, sun, random
    pub fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("temperature", self.temperature),
            ("weather", self.weather),
            ("sun", self.sun),
            ("random", self.random),
        ]
    }
}

/// Compute a single reading
///
/// Validation happens before any draw, so a failed call never yields a
/// partial reading.
pub fn compute_reading<R: Rng + ?Sized>(
    snapshot: &WeatherSnapshot,
    table: &ConditionTable,
    mode: &ModeConfig,
    rng: &mut R,
) -> SimResult<MeterReading> {
    ValueCalculator::new(table, *mode).compute(snapshot, rng)
}

/// Calculator bound to a parameter table and mode
#[derive(Debug, Clone)]
pub struct ValueCalculator<'a> {
    table: &'a ConditionTable,
    mode: ModeConfig,
    curve: SunCurve,
}

impl<'a> ValueCalculator<'a> {
    pub fn new(table: &'a ConditionTable, mode: ModeConfig) -> Self {
        Self {
            table,
            mode,
            curve: SunCurve::default(),
        }
    }

    /// Replace the sun curve
    pub fn with_curve(mut self, curve: SunCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn mode(&self) -> &ModeConfig {
        &self.mode
    }

    pub fn table(&self) -> &ConditionTable {
        self.table
    }

    pub fn compute<R: Rng + ?Sized>(
        &self,
        snapshot: &WeatherSnapshot,
        rng: &mut R,
    ) -> SimResult<MeterReading> {
        snapshot.validate()?;
        self.mode.weights.validate()?;
        let params = self.table.get(snapshot.condition)?;

        let fraction = snapshot.temperature_fraction();
        let temperature = fraction * BASE_SCALE_MAX;
        let weather = lerp(params.bounds.min, params.bounds.max, fraction);

        let night = snapshot.sun_position.is_night();
        let sun = match snapshot.sun_position {
            _ if night && self.mode.night_mode => self.curve.sample_night(rng)?,
            _ if night => 0.0,
            SunPosition::Daylight(position) => self.curve.sample_day(position, rng)?,
            SunPosition::Night => 0.0,
        };

        let random = params.random.sample(rng)?;

        // Modifiers describe daylight; moonlight ignores them
        let mut average = self.mode.weights.mean(temperature, weather, sun, random);
        if self.mode.condition_modifiers && !night {
            average += params.modifier;
        }
        average = average.clamp(0.0, BASE_SCALE_MAX);

        if night {
            average = if self.mode.night_mode {
                average * NIGHT_CAP_FRACTION
            } else {
                0.0
            };
        }

        let scale = self.mode.scale_max();
        let reading = MeterReading {
            value: round_to_meter(rescale_to_meter(average, scale), scale),
            average: rescale_to_meter(average, scale),
            temperature: rescale_to_meter(temperature, scale),
            weather: rescale_to_meter(weather, scale),
            sun: rescale_to_meter(sun, scale),
            random: rescale_to_meter(random, scale),
            edition: self.mode.edition,
            night,
        };

        log::debug!(
            "{} reading for {:?}: temperature={:.2} weather={:.2} sun={:.2} random={:.2} -> {:.2} ({})",
            snapshot.condition,
            snapshot.sun_position,
            reading.temperature,
            reading.weather,
            reading.sun,
            reading.random,
            reading.average,
            reading.value,
        );

        Ok(reading)
    }

    /// Sample `samples` readings and count how often each meter value occurs
    pub fn distribution<R: Rng + ?Sized>(
        &self,
        snapshot: &WeatherSnapshot,
        samples: usize,
        rng: &mut R,
    ) -> SimResult<ReadingHistogram> {
        let mut histogram = ReadingHistogram::new(self.mode.scale_max());
        for _ in 0..samples {
            histogram.record(self.compute(snapshot, rng)?.value);
        }
        Ok(histogram)
    }
}

/// Counts of rounded meter values, indexed `0..=scale_max`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingHistogram {
    counts: Vec<u32>,
}

impl ReadingHistogram {
    pub fn new(scale_max: u8) -> Self {
        Self {
            counts: vec![0; usize::from(scale_max) + 1],
        }
    }

    /// Values past the end are counted in the top bucket
    pub fn record(&mut self, value: u8) {
        let last = self.counts.len() - 1;
        self.counts[usize::from(value).min(last)] += 1;
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(value, count)| value as f64 * f64::from(*count))
            .sum();
        Some(weighted / f64::from(total))
    }

    /// Most frequent value; ties go to the lower value
    pub fn most_common(&self) -> Option<u8> {
        if self.total() == 0 {
            return None;
        }
        let mut best = 0;
        for (value, count) in self.counts.iter().enumerate() {
            if *count > self.counts[best] {
                best = value;
            }
        }
        u8::try_from(best).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Condition, ConditionParameters};
    use crate::errors::SimError;
    use crate::mode::FeatureWeights;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeMap;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0xB0C7A1)
    }

    fn noon(current: f64, low: f64, high: f64, condition: Condition) -> WeatherSnapshot {
        WeatherSnapshot::new(current, low, high, condition, SunPosition::Daylight(0.5))
    }

    #[test]
    fn temperature_endpoints() {
        let table = ConditionTable::standard();
        let mode = ModeConfig::new(Edition::Boktai2);
        let mut rng = rng();

        let cold = compute_reading(&noon(10.0, 10.0, 30.0, Condition::Clear), &table, &mode, &mut rng).unwrap();
        assert_eq!(cold.temperature, 0.0);
        assert_eq!(cold.weather, 4.0);

        let hot = compute_reading(&noon(30.0, 10.0, 30.0, Condition::Clear), &table, &mode, &mut rng).unwrap();
        assert_eq!(hot.temperature, 10.0);
        assert_eq!(hot.weather, 10.0);
    }

    #[test]
    fn eight_segment_edition_rescales_components() {
        let table = ConditionTable::standard();
        let mode = ModeConfig::new(Edition::Boktai1);
        let reading = compute_reading(
            &noon(30.0, 10.0, 30.0, Condition::Clear),
            &table,
            &mode,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(reading.temperature, 8.0);
        assert_eq!(reading.weather, 8.0);
        assert!(reading.value <= 8);
        assert_eq!(reading.scale_max(), 8);
    }

    #[test]
    fn night_without_night_mode_is_zero() {
        let table = ConditionTable::standard();
        let mode = ModeConfig::new(Edition::Boktai2);
        let snapshot = WeatherSnapshot::new(30.0, 10.0, 30.0, Condition::Clear, SunPosition::Night);
        let reading = compute_reading(&snapshot, &table, &mode, &mut rng()).unwrap();

        assert!(reading.night);
        assert_eq!(reading.sun, 0.0);
        assert_eq!(reading.value, 0);
        assert_eq!(reading.average, 0.0);
    }

    #[test]
    fn sunset_instant_reads_as_night() {
        let table = ConditionTable::standard();
        let snapshot = WeatherSnapshot::new(30.0, 10.0, 30.0, Condition::Clear, SunPosition::Daylight(1.0));
        let mut rng = rng();

        let mode = ModeConfig::new(Edition::Boktai2);
        for _ in 0..500 {
            let reading = compute_reading(&snapshot, &table, &mode, &mut rng).unwrap();
            assert!(reading.night);
            assert_eq!(reading.sun, 0.0);
            assert_eq!(reading.value, 0);
        }

        let mode = mode.night_mode(true);
        for _ in 0..500 {
            let reading = compute_reading(&snapshot, &table, &mode, &mut rng).unwrap();
            assert!(reading.night);
            assert!(reading.sun < 5.0);
            assert!(reading.value <= 5);
        }
    }

    #[test]
    fn overflowing_weights_are_rejected() {
        let table = ConditionTable::standard();
        let huge = FeatureWeights {
            temperature: 1e308,
            weather: 1e308,
            sun: 1e308,
            random: 1e308,
        };
        let mode = ModeConfig::new(Edition::Boktai2).weights(huge);
        let result = compute_reading(&noon(20.0, 10.0, 30.0, Condition::Clear), &table, &mode, &mut rng());
        assert!(matches!(result, Err(SimError::InvalidParameters { .. })));
    }

    #[test]
    fn modifiers_ignored_at_night() {
        let mut entries = BTreeMap::new();
        entries.insert(Condition::Clear, ConditionParameters::classic(4.0, 7.0, 10.0, 3.0));
        let table = ConditionTable::new(entries).unwrap();
        let snapshot = WeatherSnapshot::new(20.0, 10.0, 30.0, Condition::Clear, SunPosition::Night);
        let plain = ModeConfig::new(Edition::Boktai2).night_mode(true);
        let modified = plain.condition_modifiers(true);

        let a = compute_reading(&snapshot, &table, &plain, &mut rng()).unwrap();
        let b = compute_reading(&snapshot, &table, &modified, &mut rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn night_mode_caps_value() {
        let table = ConditionTable::standard();
        let mode = ModeConfig::new(Edition::Boktai2).night_mode(true);
        let snapshot = WeatherSnapshot::new(30.0, 10.0, 30.0, Condition::Clear, SunPosition::Night);
        let mut rng = rng();

        for _ in 0..500 {
            let reading = compute_reading(&snapshot, &table, &mode, &mut rng).unwrap();
            assert!(reading.sun < 5.0);
            assert!(reading.value <= 5);
        }
    }

    #[test]
    fn unknown_condition_yields_no_reading() {
        let mut entries = BTreeMap::new();
        entries.insert(Condition::Clear, ConditionParameters::classic(4.0, 7.0, 10.0, 1.0));
        let table = ConditionTable::new(entries).unwrap();
        let mode = ModeConfig::default();

        let result = compute_reading(&noon(20.0, 10.0, 30.0, Condition::Snow), &table, &mode, &mut rng());
        assert_eq!(result, Err(SimError::InvalidCondition { label: "Snow".into() }));
    }

    #[test]
    fn invalid_inputs_rejected() {
        let table = ConditionTable::standard();
        let mode = ModeConfig::default();

        let inverted = noon(20.0, 30.0, 10.0, Condition::Clear);
        assert!(matches!(
            compute_reading(&inverted, &table, &mode, &mut rng()),
            Err(SimError::InvalidTemperatureRange { .. })
        ));

        let bad_sun = WeatherSnapshot::new(20.0, 10.0, 30.0, Condition::Clear, SunPosition::Daylight(1.5));
        assert!(matches!(
            compute_reading(&bad_sun, &table, &mode, &mut rng()),
            Err(SimError::InvalidSunPosition { .. })
        ));
    }

    #[test]
    fn modifiers_shift_the_average() {
        let table = ConditionTable::standard();
        let snapshot = noon(20.0, 10.0, 30.0, Condition::Thunderstorm);
        let plain = ModeConfig::new(Edition::Boktai2);
        let modified = plain.condition_modifiers(true);

        // Same seed, same draws: only the modifier differs
        let a = compute_reading(&snapshot, &table, &plain, &mut rng()).unwrap();
        let b = compute_reading(&snapshot, &table, &modified, &mut rng()).unwrap();
        assert_eq!(a.sun, b.sun);
        assert!((b.average - (a.average - 2.0).max(0.0)).abs() < 1e-9);
    }

    #[test]
    fn classic_weights_follow_the_sun() {
        let table = ConditionTable::standard();
        let snapshot = noon(20.0, 10.0, 30.0, Condition::Showers);
        let mode = ModeConfig::new(Edition::Boktai2).weights(FeatureWeights::classic());
        let reading = compute_reading(&snapshot, &table, &mode, &mut rng()).unwrap();

        let expected = (reading.temperature * 10.0
            + reading.weather * 20.0
            + reading.sun * 40.0
            + reading.random * 25.0)
            / 95.0;
        assert!((reading.average - expected).abs() < 1e-9);
    }

    #[test]
    fn seeded_readings_repeat() {
        let table = ConditionTable::standard();
        let mode = ModeConfig::new(Edition::Boktai3);
        let snapshot = noon(22.0, 15.0, 28.0, Condition::LightCloud);

        let a = compute_reading(&snapshot, &table, &mode, &mut rng()).unwrap();
        let b = compute_reading(&snapshot, &table, &mode, &mut rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn histogram_counts_every_sample() {
        let table = ConditionTable::standard();
        let calc = ValueCalculator::new(&table, ModeConfig::new(Edition::Boktai1));
        let snapshot = noon(22.0, 15.0, 28.0, Condition::Clear);

        let histogram = calc.distribution(&snapshot, 300, &mut rng()).unwrap();
        assert_eq!(histogram.counts().len(), 9);
        assert_eq!(histogram.total(), 300);
        let mean = histogram.mean().unwrap();
        assert!((0.0..=8.0).contains(&mean));
        assert!(histogram.most_common().is_some());
    }

    #[test]
    fn empty_histogram() {
        let histogram = ReadingHistogram::new(10);
        assert_eq!(histogram.mean(), None);
        assert_eq!(histogram.most_common(), None);
    }
}
