//! Weather Conditions and Their Meter Parameters
//!
//! ## Overview
//!
//! A condition modulates the meter twice:
//!
//! 1. **Scaling bounds**: the weather component maps the relative temperature
//!    into `[bounds.min, bounds.max]`, so rain caps out below clear skies even
//!    on the warmest afternoon.
//! 2. **Triangular parameters**: the random component is one draw from a
//!    triangular distribution `(min, max, mode = average)`.
//!
//! All numbers are on the 0-10 base scale; editions rescale afterwards.
//!
//! ## Label Forms
//!
//! Conditions parse from the short code (`"lc"`), the display name
//! (`"Light Cloud"`, case-insensitive), or a WMO code via
//! [`Condition::from_wmo_code`]. Anything else is
//! [`SimError::InvalidCondition`].
//!
//! ## Usage Example
//!
//! ```rust
//! use boktaisim_core::{Condition, ConditionTable};
//!
//! let table = ConditionTable::standard();
//! let rain: Condition = "Heavy Rain".parse()?;
//! let params = table.get(rain)?;
//! assert_eq!(params.bounds.max, 4.0);
//! # Ok::<(), boktaisim_core::SimError>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution, Triangular};
use serde::{Deserialize, Serialize};

use crate::constants::meter::BASE_SCALE_MAX;
use crate::errors::{SimError, SimResult};

/// Categorical weather state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "sn")]
    Snow,
    #[serde(rename = "sl")]
    Sleet,
    #[serde(rename = "h")]
    Hail,
    #[serde(rename = "t")]
    Thunderstorm,
    #[serde(rename = "hr")]
    HeavyRain,
    #[serde(rename = "lr")]
    LightRain,
    #[serde(rename = "s")]
    Showers,
    #[serde(rename = "hc")]
    HeavyCloud,
    #[serde(rename = "lc")]
    LightCloud,
    #[serde(rename = "c")]
    Clear,
}

impl Condition {
    /// Every condition, darkest first
    pub const ALL: [Condition; 10] = [
        Self::Snow,
        Self::Sleet,
        Self::Hail,
        Self::Thunderstorm,
        Self::HeavyRain,
        Self::LightRain,
        Self::Showers,
        Self::HeavyCloud,
        Self::LightCloud,
        Self::Clear,
    ];

    /// Short code used in configuration files
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Snow => "sn",
            Self::Sleet => "sl",
            Self::Hail => "h",
            Self::Thunderstorm => "t",
            Self::HeavyRain => "hr",
            Self::LightRain => "lr",
            Self::Showers => "s",
            Self::HeavyCloud => "hc",
            Self::LightCloud => "lc",
            Self::Clear => "c",
        }
    }

    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Snow => "Snow",
            Self::Sleet => "Sleet",
            Self::Hail => "Hail",
            Self::Thunderstorm => "Thunderstorm",
            Self::HeavyRain => "Heavy Rain",
            Self::LightRain => "Light Rain",
            Self::Showers => "Showers",
            Self::HeavyCloud => "Heavy Cloud",
            Self::LightCloud => "Light Cloud",
            Self::Clear => "Clear",
        }
    }

    /// Map a WMO weather code (as reported by Open-Meteo) onto a condition.
    ///
    /// The WMO set is finer than ours; drizzle reads as showers and freezing
    /// variants as the next-heavier rain.
    pub fn from_wmo_code(code: u8) -> SimResult<Self> {
        let condition = match code {
            0 => Self::Clear,
            1 | 2 => Self::LightCloud,
            3 | 45 | 48 => Self::HeavyCloud,
            51 | 53 | 56 => Self::Showers,
            55 | 57 | 61 | 66 => Self::LightRain,
            63 | 65 | 80..=82 => Self::HeavyRain,
            67 | 86 => Self::Hail,
            71 | 73 | 75 | 77 => Self::Snow,
            85 => Self::Sleet,
            95 | 96 | 99 => Self::Thunderstorm,
            other => return Err(SimError::condition(format!("WMO code {other}"))),
        };
        Ok(condition)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Condition {
    type Err = SimError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let trimmed = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == trimmed || c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SimError::condition(label))
    }
}

/// Triangular distribution parameters for the random component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangularParams {
    /// Lowest possible draw
    pub min: f64,
    /// Highest possible draw
    pub max: f64,
    /// Most likely draw (the distribution's mode)
    pub average: f64,
}

impl TriangularParams {
    pub const fn new(min: f64, average: f64, max: f64) -> Self {
        Self { min, max, average }
    }

    /// Draw one sample
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<f64> {
        let dist = Triangular::new(self.min, self.max, self.average)
            .map_err(|e| SimError::parameters("triangular", e.to_string()))?;
        Ok(dist.sample(rng))
    }
}

/// Bounds the weather component is scaled into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingBounds {
    pub min: f64,
    pub max: f64,
}

/// Static parameters for one condition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionParameters {
    /// Random component distribution
    pub random: TriangularParams,

    /// Weather component range
    pub bounds: ScalingBounds,

    /// Offset added to the average when condition modifiers are enabled
    #[serde(default)]
    pub modifier: f64,
}

impl ConditionParameters {
    /// Entry whose bounds reuse the triangular min/max, as in the classic table
    pub const fn classic(min: f64, average: f64, max: f64, modifier: f64) -> Self {
        Self {
            random: TriangularParams::new(min, average, max),
            bounds: ScalingBounds { min, max },
            modifier,
        }
    }

    fn validate(&self, condition: Condition) -> SimResult<()> {
        let name = condition.name();
        let TriangularParams { min, max, average } = self.random;
        let values = [min, max, average, self.bounds.min, self.bounds.max, self.modifier];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SimError::parameters(name, "non-finite value"));
        }
        if !(min <= average && average <= max) {
            return Err(SimError::parameters(
                name,
                format!("expected min <= average <= max, got {min} / {average} / {max}"),
            ));
        }
        if self.bounds.min > self.bounds.max {
            return Err(SimError::parameters(
                name,
                format!("bounds min {} above max {}", self.bounds.min, self.bounds.max),
            ));
        }
        let on_scale = |v: f64| (0.0..=BASE_SCALE_MAX).contains(&v);
        if ![min, max, self.bounds.min, self.bounds.max].into_iter().all(on_scale) {
            return Err(SimError::parameters(
                name,
                format!("values must lie within 0..={BASE_SCALE_MAX}"),
            ));
        }
        Ok(())
    }
}

/// Immutable condition → parameters mapping
///
/// Built once at startup and shared by reference with every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Condition, ConditionParameters>")]
#[serde(into = "BTreeMap<Condition, ConditionParameters>")]
pub struct ConditionTable {
    entries: BTreeMap<Condition, ConditionParameters>,
}

impl ConditionTable {
    /// Build a table, validating every entry. An empty table is rejected.
    pub fn new(entries: BTreeMap<Condition, ConditionParameters>) -> SimResult<Self> {
        if entries.is_empty() {
            return Err(SimError::parameters("table", "no conditions defined"));
        }
        for (condition, params) in &entries {
            params.validate(*condition)?;
        }
        Ok(Self { entries })
    }

    /// The parameter table the series was tuned with
    pub fn standard() -> Self {
        use Condition::*;
        let entries = [
            (Snow, ConditionParameters::classic(0.0, 2.0, 5.0, 0.0)),
            (Sleet, ConditionParameters::classic(0.0, 1.0, 3.0, -2.0)),
            (Hail, ConditionParameters::classic(0.0, 1.0, 3.0, -2.0)),
            (Thunderstorm, ConditionParameters::classic(0.0, 1.0, 2.0, -2.0)),
            (HeavyRain, ConditionParameters::classic(0.0, 2.0, 4.0, -1.0)),
            (LightRain, ConditionParameters::classic(0.0, 3.0, 8.0, 0.0)),
            (Showers, ConditionParameters::classic(1.0, 5.0, 9.0, 1.0)),
            (HeavyCloud, ConditionParameters::classic(0.0, 2.0, 4.0, -1.0)),
            (LightCloud, ConditionParameters::classic(2.0, 5.0, 10.0, 1.0)),
            (Clear, ConditionParameters::classic(4.0, 7.0, 10.0, 1.0)),
        ];
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parameters for `condition`, or `InvalidCondition` if the table lacks it
    pub fn get(&self, condition: Condition) -> SimResult<&ConditionParameters> {
        self.entries
            .get(&condition)
            .ok_or_else(|| SimError::condition(condition.name()))
    }

    /// Resolve a free-form label and fetch its parameters
    pub fn lookup(&self, label: &str) -> SimResult<(Condition, &ConditionParameters)> {
        let condition: Condition = label.parse()?;
        Ok((condition, self.get(condition)?))
    }

    pub fn contains(&self, condition: Condition) -> bool {
        self.entries.contains_key(&condition)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Condition, &ConditionParameters)> {
        self.entries.iter()
    }
}

impl Default for ConditionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<BTreeMap<Condition, ConditionParameters>> for ConditionTable {
    type Error = SimError;

    fn try_from(entries: BTreeMap<Condition, ConditionParameters>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<ConditionTable> for BTreeMap<Condition, ConditionParameters> {
    fn from(table: ConditionTable) -> Self {
        table.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn parses_codes_and_names() {
        assert_eq!("lc".parse::<Condition>().unwrap(), Condition::LightCloud);
        assert_eq!("light cloud".parse::<Condition>().unwrap(), Condition::LightCloud);
        assert_eq!(" Clear ".parse::<Condition>().unwrap(), Condition::Clear);
        assert!(matches!(
            "Fog".parse::<Condition>(),
            Err(SimError::InvalidCondition { .. })
        ));
    }

    #[test]
    fn wmo_codes_map_onto_conditions() {
        assert_eq!(Condition::from_wmo_code(0).unwrap(), Condition::Clear);
        assert_eq!(Condition::from_wmo_code(45).unwrap(), Condition::HeavyCloud);
        assert_eq!(Condition::from_wmo_code(81).unwrap(), Condition::HeavyRain);
        assert_eq!(Condition::from_wmo_code(85).unwrap(), Condition::Sleet);
        assert!(Condition::from_wmo_code(42).is_err());
    }

    #[test]
    fn standard_table_is_complete_and_valid() {
        let table = ConditionTable::standard();
        assert_eq!(table.len(), Condition::ALL.len());
        for condition in Condition::ALL {
            let params = table.get(condition).unwrap();
            assert!(params.validate(condition).is_ok(), "{condition}");
        }
    }

    #[test]
    fn missing_condition_is_an_error() {
        let mut entries = BTreeMap::new();
        entries.insert(Condition::Clear, ConditionParameters::classic(4.0, 7.0, 10.0, 1.0));
        let table = ConditionTable::new(entries).unwrap();

        assert!(table.contains(Condition::Clear));
        assert!(matches!(
            table.get(Condition::Hail),
            Err(SimError::InvalidCondition { .. })
        ));
    }

    #[test]
    fn rejects_inverted_entries() {
        let mut entries = BTreeMap::new();
        entries.insert(Condition::Clear, ConditionParameters::classic(8.0, 7.0, 10.0, 0.0));
        assert!(matches!(
            ConditionTable::new(entries),
            Err(SimError::InvalidParameters { .. })
        ));

        assert!(ConditionTable::new(BTreeMap::new()).is_err());
    }

    #[test]
    fn table_json_uses_short_codes() {
        let json = serde_json::to_string(&ConditionTable::standard()).unwrap();
        assert!(json.contains("\"lc\""));

        let parsed: ConditionTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ConditionTable::standard());
    }

    #[test]
    fn json_table_is_validated() {
        let json = r#"{"c": {"random": {"min": 4, "max": 12, "average": 7},
                              "bounds": {"min": 4, "max": 10}}}"#;
        assert!(serde_json::from_str::<ConditionTable>(json).is_err());
    }

    #[test]
    fn triangular_draws_stay_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let params = TriangularParams::new(4.0, 7.0, 10.0);
        for _ in 0..1000 {
            let v = params.sample(&mut rng).unwrap();
            assert!((4.0..=10.0).contains(&v));
        }
    }
}
