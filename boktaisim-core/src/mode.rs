//! Game Edition and Calculation Mode
//!
//! The edition decides the meter's resolution: the first game's gauge has
//! eight segments, the sequels have ten. Night mode lets the meter read
//! something after sunset, capped well below the daytime ceiling.

use serde::{Deserialize, Serialize};

use crate::constants::meter::{
    BOKTAI_1_SCALE_MAX, BOKTAI_2_SCALE_MAX, CLASSIC_WEIGHT_RANDOM, CLASSIC_WEIGHT_SUN,
    CLASSIC_WEIGHT_TEMPERATURE, CLASSIC_WEIGHT_WEATHER,
};
use crate::errors::{SimError, SimResult};

/// Which game in the series the reading is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Edition {
    /// Boktai: The Sun Is in Your Hand (0-8 meter)
    #[default]
    Boktai1,
    /// Boktai 2: Solar Boy Django (0-10 meter)
    Boktai2,
    /// Shin Bokura no Taiyou: Gyakushuu no Sabata (0-10 meter)
    Boktai3,
}

impl Edition {
    /// Highest value the edition's meter can display
    pub const fn scale_max(&self) -> u8 {
        match self {
            Self::Boktai1 => BOKTAI_1_SCALE_MAX,
            Self::Boktai2 | Self::Boktai3 => BOKTAI_2_SCALE_MAX,
        }
    }

    pub const fn number(&self) -> u8 {
        match self {
            Self::Boktai1 => 1,
            Self::Boktai2 => 2,
            Self::Boktai3 => 3,
        }
    }
}

impl TryFrom<u8> for Edition {
    type Error = SimError;

    fn try_from(edition: u8) -> Result<Self, Self::Error> {
        match edition {
            1 => Ok(Self::Boktai1),
            2 => Ok(Self::Boktai2),
            3 => Ok(Self::Boktai3),
            _ => Err(SimError::InvalidEdition { edition }),
        }
    }
}

impl From<Edition> for u8 {
    fn from(edition: Edition) -> Self {
        edition.number()
    }
}

impl std::fmt::Display for Edition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Boktai {}", self.number())
    }
}

/// Relative weight of each component in the final average
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub temperature: f64,
    pub weather: f64,
    pub sun: f64,
    pub random: f64,
}

impl Default for FeatureWeights {
    /// Equal weights: the plain arithmetic mean
    fn default() -> Self {
        Self::equal()
    }
}

impl FeatureWeights {
    pub const fn equal() -> Self {
        Self {
            temperature: 1.0,
            weather: 1.0,
            sun: 1.0,
            random: 1.0,
        }
    }

    /// Classic weighting, dominated by sun location
    pub const fn classic() -> Self {
        Self {
            temperature: CLASSIC_WEIGHT_TEMPERATURE,
            weather: CLASSIC_WEIGHT_WEATHER,
            sun: CLASSIC_WEIGHT_SUN,
            random: CLASSIC_WEIGHT_RANDOM,
        }
    }

    pub fn total(&self) -> f64 {
        self.temperature + self.weather + self.sun + self.random
    }

    /// Weights must be non-negative with a finite, positive sum
    pub fn validate(&self) -> SimResult<()> {
        let all = [self.temperature, self.weather, self.sun, self.random];
        let total = self.total();
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) || !total.is_finite() || total <= 0.0 {
            return Err(SimError::parameters(
                "weights",
                "weights must be finite, non-negative, and sum above zero",
            ));
        }
        Ok(())
    }

    /// Weighted mean of the four components, in declaration order
    pub fn mean(&self, temperature: f64, weather: f64, sun: f64, random: f64) -> f64 {
        (temperature * self.temperature
            + weather * self.weather
            + sun * self.sun
            + random * self.random)
            / self.total()
    }
}

/// Options selecting output scale and night behavior
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModeConfig {
    pub edition: Edition,

    /// Allow readings after sunset (capped below the daytime ceiling)
    pub night_mode: bool,

    #[serde(default)]
    pub weights: FeatureWeights,

    /// Add each condition's modifier to the average
    #[serde(default)]
    pub condition_modifiers: bool,
}

impl ModeConfig {
    pub fn new(edition: Edition) -> Self {
        Self {
            edition,
            ..Self::default()
        }
    }

    pub fn night_mode(mut self, enabled: bool) -> Self {
        self.night_mode = enabled;
        self
    }

    pub fn weights(mut self, weights: FeatureWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn condition_modifiers(mut self, enabled: bool) -> Self {
        self.condition_modifiers = enabled;
        self
    }

    pub fn scale_max(&self) -> u8 {
        self.edition.scale_max()
    }
}
