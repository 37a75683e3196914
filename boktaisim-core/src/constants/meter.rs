//! Meter Scales and Averaging Parameters
//!
//! Every component is computed on a shared base scale and only rescaled to
//! the edition's meter at the end, so condition tables stay edition-agnostic.

// ===== SCALES =====

/// Base scale every component is computed on before edition rescaling.
///
/// Matches the ten-segment gauge of Boktai 2 and 3. Condition tables are
/// expressed on this scale.
pub const BASE_SCALE_MAX: f64 = 10.0;

/// Meter maximum for Boktai 1 (eight segments).
pub const BOKTAI_1_SCALE_MAX: u8 = 8;

/// Meter maximum for Boktai 2 and 3 (ten segments).
pub const BOKTAI_2_SCALE_MAX: u8 = 10;

// ===== NIGHT MODE =====

/// Fraction of the meter reachable while night mode is active.
///
/// Applied to both the night sun draw and the final averaged value, so a
/// night reading never exceeds half of the daytime ceiling.
pub const NIGHT_CAP_FRACTION: f64 = 0.5;

/// Beta shape parameters for the night sun draw.
///
/// Mean 2/7 of the capped range: moonlight is dim but not dead.
pub const NIGHT_SUN_ALPHA: f64 = 2.0;
pub const NIGHT_SUN_BETA: f64 = 5.0;

// ===== FEATURE WEIGHTS =====

/// Classic weighting: temperature, weather, sun location, random.
/// Sun location dominates.
pub const CLASSIC_WEIGHT_TEMPERATURE: f64 = 10.0;
pub const CLASSIC_WEIGHT_WEATHER: f64 = 20.0;
pub const CLASSIC_WEIGHT_SUN: f64 = 40.0;
pub const CLASSIC_WEIGHT_RANDOM: f64 = 25.0;

// ===== PRECISION =====

/// Decimal places kept when a manual provider draws the current temperature.
pub const TEMPERATURE_DECIMALS: i32 = 2;
