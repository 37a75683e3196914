//! Shared fixtures and proptest strategies for integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;

use boktaisim_core::{
    Condition, ConditionParameters, ConditionTable, Edition, ModeConfig, SunPosition, Timestamp,
    WeatherSnapshot,
};
use chrono::NaiveDate;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const SEED: u64 = 0x5014_B0D7;

pub fn seeded() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(SEED)
}

/// Midsummer day used by time-driven scenarios
pub fn at(hour: u32, minute: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2021, 6, 20)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Single-entry table: Clear with random `{min 6, avg 8, max 10}`
pub fn bright_clear_table() -> ConditionTable {
    let mut entries = BTreeMap::new();
    entries.insert(Condition::Clear, ConditionParameters::classic(6.0, 8.0, 10.0, 0.0));
    ConditionTable::new(entries).unwrap()
}

// ===== Strategies =====

pub fn any_edition() -> impl Strategy<Value = Edition> {
    prop_oneof![
        Just(Edition::Boktai1),
        Just(Edition::Boktai2),
        Just(Edition::Boktai3),
    ]
}

pub fn any_condition() -> impl Strategy<Value = Condition> {
    proptest::sample::select(Condition::ALL.to_vec())
}

pub fn any_sun_position() -> impl Strategy<Value = SunPosition> {
    prop_oneof![
        4 => (0.0f64..=1.0).prop_map(SunPosition::Daylight),
        1 => Just(SunPosition::Night),
    ]
}

/// Valid snapshot; the current temperature may fall outside `[low, high]`
pub fn any_snapshot() -> impl Strategy<Value = WeatherSnapshot> {
    (-40.0f64..50.0, 0.0f64..40.0, -60.0f64..100.0, any_condition(), any_sun_position()).prop_map(
        |(low, spread, current, condition, sun)| {
            WeatherSnapshot::new(current, low, low + spread, condition, sun)
        },
    )
}

pub fn any_mode() -> impl Strategy<Value = ModeConfig> {
    (any_edition(), any::<bool>(), any::<bool>()).prop_map(|(edition, night, modifiers)| {
        ModeConfig::new(edition)
            .night_mode(night)
            .condition_modifiers(modifiers)
    })
}
