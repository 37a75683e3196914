//! Text Rendering of the Sunlight Meter
//!
//! The cartridges draw the gauge as a row of sun segments. In a terminal we
//! draw one cell per segment:
//!
//! ```text
//! Boktai 2  [######....]  6/10  (At Apex)
//! ```

use std::fmt::Write;

use boktaisim_core::{MeterReading, ReadingHistogram, SunPhase, TemperatureScale, WeatherSnapshot};

const FILLED: char = '#';
const EMPTY: char = '.';

/// Widest histogram bar, in characters
const HISTOGRAM_WIDTH: usize = 40;

/// Segmented bar: `value` filled cells out of `scale_max`
pub fn bar(value: u8, scale_max: u8) -> String {
    let filled = usize::from(value.min(scale_max));
    let empty = usize::from(scale_max) - filled;
    let mut out = String::with_capacity(usize::from(scale_max) + 2);
    out.push('[');
    out.extend(std::iter::repeat(FILLED).take(filled));
    out.extend(std::iter::repeat(EMPTY).take(empty));
    out.push(']');
    out
}

/// One-line gauge with edition, bar, value and sun phase
pub fn meter_line(reading: &MeterReading, phase: SunPhase) -> String {
    format!(
        "{}  {}  {}/{}  ({})",
        reading.edition,
        bar(reading.value, reading.scale_max()),
        reading.value,
        reading.scale_max(),
        phase,
    )
}

/// Gauge followed by the weather inputs and each component
pub fn detailed(reading: &MeterReading, snapshot: &WeatherSnapshot, unit: TemperatureScale) -> String {
    let mut out = meter_line(reading, snapshot.sun_position.phase());
    out.push('\n');

    let _ = writeln!(
        out,
        "  weather     {} at {:.1}{} (low {:.1}, high {:.1})",
        snapshot.condition,
        snapshot.temperature_current,
        unit.symbol(),
        snapshot.temperature_low,
        snapshot.temperature_high,
    );
    for (name, value) in reading.components() {
        let _ = writeln!(out, "  {name:<11} {value:>5.2}");
    }
    let _ = write!(out, "  {:<11} {:>5.2}", "average", reading.average);
    if reading.night {
        out.push_str("\n  sun is down");
    }
    out
}

/// Horizontal histogram, one row per meter value
pub fn histogram(histogram: &ReadingHistogram) -> String {
    let peak = histogram.counts().iter().copied().max().unwrap_or(0);
    let total = histogram.total();
    let mut out = String::new();

    for (value, count) in histogram.counts().iter().enumerate() {
        let width = if peak == 0 {
            0
        } else {
            (*count as usize * HISTOGRAM_WIDTH).div_ceil(peak as usize)
        };
        let share = if total == 0 {
            0.0
        } else {
            f64::from(*count) * 100.0 / f64::from(total)
        };
        let _ = writeln!(
            out,
            "{value:>3} | {:<HISTOGRAM_WIDTH$} {count:>6} ({share:>5.1}%)",
            FILLED.to_string().repeat(width),
        );
    }

    if let Some(mean) = histogram.mean() {
        let _ = write!(out, "mean {mean:.2} over {total} samples");
    }
    out
}
