//! Time management for meter hosts
//!
//! Provides a clock abstraction so sun position can be derived from:
//! - The local wall clock (normal play)
//! - A fixed instant (tests, replaying a past day)

use chrono::{Duration, Local, NaiveDateTime};

/// Local wall-clock time, the frame sunrise and sunset are entered in
pub type Timestamp = NaiveDateTime;

/// Source of time for the system
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> Timestamp;
}

/// System local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Local::now().naive_local()
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedClock {
    timestamp: Timestamp,
}

impl FixedClock {
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    pub fn advance(&mut self, by: Duration) {
        self.timestamp += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn fixed_clock_advances() {
        let start = NaiveDate::from_ymd_opt(2021, 6, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), start + Duration::minutes(5));
    }
}
