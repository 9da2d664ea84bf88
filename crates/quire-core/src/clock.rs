//! Per-process monotonic timestamps for log entries.
//!
//! Wall-clock readings can repeat (coarse clocks, truncation to the stored
//! microsecond precision) or step backwards. Entries recorded by one process
//! must still carry strictly increasing timestamps, so the clock remembers the
//! last instant it handed out and bumps by one microsecond when needed.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

/// Strictly increasing UTC clock with microsecond resolution.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }

    /// Current instant, truncated to microseconds, later than any previous reading.
    pub fn now(&self) -> DateTime<Utc> {
        self.next_after(Utc::now())
    }

    fn next_after(&self, reading: DateTime<Utc>) -> DateTime<Utc> {
        let reading = reading.trunc_subsecs(6);
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let next = match *last {
            Some(previous) if reading <= previous => previous + TimeDelta::microseconds(1),
            _ => reading,
        };
        *last = Some(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_strictly_increase() {
        let clock = MonotonicClock::new();
        let mut previous = clock.now();
        for _ in 0..1_000 {
            let current = clock.now();
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn backwards_step_is_absorbed() {
        let clock = MonotonicClock::new();
        let first = clock.next_after(Utc::now());
        let earlier = first - TimeDelta::seconds(5);
        let second = clock.next_after(earlier);
        assert_eq!(second, first + TimeDelta::microseconds(1));
    }

    #[test]
    fn readings_have_microsecond_precision() {
        let clock = MonotonicClock::new();
        let now = clock.now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000, 0);
    }
}
