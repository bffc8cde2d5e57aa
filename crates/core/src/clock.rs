// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable timestamps

use chrono::{DateTime, Utc};

/// A clock that provides the current wall-clock time in UTC
pub trait Clock: Clone + Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::Clock;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Fake clock for testing with controllable time
    #[derive(Clone)]
    pub struct FakeClock {
        current: Arc<Mutex<DateTime<Utc>>>,
    }

    impl FakeClock {
        /// Starts at 2026-01-01T00:00:00Z.
        pub fn new() -> Self {
            let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().unwrap_or_default();
            Self::at(start)
        }

        pub fn at(time: DateTime<Utc>) -> Self {
            Self { current: Arc::new(Mutex::new(time)) }
        }

        /// Advance the clock by the given duration
        pub fn advance(&self, duration: Duration) {
            *self.current.lock() += duration;
        }

        /// Set the clock to a specific time
        pub fn set(&self, time: DateTime<Utc>) {
            *self.current.lock() = time;
        }
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for FakeClock {
        fn now_utc(&self) -> DateTime<Utc> {
            *self.current.lock()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
