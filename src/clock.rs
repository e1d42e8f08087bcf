//! Wall-clock time and timestamp-based identifiers.
//!
//! Identifiers are the millisecond timestamp at creation. [`IdSource`] hands out strictly
//! increasing values, so two records created within the same millisecond still get
//! distinct ids.

use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(at.timestamp_millis()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

/// Mints timestamp identifiers, monotonic across calls.
pub struct IdSource {
    clock: Arc<dyn Clock>,
    last: AtomicI64,
}

impl IdSource {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicI64::new(0),
        }
    }

    pub fn next_millis(&self) -> i64 {
        let now = self.clock.now().timestamp_millis();
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }

    pub fn next_id(&self) -> String {
        self.next_millis().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_within_one_millisecond_stay_unique() {
        let start = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let clock = Arc::new(FixedClock::new(start));
        let ids = IdSource::new(clock.clone());

        assert_eq!(ids.next_id(), "1700000000000");
        assert_eq!(ids.next_id(), "1700000000001");

        clock.advance(Duration::seconds(1));
        assert_eq!(ids.next_id(), "1700000001000");
    }
}
