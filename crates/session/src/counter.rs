//! Counter that resets once its period has elapsed.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::timestamped::TimestampedValue;

/// Monotonic counter over a [`TimestampedValue`]; expires `period` after the last increment.
///
/// The period is policy injected by the caller (from configuration), not owned by the counter.
pub struct ExpiringCounter<'a> {
    value: TimestampedValue<'a, i64>,
    period: Duration,
}

impl<'a> ExpiringCounter<'a> {
    pub fn new(value: TimestampedValue<'a, i64>, period: Duration) -> Self {
        Self { value, period }
    }

    /// Stored count (0 when unset). Not reset by expiry; see [`Self::increment`].
    pub fn value(&self) -> i64 {
        self.value.value().unwrap_or(0)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Increments the counter and returns the new value (always >= 1).
    /// An expired counter restarts from 0 before incrementing.
    pub fn increment(&mut self) -> i64 {
        self.increment_at(Utc::now())
    }

    pub fn increment_at(&mut self, now: DateTime<Utc>) -> i64 {
        let current = if self.is_expired_at(now) {
            debug!(stored = self.value(), "message counter expired, restarting");
            0
        } else {
            self.value()
        };
        let next = current.max(0) + 1;
        self.value.set_value_at(next, now);
        next
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.value.timestamp() + self.period
    }

    /// Time left until expiry; zero when already expired.
    pub fn expires_after(&self) -> Duration {
        self.expires_after_at(Utc::now())
    }

    pub fn expires_after_at(&self, now: DateTime<Utc>) -> Duration {
        if self.is_expired_at(now) {
            return Duration::zero();
        }
        self.value.timestamp() + self.period - now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::{Namespace, Stamped};

    fn counter(ns: &mut Namespace) -> ExpiringCounter<'_> {
        ExpiringCounter::new(TimestampedValue::get(ns, "counter", 0), Duration::hours(1))
    }

    fn backdate(ns: &mut Namespace, by: Duration) {
        let value = ns.stamped("counter").map(|s| s.value.clone()).unwrap_or_default();
        ns.insert_stamped("counter", Stamped::at(value, Utc::now() - by));
    }

    #[test]
    fn test_increment() {
        let mut ns = Namespace::new();
        let mut c = counter(&mut ns);
        assert_eq!(c.value(), 0);
        assert_eq!(c.increment(), 1);
        assert_eq!(c.increment(), 2);
        assert_eq!(c.value(), 2);
    }

    #[test]
    fn test_is_expired() {
        let mut ns = Namespace::new();
        assert!(!counter(&mut ns).is_expired());
        backdate(&mut ns, Duration::hours(2));
        assert!(counter(&mut ns).is_expired());
    }

    #[test]
    fn test_expires_after() {
        let mut ns = Namespace::new();
        let left = counter(&mut ns).expires_after();
        assert!(left > Duration::minutes(59));
        assert!(left <= Duration::minutes(60));

        backdate(&mut ns, Duration::minutes(30));
        let left = counter(&mut ns).expires_after();
        assert!(left > Duration::minutes(29));
        assert!(left <= Duration::minutes(30));

        backdate(&mut ns, Duration::hours(2));
        let c = counter(&mut ns);
        assert_eq!(c.expires_after(), Duration::zero());
        assert!(c.is_expired());
    }

    #[test]
    fn test_increment_expired() {
        let mut ns = Namespace::new();
        {
            let mut c = counter(&mut ns);
            c.increment();
            c.increment();
            c.increment();
            assert_eq!(c.value(), 3);
        }
        backdate(&mut ns, Duration::hours(2));
        let mut c = counter(&mut ns);
        assert_eq!(c.increment(), 1);
        assert_eq!(c.value(), 1);
    }

    #[test]
    fn test_zero_period_expires_immediately() {
        let mut ns = Namespace::new();
        let mut c = ExpiringCounter::new(TimestampedValue::get(&mut ns, "counter", 0), Duration::zero());
        let now = Utc::now();
        c.increment_at(now);
        assert!(c.is_expired_at(now + Duration::milliseconds(1)));
        assert_eq!(c.expires_after_at(now + Duration::milliseconds(1)), Duration::zero());
    }
}
