//! Self-updating countdown bound to a start/end pair.
//!
//! The host ticks the display on its own timer; nothing here calls back into
//! the resolver. A new resolution produces a new interval, the old one is
//! dropped rather than edited.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CountdownInterval {
    /// An end before `start` collapses to an already finished interval.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        let remaining = self.end.signed_duration_since(now);
        if remaining < Duration::zero() {
            Duration::zero()
        } else {
            remaining
        }
    }

    pub fn is_finished(&self, now: DateTime<Utc>) -> bool {
        now >= self.end
    }

    /// `HH:MM:SS` while at least an hour remains, `MM:SS` after that.
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let total = self.remaining(now).num_seconds();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        if hours > 0 {
            format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{:02}:{:02}", minutes, seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn renders_hours_when_present() {
        let interval = CountdownInterval::new(t0(), t0() + Duration::seconds(2 * 3600 + 5 * 60 + 9));
        assert_eq!(interval.render(t0()), "02:05:09");
    }

    #[test]
    fn renders_minutes_under_an_hour() {
        let interval = CountdownInterval::new(t0(), t0() + Duration::seconds(3599));
        assert_eq!(interval.render(t0()), "59:59");
    }

    #[test]
    fn ticks_without_rebuilding() {
        let interval = CountdownInterval::new(t0(), t0() + Duration::seconds(90));
        assert_eq!(interval.render(t0()), "01:30");
        assert_eq!(interval.render(t0() + Duration::seconds(31)), "00:59");
        assert!(!interval.is_finished(t0() + Duration::seconds(89)));
        assert!(interval.is_finished(t0() + Duration::seconds(90)));
    }

    #[test]
    fn clamps_at_zero() {
        let interval = CountdownInterval::new(t0(), t0() + Duration::seconds(10));
        assert_eq!(interval.remaining(t0() + Duration::seconds(60)), Duration::zero());
        assert_eq!(interval.render(t0() + Duration::seconds(60)), "00:00");
    }

    #[test]
    fn end_before_start_is_finished() {
        let interval = CountdownInterval::new(t0(), t0() - Duration::seconds(100));
        assert_eq!(interval.end, interval.start);
        assert!(interval.is_finished(t0()));
    }
}
