//! Host calendar and locale: current time, local wall clock, hour cycle.

use std::env;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, Utc};
use serde::{Deserialize, Serialize};

/// How the active locale writes the time of day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, uniffi::Enum,
)]
#[serde(rename_all = "lowercase")]
pub enum HourCycle {
    /// 0-11 with AM/PM (`K:mm a`).
    H11,
    /// 1-12 with AM/PM (`h:mm a`).
    H12,
    /// 0-23 (`H:mm`).
    #[default]
    H23,
    /// 1-24, written like H23.
    H24,
}

// Regions whose default clock is 12-hour with AM/PM.
const TWELVE_HOUR_REGIONS: [&str; 12] = [
    "US", "CA", "AU", "NZ", "IN", "PH", "PK", "EG", "SA", "BD", "MY", "CO",
];

impl HourCycle {
    /// Best-effort hour cycle for a POSIX or BCP 47 locale tag
    /// (`en_US.UTF-8`, `de-DE`, `fr_CA`).
    pub fn for_locale(tag: &str) -> Self {
        let tag = tag.split(['.', '@']).next().unwrap_or_default();
        let region = tag
            .split(['_', '-'])
            .nth(1)
            .map(|r| r.to_ascii_uppercase())
            .unwrap_or_default();

        // fr_CA writes 24-hour times even though en_CA does not.
        if tag.starts_with("fr") {
            return HourCycle::H23;
        }
        if TWELVE_HOUR_REGIONS.contains(&region.as_str()) {
            HourCycle::H12
        } else {
            HourCycle::H23
        }
    }
}

/// Host calendar collaborator. Every "now" and every day boundary comes from
/// here, so policies stay deterministic under test.
pub trait HostCalendar: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Wall-clock reading of `at` in the host's time zone.
    fn local(&self, at: DateTime<Utc>) -> NaiveDateTime;

    fn hour_cycle(&self) -> HourCycle;

    fn is_same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.local(a).date() == self.local(b).date()
    }
}

/// The machine's clock and time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemCalendar {
    hour_cycle: HourCycle,
}

impl SystemCalendar {
    pub fn new(hour_cycle: HourCycle) -> Self {
        Self { hour_cycle }
    }

    /// Reads the hour cycle from `LC_ALL`, `LC_TIME` or `LANG`, in that order.
    pub fn detect() -> Self {
        let tag = ["LC_ALL", "LC_TIME", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty() && value != "C" && value != "POSIX");
        let hour_cycle = tag
            .map(|t| HourCycle::for_locale(&t))
            .unwrap_or_default();
        Self { hour_cycle }
    }
}

impl HostCalendar for SystemCalendar {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&Local).naive_local()
    }

    fn hour_cycle(&self) -> HourCycle {
        self.hour_cycle
    }
}

/// A frozen clock at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedCalendar {
    now: DateTime<Utc>,
    offset: FixedOffset,
    hour_cycle: HourCycle,
}

impl FixedCalendar {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset, hour_cycle: HourCycle) -> Self {
        Self {
            now,
            offset,
            hour_cycle,
        }
    }

    /// UTC wall clock, 24-hour times.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix(), HourCycle::H23)
    }

    pub fn at(self, now: DateTime<Utc>) -> Self {
        Self { now, ..self }
    }

    pub fn with_hour_cycle(self, hour_cycle: HourCycle) -> Self {
        Self { hour_cycle, ..self }
    }
}

impl HostCalendar for FixedCalendar {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&self.offset).naive_local()
    }

    fn hour_cycle(&self) -> HourCycle {
        self.hour_cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn locale_tags_map_to_hour_cycles() {
        assert_eq!(HourCycle::for_locale("en_US.UTF-8"), HourCycle::H12);
        assert_eq!(HourCycle::for_locale("en-AU"), HourCycle::H12);
        assert_eq!(HourCycle::for_locale("de_DE.UTF-8"), HourCycle::H23);
        assert_eq!(HourCycle::for_locale("en_GB"), HourCycle::H23);
        assert_eq!(HourCycle::for_locale("fr_CA"), HourCycle::H23);
        assert_eq!(HourCycle::for_locale("en"), HourCycle::H23);
    }

    #[test]
    fn fixed_calendar_applies_offset() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 0).unwrap();
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let calendar = FixedCalendar::new(now, tz, HourCycle::H23);
        let local = calendar.local(now);
        assert_eq!(local.to_string(), "2026-03-02 01:30:00");
    }

    #[test]
    fn same_day_uses_local_dates() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 3, 1, 23, 0, 0).unwrap();

        let utc = FixedCalendar::utc(now);
        assert!(utc.is_same_day(now, later));

        let berlin = FixedCalendar::new(now, FixedOffset::east_opt(3600 * 2).unwrap(), HourCycle::H23);
        assert!(!berlin.is_same_day(now, later));
    }
}
