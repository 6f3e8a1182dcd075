use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::state::PLACEHOLDER;

use super::calendar::{HostCalendar, HourCycle};
use super::countdown::CountdownInterval;

/// How one time field is shown on a surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimePresentation {
    /// No date known. Always rendered as `--`.
    Placeholder,
    /// Live countdown the host ticks on its own.
    Countdown(CountdownInterval),
    /// Static, locale-formatted time of day.
    Timestamp { text: String },
}

impl TimePresentation {
    pub fn is_countdown(&self) -> bool {
        matches!(self, TimePresentation::Countdown(_))
    }

    /// Text for this presentation at `now`.
    pub fn text(&self, now: DateTime<Utc>) -> String {
        match self {
            TimePresentation::Placeholder => PLACEHOLDER.to_string(),
            TimePresentation::Countdown(interval) => interval.render(now),
            TimePresentation::Timestamp { text } => text.clone(),
        }
    }
}

/// Countdown-or-timestamp decisions against the host calendar.
#[derive(Clone, Copy)]
pub struct PresentationPolicy<'a> {
    calendar: &'a dyn HostCalendar,
}

impl<'a> PresentationPolicy<'a> {
    pub fn new(calendar: &'a dyn HostCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &'a dyn HostCalendar {
        self.calendar
    }

    /// Whole hours from now until `target`, read off the local wall clock and
    /// truncated toward zero. Across a DST switch this follows the clock on
    /// the wall, not elapsed seconds.
    pub fn hours_until(&self, target: DateTime<Utc>) -> i64 {
        let now = self.calendar.local(self.calendar.now());
        let target = self.calendar.local(target);
        target.signed_duration_since(now).num_hours()
    }

    /// `true` iff `target` is fewer than `threshold_hours` calendar hours out.
    /// An absent target never counts down.
    pub fn should_show_countdown(
        &self,
        target: Option<DateTime<Utc>>,
        threshold_hours: i64,
    ) -> bool {
        match target {
            Some(target) => self.hours_until(target) < threshold_hours,
            None => false,
        }
    }

    /// Static form: `EEE ` when not today, then the time of day per hour cycle.
    pub fn format(&self, target: DateTime<Utc>, hour_cycle: HourCycle) -> String {
        let local = self.calendar.local(target);
        let mut text = String::new();

        if !self.calendar.is_same_day(self.calendar.now(), target) {
            text.push_str(&local.format("%a ").to_string());
        }

        match hour_cycle {
            HourCycle::H12 => text.push_str(&local.format("%-I:%M %p").to_string()),
            HourCycle::H11 => {
                let (is_pm, _) = local.hour12();
                let suffix = if is_pm { "PM" } else { "AM" };
                text.push_str(&format!("{}:{:02} {}", local.hour() % 12, local.minute(), suffix));
            }
            HourCycle::H23 | HourCycle::H24 => {
                text.push_str(&local.format("%-H:%M").to_string())
            }
        }

        text
    }

    /// [`format`](Self::format) with the host's hour cycle, or the placeholder.
    pub fn format_or_placeholder(&self, target: Option<DateTime<Utc>>) -> String {
        match target {
            Some(target) => self.format(target, self.calendar.hour_cycle()),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// Picks the presentation for one time field on one surface.
    pub fn present(
        &self,
        target: Option<DateTime<Utc>>,
        threshold_hours: i64,
    ) -> TimePresentation {
        let Some(target) = target else {
            return TimePresentation::Placeholder;
        };

        if self.should_show_countdown(Some(target), threshold_hours) {
            TimePresentation::Countdown(CountdownInterval::new(self.calendar.now(), target))
        } else {
            TimePresentation::Timestamp {
                text: self.format(target, self.calendar.hour_cycle()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::calendar::FixedCalendar;
    use chrono::{Duration, FixedOffset, TimeZone};

    // Monday 2026-05-04 10:00 UTC
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap()
    }

    #[test]
    fn countdown_below_threshold() {
        let calendar = FixedCalendar::utc(now());
        let policy = PresentationPolicy::new(&calendar);
        let target = now() + Duration::minutes(150);
        assert_eq!(policy.hours_until(target), 2);
        assert!(policy.should_show_countdown(Some(target), 3));
        assert!(!policy.should_show_countdown(Some(target), 2));
    }

    #[test]
    fn difference_equal_to_threshold_is_static() {
        let calendar = FixedCalendar::utc(now());
        let policy = PresentationPolicy::new(&calendar);
        assert!(!policy.should_show_countdown(Some(now() + Duration::hours(3)), 3));
        assert!(!policy.should_show_countdown(Some(now() + Duration::hours(1)), 1));
    }

    #[test]
    fn one_hour_eta_seen_a_moment_later_counts_down() {
        let created = now();
        let eta = created + Duration::seconds(3600);
        let calendar = FixedCalendar::utc(created + Duration::seconds(1));
        let policy = PresentationPolicy::new(&calendar);
        assert_eq!(policy.hours_until(eta), 0);
        assert!(policy.should_show_countdown(Some(eta), 3));
        assert!(policy.should_show_countdown(Some(eta), 1));
    }

    #[test]
    fn past_eta_counts_down() {
        let calendar = FixedCalendar::utc(now());
        let policy = PresentationPolicy::new(&calendar);
        assert!(policy.should_show_countdown(Some(now() - Duration::hours(5)), 1));
    }

    #[test]
    fn absent_target_never_counts_down() {
        let calendar = FixedCalendar::utc(now());
        let policy = PresentationPolicy::new(&calendar);
        assert!(!policy.should_show_countdown(None, 3));
        assert_eq!(policy.present(None, 3), TimePresentation::Placeholder);
        assert_eq!(policy.present(None, 3).text(now()), "--");
        assert_eq!(policy.format_or_placeholder(None), "--");
    }

    #[test]
    fn formats_today_per_hour_cycle() {
        let calendar = FixedCalendar::utc(now());
        let policy = PresentationPolicy::new(&calendar);
        let target = Utc.with_ymd_and_hms(2026, 5, 4, 15, 5, 0).unwrap();
        assert_eq!(policy.format(target, HourCycle::H12), "3:05 PM");
        assert_eq!(policy.format(target, HourCycle::H11), "3:05 PM");
        assert_eq!(policy.format(target, HourCycle::H23), "15:05");
        assert_eq!(policy.format(target, HourCycle::H24), "15:05");
    }

    #[test]
    fn noon_and_midnight_differ_between_h11_and_h12() {
        let calendar = FixedCalendar::utc(now());
        let policy = PresentationPolicy::new(&calendar);
        let noon = Utc.with_ymd_and_hms(2026, 5, 4, 12, 7, 0).unwrap();
        assert_eq!(policy.format(noon, HourCycle::H12), "12:07 PM");
        assert_eq!(policy.format(noon, HourCycle::H11), "0:07 PM");
        assert_eq!(policy.format(noon, HourCycle::H23), "12:07");
    }

    #[test]
    fn other_days_get_weekday_prefix() {
        let calendar = FixedCalendar::utc(now());
        let policy = PresentationPolicy::new(&calendar);
        let tomorrow = Utc.with_ymd_and_hms(2026, 5, 5, 0, 30, 0).unwrap();
        assert_eq!(policy.format(tomorrow, HourCycle::H23), "Tue 0:30");
        assert_eq!(policy.format(tomorrow, HourCycle::H12), "Tue 12:30 AM");
        assert_eq!(policy.format(tomorrow, HourCycle::H11), "Tue 0:30 AM");
    }

    #[test]
    fn day_boundary_follows_host_offset() {
        // 22:30 UTC is already Tuesday in UTC+2.
        let target = Utc.with_ymd_and_hms(2026, 5, 4, 22, 30, 0).unwrap();
        let utc = FixedCalendar::utc(now());
        let plus_two = FixedCalendar::new(now(), FixedOffset::east_opt(7200).unwrap(), HourCycle::H23);
        assert_eq!(PresentationPolicy::new(&utc).format(target, HourCycle::H23), "22:30");
        assert_eq!(
            PresentationPolicy::new(&plus_two).format(target, HourCycle::H23),
            "Tue 0:30"
        );
    }

    #[test]
    fn present_picks_mode_by_threshold() {
        let calendar = FixedCalendar::utc(now()).with_hour_cycle(HourCycle::H12);
        let policy = PresentationPolicy::new(&calendar);
        let target = now() + Duration::minutes(90);

        match policy.present(Some(target), 3) {
            TimePresentation::Countdown(interval) => {
                assert_eq!(interval.start, now());
                assert_eq!(interval.end, target);
                assert_eq!(interval.render(now()), "01:30:00");
            }
            other => panic!("expected countdown, got {:?}", other),
        }

        assert_eq!(
            policy.present(Some(target), 1),
            TimePresentation::Timestamp {
                text: "11:30 AM".to_string()
            }
        );
    }
}
