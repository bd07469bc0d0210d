//! Resolving the `day_query` slot into a weekday name.

use chrono::{Days, Local, NaiveDate};

/// Source of "today" for day resolution.
pub trait Clock: Send + Sync {
    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// The day a schedule request asks about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DayQuery {
    #[default]
    Today,
    Tomorrow,
    /// Anything else, kept verbatim. Not validated against real weekday names.
    Named(String),
}

impl DayQuery {
    /// Interprets a raw slot value. Matching of the keywords is exact.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "today" => Self::Today,
            "tomorrow" => Self::Tomorrow,
            other => Self::Named(other.to_string()),
        }
    }

    /// Returns the slot value to carry forward in a context.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Named(day) => day,
        }
    }

    /// Resolves to a lowercase weekday name relative to `today`.
    #[must_use]
    pub fn resolve(&self, today: NaiveDate) -> String {
        match self {
            Self::Today => weekday_name(today),
            Self::Tomorrow => {
                let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
                weekday_name(tomorrow)
            }
            Self::Named(day) => day.to_lowercase(),
        }
    }
}

fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string().to_lowercase()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A clock pinned to one date.
    pub(crate) struct FixedClock(pub NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn today_is_current_weekday() {
        // 2026-10-19 is a Monday.
        assert_eq!(DayQuery::Today.resolve(date(2026, 10, 19)), "monday");
    }

    #[test]
    fn tomorrow_crosses_week_boundary() {
        // 2026-10-25 is a Sunday.
        assert_eq!(DayQuery::Tomorrow.resolve(date(2026, 10, 25)), "monday");
        assert_eq!(DayQuery::Tomorrow.resolve(date(2026, 12, 31)), "friday");
    }

    #[test]
    fn named_days_are_only_lowercased() {
        let today = date(2026, 10, 19);
        assert_eq!(DayQuery::parse("Monday").resolve(today), "monday");
        assert_eq!(DayQuery::parse("FRIDAY").resolve(today), "friday");
        assert_eq!(DayQuery::parse("Someday").resolve(today), "someday");
    }

    #[test]
    fn keywords_match_exactly() {
        assert_eq!(DayQuery::parse("today"), DayQuery::Today);
        assert_eq!(DayQuery::parse("tomorrow"), DayQuery::Tomorrow);
        assert_eq!(DayQuery::parse("Today"), DayQuery::Named("Today".to_string()));
        assert_eq!(DayQuery::parse("Today").resolve(date(2026, 10, 19)), "today");
    }

    #[test]
    fn system_clock_agrees_with_resolution() {
        let today = SystemClock.today();
        assert_eq!(DayQuery::Today.resolve(today), weekday_name(today));
    }
}
