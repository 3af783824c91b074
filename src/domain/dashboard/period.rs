use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::foundation::ValidationError;

/// Largest dashboard window accepted, in days.
pub const MAX_DASHBOARD_DAYS: u32 = 365;

/// Inclusive date window `[today - (days - 1), today]` a dashboard covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u32,
}

impl DashboardPeriod {
    /// Creates the window of `days` days ending on `today`.
    pub fn ending_on(today: NaiveDate, days: u32) -> Result<Self, ValidationError> {
        if days == 0 || days > MAX_DASHBOARD_DAYS {
            return Err(ValidationError::out_of_range(
                "days",
                1,
                i64::from(MAX_DASHBOARD_DAYS),
                i64::from(days),
            ));
        }
        Ok(Self {
            start_date: today - Duration::days(i64::from(days) - 1),
            end_date: today,
            days,
        })
    }

    /// Returns true if the date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// The trailing seven days of the window (or the whole window if shorter).
    pub fn trailing_week(&self) -> (NaiveDate, NaiveDate) {
        let week_start = self.end_date - Duration::days(6);
        (week_start.max(self.start_date), self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_is_inclusive_of_today() {
        let period = DashboardPeriod::ending_on(day(2024, 3, 30), 30).unwrap();
        assert_eq!(period.start_date, day(2024, 3, 1));
        assert_eq!(period.end_date, day(2024, 3, 30));
        assert!(period.contains(day(2024, 3, 1)));
        assert!(!period.contains(day(2024, 2, 29)));
    }

    #[test]
    fn single_day_window() {
        let period = DashboardPeriod::ending_on(day(2024, 1, 1), 1).unwrap();
        assert_eq!(period.start_date, period.end_date);
    }

    #[test]
    fn rejects_zero_and_oversized_windows() {
        assert!(DashboardPeriod::ending_on(day(2024, 1, 1), 0).is_err());
        assert!(DashboardPeriod::ending_on(day(2024, 1, 1), 366).is_err());
    }

    #[test]
    fn trailing_week_is_clipped_to_window() {
        let period = DashboardPeriod::ending_on(day(2024, 1, 10), 3).unwrap();
        assert_eq!(period.trailing_week(), (day(2024, 1, 8), day(2024, 1, 10)));

        let period = DashboardPeriod::ending_on(day(2024, 1, 10), 30).unwrap();
        assert_eq!(period.trailing_week(), (day(2024, 1, 4), day(2024, 1, 10)));
    }

    #[test]
    fn serializes_dates_as_iso() {
        let period = DashboardPeriod::ending_on(day(2024, 1, 10), 7).unwrap();
        let json = serde_json::to_value(period).unwrap();
        assert_eq!(json["start_date"], "2024-01-04");
        assert_eq!(json["end_date"], "2024-01-10");
        assert_eq!(json["days"], 7);
    }
}
