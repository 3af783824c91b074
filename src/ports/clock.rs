use chrono::{NaiveDate, NaiveDateTime};

/// Source of the local wall-clock time.
///
/// The scheduler's daily trigger and every "today" computation go through
/// this port so tests can pin the date and time.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
