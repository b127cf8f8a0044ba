use chrono::{Local, NaiveDate};

/// Source of "today" for date-range checks.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Current date in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
