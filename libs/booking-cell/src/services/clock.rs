// libs/booking-cell/src/services/clock.rs
use chrono::{Local, NaiveDate};

/// Source of the current calendar date, read each time the calendar or a
/// chosen date is checked.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A date that never moves.
impl Clock for NaiveDate {
    fn today(&self) -> NaiveDate {
        *self
    }
}
