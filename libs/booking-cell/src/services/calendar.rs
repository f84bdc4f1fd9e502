// libs/booking-cell/src/services/calendar.rs
use chrono::{Datelike, Months, NaiveDate};
use std::fmt;

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day { date: NaiveDate, enabled: bool },
}

/// Month view used to pick the appointment day. Navigation never goes
/// before the month containing `today`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    anchor: NaiveDate,
    today: NaiveDate,
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl CalendarView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            anchor: first_of_month(today),
            today,
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Moves `today` forward to a newer date, pulling the view up to the new
    /// current month if it was left behind.
    pub fn refresh(&mut self, today: NaiveDate) {
        if today <= self.today {
            return;
        }
        self.today = today;
        self.anchor = self.anchor.max(first_of_month(today));
    }

    pub fn is_current_month(&self) -> bool {
        self.anchor == first_of_month(self.today)
    }

    /// Moves back one month. Returns false and stays put when already on the
    /// current month.
    pub fn previous_month(&mut self) -> bool {
        if self.is_current_month() {
            return false;
        }
        match self.anchor.checked_sub_months(Months::new(1)) {
            Some(previous) => {
                self.anchor = previous;
                true
            }
            None => false,
        }
    }

    pub fn next_month(&mut self) {
        if let Some(next) = self.anchor.checked_add_months(Months::new(1)) {
            self.anchor = next;
        }
    }

    /// Days strictly before today cannot be picked.
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        date >= self.today
    }

    pub fn title(&self) -> String {
        self.anchor.format("%B %Y").to_string()
    }

    fn days_in_month(&self) -> u32 {
        self.anchor
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(28)
    }

    /// Grid cells for the anchor month: leading blanks up to the first
    /// weekday (Sunday first), then one cell per day.
    pub fn cells(&self) -> Vec<CalendarCell> {
        let leading = self.anchor.weekday().num_days_from_sunday() as usize;
        let mut cells = vec![CalendarCell::Blank; leading];

        cells.extend(
            (1..=self.days_in_month())
                .filter_map(|day| self.anchor.with_day(day))
                .map(|date| CalendarCell::Day { date, enabled: self.is_selectable(date) }),
        );

        cells
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:^28}", self.title())?;
        for name in DAY_NAMES {
            write!(f, "{:>4}", name)?;
        }
        writeln!(f)?;

        for (index, cell) in self.cells().iter().enumerate() {
            match cell {
                CalendarCell::Blank => write!(f, "    ")?,
                CalendarCell::Day { date, enabled: true } => write!(f, "{:>4}", date.day())?,
                CalendarCell::Day { enabled: false, .. } => write!(f, "{:>4}", "--")?,
            }
            if index % 7 == 6 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_previous_month_is_blocked_on_current_month() {
        let mut calendar = CalendarView::new(date(2026, 10, 18));

        assert!(!calendar.previous_month());
        assert_eq!(calendar.anchor(), date(2026, 10, 1));
    }

    #[test]
    fn test_navigation_round_trip() {
        let mut calendar = CalendarView::new(date(2026, 12, 5));

        calendar.next_month();
        assert_eq!(calendar.title(), "January 2027");
        assert!(calendar.previous_month());
        assert_eq!(calendar.title(), "December 2026");
        assert!(!calendar.previous_month());
    }

    #[test]
    fn test_same_month_next_year_is_not_current() {
        let mut calendar = CalendarView::new(date(2026, 10, 18));
        for _ in 0..12 {
            calendar.next_month();
        }
        assert_eq!(calendar.anchor(), date(2027, 10, 1));
        assert!(calendar.previous_month());
    }

    #[test]
    fn test_days_before_today_are_disabled() {
        let calendar = CalendarView::new(date(2026, 10, 18));
        let cells = calendar.cells();

        // October 2026 starts on a Thursday.
        assert_eq!(cells.iter().take_while(|c| **c == CalendarCell::Blank).count(), 4);
        assert_eq!(cells.len(), 4 + 31);
        assert!(cells.contains(&CalendarCell::Day { date: date(2026, 10, 17), enabled: false }));
        assert!(cells.contains(&CalendarCell::Day { date: date(2026, 10, 18), enabled: true }));
        assert!(cells.contains(&CalendarCell::Day { date: date(2026, 10, 31), enabled: true }));
    }

    #[test]
    fn test_refresh_disables_the_previous_day() {
        let mut calendar = CalendarView::new(date(2026, 10, 31));
        assert!(calendar.is_selectable(date(2026, 10, 31)));

        calendar.refresh(date(2026, 11, 1));

        assert!(!calendar.is_selectable(date(2026, 10, 31)));
        assert_eq!(calendar.title(), "November 2026");
        assert!(!calendar.previous_month());
    }

    #[test]
    fn test_refresh_keeps_a_later_month_in_view() {
        let mut calendar = CalendarView::new(date(2026, 10, 18));
        calendar.next_month();
        calendar.next_month();

        calendar.refresh(date(2026, 10, 19));

        assert_eq!(calendar.title(), "December 2026");
        assert_eq!(calendar.today(), date(2026, 10, 19));
    }

    #[test]
    fn test_leap_february() {
        let mut calendar = CalendarView::new(date(2028, 1, 10));
        calendar.next_month();
        let days = calendar.cells().iter().filter(|c| matches!(c, CalendarCell::Day { .. })).count();
        assert_eq!(days, 29);
    }
}
