// libs/booking-cell/src/services/slots.rs
use chrono::{Duration, NaiveTime};

use crate::models::{Shift, TimeSlot};

pub const SLOT_MINUTES: i64 = 30;

impl Shift {
    /// Start of the first slot and end of the last slot in this shift.
    pub fn bounds(&self) -> (NaiveTime, NaiveTime) {
        match self {
            Shift::Morning => (hm(9, 0), hm(12, 0)),
            Shift::Afternoon => (hm(14, 0), hm(17, 0)),
        }
    }

    pub fn slots(&self) -> Vec<TimeSlot> {
        let (start, end) = self.bounds();
        let mut slots = Vec::new();
        let mut cursor = start;
        while cursor + Duration::minutes(SLOT_MINUTES) <= end {
            slots.push(TimeSlot::new(cursor));
            cursor += Duration::minutes(SLOT_MINUTES);
        }
        slots
    }
}

impl TimeSlot {
    pub fn shift(&self) -> Shift {
        if self.start() < Shift::Afternoon.bounds().0 {
            Shift::Morning
        } else {
            Shift::Afternoon
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// The fixed slot list offered for any selectable day. Availability is only
/// checked by the server when the booking is submitted.
pub fn generate_time_slots() -> Vec<TimeSlot> {
    [Shift::Morning, Shift::Afternoon]
        .iter()
        .flat_map(Shift::slots)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_slots_across_two_shifts() {
        let labels: Vec<String> = generate_time_slots().iter().map(TimeSlot::label).collect();

        assert_eq!(labels, vec![
            "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM",
            "11:00 AM", "11:30 AM", "02:00 PM", "02:30 PM",
            "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
        ]);
    }

    #[test]
    fn test_slot_shift() {
        let slots = generate_time_slots();
        assert_eq!(slots[5].shift(), Shift::Morning);
        assert_eq!(slots[6].shift(), Shift::Afternoon);
    }
}
