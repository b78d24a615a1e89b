use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// First bookable hour of the operating day.
pub const OPENING_HOUR: u32 = 7;
/// Hour at which the last slot of the operating day ends.
pub const CLOSING_HOUR: u32 = 21;
/// Width of a single scheduling window, in hours.
pub const SLOT_HOURS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    fn from_hours(start_hour: u32, end_hour: u32) -> Self {
        let start = NaiveTime::from_hms_opt(start_hour, 0, 0).expect("slot hour in range");
        let end = NaiveTime::from_hms_opt(end_hour, 0, 0).expect("slot hour in range");
        Self {
            id: format!("{:02}:00-{:02}:00", start_hour, end_hour),
            label: format!("{:02}:00 - {:02}:00", start_hour, end_hour),
            start,
            end,
        }
    }

    /// Anchors the slot to a calendar date, producing the wall-clock
    /// instants the overlap check and the reservation record use.
    pub fn bounds_on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (date.and_time(self.start), date.and_time(self.end))
    }
}

/// The fixed ordered partition of the operating day into hourly windows.
///
/// Pure function of the constants above; the sequence is built once and
/// reused on every call.
pub fn day_slots() -> &'static [TimeSlot] {
    static SLOTS: OnceLock<Vec<TimeSlot>> = OnceLock::new();
    SLOTS.get_or_init(|| {
        (OPENING_HOUR..CLOSING_HOUR)
            .step_by(SLOT_HOURS as usize)
            .map(|hour| TimeSlot::from_hours(hour, hour + SLOT_HOURS))
            .collect()
    })
}

/// Look up a slot of the operating day by its `"<start>-<end>"` id.
pub fn find_slot(id: &str) -> Option<&'static TimeSlot> {
    day_slots().iter().find(|slot| slot.id == id)
}
