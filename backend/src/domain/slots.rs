//! Fixed time-slot tables and the date arithmetic the scheduler relies on.
//!
//! Appointments are only ever placed on half-hour marks from one of two fixed
//! lists, and only ever on Monday to Friday. Everything here is pure.

use chrono::{Datelike, Duration, NaiveDate};
use shared::{Period, TimeSlot, Weekday};

/// Morning slots, 08:00 to 12:00
pub const MORNING_SLOTS: [TimeSlot; 9] = [
    TimeSlot::from_hm(8, 0),
    TimeSlot::from_hm(8, 30),
    TimeSlot::from_hm(9, 0),
    TimeSlot::from_hm(9, 30),
    TimeSlot::from_hm(10, 0),
    TimeSlot::from_hm(10, 30),
    TimeSlot::from_hm(11, 0),
    TimeSlot::from_hm(11, 30),
    TimeSlot::from_hm(12, 0),
];

/// Afternoon slots, 13:00 to 17:00
pub const AFTERNOON_SLOTS: [TimeSlot; 9] = [
    TimeSlot::from_hm(13, 0),
    TimeSlot::from_hm(13, 30),
    TimeSlot::from_hm(14, 0),
    TimeSlot::from_hm(14, 30),
    TimeSlot::from_hm(15, 0),
    TimeSlot::from_hm(15, 30),
    TimeSlot::from_hm(16, 0),
    TimeSlot::from_hm(16, 30),
    TimeSlot::from_hm(17, 0),
];

/// Slot table for a period
pub fn slots_for(period: Period) -> &'static [TimeSlot] {
    match period {
        Period::Morning => &MORNING_SLOTS,
        Period::Afternoon => &AFTERNOON_SLOTS,
    }
}

/// Every slot of the working day, morning first
pub fn all_slots() -> impl Iterator<Item = (Period, TimeSlot)> {
    MORNING_SLOTS
        .iter()
        .map(|slot| (Period::Morning, *slot))
        .chain(AFTERNOON_SLOTS.iter().map(|slot| (Period::Afternoon, *slot)))
}

/// Slots around `base` in `table`, at most `count` of them.
///
/// Starts with the base slot, then for each distance `i = 1, 2, ...` appends
/// the slot `i` positions later and prepends the slot `i` positions earlier,
/// skipping positions past either end of the table. A base slot that is not
/// in the table yields just the base slot.
pub fn slot_neighborhood(table: &[TimeSlot], base: TimeSlot, count: usize) -> Vec<TimeSlot> {
    let Some(base_index) = table.iter().position(|slot| *slot == base) else {
        return vec![base];
    };

    let mut slots = vec![base];
    let mut distance = 1;
    while distance < count && slots.len() < count {
        if let Some(later) = table.get(base_index + distance) {
            slots.push(*later);
        }
        if slots.len() < count && distance <= base_index {
            slots.insert(0, table[base_index - distance]);
        }
        distance += 1;
    }

    slots
}

/// Earliest year a scheduling date may fall in
pub const MIN_SCHEDULING_YEAR: i32 = 1900;

/// Latest year a scheduling date may fall in
pub const MAX_SCHEDULING_YEAR: i32 = 9999;

/// Whether `date` lies in the years the scheduler accepts from callers
pub fn within_scheduling_range(date: NaiveDate) -> bool {
    (MIN_SCHEDULING_YEAR..=MAX_SCHEDULING_YEAR).contains(&date.year())
}

/// First date on or after `start` that falls on `weekday`.
/// `None` when the result would overflow the calendar.
pub fn next_occurrence(start: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let current = start.weekday().num_days_from_monday() as i64;
    let target = weekday.index() as i64;
    let offset = (target - current + 7) % 7;
    start
        .checked_add_signed(Duration::days(offset))
        .and_then(normalize_weekend)
}

/// Push a Saturday to Monday (+2) and a Sunday to Monday (+1).
/// `None` when the result would overflow the calendar.
pub fn normalize_weekend(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        chrono::Weekday::Sat => date.checked_add_signed(Duration::days(2)),
        chrono::Weekday::Sun => date.checked_add_signed(Duration::days(1)),
        _ => Some(date),
    }
}

/// Weekday of a date that is already known to be Monday to Friday.
/// Saturday and Sunday report Monday, the day they normalize to.
pub fn working_weekday(date: NaiveDate) -> Weekday {
    Weekday::from_chrono(date.weekday()).unwrap_or(Weekday::Monday)
}

/// Monday of the week containing `date`. Sunday belongs to the week ending on it.
/// `None` when that Monday is before the first representable date.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(date.weekday().num_days_from_monday() as i64))
}
