//! Ephemeral schedule proposals produced by the generator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{Period, Specialty, TimeSlot, Weekday};

use super::specialist::Specialist;

/// One proposed appointment inside a schedule option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub specialist: Specialist,
    pub specialty: Specialty,
    pub period: Period,
}

impl Appointment {
    /// Composite ordering key used to sort an option
    pub fn sort_key(&self) -> (NaiveDate, TimeSlot) {
        (self.date, self.time)
    }
}

/// A candidate slate of appointments. Held only until confirmed or dismissed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleOption {
    pub appointments: Vec<Appointment>,
}

impl ScheduleOption {
    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }
}
