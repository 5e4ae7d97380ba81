//! Domain model for a committed appointment.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{Period, Specialty, TimeSlot, Weekday};
use uuid::Uuid;

use super::patient::Patient;
use super::schedule::Appointment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub specialist_id: u32,
    pub specialist_name: String,
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub specialty: Specialty,
    pub period: Period,
    pub created_at: DateTime<Utc>,
}

impl Binding {
    /// Generate a unique binding ID
    pub fn generate_id() -> String {
        format!("binding::{}", Uuid::new_v4())
    }

    /// Commit one proposed appointment for a patient under a fresh ID
    pub fn from_appointment(patient: &Patient, appointment: &Appointment, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Self::generate_id(),
            patient_id: patient.id.clone(),
            patient_name: patient.name.clone(),
            specialist_id: appointment.specialist.id,
            specialist_name: appointment.specialist.name.clone(),
            weekday: appointment.weekday,
            date: appointment.date,
            time: appointment.time,
            specialty: appointment.specialty,
            period: appointment.period,
            created_at,
        }
    }

    /// Key under which two bindings would double-book a specialist
    pub fn booking_key(&self) -> (u32, NaiveDate, TimeSlot) {
        (self.specialist_id, self.date, self.time)
    }
}
