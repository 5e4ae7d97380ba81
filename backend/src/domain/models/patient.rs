//! Domain model for a patient awaiting or receiving care.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{PeriodPreference, Specialty, Weekday};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    /// Required specialties in intake order, never empty
    pub specialties: Vec<Specialty>,
    pub notes: String,
    pub start_date: NaiveDate,
    pub period_preference: PeriodPreference,
    /// Empty means every weekday is eligible
    pub preferred_weekdays: Vec<Weekday>,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    /// Generate a unique patient ID
    pub fn generate_id() -> String {
        format!("patient::{}", Uuid::new_v4())
    }

    /// Weekdays the generator may pick from, in Monday-to-Friday order when
    /// the patient expressed no preference
    pub fn candidate_weekdays(&self) -> Vec<Weekday> {
        if self.preferred_weekdays.is_empty() {
            Weekday::ALL.to_vec()
        } else {
            self.preferred_weekdays.clone()
        }
    }
}
