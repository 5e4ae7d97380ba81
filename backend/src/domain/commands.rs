//! Domain-level command and result types.
//!
//! Services take and return these. The REST layer maps the public DTOs of the
//! `shared` crate onto them.

pub mod specialists {
    use crate::domain::models::specialist::Specialist;
    use shared::Specialty;

    /// Input for adding one specialist to the roster.
    #[derive(Debug, Clone)]
    pub struct CreateSpecialistCommand {
        pub name: String,
        pub specialty: Specialty,
        pub available: bool,
    }

    /// Input for toggling a specialist's availability.
    #[derive(Debug, Clone)]
    pub struct SetAvailabilityCommand {
        pub specialist_id: u32,
        pub available: bool,
    }

    /// Accepted source formats for a bulk import.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum ImportFormat {
        Csv,
        Json,
    }

    /// Input for a bulk roster import.
    #[derive(Debug, Clone)]
    pub struct ImportSpecialistsCommand {
        pub format: ImportFormat,
        pub content: String,
    }

    /// Outcome of a bulk roster import.
    #[derive(Debug, Clone, Default)]
    pub struct ImportSummary {
        pub imported: Vec<Specialist>,
        pub skipped_missing_fields: u32,
        pub skipped_duplicates: u32,
    }
}

pub mod patients {
    use shared::{PeriodPreference, Specialty, Weekday};

    /// Input for patient intake. The start date is still raw text here.
    #[derive(Debug, Clone)]
    pub struct CreatePatientCommand {
        pub name: String,
        pub specialties: Vec<Specialty>,
        pub notes: String,
        pub start_date: String,
        pub period_preference: PeriodPreference,
        pub preferred_weekdays: Vec<Weekday>,
    }
}

pub mod schedule {
    use crate::domain::models::binding::Binding;
    use crate::domain::models::patient::Patient;
    use crate::domain::models::schedule::ScheduleOption;

    #[derive(Debug, Clone)]
    pub struct GenerateOptionsCommand {
        pub patient_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct GenerateOptionsResult {
        pub patient: Patient,
        pub options: Vec<ScheduleOption>,
    }

    #[derive(Debug, Clone)]
    pub struct ConfirmOptionCommand {
        pub patient_id: String,
        pub option_index: usize,
    }

    #[derive(Debug, Clone)]
    pub struct ConfirmOptionResult {
        pub bindings: Vec<Binding>,
        pub success_message: String,
    }

    /// Live bindings sharing one (specialist, date, time)
    #[derive(Debug, Clone, PartialEq)]
    pub struct BindingConflict {
        pub specialist_id: u32,
        pub date: chrono::NaiveDate,
        pub time: shared::TimeSlot,
        pub binding_ids: Vec<String>,
    }
}
