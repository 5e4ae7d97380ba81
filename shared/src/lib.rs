use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Medical or therapeutic discipline offered by the organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Specialty {
    Neurology,
    Physiotherapy,
    SpeechTherapy,
    Psychology,
    OccupationalTherapy,
    Pediatrics,
    Psychiatry,
}

impl Specialty {
    /// Every specialty, in the order intake forms list them
    pub const ALL: [Specialty; 7] = [
        Specialty::Neurology,
        Specialty::Physiotherapy,
        Specialty::SpeechTherapy,
        Specialty::Psychology,
        Specialty::OccupationalTherapy,
        Specialty::Pediatrics,
        Specialty::Psychiatry,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Specialty::Neurology => "Neurology",
            Specialty::Physiotherapy => "Physiotherapy",
            Specialty::SpeechTherapy => "Speech Therapy",
            Specialty::Psychology => "Psychology",
            Specialty::OccupationalTherapy => "Occupational Therapy",
            Specialty::Pediatrics => "Pediatrics",
            Specialty::Psychiatry => "Psychiatry",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Specialty {
    type Err = ParseValueError;

    /// Accepts English names (any case, spaces and underscores ignored) and the
    /// Portuguese labels used on the clinic's intake sheets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "neurology" | "neurologia" => Ok(Specialty::Neurology),
            "physiotherapy" | "fisioterapia" => Ok(Specialty::Physiotherapy),
            "speechtherapy" | "fonoaudiologia" => Ok(Specialty::SpeechTherapy),
            "psychology" | "psicologia" => Ok(Specialty::Psychology),
            "occupationaltherapy" | "terapiaocupacional" => Ok(Specialty::OccupationalTherapy),
            "pediatrics" | "pediatria" => Ok(Specialty::Pediatrics),
            "psychiatry" | "psiquiatria" => Ok(Specialty::Psychiatry),
            _ => Err(ParseValueError::new("specialty", s)),
        }
    }
}

/// Working day of the week. Weekends are never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// Days since Monday (Monday = 0, ..., Friday = 4)
    pub fn index(&self) -> u32 {
        self.to_chrono().num_days_from_monday()
    }

    pub fn to_chrono(&self) -> chrono::Weekday {
        match self {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
        }
    }

    /// Returns `None` for Saturday and Sunday
    pub fn from_chrono(day: chrono::Weekday) -> Option<Self> {
        match day {
            chrono::Weekday::Mon => Some(Weekday::Monday),
            chrono::Weekday::Tue => Some(Weekday::Tuesday),
            chrono::Weekday::Wed => Some(Weekday::Wednesday),
            chrono::Weekday::Thu => Some(Weekday::Thursday),
            chrono::Weekday::Fri => Some(Weekday::Friday),
            chrono::Weekday::Sat | chrono::Weekday::Sun => None,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" | "segunda" => Ok(Weekday::Monday),
            "tuesday" | "tue" | "terça" | "terca" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" | "quarta" => Ok(Weekday::Wednesday),
            "thursday" | "thu" | "quinta" => Ok(Weekday::Thursday),
            "friday" | "fri" | "sexta" => Ok(Weekday::Friday),
            _ => Err(ParseValueError::new("weekday", s)),
        }
    }
}

/// Half of the working day an appointment falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Morning,
    Afternoon,
}

impl Period {
    pub fn name(&self) -> &'static str {
        match self {
            Period::Morning => "Morning",
            Period::Afternoon => "Afternoon",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Period {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" | "manha" | "manhã" => Ok(Period::Morning),
            "afternoon" | "tarde" => Ok(Period::Afternoon),
            _ => Err(ParseValueError::new("period", s)),
        }
    }
}

/// A patient's preferred part of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodPreference {
    Morning,
    Afternoon,
    Flexible,
}

impl PeriodPreference {
    pub fn name(&self) -> &'static str {
        match self {
            PeriodPreference::Morning => "Morning",
            PeriodPreference::Afternoon => "Afternoon",
            PeriodPreference::Flexible => "Flexible",
        }
    }
}

impl Default for PeriodPreference {
    fn default() -> Self {
        PeriodPreference::Flexible
    }
}

impl fmt::Display for PeriodPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PeriodPreference {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" | "manha" | "manhã" => Ok(PeriodPreference::Morning),
            "afternoon" | "tarde" => Ok(PeriodPreference::Afternoon),
            "flexible" | "flexivel" | "flexível" => Ok(PeriodPreference::Flexible),
            _ => Err(ParseValueError::new("period preference", s)),
        }
    }
}

/// Half-hour wall-clock mark, serialized as "HH:MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    hour: u8,
    minute: u8,
}

impl TimeSlot {
    /// Build a slot from literal hour and minute values.
    /// Parse untrusted input with `FromStr` instead.
    pub const fn from_hm(hour: u8, minute: u8) -> Self {
        assert!(hour < 24 && minute < 60, "invalid time slot");
        TimeSlot { hour, minute }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeSlot {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|_| ParseValueError::new("time slot", s))?;
        // hour() < 24 and minute() < 60, so both fit in u8
        Ok(TimeSlot {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        })
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = ParseValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

/// Error returned when a text value does not name a known enum member
#[derive(Debug, Clone, PartialEq)]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseValueError {}

// ---------------------------------------------------------------------------
// Specialists
// ---------------------------------------------------------------------------

/// A member of staff who can be booked for appointments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialist {
    pub id: u32,
    pub name: String,
    pub specialty: Specialty,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistListResponse {
    pub specialists: Vec<Specialist>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSpecialistRequest {
    pub name: String,
    pub specialty: Specialty,
    /// Defaults to available when omitted
    pub available: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistResponse {
    pub specialist: Specialist,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAvailabilityRequest {
    pub available: bool,
}

/// Source format for a bulk roster import
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImportFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpecialistsRequest {
    pub format: ImportFormat,
    /// Raw file content
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpecialistsResponse {
    pub imported: Vec<Specialist>,
    pub skipped_missing_fields: u32,
    pub skipped_duplicates: u32,
    pub success_message: String,
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub specialties: Vec<Specialty>,
    pub notes: String,
    pub start_date: NaiveDate,
    pub period_preference: PeriodPreference,
    /// Empty means every weekday is eligible
    pub preferred_weekdays: Vec<Weekday>,
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub specialties: Vec<Specialty>,
    #[serde(default)]
    pub notes: String,
    /// Start date in YYYY-MM-DD format
    pub start_date: String,
    #[serde(default)]
    pub period_preference: PeriodPreference,
    #[serde(default)]
    pub preferred_weekdays: Vec<Weekday>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientResponse {
    pub patient: Patient,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientListResponse {
    pub patients: Vec<Patient>,
}

// ---------------------------------------------------------------------------
// Schedule options and bindings
// ---------------------------------------------------------------------------

/// One proposed, not yet committed, appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub specialist: Specialist,
    pub specialty: Specialty,
    pub period: Period,
}

/// A candidate weekly slate of appointments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOption {
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOptionsResponse {
    pub patient_id: String,
    pub patient_name: String,
    pub options: Vec<ScheduleOption>,
}

/// A committed appointment
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
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmOptionResponse {
    pub bindings: Vec<Binding>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingListResponse {
    pub bindings: Vec<Binding>,
}

/// Live bindings that book the same specialist at the same instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingConflict {
    pub specialist_id: u32,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub binding_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictReportResponse {
    pub conflicts: Vec<BindingConflict>,
}

// ---------------------------------------------------------------------------
// Weekly grid
// ---------------------------------------------------------------------------

/// Column header of the weekly grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekDay {
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub is_today: bool,
}

/// One time slot row; `cells[i]` holds the bindings of `days[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSlotRow {
    pub time: TimeSlot,
    pub period: Period,
    pub cells: Vec<Vec<Binding>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// e.g. "06/01/2025 - 10/01/2025"
    pub label: String,
    pub days: Vec<WeekDay>,
    pub rows: Vec<WeekSlotRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekQuery {
    /// Any date inside the requested week (YYYY-MM-DD); focus week when omitted
    pub date: Option<String>,
}
