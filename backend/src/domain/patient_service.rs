use anyhow::Result;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::patients::CreatePatientCommand;
use super::error::DomainError;
use super::models::patient::Patient;
use super::slots::{within_scheduling_range, MAX_SCHEDULING_YEAR, MIN_SCHEDULING_YEAR};
use super::SharedContext;
use crate::storage::PatientStorage;

const MAX_NAME_LENGTH: usize = 100;

/// Service for patient intake and lookup
#[derive(Clone)]
pub struct PatientService {
    context: SharedContext,
    storage: Arc<dyn PatientStorage>,
}

impl PatientService {
    pub fn new(context: SharedContext, storage: Arc<dyn PatientStorage>) -> Self {
        Self { context, storage }
    }

    /// Register a new patient
    pub async fn create_patient(&self, command: CreatePatientCommand) -> Result<Patient> {
        info!(
            "Creating patient: name={}, specialties={:?}, start_date={}",
            command.name, command.specialties, command.start_date
        );

        let name = validate_name(&command.name)?;
        let start_date = parse_start_date(&command.start_date)?;

        let specialties = dedup_in_order(command.specialties);
        if specialties.is_empty() {
            return Err(DomainError::InvalidPatient("At least one specialty is required".to_string()).into());
        }

        let patient = Patient {
            id: Patient::generate_id(),
            name,
            specialties,
            notes: command.notes.trim().to_string(),
            start_date,
            period_preference: command.period_preference,
            preferred_weekdays: dedup_in_order(command.preferred_weekdays),
            created_at: Utc::now(),
        };

        let mut context = self.context.lock().await;
        self.storage.store_patient(&patient).await?;
        context.add_patient(patient.clone());

        info!("Created patient {} with ID {}", patient.name, patient.id);
        Ok(patient)
    }

    pub async fn get_patient(&self, patient_id: &str) -> Result<Patient> {
        info!("Getting patient: {}", patient_id);

        let context = self.context.lock().await;
        match context.patient(patient_id) {
            Some(patient) => Ok(patient.clone()),
            None => {
                warn!("Patient not found: {}", patient_id);
                Err(DomainError::PatientNotFound(patient_id.to_string()).into())
            }
        }
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>> {
        let context = self.context.lock().await;
        info!("Found {} patients", context.patients().len());
        Ok(context.patients().to_vec())
    }
}

fn validate_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidPatient("Patient name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidPatient(format!(
            "Patient name cannot exceed {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

fn parse_start_date(raw: &str) -> Result<NaiveDate, DomainError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::InvalidPatient("Start date is required".to_string()));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidPatient(format!("Start date must be in YYYY-MM-DD format: {}", raw)))?;
    // %Y also takes signed and five-digit years
    if !within_scheduling_range(date) {
        return Err(DomainError::InvalidPatient(format!(
            "Start date must fall between the years {} and {}: {}",
            MIN_SCHEDULING_YEAR, MAX_SCHEDULING_YEAR, raw
        )));
    }
    Ok(date)
}

fn dedup_in_order<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::SchedulingContext;
    use crate::storage::csv::test_utils::RepositoryTestHelper;
    use shared::{PeriodPreference, Specialty, Weekday};
    use tokio::sync::Mutex;

    async fn service() -> (PatientService, RepositoryTestHelper) {
        let helper = RepositoryTestHelper::new().await.unwrap();
        let context = Arc::new(Mutex::new(SchedulingContext::default()));
        let service = PatientService::new(context, Arc::new(helper.patient_repo.clone()));
        (service, helper)
    }

    fn command() -> CreatePatientCommand {
        CreatePatientCommand {
            name: " Lucas Pereira ".to_string(),
            specialties: vec![Specialty::Neurology, Specialty::Psychology, Specialty::Neurology],
            notes: "Needs wheelchair access".to_string(),
            start_date: "2025-01-06".to_string(),
            period_preference: PeriodPreference::Morning,
            preferred_weekdays: vec![Weekday::Monday, Weekday::Monday, Weekday::Wednesday],
        }
    }

    fn invalid_reason(err: anyhow::Error) -> String {
        match err.downcast::<DomainError>().unwrap() {
            DomainError::InvalidPatient(reason) => reason,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_create_patient() {
        let (service, helper) = service().await;

        let patient = service.create_patient(command()).await.unwrap();

        assert!(patient.id.starts_with("patient::"));
        assert_eq!(patient.name, "Lucas Pereira");
        assert_eq!(patient.specialties, vec![Specialty::Neurology, Specialty::Psychology]);
        assert_eq!(patient.preferred_weekdays, vec![Weekday::Monday, Weekday::Wednesday]);
        assert_eq!(patient.start_date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());

        assert_eq!(service.get_patient(&patient.id).await.unwrap(), patient);
        assert_eq!(service.list_patients().await.unwrap(), vec![patient.clone()]);
        assert_eq!(helper.patient_repo.get_patient(&patient.id).await.unwrap(), Some(patient));
    }

    #[tokio::test]
    async fn test_create_patient_validation() {
        let (service, _helper) = service().await;

        let mut no_name = command();
        no_name.name = "   ".to_string();
        assert!(invalid_reason(service.create_patient(no_name).await.unwrap_err()).contains("name"));

        let mut long_name = command();
        long_name.name = "a".repeat(101);
        assert!(invalid_reason(service.create_patient(long_name).await.unwrap_err()).contains("100"));

        let mut no_specialty = command();
        no_specialty.specialties.clear();
        assert!(invalid_reason(service.create_patient(no_specialty).await.unwrap_err()).contains("specialty"));

        let mut no_date = command();
        no_date.start_date = String::new();
        assert!(invalid_reason(service.create_patient(no_date).await.unwrap_err()).contains("required"));

        let mut bad_date = command();
        bad_date.start_date = "06/01/2025".to_string();
        assert!(invalid_reason(service.create_patient(bad_date).await.unwrap_err()).contains("YYYY-MM-DD"));

        for out_of_range in ["+262142-12-31", "1899-12-31", "+10000-01-01"] {
            let mut far_date = command();
            far_date.start_date = out_of_range.to_string();
            let reason = invalid_reason(service.create_patient(far_date).await.unwrap_err());
            assert!(reason.contains("between the years 1900 and 9999"), "{}: {}", out_of_range, reason);
        }

        let mut edge = command();
        edge.start_date = "9999-12-31".to_string();
        assert!(service.create_patient(edge).await.is_ok());
        assert_eq!(service.list_patients().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_patient() {
        let (service, _helper) = service().await;

        let err = service.get_patient("patient::nope").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::PatientNotFound("patient::nope".to_string()))
        );
    }
}
