use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use csv::StringRecord;
use tracing::{info, warn};

use super::connection::{join_values, split_values, CsvConnection};
use crate::domain::models::patient::Patient;
use crate::storage::traits::PatientStorage;

const PATIENTS_FILE: &str = "patients.csv";
const HEADER: [&str; 8] = [
    "id",
    "name",
    "specialties",
    "notes",
    "start_date",
    "period_preference",
    "preferred_weekdays",
    "created_at",
];

/// CSV-backed patient registry
#[derive(Clone)]
pub struct PatientRepository {
    connection: CsvConnection,
}

impl PatientRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_patients(&self) -> Result<Vec<Patient>> {
        let records = self.connection.read_table(PATIENTS_FILE, &HEADER)?;

        let mut patients = Vec::with_capacity(records.len());
        for (line, record) in records.iter().enumerate() {
            match parse_record(record) {
                Ok(patient) => patients.push(patient),
                Err(e) => warn!("Skipping unreadable row {} in {}: {}", line + 2, PATIENTS_FILE, e),
            }
        }
        Ok(patients)
    }

    fn write_patients(&self, patients: &[Patient]) -> Result<()> {
        let rows = patients.iter().map(|p| {
            vec![
                p.id.clone(),
                p.name.clone(),
                join_values(&p.specialties),
                p.notes.clone(),
                p.start_date.format("%Y-%m-%d").to_string(),
                p.period_preference.to_string(),
                join_values(&p.preferred_weekdays),
                p.created_at.to_rfc3339(),
            ]
        });
        self.connection.write_table(PATIENTS_FILE, &HEADER, rows)
    }
}

fn parse_record(record: &StringRecord) -> Result<Patient> {
    let field = |index: usize| record.get(index).ok_or_else(|| anyhow!("missing column {}", HEADER[index]));

    let specialties = split_values(field(2)?)?;
    if specialties.is_empty() {
        return Err(anyhow!("patient has no specialties"));
    }

    Ok(Patient {
        id: field(0)?.to_string(),
        name: field(1)?.to_string(),
        specialties,
        notes: field(3)?.to_string(),
        start_date: NaiveDate::parse_from_str(field(4)?, "%Y-%m-%d").context("invalid start_date")?,
        period_preference: field(5)?.parse()?,
        preferred_weekdays: split_values(field(6)?)?,
        created_at: DateTime::parse_from_rfc3339(field(7)?)
            .context("invalid created_at")?
            .with_timezone(&Utc),
    })
}

#[async_trait]
impl PatientStorage for PatientRepository {
    async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.read_patients()
    }

    async fn get_patient(&self, patient_id: &str) -> Result<Option<Patient>> {
        Ok(self.read_patients()?.into_iter().find(|p| p.id == patient_id))
    }

    async fn store_patient(&self, patient: &Patient) -> Result<()> {
        let mut all = self.read_patients()?;
        all.push(patient.clone());
        self.write_patients(&all)?;
        info!("Stored patient {} ({})", patient.name, patient.id);
        Ok(())
    }
}
