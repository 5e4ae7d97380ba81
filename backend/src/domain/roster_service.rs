//! # Roster Service
//!
//! Owns the specialist roster: the default seed list, single additions, the
//! availability toggle and bulk imports from CSV or JSON files.

use anyhow::Result;
use csv::{ReaderBuilder, Trim};
use serde_json::Value;
use shared::Specialty;
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::specialists::{
    CreateSpecialistCommand, ImportFormat, ImportSpecialistsCommand, ImportSummary, SetAvailabilityCommand,
};
use super::error::DomainError;
use super::models::specialist::Specialist;
use super::SharedContext;
use crate::storage::SpecialistStorage;

const MAX_NAME_LENGTH: usize = 100;

/// Default staff installed on first start
const DEFAULT_ROSTER: [(&str, Specialty); 8] = [
    ("Dr. João Silva", Specialty::Neurology),
    ("Dra. Ana Costa", Specialty::Physiotherapy),
    ("Dr. Carlos Lima", Specialty::SpeechTherapy),
    ("Dra. Maria Fernanda", Specialty::Psychology),
    ("Dr. Pedro Santos", Specialty::Neurology),
    ("Dra. Julia Oliveira", Specialty::Physiotherapy),
    ("Dr. Roberto Lima", Specialty::OccupationalTherapy),
    ("Dra. Carla Mendes", Specialty::Psychology),
];

#[derive(Clone)]
pub struct RosterService {
    context: SharedContext,
    storage: Arc<dyn SpecialistStorage>,
}

impl RosterService {
    pub fn new(context: SharedContext, storage: Arc<dyn SpecialistStorage>) -> Self {
        Self { context, storage }
    }

    pub async fn list_specialists(&self) -> Result<Vec<Specialist>> {
        let context = self.context.lock().await;
        info!("Listing {} specialists", context.specialists().len());
        Ok(context.specialists().to_vec())
    }

    pub async fn get_specialist(&self, specialist_id: u32) -> Result<Specialist> {
        let context = self.context.lock().await;
        let specialist = context
            .specialist(specialist_id)
            .cloned()
            .ok_or(DomainError::SpecialistNotFound(specialist_id))?;
        Ok(specialist)
    }

    /// Install the default roster when no specialist exists yet.
    /// Returns how many specialists were added.
    pub async fn seed_if_empty(&self) -> Result<usize> {
        let mut context = self.context.lock().await;
        if !context.specialists().is_empty() {
            info!("Roster already has {} specialists, not seeding", context.specialists().len());
            return Ok(0);
        }

        let seeded: Vec<Specialist> = DEFAULT_ROSTER
            .iter()
            .zip(1u32..)
            .map(|((name, specialty), id)| Specialist {
                id,
                name: name.to_string(),
                specialty: *specialty,
                available: true,
            })
            .collect();

        self.storage.store_specialists(&seeded).await?;
        context.add_specialists(seeded.iter().cloned());

        info!("Seeded roster with {} specialists", seeded.len());
        Ok(seeded.len())
    }

    pub async fn add_specialist(&self, command: CreateSpecialistCommand) -> Result<Specialist> {
        info!("Adding specialist: name={}, specialty={}", command.name, command.specialty);

        let name = validate_name(&command.name)?;

        let mut context = self.context.lock().await;
        if context.specialists().iter().any(|s| s.has_name(&name)) {
            return Err(DomainError::DuplicateSpecialist(name).into());
        }

        let specialist = Specialist {
            id: Specialist::next_id(context.specialists()),
            name,
            specialty: command.specialty,
            available: command.available,
        };

        self.storage.store_specialists(std::slice::from_ref(&specialist)).await?;
        context.add_specialists([specialist.clone()]);

        info!("Added specialist {} with ID {}", specialist.name, specialist.id);
        Ok(specialist)
    }

    pub async fn set_availability(&self, command: SetAvailabilityCommand) -> Result<Specialist> {
        info!(
            "Setting availability of specialist {} to {}",
            command.specialist_id, command.available
        );

        let mut context = self.context.lock().await;
        let mut specialist = context
            .specialist(command.specialist_id)
            .cloned()
            .ok_or(DomainError::SpecialistNotFound(command.specialist_id))?;
        specialist.available = command.available;

        self.storage.update_specialist(&specialist).await?;
        context.update_specialist(specialist.clone())?;

        Ok(specialist)
    }

    /// Bulk import. Rows are validated one by one; a row that fails is
    /// counted and skipped, only an unparseable file fails the import.
    pub async fn import_specialists(&self, command: ImportSpecialistsCommand) -> Result<ImportSummary> {
        info!("Importing specialists from {:?} content", command.format);

        let rows = match command.format {
            ImportFormat::Csv => parse_csv_rows(&command.content)?,
            ImportFormat::Json => parse_json_rows(&command.content)?,
        };

        let mut context = self.context.lock().await;
        let mut summary = ImportSummary::default();
        let mut next_id = Specialist::next_id(context.specialists());

        for row in rows {
            let Some((name, specialty)) = row.required_fields() else {
                summary.skipped_missing_fields += 1;
                continue;
            };

            let taken = context.specialists().iter().any(|s| s.has_name(&name))
                || summary.imported.iter().any(|s| s.has_name(&name));
            if taken {
                summary.skipped_duplicates += 1;
                continue;
            }

            summary.imported.push(Specialist {
                id: next_id,
                name,
                specialty,
                available: row.is_available(),
            });
            next_id += 1;
        }

        if !summary.imported.is_empty() {
            self.storage.store_specialists(&summary.imported).await?;
            context.add_specialists(summary.imported.iter().cloned());
        }

        info!(
            "Imported {} specialists ({} missing fields, {} duplicates)",
            summary.imported.len(),
            summary.skipped_missing_fields,
            summary.skipped_duplicates
        );
        Ok(summary)
    }
}

fn validate_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidSpecialist("Specialist name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidSpecialist(format!(
            "Specialist name cannot exceed {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

/// One imported row before validation
#[derive(Debug, Default)]
struct ImportRow {
    name: Option<String>,
    specialty: Option<String>,
    available: Option<String>,
}

impl ImportRow {
    fn set(&mut self, key: &str, value: String) {
        match key.trim().to_lowercase().as_str() {
            "name" | "nome" => self.name = Some(value),
            "specialty" | "especialidade" => self.specialty = Some(value),
            "available" | "disponivel" | "disponível" => self.available = Some(value),
            _ => {}
        }
    }

    fn required_fields(&self) -> Option<(String, Specialty)> {
        let name = validate_name(self.name.as_deref()?).ok()?;
        let specialty = match self.specialty.as_deref()?.parse() {
            Ok(specialty) => specialty,
            Err(e) => {
                warn!("Skipping imported row for {}: {}", name, e);
                return None;
            }
        };
        Some((name, specialty))
    }

    fn is_available(&self) -> bool {
        match self.available.as_deref() {
            None => true,
            Some(value) if value.trim().is_empty() => true,
            Some(value) => matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "sim" | "yes"),
        }
    }
}

fn parse_csv_rows(content: &str) -> Result<Vec<ImportRow>, DomainError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DomainError::InvalidImport(format!("Unreadable CSV header: {}", e)))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DomainError::InvalidImport(format!("Unreadable CSV row: {}", e)))?;
        let mut row = ImportRow::default();
        for (key, value) in headers.iter().zip(record.iter()) {
            if !value.is_empty() {
                row.set(key, value.to_string());
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

fn parse_json_rows(content: &str) -> Result<Vec<ImportRow>, DomainError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| DomainError::InvalidImport(format!("Invalid JSON: {}", e)))?;
    let Value::Array(items) = value else {
        return Err(DomainError::InvalidImport("JSON import must be an array of objects".to_string()));
    };

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let mut row = ImportRow::default();
        if let Value::Object(fields) = item {
            for (key, value) in fields {
                let text = match value {
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    _ => continue,
                };
                row.set(&key, text);
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::SchedulingContext;
    use crate::storage::csv::test_utils::RepositoryTestHelper;
    use tokio::sync::Mutex;

    async fn service() -> (RosterService, RepositoryTestHelper) {
        let helper = RepositoryTestHelper::new().await.unwrap();
        let context = Arc::new(Mutex::new(SchedulingContext::default()));
        let service = RosterService::new(context, Arc::new(helper.specialist_repo.clone()));
        (service, helper)
    }

    fn create(name: &str, specialty: Specialty) -> CreateSpecialistCommand {
        CreateSpecialistCommand {
            name: name.to_string(),
            specialty,
            available: true,
        }
    }

    fn domain_error(err: &anyhow::Error) -> &DomainError {
        err.downcast_ref::<DomainError>().unwrap()
    }

    #[tokio::test]
    async fn test_seed_if_empty() {
        let (service, helper) = service().await;

        assert_eq!(service.seed_if_empty().await.unwrap(), 8);
        assert_eq!(service.seed_if_empty().await.unwrap(), 0);

        let roster = service.list_specialists().await.unwrap();
        assert_eq!(roster.len(), 8);
        assert!(roster.iter().all(|s| s.available));
        assert_eq!(roster.iter().filter(|s| s.specialty == Specialty::Neurology).count(), 2);
        assert_eq!(roster.iter().filter(|s| s.specialty == Specialty::Psychology).count(), 2);
        assert_eq!(helper.specialist_repo.list_specialists().await.unwrap(), roster);
    }

    #[tokio::test]
    async fn test_add_specialist_assigns_next_id() {
        let (service, _helper) = service().await;
        service.seed_if_empty().await.unwrap();

        let added = service
            .add_specialist(create("  Dra. Helena Rocha ", Specialty::Pediatrics))
            .await
            .unwrap();

        assert_eq!(added.id, 9);
        assert_eq!(added.name, "Dra. Helena Rocha");
        assert_eq!(service.get_specialist(9).await.unwrap(), added);
    }

    #[tokio::test]
    async fn test_add_specialist_rejects_duplicates_and_bad_names() {
        let (service, _helper) = service().await;
        service.seed_if_empty().await.unwrap();

        let err = service
            .add_specialist(create("dr. joão silva", Specialty::Neurology))
            .await
            .unwrap_err();
        assert!(matches!(domain_error(&err), DomainError::DuplicateSpecialist(_)));

        let err = service.add_specialist(create("   ", Specialty::Neurology)).await.unwrap_err();
        assert!(matches!(domain_error(&err), DomainError::InvalidSpecialist(_)));

        let long = "x".repeat(101);
        let err = service.add_specialist(create(&long, Specialty::Neurology)).await.unwrap_err();
        assert!(matches!(domain_error(&err), DomainError::InvalidSpecialist(_)));
    }

    #[tokio::test]
    async fn test_set_availability() {
        let (service, helper) = service().await;
        service.seed_if_empty().await.unwrap();

        let updated = service
            .set_availability(SetAvailabilityCommand {
                specialist_id: 5,
                available: false,
            })
            .await
            .unwrap();

        assert!(!updated.available);
        assert!(!service.get_specialist(5).await.unwrap().available);
        let stored = helper.specialist_repo.list_specialists().await.unwrap();
        assert!(!stored.iter().find(|s| s.id == 5).unwrap().available);

        let err = service
            .set_availability(SetAvailabilityCommand {
                specialist_id: 42,
                available: true,
            })
            .await
            .unwrap_err();
        assert_eq!(domain_error(&err), &DomainError::SpecialistNotFound(42));
    }

    #[tokio::test]
    async fn test_import_csv() {
        let (service, _helper) = service().await;
        service.seed_if_empty().await.unwrap();

        let content = "Nome,Especialidade,Disponivel\n\
                       Dra. Helena Rocha,Pediatria,sim\n\
                       Dr. Marcos Dias,Psiquiatria,nao\n\
                       ,Neurologia,sim\n\
                       Dr. Sem Area,,sim\n\
                       Dr. Cardio,Cardiologia,sim\n\
                       DR. JOÃO SILVA,Neurologia,sim\n\
                       Dra. Helena Rocha,Pediatria,sim\n\
                       Dr. Paulo Reis,Speech Therapy,\n";

        let summary = service
            .import_specialists(ImportSpecialistsCommand {
                format: ImportFormat::Csv,
                content: content.to_string(),
            })
            .await
            .unwrap();

        let names: Vec<_> = summary.imported.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Dra. Helena Rocha", "Dr. Marcos Dias", "Dr. Paulo Reis"]);
        assert_eq!(summary.imported.iter().map(|s| s.id).collect::<Vec<_>>(), vec![9, 10, 11]);
        assert!(summary.imported[0].available);
        assert!(!summary.imported[1].available);
        assert!(summary.imported[2].available);
        assert_eq!(summary.imported[2].specialty, Specialty::SpeechTherapy);
        assert_eq!(summary.skipped_missing_fields, 3);
        assert_eq!(summary.skipped_duplicates, 2);
        assert_eq!(service.list_specialists().await.unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_import_json() {
        let (service, _helper) = service().await;

        let content = r#"[
            {"name": "Dra. Helena Rocha", "specialty": "Pediatrics", "available": true},
            {"name": "Dr. Marcos Dias", "specialty": "Psychiatry", "available": 0},
            {"name": "Dr. Luis Prado", "specialty": "Occupational Therapy"},
            {"specialty": "Neurology"},
            "not an object"
        ]"#;

        let summary = service
            .import_specialists(ImportSpecialistsCommand {
                format: ImportFormat::Json,
                content: content.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(summary.imported.len(), 3);
        assert_eq!(summary.imported[0].id, 1);
        assert!(summary.imported[0].available);
        assert!(!summary.imported[1].available);
        assert!(summary.imported[2].available);
        assert_eq!(summary.skipped_missing_fields, 2);
        assert_eq!(summary.skipped_duplicates, 0);
    }

    #[tokio::test]
    async fn test_import_rejects_malformed_content() {
        let (service, _helper) = service().await;

        let err = service
            .import_specialists(ImportSpecialistsCommand {
                format: ImportFormat::Json,
                content: r#"{"name": "Dr. X"}"#.to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(domain_error(&err), DomainError::InvalidImport(_)));

        let err = service
            .import_specialists(ImportSpecialistsCommand {
                format: ImportFormat::Json,
                content: "[{".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(domain_error(&err), DomainError::InvalidImport(_)));
        assert!(service.list_specialists().await.unwrap().is_empty());
    }
}
