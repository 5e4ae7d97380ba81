use shared::{
    ImportFormat as SharedImportFormat, ImportSpecialistsResponse, Specialist as SharedSpecialist,
    SpecialistListResponse,
};

use crate::domain::commands::specialists::{ImportFormat, ImportSummary};
use crate::domain::models::specialist::Specialist as DomainSpecialist;

/// Mapper between shared Specialist DTOs and domain specialists
pub struct SpecialistMapper;

impl SpecialistMapper {
    pub fn to_dto(domain: DomainSpecialist) -> SharedSpecialist {
        SharedSpecialist {
            id: domain.id,
            name: domain.name,
            specialty: domain.specialty,
            available: domain.available,
        }
    }

    pub fn to_list_dto(specialists: Vec<DomainSpecialist>) -> SpecialistListResponse {
        SpecialistListResponse {
            specialists: specialists.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_import_format(format: SharedImportFormat) -> ImportFormat {
        match format {
            SharedImportFormat::Csv => ImportFormat::Csv,
            SharedImportFormat::Json => ImportFormat::Json,
        }
    }

    pub fn to_import_dto(summary: ImportSummary) -> ImportSpecialistsResponse {
        let success_message = format!(
            "Imported {} specialists, skipped {} incomplete and {} duplicate rows",
            summary.imported.len(),
            summary.skipped_missing_fields,
            summary.skipped_duplicates
        );
        ImportSpecialistsResponse {
            imported: summary.imported.into_iter().map(Self::to_dto).collect(),
            skipped_missing_fields: summary.skipped_missing_fields,
            skipped_duplicates: summary.skipped_duplicates,
            success_message,
        }
    }
}
