use shared::{CreatePatientRequest, Patient as SharedPatient, PatientListResponse, PatientResponse};

use crate::domain::commands::patients::CreatePatientCommand;
use crate::domain::models::patient::Patient as DomainPatient;

/// Mapper between shared Patient DTOs and domain patients
pub struct PatientMapper;

impl PatientMapper {
    pub fn to_dto(domain: DomainPatient) -> SharedPatient {
        SharedPatient {
            id: domain.id,
            name: domain.name,
            specialties: domain.specialties,
            notes: domain.notes,
            start_date: domain.start_date,
            period_preference: domain.period_preference,
            preferred_weekdays: domain.preferred_weekdays,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(request: CreatePatientRequest) -> CreatePatientCommand {
        CreatePatientCommand {
            name: request.name,
            specialties: request.specialties,
            notes: request.notes,
            start_date: request.start_date,
            period_preference: request.period_preference,
            preferred_weekdays: request.preferred_weekdays,
        }
    }

    pub fn to_response(domain: DomainPatient) -> PatientResponse {
        PatientResponse {
            patient: Self::to_dto(domain),
            success_message: "Patient registered successfully".to_string(),
        }
    }

    pub fn to_list_dto(patients: Vec<DomainPatient>) -> PatientListResponse {
        PatientListResponse {
            patients: patients.into_iter().map(Self::to_dto).collect(),
        }
    }
}
