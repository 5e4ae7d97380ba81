//! # REST API for Patient Intake

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use super::mappers::PatientMapper;
use crate::AppState;
use shared::CreatePatientRequest;

/// Register a patient
pub async fn create_patient(
    State(state): State<AppState>,
    Json(request): Json<CreatePatientRequest>,
) -> impl IntoResponse {
    info!("POST /api/patients - request: {:?}", request);

    match state
        .patient_service
        .create_patient(PatientMapper::to_create_command(request))
        .await
    {
        Ok(patient) => (StatusCode::CREATED, Json(PatientMapper::to_response(patient))).into_response(),
        Err(e) => error_response("create patient", e),
    }
}

pub async fn get_patient(State(state): State<AppState>, Path(patient_id): Path<String>) -> impl IntoResponse {
    info!("GET /api/patients/{}", patient_id);

    match state.patient_service.get_patient(&patient_id).await {
        Ok(patient) => (StatusCode::OK, Json(PatientMapper::to_dto(patient))).into_response(),
        Err(e) => error_response("get patient", e),
    }
}

pub async fn list_patients(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/patients");

    match state.patient_service.list_patients().await {
        Ok(patients) => (StatusCode::OK, Json(PatientMapper::to_list_dto(patients))).into_response(),
        Err(e) => error_response("list patients", e),
    }
}
