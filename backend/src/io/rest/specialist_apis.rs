//! # REST API for the Specialist Roster

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use super::mappers::SpecialistMapper;
use crate::domain::commands::specialists::{
    CreateSpecialistCommand, ImportSpecialistsCommand, SetAvailabilityCommand,
};
use crate::AppState;
use shared::{CreateSpecialistRequest, ImportSpecialistsRequest, SetAvailabilityRequest, SpecialistResponse};

/// List the whole roster
pub async fn list_specialists(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/specialists");

    match state.roster_service.list_specialists().await {
        Ok(specialists) => (StatusCode::OK, Json(SpecialistMapper::to_list_dto(specialists))).into_response(),
        Err(e) => error_response("list specialists", e),
    }
}

pub async fn get_specialist(State(state): State<AppState>, Path(specialist_id): Path<u32>) -> impl IntoResponse {
    info!("GET /api/specialists/{}", specialist_id);

    match state.roster_service.get_specialist(specialist_id).await {
        Ok(specialist) => (StatusCode::OK, Json(SpecialistMapper::to_dto(specialist))).into_response(),
        Err(e) => error_response("get specialist", e),
    }
}

/// Add one specialist
pub async fn create_specialist(
    State(state): State<AppState>,
    Json(request): Json<CreateSpecialistRequest>,
) -> impl IntoResponse {
    info!("POST /api/specialists - request: {:?}", request);

    let command = CreateSpecialistCommand {
        name: request.name,
        specialty: request.specialty,
        available: request.available.unwrap_or(true),
    };

    match state.roster_service.add_specialist(command).await {
        Ok(specialist) => {
            let response = SpecialistResponse {
                specialist: SpecialistMapper::to_dto(specialist),
                success_message: "Specialist added successfully".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("add specialist", e),
    }
}

/// Bulk import from a CSV or JSON document
pub async fn import_specialists(
    State(state): State<AppState>,
    Json(request): Json<ImportSpecialistsRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/specialists/import - format: {:?}, {} bytes",
        request.format,
        request.content.len()
    );

    let command = ImportSpecialistsCommand {
        format: SpecialistMapper::to_import_format(request.format),
        content: request.content,
    };

    match state.roster_service.import_specialists(command).await {
        Ok(summary) => (StatusCode::OK, Json(SpecialistMapper::to_import_dto(summary))).into_response(),
        Err(e) => error_response("import specialists", e),
    }
}

/// Toggle whether a specialist can be booked
pub async fn set_specialist_availability(
    State(state): State<AppState>,
    Path(specialist_id): Path<u32>,
    Json(request): Json<SetAvailabilityRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/specialists/{}/availability - available: {}",
        specialist_id, request.available
    );

    let command = SetAvailabilityCommand {
        specialist_id,
        available: request.available,
    };

    match state.roster_service.set_availability(command).await {
        Ok(specialist) => {
            let response = SpecialistResponse {
                success_message: format!(
                    "{} is now {}",
                    specialist.name,
                    if specialist.available { "available" } else { "unavailable" }
                ),
                specialist: SpecialistMapper::to_dto(specialist),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("set specialist availability", e),
    }
}
