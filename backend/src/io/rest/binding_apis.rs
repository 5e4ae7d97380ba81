//! # REST API for Committed Appointments

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use super::mappers::BindingMapper;
use crate::AppState;

pub async fn list_bindings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/bindings");

    match state.schedule_service.list_bindings().await {
        Ok(bindings) => (StatusCode::OK, Json(BindingMapper::to_list_dto(bindings))).into_response(),
        Err(e) => error_response("list bindings", e),
    }
}

/// Remove a binding. Answers 204 whether or not it existed.
pub async fn remove_binding(State(state): State<AppState>, Path(binding_id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/bindings/{}", binding_id);

    match state.schedule_service.remove_binding(&binding_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("remove binding", e),
    }
}

/// Specialists booked twice at the same date and time
pub async fn list_binding_conflicts(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/bindings/conflicts");

    match state.schedule_service.conflicts().await {
        Ok(conflicts) => (StatusCode::OK, Json(BindingMapper::to_conflict_report(conflicts))).into_response(),
        Err(e) => error_response("list binding conflicts", e),
    }
}
