//! # REST API for Schedule Options
//!
//! Generate a set of options for a patient, then confirm one of them by
//! index or dismiss the set.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use super::mappers::{BindingMapper, ScheduleMapper};
use crate::domain::commands::schedule::{ConfirmOptionCommand, GenerateOptionsCommand};
use crate::AppState;

pub async fn generate_schedule_options(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/patients/{}/schedule-options", patient_id);

    match state
        .schedule_service
        .generate_options(GenerateOptionsCommand { patient_id })
        .await
    {
        Ok(result) => (StatusCode::OK, Json(ScheduleMapper::to_options_response(result))).into_response(),
        Err(e) => error_response("generate schedule options", e),
    }
}

pub async fn dismiss_schedule_options(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/patients/{}/schedule-options", patient_id);

    state.schedule_service.dismiss_options(&patient_id).await;
    StatusCode::NO_CONTENT
}

pub async fn confirm_schedule_option(
    State(state): State<AppState>,
    Path((patient_id, option_index)): Path<(String, usize)>,
) -> impl IntoResponse {
    info!(
        "POST /api/patients/{}/schedule-options/{}/confirm",
        patient_id, option_index
    );

    let command = ConfirmOptionCommand {
        patient_id,
        option_index,
    };

    match state.schedule_service.confirm_option(command).await {
        Ok(result) => (StatusCode::CREATED, Json(BindingMapper::to_confirm_dto(result))).into_response(),
        Err(e) => error_response("confirm schedule option", e),
    }
}
