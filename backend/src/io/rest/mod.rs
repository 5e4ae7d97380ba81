//! # REST API Interface Layer
//!
//! JSON endpoints under `/api`. Each handler logs its method and path, maps
//! the request DTO to a domain command, and turns the outcome into a status
//! code and body.
//!
//! Domain failures travel inside `anyhow::Error`; [`error_response`] recovers
//! the [`DomainError`] to pick the status:
//!
//! | error                         | status |
//! |-------------------------------|--------|
//! | not found, no pending options | 404    |
//! | duplicate specialist          | 409    |
//! | validation, date out of range | 400    |
//! | anything else                 | 500    |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::domain::DomainError;

pub mod binding_apis;
pub mod mappers;
pub mod patient_apis;
pub mod schedule_apis;
pub mod specialist_apis;
pub mod week_apis;

/// Status code a service error should be reported with
pub fn status_for(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<DomainError>() {
        Some(domain) if domain.is_not_found() => StatusCode::NOT_FOUND,
        Some(DomainError::DuplicateSpecialist(_)) => StatusCode::CONFLICT,
        Some(_) => StatusCode::BAD_REQUEST,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed operation and build its response
pub fn error_response(action: &str, err: anyhow::Error) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("Failed to {}: {:#}", action, err);
    } else {
        warn!("Failed to {}: {}", action, err);
    }
    (status, err.to_string()).into_response()
}
