//! # REST API for the Weekly Grid

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use super::error_response;
use super::mappers::BindingMapper;
use crate::domain::slots::{within_scheduling_range, MAX_SCHEDULING_YEAR, MIN_SCHEDULING_YEAR};
use crate::AppState;
use shared::WeekQuery;

/// Grid for the week of `?date=`, or for the focused week when omitted
pub async fn get_week(State(state): State<AppState>, Query(query): Query<WeekQuery>) -> impl IntoResponse {
    info!("GET /api/week - date: {:?}", query.date);

    let anchor = match query.date.as_deref() {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) if within_scheduling_range(date) => date,
            Ok(_) => {
                warn!("Rejected week query outside the supported range: {}", raw);
                return (
                    StatusCode::BAD_REQUEST,
                    format!(
                        "Date must fall between the years {} and {}",
                        MIN_SCHEDULING_YEAR, MAX_SCHEDULING_YEAR
                    ),
                )
                    .into_response();
            }
            Err(_) => {
                warn!("Rejected week query with bad date: {}", raw);
                return (StatusCode::BAD_REQUEST, "Date must be in YYYY-MM-DD format").into_response();
            }
        },
        None => state.week_view_service.focus_week(),
    };

    week_response(&state, anchor).await
}

pub async fn previous_week(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/week/previous");

    match state.week_view_service.navigate_previous_week() {
        Ok(focus) => week_response(&state, focus).await,
        Err(e) => error_response("move to previous week", e.into()),
    }
}

pub async fn next_week(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/week/next");

    match state.week_view_service.navigate_next_week() {
        Ok(focus) => week_response(&state, focus).await,
        Err(e) => error_response("move to next week", e.into()),
    }
}

async fn week_response(state: &AppState, anchor: NaiveDate) -> Response {
    match state.schedule_service.list_bindings().await {
        Ok(bindings) => {
            let today = Local::now().date_naive();
            match state.week_view_service.build_week(anchor, &bindings, today) {
                Ok(grid) => (StatusCode::OK, Json(BindingMapper::to_weekly_schedule(grid))).into_response(),
                Err(e) => error_response("build weekly grid", e.into()),
            }
        }
        Err(e) => error_response("build weekly grid", e),
    }
}
