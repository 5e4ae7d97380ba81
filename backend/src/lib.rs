//! # Care Scheduler Backend
//!
//! Scheduling backend for a care organization: specialist roster, patient
//! intake, candidate schedule generation, confirmation into committed
//! appointments, and a weekly grid over them.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (generator, scheduling context, services)
//!     ↓
//! Storage Layer (CSV tables in the data directory)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{PatientService, RosterService, ScheduleService, SchedulingContext, WeekViewService};
use crate::storage::{
    BindingRepository, BindingStorage, CsvConnection, PatientRepository, PatientStorage, SpecialistRepository,
    SpecialistStorage,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub roster_service: RosterService,
    pub patient_service: PatientService,
    pub schedule_service: ScheduleService,
    pub week_view_service: WeekViewService,
}

/// Load stored data and wire up every service
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Opening data directory {}", config.data_directory.display());
    let connection = CsvConnection::new(&config.data_directory)?;

    let specialist_storage: Arc<dyn SpecialistStorage> = Arc::new(SpecialistRepository::new(connection.clone()));
    let patient_storage: Arc<dyn PatientStorage> = Arc::new(PatientRepository::new(connection.clone()));
    let binding_storage: Arc<dyn BindingStorage> = Arc::new(BindingRepository::new(connection));

    info!("Loading scheduling state");
    let context = SchedulingContext::new(
        specialist_storage.list_specialists().await.context("Failed to load specialists")?,
        patient_storage.list_patients().await.context("Failed to load patients")?,
        binding_storage.list_bindings().await.context("Failed to load bindings")?,
    );
    info!(
        "Loaded {} specialists, {} patients, {} bindings",
        context.specialists().len(),
        context.patients().len(),
        context.bindings().len()
    );
    let context = Arc::new(Mutex::new(context));

    let roster_service = RosterService::new(context.clone(), specialist_storage);
    if config.seed_roster {
        roster_service.seed_if_empty().await?;
    }

    Ok(AppState {
        roster_service,
        patient_service: PatientService::new(context.clone(), patient_storage),
        schedule_service: ScheduleService::new(context, binding_storage),
        week_view_service: WeekViewService::new(Local::now().date_naive()),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/specialists", get(io::list_specialists).post(io::create_specialist))
        .route("/specialists/import", post(io::import_specialists))
        .route("/specialists/:id", get(io::get_specialist))
        .route("/specialists/:id/availability", put(io::set_specialist_availability))
        .route("/patients", get(io::list_patients).post(io::create_patient))
        .route("/patients/:id", get(io::get_patient))
        .route(
            "/patients/:id/schedule-options",
            post(io::generate_schedule_options).delete(io::dismiss_schedule_options),
        )
        .route(
            "/patients/:id/schedule-options/:index/confirm",
            post(io::confirm_schedule_option),
        )
        .route("/bindings", get(io::list_bindings))
        .route("/bindings/conflicts", get(io::list_binding_conflicts))
        .route("/bindings/:id", delete(io::remove_binding))
        .route("/week", get(io::get_week))
        .route("/week/previous", post(io::previous_week))
        .route("/week/next", post(io::next_week));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
