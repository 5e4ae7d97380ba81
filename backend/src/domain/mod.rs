//! # Domain Layer
//!
//! Scheduling rules for the care organization. The generator, the scheduling
//! context and the slot tables are pure; the services wrap them with locking
//! and persistence through the storage traits.

pub mod commands;
pub mod context;
pub mod error;
pub mod models;
pub mod patient_service;
pub mod roster_service;
pub mod schedule_generator;
pub mod schedule_service;
pub mod slots;
pub mod week_view;

use std::sync::Arc;
use tokio::sync::Mutex;

pub use context::SchedulingContext;
pub use error::DomainError;
pub use patient_service::PatientService;
pub use roster_service::RosterService;
pub use schedule_generator::{generate_schedule_options, SCHEDULE_OPTION_COUNT, SLOT_NEIGHBORHOOD_SIZE};
pub use schedule_service::ScheduleService;
pub use week_view::WeekViewService;

/// Scheduling state shared by every service of one running backend
pub type SharedContext = Arc<Mutex<SchedulingContext>>;
