//! # IO Layer
//!
//! HTTP surface of the backend. Handlers translate between the `shared` DTOs
//! and domain commands and carry no business rules.

pub mod rest;

pub use rest::binding_apis::*;
pub use rest::patient_apis::*;
pub use rest::schedule_apis::*;
pub use rest::specialist_apis::*;
pub use rest::week_apis::*;
