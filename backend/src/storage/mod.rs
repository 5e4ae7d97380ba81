//! # Storage Layer
//!
//! File-backed persistence for specialists, patients and bindings. One CSV
//! table per entity lives in the data directory; see [`csv::CsvConnection`].

pub mod csv;
pub mod traits;

pub use self::csv::{BindingRepository, CsvConnection, PatientRepository, SpecialistRepository};
pub use traits::{BindingStorage, PatientStorage, SpecialistStorage};
