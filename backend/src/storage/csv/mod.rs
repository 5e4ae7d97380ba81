//! CSV implementation of the storage traits.
//!
//! ```text
//! <data_dir>/
//! ├── specialists.csv
//! ├── patients.csv
//! └── bindings.csv
//! ```

pub mod binding_repository;
pub mod connection;
pub mod patient_repository;
pub mod specialist_repository;

#[cfg(test)]
pub mod test_utils;

pub use binding_repository::BindingRepository;
pub use connection::CsvConnection;
pub use patient_repository::PatientRepository;
pub use specialist_repository::SpecialistRepository;
