//! # Storage Traits
//!
//! Persistence seams for the domain services. The services only see these
//! traits, so the CSV backend can be swapped without touching business rules.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::binding::Binding;
use crate::domain::models::patient::Patient;
use crate::domain::models::specialist::Specialist;

/// Storage for the specialist roster
#[async_trait]
pub trait SpecialistStorage: Send + Sync {
    /// All specialists, in insertion order
    async fn list_specialists(&self) -> Result<Vec<Specialist>>;

    /// Append new specialists in one write
    async fn store_specialists(&self, specialists: &[Specialist]) -> Result<()>;

    /// Overwrite an existing specialist, matched by ID
    async fn update_specialist(&self, specialist: &Specialist) -> Result<()>;
}

/// Storage for registered patients
#[async_trait]
pub trait PatientStorage: Send + Sync {
    async fn list_patients(&self) -> Result<Vec<Patient>>;

    async fn get_patient(&self, patient_id: &str) -> Result<Option<Patient>>;

    async fn store_patient(&self, patient: &Patient) -> Result<()>;
}

/// Storage for committed appointments
#[async_trait]
pub trait BindingStorage: Send + Sync {
    async fn list_bindings(&self) -> Result<Vec<Binding>>;

    /// Append a confirmed batch in one write. Either every binding lands or none.
    async fn store_bindings(&self, bindings: &[Binding]) -> Result<()>;

    /// Returns true if the binding was found and deleted
    async fn delete_binding(&self, binding_id: &str) -> Result<bool>;
}
