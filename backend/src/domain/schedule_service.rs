//! # Schedule Service
//!
//! Drives the generate, pick, confirm cycle against the shared scheduling
//! context. Generated options are held per patient until one is confirmed or
//! the set is dismissed; generating again replaces the held set.
//!
//! Reading the roster, generating and confirming all happen under the context
//! lock, and confirmed bindings are persisted before the lock is released.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::commands::schedule::{
    BindingConflict, ConfirmOptionCommand, ConfirmOptionResult, GenerateOptionsCommand, GenerateOptionsResult,
};
use super::error::DomainError;
use super::models::binding::Binding;
use super::models::schedule::ScheduleOption;
use super::SharedContext;
use crate::storage::BindingStorage;

#[derive(Clone)]
pub struct ScheduleService {
    context: SharedContext,
    storage: Arc<dyn BindingStorage>,
    pending: Arc<Mutex<HashMap<String, Vec<ScheduleOption>>>>,
}

impl ScheduleService {
    pub fn new(context: SharedContext, storage: Arc<dyn BindingStorage>) -> Self {
        Self {
            context,
            storage,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Generate options for a patient and hold them until confirmed or dismissed
    pub async fn generate_options(&self, command: GenerateOptionsCommand) -> Result<GenerateOptionsResult> {
        info!("Generating schedule options for patient {}", command.patient_id);

        let context = self.context.lock().await;
        let patient = context
            .patient(&command.patient_id)
            .cloned()
            .ok_or_else(|| DomainError::PatientNotFound(command.patient_id.clone()))?;

        let options = {
            let mut rng = rand::thread_rng();
            context.generate_for(&patient.id, &mut rng)?
        };

        if options.is_empty() {
            warn!(
                "No available specialist for any specialty of patient {}",
                patient.id
            );
        }

        self.pending
            .lock()
            .await
            .insert(patient.id.clone(), options.clone());

        info!("Generated {} options for patient {}", options.len(), patient.id);
        Ok(GenerateOptionsResult { patient, options })
    }

    /// Commit one of the held options for a patient
    pub async fn confirm_option(&self, command: ConfirmOptionCommand) -> Result<ConfirmOptionResult> {
        info!(
            "Confirming option {} for patient {}",
            command.option_index, command.patient_id
        );

        let mut context = self.context.lock().await;
        let mut pending = self.pending.lock().await;

        let options = pending
            .get(&command.patient_id)
            .ok_or_else(|| DomainError::NoPendingOptions(command.patient_id.clone()))?;
        let option = options
            .get(command.option_index)
            .cloned()
            .ok_or(DomainError::OptionNotFound {
                index: command.option_index,
                available: options.len(),
            })?;
        let patient = context
            .patient(&command.patient_id)
            .cloned()
            .ok_or_else(|| DomainError::PatientNotFound(command.patient_id.clone()))?;

        let created = context.confirm_option(&patient, &option);
        if let Err(e) = self.storage.store_bindings(&created).await {
            error!("Failed to persist confirmed bindings: {}", e);
            context.rollback_bindings(&created);
            return Err(e);
        }
        pending.remove(&command.patient_id);

        info!("Confirmed {} appointments for {}", created.len(), patient.name);
        Ok(ConfirmOptionResult {
            success_message: format!("{} appointments scheduled for {}", created.len(), patient.name),
            bindings: created,
        })
    }

    /// Drop the held options for a patient. Returns whether any were held.
    pub async fn dismiss_options(&self, patient_id: &str) -> bool {
        info!("Dismissing schedule options for patient {}", patient_id);
        self.pending.lock().await.remove(patient_id).is_some()
    }

    /// Options currently held for a patient
    pub async fn pending_options(&self, patient_id: &str) -> Option<Vec<ScheduleOption>> {
        self.pending.lock().await.get(patient_id).cloned()
    }

    pub async fn list_bindings(&self) -> Result<Vec<Binding>> {
        let context = self.context.lock().await;
        info!("Listing {} bindings", context.bindings().len());
        Ok(context.bindings().to_vec())
    }

    /// Remove a binding by ID. Unknown IDs are a no-op.
    pub async fn remove_binding(&self, binding_id: &str) -> Result<bool> {
        info!("Removing binding {}", binding_id);

        let mut context = self.context.lock().await;
        if !context.bindings().iter().any(|b| b.id == binding_id) {
            warn!("Binding not found: {}", binding_id);
            return Ok(false);
        }

        self.storage.delete_binding(binding_id).await?;
        Ok(context.remove_binding(binding_id))
    }

    pub async fn conflicts(&self) -> Result<Vec<BindingConflict>> {
        let conflicts = self.context.lock().await.conflicts();
        if !conflicts.is_empty() {
            warn!("{} double-booked slots among live bindings", conflicts.len());
        }
        Ok(conflicts)
    }
}
