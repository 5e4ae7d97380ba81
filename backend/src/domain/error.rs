//! Business-rule failures raised by the domain services.
//!
//! Services return `anyhow::Result` and wrap these, so the REST layer can
//! recover the variant with `downcast_ref` to choose a status code.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Specialist not found: {0}")]
    SpecialistNotFound(u32),

    #[error("Invalid patient: {0}")]
    InvalidPatient(String),

    #[error("Invalid specialist: {0}")]
    InvalidSpecialist(String),

    #[error("A specialist named '{0}' already exists")]
    DuplicateSpecialist(String),

    #[error("No pending schedule options for patient {0}")]
    NoPendingOptions(String),

    #[error("Schedule option {index} not found ({available} available)")]
    OptionNotFound { index: usize, available: usize },

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("Date outside the supported calendar range: {0}")]
    DateOutOfRange(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::PatientNotFound(_)
                | DomainError::SpecialistNotFound(_)
                | DomainError::NoPendingOptions(_)
                | DomainError::OptionNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            DomainError::OptionNotFound { index: 5, available: 4 }.to_string(),
            "Schedule option 5 not found (4 available)"
        );
        assert_eq!(
            DomainError::DuplicateSpecialist("Dr. X".to_string()).to_string(),
            "A specialist named 'Dr. X' already exists"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = DomainError::PatientNotFound("patient::1".to_string()).into();
        let domain = err.downcast_ref::<DomainError>().unwrap();
        assert!(domain.is_not_found());
        assert!(!DomainError::InvalidImport("bad".to_string()).is_not_found());
    }
}
