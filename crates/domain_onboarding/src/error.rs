//! Onboarding domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the onboarding domain
#[derive(Debug, Error)]
pub enum OnboardingError {
    #[error("Application not found: {0}")]
    ApplicationNotFound(String),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("An application already exists for employee {0}")]
    DuplicateApplication(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Application is not editable while {0}")]
    ApplicationNotEditable(String),

    #[error("Application is incomplete: {} required field(s) empty", missing.len())]
    IncompleteApplication { missing: Vec<String> },

    #[error("Feedback is required when rejecting")]
    FeedbackRequired,

    #[error("Invalid decision: {0}")]
    InvalidDecision(String),

    #[error("Invalid document name: {0}")]
    InvalidDocumentName(String),

    #[error("Pending document not found or already processed: {name}")]
    PendingDocumentNotFound { name: String },

    #[error("No document slot for {name} on this application")]
    DocumentNotFound { name: String },

    #[error("Document {name} cannot be submitted while {status}")]
    DocumentNotSubmittable { name: String, status: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Store(#[from] PortError),
}

impl OnboardingError {
    /// Returns true if this error indicates an absent or wrong-state entity
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OnboardingError::ApplicationNotFound(_)
                | OnboardingError::EmployeeNotFound(_)
                | OnboardingError::PendingDocumentNotFound { .. }
                | OnboardingError::DocumentNotFound { .. }
        )
    }

    /// Returns true if this error is a caller-input validation failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OnboardingError::FeedbackRequired
                | OnboardingError::InvalidDecision(_)
                | OnboardingError::InvalidDocumentName(_)
                | OnboardingError::IncompleteApplication { .. }
                | OnboardingError::Validation(_)
        )
    }
}
