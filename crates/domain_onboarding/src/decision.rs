//! HR review decisions
//!
//! A decision is a tagged union rather than a status string plus an optional
//! feedback field: a rejection without feedback is unrepresentable, so the
//! precondition is enforced once at construction instead of at every call
//! site.

use serde::{Deserialize, Serialize};

use crate::error::OnboardingError;

/// An HR decision on an application or a chain document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewDecision {
    /// Approve the application or document
    Approve,
    /// Reject with mandatory feedback (non-empty after trimming)
    Reject { feedback: String },
}

impl ReviewDecision {
    /// Creates a rejection, validating that feedback is non-empty
    pub fn reject(feedback: impl Into<String>) -> Result<Self, OnboardingError> {
        let feedback = feedback.into();
        if feedback.trim().is_empty() {
            return Err(OnboardingError::FeedbackRequired);
        }
        Ok(ReviewDecision::Reject { feedback })
    }

    /// Parses the wire form: a decision string plus optional feedback
    pub fn from_parts(
        decision: &str,
        feedback: Option<&str>,
    ) -> Result<Self, OnboardingError> {
        match decision {
            "Approved" => Ok(ReviewDecision::Approve),
            "Rejected" => ReviewDecision::reject(feedback.unwrap_or_default()),
            other => Err(OnboardingError::InvalidDecision(other.to_string())),
        }
    }

    /// Returns true for the approve branch
    pub fn is_approval(&self) -> bool {
        matches!(self, ReviewDecision::Approve)
    }
}
