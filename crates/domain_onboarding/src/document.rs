//! Document records and the chain vocabulary
//!
//! A document record is a named, approval-tracked file slot inside the
//! work-authorization chain. The chain vocabulary is fixed: OPT Receipt,
//! I-983, I-20, in that order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OnboardingError;

/// The fixed chain vocabulary for F1(CPT/OPT) visa documents
///
/// Profile pictures and driver licenses are flat fields on the application,
/// not chain members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentName {
    #[serde(rename = "OPT Receipt")]
    OptReceipt,
    #[serde(rename = "I-983")]
    I983,
    #[serde(rename = "I-20")]
    I20,
}

impl DocumentName {
    /// The chain in its fixed order
    pub const CHAIN: [DocumentName; 3] = [
        DocumentName::OptReceipt,
        DocumentName::I983,
        DocumentName::I20,
    ];

    /// Returns the stage provisioned after this one is approved
    ///
    /// `None` for the terminal stage (I-20).
    pub fn next_stage(&self) -> Option<DocumentName> {
        match self {
            DocumentName::OptReceipt => Some(DocumentName::I983),
            DocumentName::I983 => Some(DocumentName::I20),
            DocumentName::I20 => None,
        }
    }

    /// Returns the wire name for this document
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentName::OptReceipt => "OPT Receipt",
            DocumentName::I983 => "I-983",
            DocumentName::I20 => "I-20",
        }
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentName {
    type Err = OnboardingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPT Receipt" | "OPTReceipt" => Ok(DocumentName::OptReceipt),
            "I-983" => Ok(DocumentName::I983),
            "I-20" => Ok(DocumentName::I20),
            other => Err(OnboardingError::InvalidDocumentName(other.to_string())),
        }
    }
}

/// Document approval status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Slot provisioned, nothing uploaded yet
    NeverSubmitted,
    /// Uploaded and awaiting HR review
    Pending,
    /// Approved by HR
    Approved,
    /// Rejected by HR - must be re-uploaded
    Rejected,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocumentStatus::NeverSubmitted => "NeverSubmitted",
            DocumentStatus::Pending => "Pending",
            DocumentStatus::Approved => "Approved",
            DocumentStatus::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

/// One approval-tracked file slot within the work-authorization chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Chain stage this record tracks
    pub name: DocumentName,
    /// Stored-file path; `None` until the employee uploads
    pub url: Option<String>,
    /// Approval status
    pub status: DocumentStatus,
    /// HR feedback; set on rejection, cleared on approval, untouched by
    /// upload so the last rejection reason stays visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl DocumentRecord {
    /// Creates a freshly provisioned, never-submitted slot
    pub fn never_submitted(name: DocumentName) -> Self {
        Self {
            name,
            url: None,
            status: DocumentStatus::NeverSubmitted,
            feedback: None,
        }
    }

    /// Records an uploaded file, moving the slot to Pending
    ///
    /// Only valid from NeverSubmitted or Rejected; uploads against a
    /// Pending or Approved slot are invalid.
    pub fn record_upload(&mut self, url: impl Into<String>) -> Result<(), OnboardingError> {
        match self.status {
            DocumentStatus::NeverSubmitted | DocumentStatus::Rejected => {
                self.url = Some(url.into());
                self.status = DocumentStatus::Pending;
                Ok(())
            }
            DocumentStatus::Pending | DocumentStatus::Approved => {
                Err(OnboardingError::DocumentNotSubmittable {
                    name: self.name.to_string(),
                    status: self.status.to_string(),
                })
            }
        }
    }

    /// Approves a pending document, clearing any prior feedback
    pub fn approve(&mut self) -> Result<(), OnboardingError> {
        if self.status != DocumentStatus::Pending {
            return Err(OnboardingError::PendingDocumentNotFound {
                name: self.name.to_string(),
            });
        }
        self.status = DocumentStatus::Approved;
        self.feedback = None;
        Ok(())
    }

    /// Rejects a pending document with feedback
    pub fn reject(&mut self, feedback: impl Into<String>) -> Result<(), OnboardingError> {
        if self.status != DocumentStatus::Pending {
            return Err(OnboardingError::PendingDocumentNotFound {
                name: self.name.to_string(),
            });
        }
        self.status = DocumentStatus::Rejected;
        self.feedback = Some(feedback.into());
        Ok(())
    }
}
