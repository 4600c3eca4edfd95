//! Work-authorization record and the document chain
//!
//! Visa metadata plus the ordered list of approval-tracked documents. The
//! chain is populated only for F1(CPT/OPT) holders and advances one stage at
//! a time as HR approves each document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decision::ReviewDecision;
use crate::document::{DocumentName, DocumentRecord, DocumentStatus};
use crate::error::OnboardingError;

/// Visa classes offered on the onboarding form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisaType {
    #[serde(rename = "H1-B")]
    H1B,
    #[serde(rename = "L2")]
    L2,
    #[serde(rename = "F1(CPT/OPT)")]
    F1CptOpt,
    #[serde(rename = "H4")]
    H4,
    Other,
}

impl VisaType {
    /// Returns the wire name for this visa type
    pub fn as_str(&self) -> &'static str {
        match self {
            VisaType::H1B => "H1-B",
            VisaType::L2 => "L2",
            VisaType::F1CptOpt => "F1(CPT/OPT)",
            VisaType::H4 => "H4",
            VisaType::Other => "Other",
        }
    }
}

impl fmt::Display for VisaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisaType {
    type Err = OnboardingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H1-B" => Ok(VisaType::H1B),
            "L2" => Ok(VisaType::L2),
            "F1(CPT/OPT)" => Ok(VisaType::F1CptOpt),
            "H4" => Ok(VisaType::H4),
            "Other" => Ok(VisaType::Other),
            other => Err(OnboardingError::Validation(format!(
                "invalid visa type: {other}"
            ))),
        }
    }
}

/// Visa metadata and the document chain for a work-authorization holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkAuthorization {
    /// Declared visa class
    pub visa_type: VisaType,
    /// Free-text title carried into the employment summary ("STEM OPT", ...)
    pub visa_title: String,
    /// Authorization start date
    pub start_date: Option<NaiveDate>,
    /// Authorization end date
    pub end_date: Option<NaiveDate>,
    /// The document chain, chain-driven only for F1(CPT/OPT)
    pub documents: Vec<DocumentRecord>,
}

impl WorkAuthorization {
    /// Creates a record with an empty chain
    pub fn new(
        visa_type: VisaType,
        visa_title: impl Into<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            visa_type,
            visa_title: visa_title.into(),
            start_date,
            end_date,
            documents: Vec::new(),
        }
    }

    /// Returns true when this visa class participates in the document chain
    pub fn is_chain_tracked(&self) -> bool {
        matches!(self.visa_type, VisaType::F1CptOpt)
    }

    /// Resets the chain to its first stage
    ///
    /// Called on application approval. The reset is idempotent and overwrites
    /// any prior chain, so a re-approved application always starts over from
    /// a single never-submitted OPT Receipt slot. Non-chain visa classes keep
    /// an empty chain.
    pub fn reset_chain(&mut self) {
        if self.is_chain_tracked() {
            self.documents = vec![DocumentRecord::never_submitted(DocumentName::OptReceipt)];
        } else {
            self.documents.clear();
        }
    }

    /// Returns the record for the given chain stage, if provisioned
    pub fn document(&self, name: DocumentName) -> Option<&DocumentRecord> {
        self.documents.iter().find(|d| d.name == name)
    }

    /// Records an employee upload for the given stage
    ///
    /// The slot must already be provisioned and sit in NeverSubmitted or
    /// Rejected; the upload moves it to Pending.
    pub fn record_upload(
        &mut self,
        name: DocumentName,
        url: impl Into<String>,
    ) -> Result<(), OnboardingError> {
        let record = self
            .documents
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| OnboardingError::DocumentNotFound {
                name: name.to_string(),
            })?;
        record.record_upload(url)
    }

    /// Applies an HR decision to the pending record for the given stage
    ///
    /// Targets the first record matching `name` with status Pending; a
    /// missing or wrong-state record is reported as
    /// `PendingDocumentNotFound`, which guards against double decisions.
    /// Approval provisions the next stage unless it is already present or
    /// the chain is complete.
    pub fn decide_document(
        &mut self,
        name: DocumentName,
        decision: &ReviewDecision,
    ) -> Result<(), OnboardingError> {
        let record = self
            .documents
            .iter_mut()
            .find(|d| d.name == name && d.status == DocumentStatus::Pending)
            .ok_or_else(|| OnboardingError::PendingDocumentNotFound {
                name: name.to_string(),
            })?;

        match decision {
            ReviewDecision::Approve => {
                record.approve()?;
                if let Some(next) = name.next_stage() {
                    if self.document(next).is_none() {
                        self.documents.push(DocumentRecord::never_submitted(next));
                    }
                }
            }
            ReviewDecision::Reject { feedback } => {
                record.reject(feedback.clone())?;
            }
        }
        Ok(())
    }

    /// Returns true when every chain stage is approved
    pub fn chain_complete(&self) -> bool {
        self.is_chain_tracked()
            && DocumentName::CHAIN.iter().all(|name| {
                self.document(*name)
                    .map(|d| d.status == DocumentStatus::Approved)
                    .unwrap_or(false)
            })
    }
}
