//! Onboarding application DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_onboarding::{Application, DocumentCriterion, WorkAuthorization};

/// Opens an application for a freshly registered employee
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApplicationRequest {
    pub employee_id: Uuid,
    pub email: String,
}

/// An HR decision on an application or a chain document
///
/// Parsed into a `ReviewDecision` before any state is touched, so a
/// rejection without feedback never reaches the domain.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    /// "Approved" or "Rejected"
    pub decision: String,
    pub feedback: Option<String>,
}

/// Records the stored path of an uploaded document
///
/// File bytes are written by the file-storage collaborator; only the
/// resulting path travels through this API.
#[derive(Debug, Deserialize)]
pub struct DocumentUploadRequest {
    pub url: String,
}

/// Document-criteria search, AND-combined across criteria
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub criteria: Vec<DocumentCriterion>,
}

/// Query parameters accepted by the application list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// Wire form of an application
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub citizenship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_authorization: Option<WorkAuthorization>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.id.into(),
            employee_id: application.employee_id.into(),
            status: application.status.to_string(),
            feedback: application.feedback,
            first_name: application.first_name,
            last_name: application.last_name,
            email: application.email,
            citizenship: application.citizenship.map(|c| c.to_string()),
            work_authorization: application.work_authorization,
            version: application.version,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}
