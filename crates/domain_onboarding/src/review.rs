//! Review service
//!
//! Orchestrates the onboarding workflow over the `OnboardingStore` port:
//! opening applications at registration, employee edits and submission, HR
//! decisions on applications and chain documents, upload transitions, and
//! the HR search/list queries.

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::{ApplicationId, EmployeeId, PortError};
use domain_employee::Employee;

use crate::application::{Application, ApplicationStatus, ProfilePatch};
use crate::decision::ReviewDecision;
use crate::document::DocumentName;
use crate::error::OnboardingError;
use crate::ports::{DocumentCriterion, OnboardingStore};
use crate::sync;

/// Application service for the onboarding review workflow
///
/// Holds the storage port behind an `Arc` so the HTTP layer can share one
/// instance across handlers.
#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn OnboardingStore>,
}

impl ReviewService {
    /// Creates a service over the given store
    pub fn new(store: Arc<dyn OnboardingStore>) -> Self {
        Self { store }
    }

    /// Opens the application for a newly registered employee
    ///
    /// One application per employee; a second open attempt is a conflict.
    #[instrument(skip(self, email))]
    pub async fn open_application(
        &self,
        employee_id: EmployeeId,
        email: impl Into<String>,
    ) -> Result<Application, OnboardingError> {
        if self
            .store
            .find_application_by_employee(employee_id)
            .await?
            .is_some()
        {
            return Err(OnboardingError::DuplicateApplication(
                employee_id.to_string(),
            ));
        }
        let application = Application::for_registration(employee_id, email);
        self.store.insert_application(&application).await?;
        info!(application_id = %application.id, %employee_id, "application opened");
        Ok(application)
    }

    /// Retrieves an application by ID
    pub async fn get_application(
        &self,
        id: ApplicationId,
    ) -> Result<Application, OnboardingError> {
        self.load(id).await
    }

    /// Lists applications, optionally filtered by status
    pub async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, OnboardingError> {
        Ok(self.store.list_applications(status).await?)
    }

    /// Applies an employee profile patch
    #[instrument(skip(self, patch))]
    pub async fn update_application(
        &self,
        id: ApplicationId,
        patch: ProfilePatch,
    ) -> Result<Application, OnboardingError> {
        let mut application = self.load(id).await?;
        application.apply_patch(patch)?;
        Ok(self.store.save_application(&application).await?)
    }

    /// Runs the submission gate and moves the application to Pending
    #[instrument(skip(self))]
    pub async fn submit_application(
        &self,
        id: ApplicationId,
    ) -> Result<Application, OnboardingError> {
        let mut application = self.load(id).await?;
        application.submit()?;
        let saved = self.store.save_application(&application).await?;
        info!(application_id = %id, "application submitted for review");
        Ok(saved)
    }

    /// Applies an HR decision to a pending application
    ///
    /// Approval projects the finalized profile onto the employee record and
    /// persists application and employee through one atomic store call, so a
    /// missing employee aborts the approval before anything is written.
    #[instrument(skip(self, decision))]
    pub async fn decide_application(
        &self,
        id: ApplicationId,
        decision: ReviewDecision,
    ) -> Result<Application, OnboardingError> {
        let mut application = self.load(id).await?;
        application.decide(&decision)?;

        if decision.is_approval() {
            let mut employee = self.load_employee(application.employee_id).await?;
            sync::project_onto_employee(&mut employee, &application);
            let saved = self.store.save_approval(&application, &employee).await?;
            info!(
                application_id = %id,
                employee_id = %employee.id,
                "application approved; employee record synchronized"
            );
            Ok(saved)
        } else {
            let saved = self.store.save_application(&application).await?;
            info!(application_id = %id, "application rejected");
            Ok(saved)
        }
    }

    /// Records an uploaded file path for a chain document
    ///
    /// The stored-file path comes from the file-storage collaborator; this
    /// transition produces the Pending record HR decides on.
    #[instrument(skip(self, url))]
    pub async fn record_document_upload(
        &self,
        id: ApplicationId,
        name: DocumentName,
        url: impl Into<String>,
    ) -> Result<Application, OnboardingError> {
        let mut application = self.load(id).await?;
        let wa = application
            .work_authorization
            .as_mut()
            .ok_or_else(|| OnboardingError::DocumentNotFound {
                name: name.to_string(),
            })?;
        wa.record_upload(name, url)?;
        application.touch();
        let saved = self.store.save_application(&application).await?;
        info!(application_id = %id, document = %name, "document uploaded");
        Ok(saved)
    }

    /// Applies an HR decision to a pending chain document
    #[instrument(skip(self, decision))]
    pub async fn decide_document(
        &self,
        id: ApplicationId,
        name: DocumentName,
        decision: ReviewDecision,
    ) -> Result<Application, OnboardingError> {
        let mut application = self.load(id).await?;
        let wa = application
            .work_authorization
            .as_mut()
            .ok_or_else(|| OnboardingError::PendingDocumentNotFound {
                name: name.to_string(),
            })?;
        wa.decide_document(name, &decision)?;
        application.touch();
        let saved = self.store.save_application(&application).await?;
        info!(application_id = %id, document = %name, "document decision recorded");
        Ok(saved)
    }

    /// Finds applications whose chain matches every criterion
    pub async fn search_applications(
        &self,
        criteria: Vec<DocumentCriterion>,
    ) -> Result<Vec<Application>, OnboardingError> {
        if criteria.is_empty() {
            return Err(OnboardingError::Validation(
                "at least one document criterion is required".to_string(),
            ));
        }
        Ok(self.store.search_by_documents(&criteria).await?)
    }

    async fn load(&self, id: ApplicationId) -> Result<Application, OnboardingError> {
        self.store.get_application(id).await.map_err(|e| match e {
            PortError::NotFound { .. } => OnboardingError::ApplicationNotFound(id.to_string()),
            other => other.into(),
        })
    }

    async fn load_employee(&self, id: EmployeeId) -> Result<Employee, OnboardingError> {
        self.store.get_employee(id).await.map_err(|e| match e {
            PortError::NotFound { .. } => OnboardingError::EmployeeNotFound(id.to_string()),
            other => other.into(),
        })
    }
}
