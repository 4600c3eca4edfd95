//! Onboarding Domain Ports
//!
//! This module defines the port interface the onboarding domain needs from
//! its data source, enabling swappable implementations (internal database,
//! mock, etc.).
//!
//! # Architecture
//!
//! The `OnboardingStore` trait defines every storage operation the review
//! workflow requires. Adapters implement it:
//!
//! - **Internal Adapter**: PostgreSQL (infra_db)
//! - **Mock Adapter**: in-memory, for testing without external dependencies
//!
//! Saves are guarded by optimistic concurrency: the stored aggregate version
//! must match the version the caller loaded, otherwise the save fails with
//! `PortError::Conflict` and the caller must re-read and retry. Racing HR
//! decisions therefore surface as conflicts instead of lost updates.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_onboarding::ports::OnboardingStore;
//! use std::sync::Arc;
//!
//! pub struct ReviewService {
//!     store: Arc<dyn OnboardingStore>,
//! }
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{
    ApplicationId, DomainPort, EmployeeId, HealthCheckable, PortError,
};
use domain_employee::Employee;

use crate::application::{Application, ApplicationStatus};
use crate::document::{DocumentName, DocumentStatus};
use crate::work_authorization::{VisaType, WorkAuthorization};

/// One name+status pair matched against the document chain
///
/// Search criteria are AND-combined: an application matches only when every
/// criterion matches some record in its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCriterion {
    pub name: DocumentName,
    pub status: DocumentStatus,
}

impl DocumentCriterion {
    pub fn new(name: DocumentName, status: DocumentStatus) -> Self {
        Self { name, status }
    }

    /// Returns true when some record in the chain matches this criterion
    pub fn matches(&self, work_authorization: Option<&WorkAuthorization>) -> bool {
        work_authorization
            .map(|wa| {
                wa.documents
                    .iter()
                    .any(|d| d.name == self.name && d.status == self.status)
            })
            .unwrap_or(false)
    }
}

/// Visa metadata declared by the employee on the onboarding form
///
/// The declaration carries no documents; the chain is provisioned solely by
/// the review workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaDeclaration {
    pub visa_type: VisaType,
    #[serde(default)]
    pub visa_title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl VisaDeclaration {
    /// Builds a work-authorization record with an empty chain
    pub fn into_work_authorization(self) -> WorkAuthorization {
        WorkAuthorization::new(
            self.visa_type,
            self.visa_title,
            self.start_date,
            self.end_date,
        )
    }
}

/// Citizenship standing declared on the form
///
/// Visa details ride along only for work-authorization holders, so a
/// citizen declaration cannot smuggle in visa metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "visa")]
pub enum CitizenshipDeclaration {
    Citizen,
    #[serde(rename = "Green Card")]
    GreenCard,
    #[serde(rename = "Work Authorization")]
    WorkAuthorization(VisaDeclaration),
}

/// The port trait for onboarding storage operations
///
/// All methods are async and return `Result<T, PortError>` for consistent
/// error handling across adapter implementations.
#[async_trait]
pub trait OnboardingStore: DomainPort + HealthCheckable {
    /// Retrieves an application by ID
    async fn get_application(&self, id: ApplicationId) -> Result<Application, PortError>;

    /// Finds the application belonging to an employee, if any
    async fn find_application_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Option<Application>, PortError>;

    /// Lists applications, optionally filtered by status
    async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, PortError>;

    /// Inserts a new application
    ///
    /// Fails with `Conflict` when the employee already has one.
    async fn insert_application(&self, application: &Application) -> Result<(), PortError>;

    /// Saves an application, enforcing optimistic concurrency
    ///
    /// The stored version must equal `application.version`; the returned
    /// aggregate carries the bumped version.
    async fn save_application(&self, application: &Application) -> Result<Application, PortError>;

    /// Finds applications whose chain matches every criterion
    async fn search_by_documents(
        &self,
        criteria: &[DocumentCriterion],
    ) -> Result<Vec<Application>, PortError>;

    /// Retrieves an employee record by ID
    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, PortError>;

    /// Inserts a new employee record
    async fn insert_employee(&self, employee: &Employee) -> Result<(), PortError>;

    /// Persists an approved application and the projected employee together
    ///
    /// The write is atomic: either both records persist or neither does.
    /// Subject to the same version guard as `save_application`; returns the
    /// saved application with the bumped version.
    async fn save_approval(
        &self,
        application: &Application,
        employee: &Employee,
    ) -> Result<Application, PortError>;
}

/// Mock implementation of OnboardingStore for testing
///
/// Stores everything behind a single lock so `save_approval` is genuinely
/// atomic, mirroring the transactional guarantee of the database adapter.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    #[derive(Debug, Default)]
    struct MockState {
        applications: HashMap<ApplicationId, Application>,
        employees: HashMap<EmployeeId, Employee>,
    }

    /// In-memory mock implementation of OnboardingStore
    #[derive(Debug, Default, Clone)]
    pub struct MockOnboardingStore {
        state: Arc<Mutex<MockState>>,
    }

    impl MockOnboardingStore {
        /// Creates a new empty mock store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with employees for testing
        pub async fn with_employees(employees: Vec<Employee>) -> Self {
            let store = Self::new();
            {
                let mut state = store.state.lock().await;
                for employee in employees {
                    state.employees.insert(employee.id, employee);
                }
            }
            store
        }

        fn versioned_save(
            state: &mut MockState,
            application: &Application,
        ) -> Result<Application, PortError> {
            let stored = state
                .applications
                .get(&application.id)
                .ok_or_else(|| PortError::not_found("Application", application.id))?;
            if stored.version != application.version {
                return Err(PortError::conflict(format!(
                    "stale application version {} (stored {})",
                    application.version, stored.version
                )));
            }
            let mut saved = application.clone();
            saved.version += 1;
            state.applications.insert(saved.id, saved.clone());
            Ok(saved)
        }
    }

    impl DomainPort for MockOnboardingStore {}

    #[async_trait]
    impl HealthCheckable for MockOnboardingStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-onboarding-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl OnboardingStore for MockOnboardingStore {
        async fn get_application(&self, id: ApplicationId) -> Result<Application, PortError> {
            self.state
                .lock()
                .await
                .applications
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Application", id))
        }

        async fn find_application_by_employee(
            &self,
            employee_id: EmployeeId,
        ) -> Result<Option<Application>, PortError> {
            Ok(self
                .state
                .lock()
                .await
                .applications
                .values()
                .find(|a| a.employee_id == employee_id)
                .cloned())
        }

        async fn list_applications(
            &self,
            status: Option<ApplicationStatus>,
        ) -> Result<Vec<Application>, PortError> {
            let state = self.state.lock().await;
            let mut results: Vec<Application> = state
                .applications
                .values()
                .filter(|a| status.map_or(true, |s| a.status == s))
                .cloned()
                .collect();
            results.sort_by_key(|a| a.created_at);
            Ok(results)
        }

        async fn insert_application(&self, application: &Application) -> Result<(), PortError> {
            let mut state = self.state.lock().await;
            if state.applications.contains_key(&application.id) {
                return Err(PortError::conflict(format!(
                    "application {} already exists",
                    application.id
                )));
            }
            if state
                .applications
                .values()
                .any(|a| a.employee_id == application.employee_id)
            {
                return Err(PortError::conflict(format!(
                    "employee {} already has an application",
                    application.employee_id
                )));
            }
            state
                .applications
                .insert(application.id, application.clone());
            Ok(())
        }

        async fn save_application(
            &self,
            application: &Application,
        ) -> Result<Application, PortError> {
            let mut state = self.state.lock().await;
            Self::versioned_save(&mut state, application)
        }

        async fn search_by_documents(
            &self,
            criteria: &[DocumentCriterion],
        ) -> Result<Vec<Application>, PortError> {
            let state = self.state.lock().await;
            let mut results: Vec<Application> = state
                .applications
                .values()
                .filter(|a| {
                    criteria
                        .iter()
                        .all(|c| c.matches(a.work_authorization.as_ref()))
                })
                .cloned()
                .collect();
            results.sort_by_key(|a| a.created_at);
            Ok(results)
        }

        async fn get_employee(&self, id: EmployeeId) -> Result<Employee, PortError> {
            self.state
                .lock()
                .await
                .employees
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Employee", id))
        }

        async fn insert_employee(&self, employee: &Employee) -> Result<(), PortError> {
            let mut state = self.state.lock().await;
            if state.employees.contains_key(&employee.id) {
                return Err(PortError::conflict(format!(
                    "employee {} already exists",
                    employee.id
                )));
            }
            state.employees.insert(employee.id, employee.clone());
            Ok(())
        }

        async fn save_approval(
            &self,
            application: &Application,
            employee: &Employee,
        ) -> Result<Application, PortError> {
            let mut state = self.state.lock().await;
            if !state.employees.contains_key(&employee.id) {
                return Err(PortError::not_found("Employee", employee.id));
            }
            // One lock, both writes: the version check fails before any
            // mutation, so a stale approval leaves both records untouched.
            let saved = Self::versioned_save(&mut state, application)?;
            state.employees.insert(employee.id, employee.clone());
            Ok(saved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockOnboardingStore;
    use super::*;

    use crate::document::DocumentRecord;
    use crate::work_authorization::VisaType;

    fn application_with_chain(statuses: &[(DocumentName, DocumentStatus)]) -> Application {
        let mut app = Application::for_registration(EmployeeId::new(), "t@example.com");
        let mut wa = WorkAuthorization::new(VisaType::F1CptOpt, "OPT", None, None);
        wa.documents = statuses
            .iter()
            .map(|(name, status)| {
                let mut record = DocumentRecord::never_submitted(*name);
                record.status = *status;
                record
            })
            .collect();
        app.work_authorization = Some(wa);
        app
    }

    #[tokio::test]
    async fn test_mock_store_insert_and_get() {
        let store = MockOnboardingStore::new();
        let app = Application::for_registration(EmployeeId::new(), "a@example.com");
        store.insert_application(&app).await.unwrap();

        let retrieved = store.get_application(app.id).await.unwrap();
        assert_eq!(retrieved.id, app.id);
        assert_eq!(retrieved.version, 0);
    }

    #[tokio::test]
    async fn test_mock_store_rejects_duplicate_per_employee() {
        let store = MockOnboardingStore::new();
        let employee_id = EmployeeId::new();
        let first = Application::for_registration(employee_id, "a@example.com");
        let second = Application::for_registration(employee_id, "a@example.com");

        store.insert_application(&first).await.unwrap();
        let err = store.insert_application(&second).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_mock_store_version_guard() {
        let store = MockOnboardingStore::new();
        let app = Application::for_registration(EmployeeId::new(), "a@example.com");
        store.insert_application(&app).await.unwrap();

        let saved = store.save_application(&app).await.unwrap();
        assert_eq!(saved.version, 1);

        // second writer still holds version 0
        let err = store.save_application(&app).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_mock_store_save_approval_requires_employee() {
        let store = MockOnboardingStore::new();
        let app = Application::for_registration(EmployeeId::new(), "a@example.com");
        store.insert_application(&app).await.unwrap();

        let employee = Employee::provision("a@example.com");
        let err = store.save_approval(&app, &employee).await.unwrap_err();
        assert!(err.is_not_found());

        // the application was not touched by the failed approval
        let stored = store.get_application(app.id).await.unwrap();
        assert_eq!(stored.version, 0);
    }

    #[tokio::test]
    async fn test_search_criteria_and_combine() {
        let store = MockOnboardingStore::new();
        let both = application_with_chain(&[
            (DocumentName::OptReceipt, DocumentStatus::Approved),
            (DocumentName::I983, DocumentStatus::Pending),
        ]);
        let only_first =
            application_with_chain(&[(DocumentName::OptReceipt, DocumentStatus::Approved)]);
        store.insert_application(&both).await.unwrap();
        store.insert_application(&only_first).await.unwrap();

        let criteria = [
            DocumentCriterion::new(DocumentName::OptReceipt, DocumentStatus::Approved),
            DocumentCriterion::new(DocumentName::I983, DocumentStatus::Pending),
        ];
        let results = store.search_by_documents(&criteria).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, both.id);
    }

    #[tokio::test]
    async fn test_mock_store_health_check() {
        let store = MockOnboardingStore::new();
        let result = store.health_check().await;
        assert_eq!(result.status, core_kernel::AdapterHealth::Healthy);
    }
}
