//! PostgreSQL onboarding store
//!
//! Implements the `OnboardingStore` port over SQLx. Aggregates are stored
//! one row each: key columns for lookups and indexing, the full aggregate as
//! a JSONB body. The version column backs the optimistic-concurrency guard;
//! a save whose WHERE clause matches no row is either stale or targeting a
//! missing aggregate, and the store tells the two apart before reporting.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, QueryBuilder, Row};
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ApplicationId, DomainPort, EmployeeId, HealthCheckResult, HealthCheckable,
    PortError,
};
use domain_employee::Employee;
use domain_onboarding::{Application, ApplicationStatus, DocumentCriterion, OnboardingStore};

use crate::error::DatabaseError;

const SELECT_APPLICATION: &str = "SELECT version, body FROM applications";

/// PostgreSQL-backed implementation of the `OnboardingStore` port
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants: unique-constraint
/// violations and stale versions become `Conflict`, connection failures
/// become `Connection`, and everything else surfaces as `Internal`.
#[derive(Debug, Clone)]
pub struct PgOnboardingStore {
    pool: PgPool,
}

impl PgOnboardingStore {
    /// Creates a new store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn decode_application(
        version: i64,
        body: serde_json::Value,
    ) -> Result<Application, PortError> {
        let mut application: Application = serde_json::from_value(body).map_err(|e| {
            PortError::internal(format!("corrupt application body: {e}"))
        })?;
        application.version = version as u64;
        Ok(application)
    }

    fn decode_employee(body: serde_json::Value) -> Result<Employee, PortError> {
        serde_json::from_value(body)
            .map_err(|e| PortError::internal(format!("corrupt employee body: {e}")))
    }

    fn encode<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, PortError> {
        serde_json::to_value(value)
            .map_err(|e| PortError::internal(format!("serialization failed: {e}")))
    }

    fn map_sqlx(error: sqlx::Error) -> PortError {
        DatabaseError::from(&error).into()
    }

    async fn fetch_application_where(
        &self,
        clause: &str,
        id: uuid::Uuid,
    ) -> Result<Option<Application>, PortError> {
        let row = sqlx::query(&format!("{SELECT_APPLICATION} WHERE {clause} = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::map_sqlx)?;
        row.map(|r| Self::decode_application(r.get("version"), r.get("body")))
            .transpose()
    }
}

impl DomainPort for PgOnboardingStore {}

#[async_trait]
impl HealthCheckable for PgOnboardingStore {
    async fn health_check(&self) -> HealthCheckResult {
        let started = std::time::Instant::now();
        let status = match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => AdapterHealth::Healthy,
            Err(_) => AdapterHealth::Unhealthy,
        };
        HealthCheckResult {
            adapter_id: "pg-onboarding-store".to_string(),
            status,
            latency_ms: started.elapsed().as_millis() as u64,
            message: None,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl OnboardingStore for PgOnboardingStore {
    #[instrument(skip(self))]
    async fn get_application(&self, id: ApplicationId) -> Result<Application, PortError> {
        self.fetch_application_where("application_id", *id.as_uuid())
            .await?
            .ok_or_else(|| PortError::not_found("Application", id))
    }

    #[instrument(skip(self))]
    async fn find_application_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Option<Application>, PortError> {
        self.fetch_application_where("employee_id", *employee_id.as_uuid())
            .await
    }

    #[instrument(skip(self))]
    async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, PortError> {
        let mut builder = QueryBuilder::new(SELECT_APPLICATION);
        if let Some(status) = status {
            builder.push(" WHERE status = ");
            builder.push_bind(status.to_string());
        }
        builder.push(" ORDER BY created_at");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(Self::map_sqlx)?;
        rows.into_iter()
            .map(|r| Self::decode_application(r.get("version"), r.get("body")))
            .collect()
    }

    #[instrument(skip(self, application))]
    async fn insert_application(&self, application: &Application) -> Result<(), PortError> {
        let body = Self::encode(application)?;
        sqlx::query(
            r#"
            INSERT INTO applications (
                application_id, employee_id, status, version, body,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(application.id.as_uuid())
        .bind(application.employee_id.as_uuid())
        .bind(application.status.to_string())
        .bind(application.version as i64)
        .bind(body)
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Self::map_sqlx)?;

        debug!(application_id = %application.id, "application inserted");
        Ok(())
    }

    #[instrument(skip(self, application))]
    async fn save_application(&self, application: &Application) -> Result<Application, PortError> {
        let mut saved = application.clone();
        saved.version += 1;
        let body = Self::encode(&saved)?;

        let result = sqlx::query(
            r#"
            UPDATE applications
            SET status = $3, version = $4, body = $5, updated_at = $6
            WHERE application_id = $1 AND version = $2
            "#,
        )
        .bind(saved.id.as_uuid())
        .bind(application.version as i64)
        .bind(saved.status.to_string())
        .bind(saved.version as i64)
        .bind(body)
        .bind(saved.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Self::map_sqlx)?;

        if result.rows_affected() == 0 {
            // stale version or missing row; look once more to report which
            return match self.fetch_application_where("application_id", *saved.id.as_uuid()).await? {
                Some(_) => Err(DatabaseError::stale(
                    "Application",
                    saved.id,
                    application.version,
                )
                .into()),
                None => Err(PortError::not_found("Application", saved.id)),
            };
        }
        Ok(saved)
    }

    #[instrument(skip(self, criteria))]
    async fn search_by_documents(
        &self,
        criteria: &[DocumentCriterion],
    ) -> Result<Vec<Application>, PortError> {
        let mut builder = QueryBuilder::new(SELECT_APPLICATION);
        builder.push(" WHERE TRUE");
        for criterion in criteria {
            // JSONB containment against the chain array; criteria AND-combine
            builder.push(" AND body -> 'workAuthorization' -> 'documents' @> ");
            builder.push_bind(Self::encode(&[criterion])?);
        }
        builder.push(" ORDER BY created_at");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(Self::map_sqlx)?;
        rows.into_iter()
            .map(|r| Self::decode_application(r.get("version"), r.get("body")))
            .collect()
    }

    #[instrument(skip(self))]
    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, PortError> {
        let row = sqlx::query("SELECT body FROM employees WHERE employee_id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::map_sqlx)?
            .ok_or_else(|| PortError::not_found("Employee", id))?;
        Self::decode_employee(row.get("body"))
    }

    #[instrument(skip(self, employee))]
    async fn insert_employee(&self, employee: &Employee) -> Result<(), PortError> {
        let body = Self::encode(employee)?;
        sqlx::query(
            r#"
            INSERT INTO employees (employee_id, email, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(employee.id.as_uuid())
        .bind(&employee.email)
        .bind(body)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Self::map_sqlx)?;

        debug!(employee_id = %employee.id, "employee inserted");
        Ok(())
    }

    #[instrument(skip(self, application, employee))]
    async fn save_approval(
        &self,
        application: &Application,
        employee: &Employee,
    ) -> Result<Application, PortError> {
        let mut saved = application.clone();
        saved.version += 1;
        let application_body = Self::encode(&saved)?;
        let employee_body = Self::encode(employee)?;

        let mut tx = self.pool.begin().await.map_err(Self::map_sqlx)?;

        let employee_update = sqlx::query(
            "UPDATE employees SET body = $2, updated_at = $3 WHERE employee_id = $1",
        )
        .bind(employee.id.as_uuid())
        .bind(employee_body)
        .bind(employee.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(Self::map_sqlx)?;

        if employee_update.rows_affected() == 0 {
            // rollback on drop; the status flip never persists without the
            // projection
            return Err(PortError::not_found("Employee", employee.id));
        }

        let application_update = sqlx::query(
            r#"
            UPDATE applications
            SET status = $3, version = $4, body = $5, updated_at = $6
            WHERE application_id = $1 AND version = $2
            "#,
        )
        .bind(saved.id.as_uuid())
        .bind(application.version as i64)
        .bind(saved.status.to_string())
        .bind(saved.version as i64)
        .bind(application_body)
        .bind(saved.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(Self::map_sqlx)?;

        if application_update.rows_affected() == 0 {
            return Err(DatabaseError::stale("Application", saved.id, application.version).into());
        }

        tx.commit().await.map_err(Self::map_sqlx)?;
        debug!(
            application_id = %saved.id,
            employee_id = %employee.id,
            "approval persisted"
        );
        Ok(saved)
    }
}
