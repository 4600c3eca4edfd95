//! Employee domain errors

use thiserror::Error;

/// Errors that can occur in the employee domain
#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Employee is inactive: {0}")]
    EmployeeInactive(String),

    #[error("Invalid employee data: {0}")]
    InvalidData(String),
}
