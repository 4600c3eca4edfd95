//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_onboarding::OnboardingError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        /// Structured detail, e.g. the dotted paths of empty fields
        details: Option<Vec<String>>,
    },
}

impl ApiError {
    /// Creates a validation error without structured detail
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: None,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
                None,
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg,
                None,
            ),
            ApiError::Validation { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message,
                details,
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Maps the domain taxonomy onto HTTP status codes
///
/// Validation failures become 422 (with the empty-field paths as structured
/// detail for incomplete submissions), absent or wrong-state entities 404,
/// state and version conflicts 409, storage failures 500.
impl From<OnboardingError> for ApiError {
    fn from(error: OnboardingError) -> Self {
        match error {
            OnboardingError::IncompleteApplication { missing } => ApiError::Validation {
                message: "application is incomplete".to_string(),
                details: Some(missing),
            },
            OnboardingError::DuplicateApplication(_) => ApiError::Conflict(error_message(&error)),
            OnboardingError::InvalidStatusTransition { .. }
            | OnboardingError::ApplicationNotEditable(_)
            | OnboardingError::DocumentNotSubmittable { .. } => {
                ApiError::Conflict(error_message(&error))
            }
            OnboardingError::Store(port) => port.into(),
            other if other.is_not_found() => ApiError::NotFound(error_message(&other)),
            other if other.is_validation() => ApiError::validation(error_message(&other)),
            other => ApiError::Internal(error_message(&other)),
        }
    }
}

impl From<PortError> for ApiError {
    fn from(error: PortError) -> Self {
        match &error {
            PortError::NotFound { .. } => ApiError::NotFound(error.to_string()),
            PortError::Conflict { .. } => ApiError::Conflict(error.to_string()),
            PortError::Validation { .. } => ApiError::validation(error.to_string()),
            _ => ApiError::Internal(error.to_string()),
        }
    }
}

fn error_message(error: &OnboardingError) -> String {
    error.to_string()
}
