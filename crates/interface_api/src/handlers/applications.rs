//! Onboarding application handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::{ApplicationId, EmployeeId};
use domain_onboarding::{ApplicationStatus, DocumentName, ProfilePatch, ReviewDecision};

use crate::auth::{has_permission, permissions, Claims};
use crate::dto::applications::*;
use crate::error::ApiError;
use crate::AppState;

fn require_review(claims: &Claims) -> Result<(), ApiError> {
    if has_permission(claims, permissions::ONBOARDING_REVIEW) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "requires {}",
            permissions::ONBOARDING_REVIEW
        )))
    }
}

fn parse_document_name(raw: &str) -> Result<DocumentName, ApiError> {
    raw.parse::<DocumentName>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn parse_status(raw: &str) -> Result<ApplicationStatus, ApiError> {
    match raw {
        "NeverSubmitted" => Ok(ApplicationStatus::NeverSubmitted),
        "Pending" => Ok(ApplicationStatus::Pending),
        "Approved" => Ok(ApplicationStatus::Approved),
        "Rejected" => Ok(ApplicationStatus::Rejected),
        other => Err(ApiError::BadRequest(format!("invalid status: {other}"))),
    }
}

/// Opens an application at registration time
pub async fn open_application(
    State(state): State<AppState>,
    Json(request): Json<OpenApplicationRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let application = state
        .service
        .open_application(EmployeeId::from(request.employee_id), request.email)
        .await?;
    Ok(Json(application.into()))
}

/// Lists applications, optionally filtered by status (HR review queue)
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    require_review(&claims)?;
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let applications = state.service.list_applications(status).await?;
    Ok(Json(applications.into_iter().map(Into::into).collect()))
}

/// Gets an application by ID
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let application = state
        .service
        .get_application(ApplicationId::from(id))
        .await?;
    Ok(Json(application.into()))
}

/// Applies an employee profile patch
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let application = state
        .service
        .update_application(ApplicationId::from(id), patch)
        .await?;
    Ok(Json(application.into()))
}

/// Submits an application for HR review
pub async fn submit_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let application = state
        .service
        .submit_application(ApplicationId::from(id))
        .await?;
    Ok(Json(application.into()))
}

/// Records an HR decision on a pending application
pub async fn decide_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    require_review(&claims)?;
    let decision = ReviewDecision::from_parts(&request.decision, request.feedback.as_deref())?;
    let application = state
        .service
        .decide_application(ApplicationId::from(id), decision)
        .await?;
    Ok(Json(application.into()))
}

/// Records the stored path of an uploaded chain document
pub async fn upload_document(
    State(state): State<AppState>,
    Path((id, name)): Path<(Uuid, String)>,
    Json(request): Json<DocumentUploadRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let name = parse_document_name(&name)?;
    let application = state
        .service
        .record_document_upload(ApplicationId::from(id), name, request.url)
        .await?;
    Ok(Json(application.into()))
}

/// Records an HR decision on a pending chain document
pub async fn decide_document(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((id, name)): Path<(Uuid, String)>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    require_review(&claims)?;
    let name = parse_document_name(&name)?;
    let decision = ReviewDecision::from_parts(&request.decision, request.feedback.as_deref())?;
    let application = state
        .service
        .decide_document(ApplicationId::from(id), name, decision)
        .await?;
    Ok(Json(application.into()))
}

/// Searches applications by document name+status criteria (HR visa tracking)
pub async fn search_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    require_review(&claims)?;
    let applications = state.service.search_applications(request.criteria).await?;
    Ok(Json(applications.into_iter().map(Into::into).collect()))
}
