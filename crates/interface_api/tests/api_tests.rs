//! HTTP-level tests for the onboarding API
//!
//! Drives the full router (auth middleware included) against the in-memory
//! mock store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use domain_employee::Employee;
use domain_onboarding::ports::mock::MockOnboardingStore;
use interface_api::auth::create_token;
use interface_api::config::ApiConfig;
use interface_api::create_router;

const JWT_SECRET: &str = "test-secret";

async fn test_app() -> (Router, Employee) {
    let employee = Employee::provision("lena@corp.example.com");
    let store = MockOnboardingStore::with_employees(vec![employee.clone()]).await;
    let config = ApiConfig {
        jwt_secret: JWT_SECRET.to_string(),
        ..Default::default()
    };
    (create_router(Arc::new(store), config), employee)
}

fn token_for(role: &str) -> String {
    create_token("user-1", vec![role.to_string()], JWT_SECRET, 3600).unwrap()
}

fn authed_request(method: &str, uri: &str, role: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", token_for(role)),
        )
        .header(header::CONTENT_TYPE, "application/json");
    match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn complete_patch() -> Value {
    json!({
        "firstName": "Lena",
        "lastName": "Park",
        "cellPhone": "555-300-4000",
        "workPhone": "555-300-4001",
        "ssn": "765-43-2109",
        "dateOfBirth": "1995-09-12",
        "gender": "Female",
        "address": {
            "building": "9",
            "street": "Cedar Ln",
            "city": "Portland",
            "state": "OR",
            "zip": "97201"
        },
        "citizenship": {
            "status": "Work Authorization",
            "visa": {
                "visaType": "F1(CPT/OPT)",
                "visaTitle": "OPT",
                "startDate": "2026-03-01",
                "endDate": "2027-03-01"
            }
        }
    })
}

async fn open_application(app: &Router, employee: &Employee) -> Uuid {
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/v1/applications",
            "employee",
            Some(json!({
                "employeeId": employee.id.as_uuid(),
                "email": employee.email,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    body["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _) = test_app().await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_requires_token() {
    let (app, _) = test_app().await;
    let response = app
        .oneshot(
            Request::get("/api/v1/applications")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_decision_requires_review_permission() {
    let (app, employee) = test_app().await;
    let id = open_application(&app, &employee).await;

    let response = app
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/applications/{id}/decision"),
            "employee",
            Some(json!({"decision": "Approved"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_incomplete_submission_returns_empty_field_paths() {
    let (app, employee) = test_app().await;
    let id = open_application(&app, &employee).await;

    let response = app
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/applications/{id}/submit"),
            "employee",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response_json(response).await;
    assert_eq!(body["error"], "validation_error");
    let details: Vec<String> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(details.contains(&"firstName".to_string()));
    assert!(details.contains(&"address.city".to_string()));
}

#[tokio::test]
async fn test_patch_rejects_protected_fields() {
    let (app, employee) = test_app().await;
    let id = open_application(&app, &employee).await;

    let response = app
        .oneshot(authed_request(
            "PUT",
            &format!("/api/v1/applications/{id}"),
            "employee",
            Some(json!({"status": "Approved"})),
        ))
        .await
        .unwrap();
    // deny_unknown_fields fails JSON extraction before any handler runs
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_full_review_flow_over_http() {
    let (app, employee) = test_app().await;
    let id = open_application(&app, &employee).await;

    // employee completes and submits the profile
    let response = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/api/v1/applications/{id}"),
            "employee",
            Some(complete_patch()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/applications/{id}/submit"),
            "employee",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // HR approves; the chain is seeded
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/applications/{id}/decision"),
            "hr",
            Some(json!({"decision": "Approved"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "Approved");
    assert_eq!(
        body["workAuthorization"]["documents"][0]["name"],
        "OPT Receipt"
    );

    // employee uploads the OPT Receipt (path comes from file storage)
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/applications/{id}/documents/OPT%20Receipt"),
            "employee",
            Some(json!({"url": "/files/opt.pdf"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // HR rejects with feedback, then the employee re-uploads
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/applications/{id}/documents/OPT%20Receipt/decision"),
            "hr",
            Some(json!({"decision": "Rejected", "feedback": "blurry scan"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(
        body["workAuthorization"]["documents"][0]["status"],
        "Rejected"
    );

    // rejection without feedback is a validation error
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/applications/{id}/documents/OPT%20Receipt/decision"),
            "hr",
            Some(json!({"decision": "Rejected"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/applications/{id}/documents/OPT%20Receipt"),
            "employee",
            Some(json!({"url": "/files/opt-v2.pdf"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // HR approves; the next stage appears
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/applications/{id}/documents/OPT%20Receipt/decision"),
            "hr",
            Some(json!({"decision": "Approved"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["workAuthorization"]["documents"][1]["name"], "I-983");

    // HR search finds the application by chain state
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/v1/applications/search",
            "hr",
            Some(json!({
                "criteria": [
                    {"name": "OPT Receipt", "status": "Approved"},
                    {"name": "I-983", "status": "NeverSubmitted"}
                ]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}
