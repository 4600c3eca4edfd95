//! HTTP API Layer
//!
//! This crate provides the REST API for the onboarding system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers wired to the `ReviewService`
//! - **Middleware**: Authentication, authorization, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses with structured detail
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use interface_api::create_router;
//!
//! let store = Arc::new(PgOnboardingStore::new(pool));
//! let app = create_router(store, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_onboarding::{OnboardingStore, ReviewService};

use crate::config::ApiConfig;
use crate::handlers::{applications, health};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
///
/// Services receive the storage port as `Arc<dyn OnboardingStore>`, so the
/// same router wiring serves the Postgres adapter in production and the mock
/// adapter in tests.
#[derive(Clone)]
pub struct AppState {
    pub service: ReviewService,
    pub store: Arc<dyn OnboardingStore>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `store` - Onboarding storage adapter
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(store: Arc<dyn OnboardingStore>, config: ApiConfig) -> Router {
    let state = AppState {
        service: ReviewService::new(store.clone()),
        store,
        config,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Application routes
    let application_routes = Router::new()
        .route("/", post(applications::open_application))
        .route("/", get(applications::list_applications))
        .route("/search", post(applications::search_applications))
        .route("/:id", get(applications::get_application))
        .route("/:id", put(applications::update_application))
        .route("/:id/submit", post(applications::submit_application))
        .route("/:id/decision", post(applications::decide_application))
        .route("/:id/documents/:name", post(applications::upload_document))
        .route(
            "/:id/documents/:name/decision",
            post(applications::decide_document),
        );

    // Protected API routes
    let api_routes = Router::new()
        .nest("/applications", application_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
