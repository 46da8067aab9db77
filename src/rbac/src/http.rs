//! HTTP check surface
//!
//! ## Endpoints
//!
//! - `POST /v1/has-link` - group inheritance check
//! - `GET /health` - health check

use crate::error::RbacError;
use crate::manager::RoleManager;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    manager: Arc<dyn RoleManager>,
    start_time: Instant,
}

impl AppState {
    /// Create state around a role manager; uptime counts from now
    pub fn new(manager: Arc<dyn RoleManager>) -> Self {
        Self {
            manager,
            start_time: Instant::now(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application error type
#[derive(Debug)]
pub struct AppError(RbacError);

impl From<RbacError> for AppError {
    fn from(err: RbacError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self.0 {
            RbacError::UnsupportedDomain(_) => (StatusCode::BAD_REQUEST, "unsupported_domain"),
            RbacError::InvalidRef(_) => (StatusCode::BAD_REQUEST, "invalid_ref"),
            RbacError::NotImplemented { .. } => (StatusCode::NOT_IMPLEMENTED, "not_implemented"),
            RbacError::Directory(_) => (StatusCode::BAD_GATEWAY, "directory_error"),
            RbacError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: self.0.to_string(),
        });

        (status, body).into_response()
    }
}

/// Inheritance check request
#[derive(Debug, Serialize, Deserialize)]
pub struct HasLinkRequest {
    pub principal: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Inheritance check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HasLinkResponse {
    pub linked: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// POST /v1/has-link
async fn has_link(
    State(state): State<AppState>,
    Json(req): Json<HasLinkRequest>,
) -> Result<Json<HasLinkResponse>, AppError> {
    info!("hasLink check: principal={}, role={}", req.principal, req.role);

    let linked = state
        .manager
        .has_link(&req.principal, &req.role, req.domain.as_deref())
        .await
        .map_err(|e| {
            warn!("hasLink check failed: {}", e);
            e
        })?;

    Ok(Json(HasLinkResponse { linked }))
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: crate::VERSION.to_string(),
    })
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/v1/has-link", post(has_link))
        .route("/health", get(health_check))
        .layer(ServiceBuilder::new().layer(trace).layer(cors))
        .with_state(state)
}
