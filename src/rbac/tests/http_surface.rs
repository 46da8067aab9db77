//! Integration tests for the HTTP check surface

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use catalog_rbac::http::{create_router, AppState, ErrorResponse, HasLinkResponse, HealthResponse};
use catalog_rbac::CatalogRoleManager;
use common::*;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let f = fixture(rooted_with_cyclic_branch());
    let manager = CatalogRoleManager::new(f.resolver);
    create_router(AppState::new(Arc::new(manager)))
}

async fn post_has_link<T: DeserializeOwned>(
    app: Router,
    body: serde_json::Value,
) -> (StatusCode, T) {
    let req = Request::builder()
        .method("POST")
        .uri("/v1/has-link")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_has_link_true_and_false() {
    let app = app();

    let (status, body): (_, HasLinkResponse) = post_has_link(
        app.clone(),
        json!({"principal": "user:default/tom", "role": "group:default/root"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.linked);

    let (status, body): (_, HasLinkResponse) = post_has_link(
        app,
        json!({"principal": "user:default/mike", "role": "group:default/team-a"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.linked);
}

#[tokio::test]
async fn test_domain_is_bad_request() {
    let (status, body): (_, ErrorResponse) = post_has_link(
        app(),
        json!({
            "principal": "user:default/tom",
            "role": "group:default/root",
            "domain": "tenant-a"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error, "unsupported_domain");
    assert_eq!(body.message, "domain argument is not supported.");
}

#[tokio::test]
async fn test_malformed_ref_is_bad_request() {
    let (status, body): (_, ErrorResponse) = post_has_link(
        app(),
        json!({"principal": "tom", "role": "group:default/root"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error, "invalid_ref");
}

#[tokio::test]
async fn test_health() {
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, catalog_rbac::VERSION);
}
