//! Integration tests for session handling and profile endpoints.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn test_profile_created_from_session() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let user = TestUser::new("Alice");

    // First authenticated request provisions the user row
    let request = request_with_auth(Method::GET, "/api/v1/profile", &user.token);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["name"], "Alice");
}

#[tokio::test]
async fn test_update_profile() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let user = TestUser::new("Alice");

    let request = json_request_with_auth(
        Method::PUT,
        "/api/v1/profile",
        &user.token,
        &serde_json::json!({
            "name": "Alice B.",
            "avatar_url": "https://example.com/a.png"
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "Alice B.");
    assert_eq!(body["avatar_url"], "https://example.com/a.png");

    let request = request_with_auth(Method::GET, "/api/v1/profile", &user.token);
    let response = app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "Alice B.");
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/profile")
        .header("Authorization", "Bearer not-a-real-token")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = request_without_auth(Method::GET, "/api/v1/profile");
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_endpoints_public() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    for path in ["/api/health", "/api/health/ready", "/api/health/live"] {
        let request = request_without_auth(Method::GET, path);
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{} not healthy", path);
    }
}
