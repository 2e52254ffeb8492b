//! Integration tests for gift list provisioning and lifecycle.

mod common;

use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn test_my_list_provisions_once() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let user = TestUser::new("Alice");

    let request = request_with_auth(Method::GET, "/api/v1/lists/me", &user.token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["owner_id"], user.id.to_string());
    assert!(body["title"].as_str().unwrap().contains("Alice"));
    let first_id = body["id"].as_str().unwrap().to_string();

    // A second access returns the same list, not a new one
    let request = request_with_auth(Method::GET, "/api/v1/lists/me", &user.token);
    let response = app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["id"], first_id);
}

#[tokio::test]
async fn test_rename_list_owner_only() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let friend = TestUser::new("Bob");
    connect_users(&app, &owner, &friend).await;
    let list_id = get_own_list_id(&app, &owner).await;

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/lists/{}", list_id),
        &friend.token,
        &serde_json::json!({ "title": "Not yours" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/lists/{}", list_id),
        &owner.token,
        &serde_json::json!({ "title": "Birthday 2026", "description": "Hints welcome" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["title"], "Birthday 2026");
    assert_eq!(body["description"], "Hints welcome");
}

#[tokio::test]
async fn test_delete_list_cascades_ideas_and_claims() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let friend = TestUser::new("Bob");
    connect_users(&app, &owner, &friend).await;
    let list_id = get_own_list_id(&app, &owner).await;
    let idea_id = create_idea(&app, &owner, list_id, "Lamp").await;

    let request = request_with_auth(
        Method::POST,
        &format!("/api/v1/ideas/{}/claim", idea_id),
        &friend.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = request_with_auth(
        Method::DELETE,
        &format!("/api/v1/lists/{}", list_id),
        &owner.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = request_with_auth(
        Method::GET,
        &format!("/api/v1/ideas?list_id={}", list_id),
        &friend.token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_list_update_rejected() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let list_id = get_own_list_id(&app, &owner).await;

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/lists/{}", list_id),
        &owner.token,
        &serde_json::json!({}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
