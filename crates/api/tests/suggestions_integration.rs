//! Integration tests for suggestion review and promotion.

mod common;

use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use common::*;

async fn suggest(
    app: &axum::Router,
    suggester: &TestUser,
    list_id: uuid::Uuid,
    title: &str,
) -> serde_json::Value {
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/suggestions",
        &suggester.token,
        &serde_json::json!({ "list_id": list_id, "title": title }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    parse_response_body(response).await
}

#[tokio::test]
async fn test_suggest_requires_connection() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let friend = TestUser::new("Bob");
    let stranger = TestUser::new("Mallory");
    connect_users(&app, &owner, &friend).await;
    let list_id = get_own_list_id(&app, &owner).await;

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/suggestions",
        &stranger.token,
        &serde_json::json!({ "list_id": list_id, "title": "Spam" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The owner cannot suggest to their own list either
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/suggestions",
        &owner.token,
        &serde_json::json!({ "list_id": list_id, "title": "Self-suggestion" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = suggest(&app, &friend, list_id, "Board game").await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["created_by"], friend.id.to_string());
}

#[tokio::test]
async fn test_pending_listing_owner_only() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let friend = TestUser::new("Bob");
    connect_users(&app, &owner, &friend).await;
    let list_id = get_own_list_id(&app, &owner).await;
    suggest(&app, &friend, list_id, "Scarf").await;

    // The suggester cannot browse the review queue
    let request = request_with_auth(
        Method::GET,
        &format!("/api/v1/lists/{}/suggestions", list_id),
        &friend.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = request_with_auth(
        Method::GET,
        &format!("/api/v1/lists/{}/suggestions", list_id),
        &owner.token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let pending = body.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["title"], "Scarf");
}

#[tokio::test]
async fn test_accept_spawns_visible_idea() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let friend = TestUser::new("Bob");
    connect_users(&app, &owner, &friend).await;
    let list_id = get_own_list_id(&app, &owner).await;

    let suggestion = suggest(&app, &friend, list_id, "Socks").await;
    let suggestion_id = suggestion["id"].as_str().unwrap().to_string();

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/suggestions/{}", suggestion_id),
        &owner.token,
        &serde_json::json!({ "action": "accept" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "accepted");
    let idea_id = body["idea_id"].as_str().expect("Accept must spawn an idea");

    // The spawned idea is a normal, owner-visible entry
    let request = request_with_auth(
        Method::GET,
        &format!("/api/v1/ideas?list_id={}", list_id),
        &owner.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    let ideas = body.as_array().unwrap();
    let spawned = ideas
        .iter()
        .find(|i| i["id"] == idea_id)
        .expect("Spawned idea missing from owner listing");
    assert_eq!(spawned["title"], "Socks");
    assert_eq!(spawned["hidden_for_owner"], false);

    // The review queue is now empty
    let request = request_with_auth(
        Method::GET,
        &format!("/api/v1/lists/{}/suggestions", list_id),
        &owner.token,
    );
    let response = app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_double_review_conflicts() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let friend = TestUser::new("Bob");
    connect_users(&app, &owner, &friend).await;
    let list_id = get_own_list_id(&app, &owner).await;

    let suggestion = suggest(&app, &friend, list_id, "Mug").await;
    let suggestion_id = suggestion["id"].as_str().unwrap().to_string();

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/suggestions/{}", suggestion_id),
        &owner.token,
        &serde_json::json!({ "action": "accept" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Accepting again conflicts and must not spawn a second idea
    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/suggestions/{}", suggestion_id),
        &owner.token,
        &serde_json::json!({ "action": "accept" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Rejecting after acceptance conflicts too
    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/suggestions/{}", suggestion_id),
        &owner.token,
        &serde_json::json!({ "action": "reject" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let request = request_with_auth(
        Method::GET,
        &format!("/api/v1/ideas?list_id={}", list_id),
        &owner.token,
    );
    let response = app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_reject_is_terminal_and_spawns_nothing() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let friend = TestUser::new("Bob");
    connect_users(&app, &owner, &friend).await;
    let list_id = get_own_list_id(&app, &owner).await;

    let suggestion = suggest(&app, &friend, list_id, "Candles").await;
    let suggestion_id = suggestion["id"].as_str().unwrap().to_string();

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/suggestions/{}", suggestion_id),
        &owner.token,
        &serde_json::json!({ "action": "reject" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "rejected");
    assert!(body.get("idea_id").is_none());

    let request = request_with_auth(
        Method::GET,
        &format!("/api/v1/ideas?list_id={}", list_id),
        &owner.token,
    );
    let response = app.oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_only_owner_reviews() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let friend = TestUser::new("Bob");
    connect_users(&app, &owner, &friend).await;
    let list_id = get_own_list_id(&app, &owner).await;

    let suggestion = suggest(&app, &friend, list_id, "Kite").await;
    let suggestion_id = suggestion["id"].as_str().unwrap().to_string();

    // The suggester cannot review their own suggestion
    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/suggestions/{}", suggestion_id),
        &friend.token,
        &serde_json::json!({ "action": "accept" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
