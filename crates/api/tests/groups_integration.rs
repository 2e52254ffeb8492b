//! Integration tests for group lifecycle and membership endpoints.

mod common;

use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn test_create_and_list_groups() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let slug = unique_slug("family");

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/groups",
        &owner.token,
        &serde_json::json!({ "name": "Family", "slug": slug }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "Family");
    assert_eq!(body["slug"], slug.as_str());
    assert_eq!(body["owner_id"], owner.id.to_string());

    // The creator shows up as a member of their own group
    let request = request_with_auth(Method::GET, "/api/v1/groups", &owner.token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let groups = body.as_array().unwrap();
    let created = groups
        .iter()
        .find(|g| g["slug"] == slug.as_str())
        .expect("Created group missing from listing");
    assert_eq!(created["member_count"], 1);
}

#[tokio::test]
async fn test_create_group_requires_auth() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let request = request_without_auth(Method::POST, "/api/v1/groups");
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_slug_conflicts() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let slug = unique_slug("book-club");

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/groups",
        &owner.token,
        &serde_json::json!({ "name": "Book Club", "slug": slug }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/groups",
        &owner.token,
        &serde_json::json!({ "name": "Another Club", "slug": slug }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_group_owner_only() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let member = TestUser::new("Bob");
    let group_id = connect_users(&app, &owner, &member).await;

    // A plain member cannot rename the group
    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/groups/{}", group_id),
        &member.token,
        &serde_json::json!({ "name": "Hijacked" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/groups/{}", group_id),
        &owner.token,
        &serde_json::json!({ "name": "Renamed" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "Renamed");
}

#[tokio::test]
async fn test_delete_group_cascades_memberships() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let member = TestUser::new("Bob");
    let group_id = connect_users(&app, &owner, &member).await;

    let request = request_with_auth(
        Method::DELETE,
        &format!("/api/v1/groups/{}", group_id),
        &owner.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Members no longer see the deleted group
    let request = request_with_auth(Method::GET, "/api/v1/groups", &member.token);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert!(!body
        .as_array()
        .unwrap()
        .iter()
        .any(|g| g["id"] == group_id.to_string()));
}

#[tokio::test]
async fn test_member_listing_requires_membership() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let member = TestUser::new("Bob");
    let stranger = TestUser::new("Mallory");
    let group_id = connect_users(&app, &owner, &member).await;

    let request = request_with_auth(
        Method::GET,
        &format!("/api/v1/groups/{}/members", group_id),
        &stranger.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = request_with_auth(
        Method::GET,
        &format!("/api/v1/groups/{}/members", group_id),
        &member.token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let members = body.as_array().unwrap();
    assert_eq!(members.len(), 2);
    let roles: Vec<&str> = members
        .iter()
        .map(|m| m["role"].as_str().unwrap())
        .collect();
    assert!(roles.contains(&"owner"));
    assert!(roles.contains(&"member"));
}

#[tokio::test]
async fn test_member_listing_carries_list_pointers() {
    let Some(pool) = try_create_test_pool().await else {
        return;
    };
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool);

    let owner = TestUser::new("Alice");
    let member = TestUser::new("Bob");
    let group_id = connect_users(&app, &owner, &member).await;

    // Provision Bob's list so the pointer exists
    let list_id = get_own_list_id(&app, &member).await;

    let request = request_with_auth(
        Method::GET,
        &format!("/api/v1/groups/{}/members", group_id),
        &owner.token,
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let bob = body
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["user_id"] == member.id.to_string())
        .expect("Bob missing from member listing");
    assert_eq!(bob["list"]["id"], list_id.to_string());
}
