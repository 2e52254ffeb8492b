use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{claims, groups, health, ideas, invites, lists, profile, suggestions};
use crate::services::{EmailService, RelayPushNotifier};
use domain::services::{MockPushNotifier, PushNotifier};
use shared::session::SessionKeys;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub session_keys: Arc<SessionKeys>,
    pub notifier: Arc<dyn PushNotifier>,
    pub email: EmailService,
}

pub fn create_app(config: Config, pool: PgPool) -> anyhow::Result<Router> {
    let config = Arc::new(config);

    let mut session_keys = SessionKeys::from_public_key(&config.session.public_key)?;
    session_keys.leeway_secs = config.session.leeway_secs;

    // Push is best-effort; without a relay the mock only logs
    let notifier: Arc<dyn PushNotifier> = if config.push.enabled {
        Arc::new(RelayPushNotifier::new(config.push.clone()))
    } else {
        Arc::new(MockPushNotifier::new())
    };

    let email = EmailService::new(config.email.clone());

    let state = AppState {
        pool,
        config: config.clone(),
        session_keys: Arc::new(session_keys),
        notifier,
        email,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Session-authenticated routes; each handler resolves the caller through
    // the CurrentUser extractor
    let api_routes = Router::new()
        // Group routes
        .route("/api/v1/groups", post(groups::create_group))
        .route("/api/v1/groups", get(groups::list_groups))
        .route("/api/v1/groups/:group_id", put(groups::update_group))
        .route("/api/v1/groups/:group_id", delete(groups::delete_group))
        .route(
            "/api/v1/groups/:group_id/members",
            get(groups::list_members),
        )
        // Invitation routes
        .route(
            "/api/v1/groups/:group_id/invites",
            post(invites::issue_invite),
        )
        .route("/api/v1/invites/:token", post(invites::redeem_invite))
        // Gift list routes
        .route("/api/v1/lists/me", get(lists::get_my_list))
        .route("/api/v1/lists/:list_id", put(lists::update_list))
        .route("/api/v1/lists/:list_id", delete(lists::delete_list))
        .route(
            "/api/v1/lists/:list_id/suggestions",
            get(suggestions::list_for_list),
        )
        // Idea routes
        .route("/api/v1/ideas", get(ideas::list_ideas))
        .route("/api/v1/ideas", post(ideas::create_idea))
        .route("/api/v1/ideas/:idea_id", put(ideas::update_idea))
        .route("/api/v1/ideas/:idea_id", delete(ideas::delete_idea))
        // Claim routes
        .route("/api/v1/ideas/:idea_id/claim", get(claims::get_claim_status))
        .route("/api/v1/ideas/:idea_id/claim", post(claims::toggle_claim))
        // Suggestion routes
        .route("/api/v1/suggestions", post(suggestions::create_suggestion))
        .route(
            "/api/v1/suggestions/:suggestion_id",
            put(suggestions::review_suggestion),
        )
        // Profile routes
        .route("/api/v1/profile", get(profile::get_profile))
        .route("/api/v1/profile", put(profile::update_profile));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        // Invite preview is public so the frontend can show the group
        // before asking the visitor to sign in
        .route("/api/v1/invites/:token", get(invites::preview_invite))
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    let router = Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state);

    Ok(router)
}
