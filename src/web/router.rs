//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_message, get_acceptance, list_messages, login, me, register, send_message,
    set_acceptance, username_check, verify, AppState,
};
use super::middleware::{create_cors_layer, jwt_auth, JwtState};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    cors_origins: &[String],
) -> Router {
    // Auth routes; /me requires a token, the rest are public
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/verify", post(verify))
        .route("/login", post(login))
        .route("/me", get(me));

    // Account settings routes (authentication required)
    let account_routes = Router::new().route("/acceptance", get(get_acceptance).post(set_acceptance));

    // API routes
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/account", account_routes)
        .route("/username-check", get(username_check))
        .route("/messages", get(list_messages))
        .route("/messages/:id", delete(delete_message))
        .route("/u/:username/messages", post(send_message));

    // Clone jwt_state for the middleware closure
    let jwt_state_for_middleware = jwt_state.clone();

    // Build the main router with middleware
    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state_for_middleware.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
