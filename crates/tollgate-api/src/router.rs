//! Route definitions for the Tollgate HTTP API.
//!
//! Auth routes are mounted under `/api/v1/auth`; health sits at the root.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route and the shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(health_routes())
        .with_state(state)
}

/// Register, token, verify, refresh
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth", post(handlers::auth::register))
        .route("/api/v1/auth/", post(handlers::auth::register))
        .route("/api/v1/auth/token", get(handlers::auth::token))
        .route("/api/v1/auth/verify", get(handlers::auth::verify))
        .route("/api/v1/auth/refresh", post(handlers::auth::refresh))
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::health))
        .route("/healthz", get(handlers::health::health))
}
