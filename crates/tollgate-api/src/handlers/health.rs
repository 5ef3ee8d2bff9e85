//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /healthz and GET /
///
/// Answers 503 while the revocation store is unreachable, since no token
/// can be verified then.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let store = match state.store.health_check().await {
        Ok(reachable) => reachable,
        Err(e) => {
            warn!(error = %e, "Revocation store health check failed");
            false
        }
    };

    let body = HealthResponse {
        status: if store { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store,
    };

    if store {
        (StatusCode::OK, Json(ApiResponse::ok(body)))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::failed(body, "Revocation store unreachable")),
        )
    }
}
