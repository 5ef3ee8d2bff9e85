//! Auth handlers: register, token, verify, refresh.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use tollgate_core::error::AppError;
use tollgate_core::types::Claims;

use crate::dto::request::{RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, RegisteredResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::{BasicCredentials, BearerToken};
use crate::state::AppState;

/// POST /api/v1/auth/
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisteredResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let email = req.email.trim().to_lowercase();
    state.session_manager.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            RegisteredResponse { email },
            "User registered",
        )),
    ))
}

/// GET /api/v1/auth/token
pub async fn token(
    State(state): State<AppState>,
    credentials: BasicCredentials,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let login = state
        .session_manager
        .login(&credentials.identifier, &credentials.secret)
        .await?;

    Ok(Json(ApiResponse::ok(login.tokens.into())))
}

/// GET /api/v1/auth/verify
pub async fn verify(
    State(state): State<AppState>,
    BearerToken(access_token): BearerToken,
) -> Result<Json<ApiResponse<Claims>>, ApiError> {
    let claims = state.session_manager.verify(&access_token).await?;
    Ok(Json(ApiResponse::ok(claims)))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(access_token): BearerToken,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tokens = state
        .session_manager
        .refresh(&access_token, &req.refresh_token)
        .await?;

    Ok(Json(ApiResponse::ok(tokens.into())))
}
