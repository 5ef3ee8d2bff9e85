//! `Authorization` header extractors for the Basic and Bearer schemes.
//!
//! Both reject a missing header, an unreadable header, or a different
//! scheme with `InvalidAuthScheme`. Scheme keywords match case-insensitively.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use tollgate_core::error::AppError;

use crate::error::ApiError;

/// Raw value of `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct BearerToken(pub String);

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Decoded `Authorization: Basic base64(identifier:secret)`.
#[derive(Clone)]
pub struct BasicCredentials {
    pub identifier: String,
    pub secret: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

/// Split `header` into scheme and value, requiring `scheme`.
pub fn parse_authorization<'a>(
    header: Option<&'a str>,
    scheme: &str,
) -> Result<&'a str, AppError> {
    let header = header
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::invalid_auth_scheme("Missing Authorization header"))?;

    let (given, value) = header.split_once(' ').ok_or_else(|| {
        AppError::invalid_auth_scheme(format!("Expected '{scheme} <credentials>'"))
    })?;

    if !given.eq_ignore_ascii_case(scheme) {
        return Err(AppError::invalid_auth_scheme(format!(
            "Unsupported authorization scheme, expected {scheme}"
        )));
    }

    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::invalid_auth_scheme("Empty credentials"));
    }
    Ok(value)
}

fn authorization_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parse_authorization(authorization_header(parts), "Bearer")?;
        Ok(Self(token.to_string()))
    }
}

impl<S> FromRequestParts<S> for BasicCredentials
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let encoded = parse_authorization(authorization_header(parts), "Basic")?;
        Ok(decode_basic(encoded)?)
    }
}

fn decode_basic(encoded: &str) -> Result<BasicCredentials, AppError> {
    let bad = || AppError::invalid_auth_scheme("Malformed Basic credentials");

    let bytes = STANDARD.decode(encoded).map_err(|_| bad())?;
    let decoded = String::from_utf8(bytes).map_err(|_| bad())?;
    let (identifier, secret) = decoded.split_once(':').ok_or_else(bad)?;

    Ok(BasicCredentials {
        identifier: identifier.to_string(),
        secret: secret.to_string(),
    })
}
