//! # tollgate-api
//!
//! HTTP API layer for Tollgate built on Axum.
//!
//! Exposes registration, token issuance, verification and rotation, plus a
//! liveness probe. Every handler returns [`ApiError`] on failure so the
//! mapping from error kind to status lives in one place.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
