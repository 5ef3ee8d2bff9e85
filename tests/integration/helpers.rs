//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use tollgate_api::{AppState, build_app};
use tollgate_auth::testing::{InMemoryUsers, cheap_config};
use tollgate_core::config::AppConfig;
use tollgate_core::traits::RevocationStore;
use tollgate_store::memory::MemoryRevocationStore;

/// Password accepted by the registration policy.
pub const PASSWORD: &str = "violet-Anchor-harbor-42";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Revocation store, for direct inspection
    pub store: MemoryRevocationStore,
}

impl TestApp {
    /// Create an app backed by the memory store and an in-memory user store.
    pub fn new() -> Self {
        let store = MemoryRevocationStore::new();
        Self::with_store(store.clone(), Arc::new(store))
    }

    /// Create an app whose handlers use `backend`; `store` is kept for inspection.
    pub fn with_store(store: MemoryRevocationStore, backend: Arc<dyn RevocationStore>) -> Self {
        let config = AppConfig {
            auth: cheap_config(),
            ..AppConfig::default()
        };
        let state = AppState::new(config, backend, Arc::new(InMemoryUsers::default()))
            .expect("Failed to build state");

        Self {
            router: build_app(state),
            store,
        }
    }

    /// Register a guest account with [`PASSWORD`].
    pub async fn register(&self, email: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/v1/auth/",
            Some(serde_json::json!({
                "email": email,
                "password": PASSWORD,
                "first_name": "Ana",
                "last_name": "Lopez",
                "phone": "+34 600 000 000",
                "account_type": "guest",
                "address": {
                    "line1": "Calle Mayor 1",
                    "line2": null,
                    "city": "Madrid",
                    "state": "Madrid",
                    "country": "ES",
                    "postal_code": "28013"
                }
            })),
            None,
        )
        .await
    }

    /// Log in with Basic credentials; returns `(access, refresh)`.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request("GET", "/api/v1/auth/token", None, Some(&basic(email, password)))
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        let data = &response.body["data"];
        (
            data["access_token"].as_str().unwrap().to_string(),
            data["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Register and log in.
    pub async fn signed_in(&self, email: &str) -> (String, String) {
        let response = self.register(email).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        self.login(email, PASSWORD).await
    }

    /// `GET /api/v1/auth/verify` with a Bearer token.
    pub async fn verify(&self, access: &str) -> TestResponse {
        self.request("GET", "/api/v1/auth/verify", None, Some(&bearer(access)))
            .await
    }

    /// `POST /api/v1/auth/refresh`.
    pub async fn refresh(&self, access: &str, refresh: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/v1/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            Some(&bearer(access)),
        )
        .await
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let raw = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse { status, body, raw }
    }
}

/// `Basic base64(email:password)` header value.
pub fn basic(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

/// `Bearer <token>` header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Body bytes as sent
    pub raw: Vec<u8>,
}
