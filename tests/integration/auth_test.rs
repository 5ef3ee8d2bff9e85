//! Integration tests for registration, login and verification.

use http::StatusCode;

use crate::helpers::{PASSWORD, TestApp, basic, bearer};

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new();

    let response = app.register("guest@example.com").await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["email"], "guest@example.com");

    let (access, refresh) = app.login("guest@example.com", PASSWORD).await;
    assert_ne!(access, refresh);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.register("guest@example.com").await;

    let response = app.register("guest@example.com").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_invalid_body() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/v1/auth/",
            Some(serde_json::json!({
                "email": "not-an-email",
                "password": PASSWORD,
                "first_name": "Ana",
                "last_name": "Lopez",
                "phone": null,
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
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
    let app = TestApp::new();
    app.register("guest@example.com").await;

    let wrong = app
        .request(
            "GET",
            "/api/v1/auth/token",
            None,
            Some(&basic("guest@example.com", "not-the-password")),
        )
        .await;
    let unknown = app
        .request(
            "GET",
            "/api/v1/auth/token",
            None,
            Some(&basic("nobody@example.com", "not-the-password")),
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status, unknown.status);
    assert_eq!(wrong.raw, unknown.raw);
}

#[tokio::test]
async fn test_verify_returns_claims() {
    let app = TestApp::new();
    let (access, _) = app.signed_in("guest@example.com").await;

    let response = app.verify(&access).await;
    assert_eq!(response.status, StatusCode::OK);
    let claims = &response.body["data"];
    assert_eq!(claims["email"], "guest@example.com");
    assert_eq!(claims["type"], "guest");
    assert!(claims["id"].is_i64());
}

#[tokio::test]
async fn test_verify_rejects_refresh_token() {
    let app = TestApp::new();
    let (_, refresh) = app.signed_in("guest@example.com").await;

    let response = app.verify(&refresh).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "TOKEN_MALFORMED");
}

#[tokio::test]
async fn test_scheme_errors() {
    let app = TestApp::new();
    let (access, _) = app.signed_in("guest@example.com").await;

    let missing = app.request("GET", "/api/v1/auth/verify", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "INVALID_AUTH_SCHEME");

    let wrong = app
        .request(
            "GET",
            "/api/v1/auth/verify",
            None,
            Some(&format!("Token {access}")),
        )
        .await;
    assert_eq!(wrong.body["error"], "INVALID_AUTH_SCHEME");

    let basic_for_bearer = app
        .request(
            "GET",
            "/api/v1/auth/token",
            None,
            Some(&bearer(&access)),
        )
        .await;
    assert_eq!(basic_for_bearer.body["error"], "INVALID_AUTH_SCHEME");

    let lowercase = app
        .request(
            "GET",
            "/api/v1/auth/verify",
            None,
            Some(&format!("bearer {access}")),
        )
        .await;
    assert_eq!(lowercase.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    for path in ["/", "/healthz"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["data"]["status"], "ok");
        assert_eq!(response.body["data"]["store"], true);
    }
}
