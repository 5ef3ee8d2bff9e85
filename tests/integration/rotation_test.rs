//! Integration tests for token rotation and revocation.

use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;

use tollgate_core::error::AppError;
use tollgate_core::result::AppResult;
use tollgate_core::traits::{Denylist, RevocationStore};
use tollgate_store::memory::MemoryRevocationStore;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_rotation_and_reuse_detection() {
    let app = TestApp::new();
    let (a1, r1) = app.signed_in("guest@example.com").await;

    let rotated = app.refresh(&a1, &r1).await;
    assert_eq!(rotated.status, StatusCode::OK);
    let a2 = rotated.body["data"]["access_token"].as_str().unwrap().to_string();
    let r2 = rotated.body["data"]["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(a2, a1);
    assert_ne!(r2, r1);

    let replay = app.refresh(&a1, &r1).await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.body["error"], "TOKEN_REVOKED");

    let old = app.verify(&a1).await;
    assert_eq!(old.body["error"], "TOKEN_REVOKED");

    let new = app.verify(&a2).await;
    assert_eq!(new.status, StatusCode::OK);
    assert_eq!(new.body["data"]["email"], "guest@example.com");

    assert_eq!(app.refresh(&a2, &r2).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_rotation_fills_both_denylists() {
    let app = TestApp::new();
    let (access, refresh) = app.signed_in("guest@example.com").await;

    app.refresh(&access, &refresh).await;

    assert!(app.store.contains(Denylist::Refresh, &refresh).await.unwrap());
    assert!(app.store.contains(Denylist::Access, &access).await.unwrap());
    assert_eq!(app.store.len(Denylist::Refresh), 1);
    assert_eq!(app.store.len(Denylist::Access), 1);
}

#[tokio::test]
async fn test_refresh_requires_body() {
    let app = TestApp::new();
    let (access, _) = app.signed_in("guest@example.com").await;

    let response = app.refresh(&access, "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_refresh_has_one_winner() {
    let app = Arc::new(TestApp::new());
    let (access, refresh) = app.signed_in("guest@example.com").await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = Arc::clone(&app);
            let access = access.clone();
            let refresh = refresh.clone();
            tokio::spawn(async move { app.refresh(&access, &refresh).await.status })
        })
        .collect();

    let statuses: Vec<StatusCode> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert!(
        statuses
            .iter()
            .all(|s| *s == StatusCode::OK || *s == StatusCode::UNAUTHORIZED)
    );
}

/// Memory store that can be switched off mid-test.
#[derive(Debug)]
struct FlakyStore {
    inner: MemoryRevocationStore,
    down: std::sync::atomic::AtomicBool,
}

impl FlakyStore {
    fn check(&self) -> AppResult<()> {
        if self.down.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(AppError::store_unavailable("connection refused"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RevocationStore for FlakyStore {
    async fn insert_if_absent(
        &self,
        list: Denylist,
        token: &str,
        ttl: Duration,
    ) -> AppResult<bool> {
        self.check()?;
        self.inner.insert_if_absent(list, token, ttl).await
    }

    async fn contains(&self, list: Denylist, token: &str) -> AppResult<bool> {
        self.check()?;
        self.inner.contains(list, token).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.check()?;
        Ok(true)
    }
}

#[tokio::test]
async fn test_store_outage_fails_closed() {
    let inner = MemoryRevocationStore::new();
    let flaky = Arc::new(FlakyStore {
        inner: inner.clone(),
        down: false.into(),
    });
    let app = TestApp::with_store(inner, flaky.clone());
    let (access, refresh) = app.signed_in("guest@example.com").await;

    flaky.down.store(true, std::sync::atomic::Ordering::SeqCst);

    let verify = app.verify(&access).await;
    assert_eq!(verify.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(verify.body["error"], "SERVICE_UNAVAILABLE");

    let rotate = app.refresh(&access, &refresh).await;
    assert_eq!(rotate.status, StatusCode::SERVICE_UNAVAILABLE);

    let health = app.request("GET", "/healthz", None, None).await;
    assert_eq!(health.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(health.body["success"], false);
    assert_eq!(health.body["data"]["status"], "degraded");
    assert_eq!(health.body["data"]["store"], false);

    flaky.down.store(false, std::sync::atomic::Ordering::SeqCst);
    assert_eq!(app.verify(&access).await.status, StatusCode::OK);
}
