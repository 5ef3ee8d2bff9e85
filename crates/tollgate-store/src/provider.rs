//! Revocation store manager that dispatches to the configured backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use tollgate_core::config::StoreConfig;
use tollgate_core::error::AppError;
use tollgate_core::result::AppResult;
use tollgate_core::traits::revocation::{Denylist, RevocationStore};

/// Wraps the configured revocation backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct RevocationStoreManager {
    /// The inner backend.
    inner: Arc<dyn RevocationStore>,
}

impl RevocationStoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn RevocationStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!(encoding = ?config.encoding, "Initializing Redis revocation store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisRevocationStore::new(
                    client,
                    config.encoding,
                ))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory revocation store");
                Arc::new(crate::memory::MemoryRevocationStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }
}

#[async_trait]
impl RevocationStore for RevocationStoreManager {
    async fn insert_if_absent(
        &self,
        list: Denylist,
        token: &str,
        ttl_if_new: Duration,
    ) -> AppResult<bool> {
        self.inner.insert_if_absent(list, token, ttl_if_new).await
    }

    async fn contains(&self, list: Denylist, token: &str) -> AppResult<bool> {
        self.inner.contains(list, token).await
    }

    async fn add(&self, list: Denylist, token: &str, ttl_if_new: Duration) -> AppResult<()> {
        self.inner.add(list, token, ttl_if_new).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
