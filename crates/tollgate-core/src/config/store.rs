//! Revocation store configuration.

use serde::{Deserialize, Serialize};

/// Top-level revocation store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend: `"memory"` or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// How a denylist is laid out in the backend.
    #[serde(default)]
    pub encoding: DenylistEncoding,
    /// Redis-specific configuration.
    #[serde(default)]
    pub redis: RedisStoreConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            encoding: DenylistEncoding::default(),
            redis: RedisStoreConfig::default(),
        }
    }
}

/// Denylist layout inside a key-value backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DenylistEncoding {
    /// One native set per list.
    #[default]
    Set,
    /// One string per list holding `;`-joined tokens.
    Delimited,
}

/// Redis backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Prefix prepended to both denylist keys.
    #[serde(default)]
    pub key_prefix: String,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: String::new(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}
