//! Token signing and lifetime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest lifetime accepted for tokens and denylist windows (ten years).
pub const MAX_LIFETIME_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// Token issuance and revocation policy.
///
/// Loaded once at startup and shared read-only by the codec and the
/// lifecycle manager. Changing `jwt_secret` invalidates every outstanding
/// token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256). Must not be empty.
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: i64,
    /// Refresh token TTL in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_seconds: i64,
    /// Lifetime of the access-token denylist, counted from its first insertion.
    #[serde(default = "default_access_ttl_u64")]
    pub access_denylist_ttl_seconds: u64,
    /// Lifetime of the refresh-token denylist, counted from its first insertion.
    #[serde(default = "default_refresh_ttl_u64")]
    pub refresh_denylist_ttl_seconds: u64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2id memory cost in KiB for new hashes.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2id iteration count for new hashes.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2id lane count for new hashes.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

impl AuthConfig {
    /// Every token TTL and denylist window must lie in `1..=MAX_LIFETIME_SECONDS`.
    pub fn validate_lifetimes(&self) -> Result<(), AppError> {
        let tokens = [
            ("access_token_ttl_seconds", self.access_token_ttl_seconds),
            ("refresh_token_ttl_seconds", self.refresh_token_ttl_seconds),
        ];
        for (name, value) in tokens {
            if !(1..=MAX_LIFETIME_SECONDS).contains(&value) {
                return Err(AppError::configuration(format!(
                    "auth.{name} must be between 1 and {MAX_LIFETIME_SECONDS}, got {value}"
                )));
            }
        }

        let windows = [
            ("access_denylist_ttl_seconds", self.access_denylist_ttl_seconds),
            ("refresh_denylist_ttl_seconds", self.refresh_denylist_ttl_seconds),
        ];
        for (name, value) in windows {
            if value == 0 || value > MAX_LIFETIME_SECONDS as u64 {
                return Err(AppError::configuration(format!(
                    "auth.{name} must be between 1 and {MAX_LIFETIME_SECONDS}, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Window applied when the access denylist is created.
    pub fn access_denylist_ttl(&self) -> Duration {
        Duration::from_secs(self.access_denylist_ttl_seconds)
    }

    /// Window applied when the refresh denylist is created.
    pub fn refresh_denylist_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_denylist_ttl_seconds)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_seconds: default_refresh_ttl(),
            access_denylist_ttl_seconds: default_access_ttl_u64(),
            refresh_denylist_ttl_seconds: default_refresh_ttl_u64(),
            password_min_length: default_password_min(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

fn default_access_ttl() -> i64 {
    60 * 60
}

fn default_refresh_ttl() -> i64 {
    60 * 60 * 24 * 7
}

fn default_access_ttl_u64() -> u64 {
    60 * 60
}

fn default_refresh_ttl_u64() -> u64 {
    60 * 60 * 24 * 7
}

fn default_password_min() -> usize {
    8
}

fn default_argon2_memory() -> u32 {
    19 * 1024
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}
