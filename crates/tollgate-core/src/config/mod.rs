//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Configuration is read once at process start; nothing reloads it.

pub mod app;
pub mod auth;
pub mod logging;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, MAX_LIFETIME_SECONDS};
pub use self::logging::LoggingConfig;
pub use self::store::{DenylistEncoding, RedisStoreConfig, StoreConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay) and
/// `TOLLGATE__*` environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// User store connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Revocation store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Token signing and lifetime settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `TOLLGATE__`
    /// (e.g. `TOLLGATE__AUTH__JWT_SECRET`). The result is validated before it
    /// is returned.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("TOLLGATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the token subsystem cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set (TOLLGATE__AUTH__JWT_SECRET)",
            ));
        }
        self.auth.validate_lifetimes()?;
        match self.store.provider.as_str() {
            "memory" | "redis" => Ok(()),
            other => Err(AppError::configuration(format!(
                "Unknown store provider: '{other}'. Supported: memory, redis"
            ))),
        }
    }
}

fn default_database_url() -> String {
    "postgres://localhost:5432/tollgate".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_missing_secret_is_rejected() {
        let config = AppConfig::default();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "secret".to_string();
        config.store.provider = "memcached".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lifetimes_are_bounded() {
        let valid = || {
            let mut config = AppConfig::default();
            config.auth.jwt_secret = "secret".to_string();
            config
        };
        assert!(valid().validate().is_ok());

        let mut config = valid();
        config.auth.access_token_ttl_seconds = i64::MAX / 100;
        assert_eq!(config.validate().unwrap_err().kind, ErrorKind::Configuration);

        let mut config = valid();
        config.auth.refresh_token_ttl_seconds = 0;
        assert_eq!(config.validate().unwrap_err().kind, ErrorKind::Configuration);

        let mut config = valid();
        config.auth.refresh_denylist_ttl_seconds = u64::MAX;
        assert_eq!(config.validate().unwrap_err().kind, ErrorKind::Configuration);

        let mut config = valid();
        config.auth.access_denylist_ttl_seconds = 0;
        assert_eq!(config.validate().unwrap_err().kind, ErrorKind::Configuration);

        let mut config = valid();
        config.auth.access_token_ttl_seconds = MAX_LIFETIME_SECONDS;
        config.auth.access_denylist_ttl_seconds = MAX_LIFETIME_SECONDS as u64;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_match_token_policy() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_ttl_seconds, 3600);
        assert_eq!(config.refresh_token_ttl_seconds, 604_800);
        assert_eq!(config.access_denylist_ttl().as_secs(), 3600);
        assert_eq!(config.refresh_denylist_ttl().as_secs(), 604_800);
    }

    #[test]
    fn test_load_reads_environment_overrides() {
        temp_env::with_vars(
            [
                ("TOLLGATE__AUTH__JWT_SECRET", Some("from-env")),
                ("TOLLGATE__AUTH__ACCESS_TOKEN_TTL_SECONDS", Some("120")),
                ("TOLLGATE__STORE__ENCODING", Some("delimited")),
            ],
            || {
                let config = AppConfig::load("test").unwrap();
                assert_eq!(config.auth.jwt_secret, "from-env");
                assert_eq!(config.auth.access_token_ttl_seconds, 120);
                assert_eq!(config.store.encoding, DenylistEncoding::Delimited);
                assert_eq!(config.store.provider, "memory");
            },
        );
    }
}
