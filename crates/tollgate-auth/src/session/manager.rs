//! Session lifecycle manager: register, login, verify, refresh.

use std::sync::Arc;

use tracing::info;

use tollgate_core::config::AuthConfig;
use tollgate_core::result::AppResult;
use tollgate_core::traits::{RevocationStore, UserStore};
use tollgate_core::types::Claims;

use crate::credential::{CredentialVerifier, Registration, UserRegistrar};
use crate::jwt::TokenPair;
use crate::lifecycle::TokenLifecycleManager;
use crate::password::{PasswordHasher, PasswordValidator};

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// The authenticated identity.
    pub claims: Claims,
}

/// Entry point for every authentication flow served over HTTP.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Credential checks.
    credentials: Arc<CredentialVerifier>,
    /// Account creation.
    registrar: Arc<UserRegistrar>,
    /// Token issuance, verification and rotation.
    lifecycle: Arc<TokenLifecycleManager>,
}

impl SessionManager {
    /// Wires the auth components over the given collaborators.
    pub fn new(
        config: &AuthConfig,
        store: Arc<dyn RevocationStore>,
        users: Arc<dyn UserStore>,
    ) -> AppResult<Self> {
        let hasher = PasswordHasher::new(config)?;
        let lifecycle = TokenLifecycleManager::new(config, store)?;
        let credentials = CredentialVerifier::new(users.clone(), hasher.clone())?;
        let registrar = UserRegistrar::new(users, hasher, PasswordValidator::new(config));

        Ok(Self {
            credentials: Arc::new(credentials),
            registrar: Arc::new(registrar),
            lifecycle: Arc::new(lifecycle),
        })
    }

    /// Creates an account.
    pub async fn register(&self, registration: Registration) -> AppResult<()> {
        self.registrar.register(registration).await
    }

    /// Authenticates and issues a fresh token pair.
    pub async fn login(&self, identifier: &str, secret: &str) -> AppResult<LoginResult> {
        let claims = self.credentials.authenticate(identifier, secret).await?;
        let tokens = self.lifecycle.issue_pair(&claims)?;

        info!(subject_id = claims.subject_id, "User logged in");

        Ok(LoginResult { tokens, claims })
    }

    /// Verifies an access token against the denylist and the codec.
    pub async fn verify(&self, access_token: &str) -> AppResult<Claims> {
        self.lifecycle.verify(access_token).await
    }

    /// Rotates a token pair.
    pub async fn refresh(&self, access_token: &str, refresh_token: &str) -> AppResult<TokenPair> {
        self.lifecycle.rotate(access_token, refresh_token).await
    }
}
