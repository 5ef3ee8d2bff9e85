//! Identifier + secret verification against the user store.

use std::sync::Arc;

use tracing::debug;

use tollgate_core::error::AppError;
use tollgate_core::result::AppResult;
use tollgate_core::traits::UserStore;
use tollgate_core::types::Claims;

use crate::password::PasswordHasher;

/// Hashed in place of a real password when the identifier is unknown.
const DUMMY_PASSWORD: &str = "tollgate-dummy-password";

/// Confirms a submitted secret against the stored hash.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    /// User store collaborator.
    users: Arc<dyn UserStore>,
    /// Argon2id verifier.
    hasher: PasswordHasher,
    /// Hash checked for unknown identifiers so both failures cost the same.
    dummy_hash: String,
}

impl CredentialVerifier {
    /// Creates a verifier. Computes the dummy hash once, up front.
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher) -> AppResult<Self> {
        let dummy_hash = hasher.hash_password(DUMMY_PASSWORD)?;
        Ok(Self {
            users,
            hasher,
            dummy_hash,
        })
    }

    /// Returns the claims of the identity when `secret` matches.
    ///
    /// Fails with `NotFound` for an unknown identifier and
    /// `InvalidCredentials` for a wrong secret. Callers facing clients must
    /// render both the same way.
    pub async fn authenticate(&self, identifier: &str, secret: &str) -> AppResult<Claims> {
        let Some(stored) = self.users.lookup_credentials(identifier).await? else {
            self.hasher.verify_password(secret, &self.dummy_hash)?;
            debug!("Authentication failed: unknown identifier");
            return Err(AppError::not_found("Unknown identifier"));
        };

        if !self.hasher.verify_password(secret, &stored.password_hash)? {
            debug!(
                subject_id = stored.claims.subject_id,
                "Authentication failed: secret mismatch"
            );
            return Err(AppError::invalid_credentials("Secret does not match"));
        }

        Ok(stored.claims)
    }
}
