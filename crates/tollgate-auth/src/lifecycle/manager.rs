//! Token lifecycle manager.
//!
//! A token is `Active` until rotation puts it in its denylist, and
//! `Expired` once its embedded expiry passes, whatever the denylist says.
//! There is no way back from either state.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use tollgate_core::config::AuthConfig;
use tollgate_core::error::AppError;
use tollgate_core::result::AppResult;
use tollgate_core::traits::revocation::{Denylist, RevocationStore};
use tollgate_core::types::Claims;

use crate::jwt::{JwtDecoder, JwtEncoder, TokenKind, TokenPair, ensure_kind};

/// Observable state of a presented token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenState {
    /// Signed, unexpired and not denylisted.
    Active,
    /// Unexpired but present in its denylist.
    Denylisted,
    /// At or past its embedded expiry.
    Expired,
}

/// Orchestrates the codec and the revocation store.
#[derive(Clone)]
pub struct TokenLifecycleManager {
    /// Token signer.
    encoder: JwtEncoder,
    /// Token verifier.
    decoder: JwtDecoder,
    /// Shared denylist backend.
    store: Arc<dyn RevocationStore>,
    /// TTL policy.
    config: Arc<AuthConfig>,
}

impl std::fmt::Debug for TokenLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLifecycleManager")
            .field("store", &self.store)
            .field("access_ttl", &self.config.access_token_ttl_seconds)
            .field("refresh_ttl", &self.config.refresh_token_ttl_seconds)
            .finish()
    }
}

impl TokenLifecycleManager {
    /// Creates a manager. An empty signing secret is rejected.
    pub fn new(config: &AuthConfig, store: Arc<dyn RevocationStore>) -> AppResult<Self> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }

        Ok(Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            store,
            config: Arc::new(config.clone()),
        })
    }

    /// Issues a fresh access + refresh pair. Touches no store.
    pub fn issue_pair(&self, claims: &Claims) -> AppResult<TokenPair> {
        let (access_token, access_expires_at) = self.encoder.issue(
            claims,
            TokenKind::Access,
            token_ttl(self.config.access_token_ttl_seconds)?,
        )?;
        let (refresh_token, refresh_expires_at) = self.encoder.issue(
            claims,
            TokenKind::Refresh,
            token_ttl(self.config.refresh_token_ttl_seconds)?,
        )?;

        debug!(subject_id = claims.subject_id, "Issued token pair");

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Verifies an access token.
    ///
    /// The access denylist is consulted first; an unreachable store fails
    /// the call with `StoreUnavailable`.
    pub async fn verify(&self, access_token: &str) -> AppResult<Claims> {
        if self.store.contains(Denylist::Access, access_token).await? {
            return Err(AppError::revoked("Access token has been revoked"));
        }

        let claims = self
            .decoder
            .parse_and_verify_kind(access_token, TokenKind::Access)?;
        Ok(claims.identity)
    }

    /// Exchanges an (access, refresh) pair for a new pair and retires both.
    ///
    /// The access token may already be expired but must carry a valid
    /// signature and the same subject as the refresh token.
    ///
    /// Both tokens are decoded before the refresh token is denylisted, so a
    /// request with an invalid access token leaves the presented refresh
    /// token usable.
    pub async fn rotate(
        &self,
        old_access_token: &str,
        old_refresh_token: &str,
    ) -> AppResult<TokenPair> {
        if self
            .store
            .contains(Denylist::Refresh, old_refresh_token)
            .await?
        {
            return Err(AppError::revoked("Refresh token has already been used"));
        }

        let refresh = self
            .decoder
            .parse_and_verify_kind(old_refresh_token, TokenKind::Refresh)?;
        let access = self.decoder.parse_signed(old_access_token)?;
        ensure_kind(&access, TokenKind::Access)?;
        if access.identity.subject_id != refresh.identity.subject_id {
            return Err(AppError::malformed(
                "Access and refresh tokens belong to different subjects",
            ));
        }

        let inserted = self
            .store
            .insert_if_absent(
                Denylist::Refresh,
                old_refresh_token,
                self.config.refresh_denylist_ttl(),
            )
            .await?;
        if !inserted {
            warn!(
                subject_id = refresh.identity.subject_id,
                "Refresh token reuse detected"
            );
            return Err(AppError::revoked("Refresh token has already been used"));
        }

        let pair = self.issue_pair(&refresh.identity)?;

        if let Err(e) = self
            .store
            .add(
                Denylist::Access,
                old_access_token,
                self.config.access_denylist_ttl(),
            )
            .await
        {
            warn!(
                subject_id = refresh.identity.subject_id,
                error = %e,
                "Failed to denylist retired access token"
            );
        }

        info!(subject_id = refresh.identity.subject_id, "Rotated token pair");
        Ok(pair)
    }

    /// Reports the state of any token issued by this service.
    pub async fn inspect(&self, token: &str) -> AppResult<TokenState> {
        let claims = self.decoder.parse_signed(token)?;
        if claims.is_expired_at(Utc::now()) {
            return Ok(TokenState::Expired);
        }

        let list = match claims.kind {
            TokenKind::Access => Denylist::Access,
            TokenKind::Refresh => Denylist::Refresh,
        };
        if self.store.contains(list, token).await? {
            Ok(TokenState::Denylisted)
        } else {
            Ok(TokenState::Active)
        }
    }
}

fn token_ttl(seconds: i64) -> AppResult<Duration> {
    Duration::try_seconds(seconds)
        .ok_or_else(|| AppError::configuration(format!("Token TTL out of range: {seconds}s")))
}
