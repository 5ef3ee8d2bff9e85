//! Token parsing and cryptographic/temporal validation.
//!
//! The decoder knows nothing about revocation; denylist checks belong to
//! the lifecycle manager.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use tollgate_core::config::AuthConfig;
use tollgate_core::error::AppError;
use tollgate_core::types::Claims;

use super::claims::{TokenClaims, TokenKind};

/// Validates tokens signed by [`JwtEncoder`](super::JwtEncoder).
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature-only validation; expiry is checked separately.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` must be present, but the comparison is done here with
        // `now < exp` and no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies signature and expiry and returns the embedded identity.
    pub fn parse_and_verify(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_checked(token).map(|claims| claims.identity)
    }

    /// Verifies signature and expiry, returning the full payload.
    pub fn decode_checked(&self, token: &str) -> Result<TokenClaims, AppError> {
        let claims = self.parse_signed(token)?;
        if claims.is_expired_at(Utc::now()) {
            return Err(AppError::expired(format!(
                "{} token has expired",
                capitalize(claims.kind)
            )));
        }
        Ok(claims)
    }

    /// As [`decode_checked`](Self::decode_checked), and the token must be of `kind`.
    pub fn parse_and_verify_kind(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<TokenClaims, AppError> {
        let claims = self.decode_checked(token)?;
        ensure_kind(&claims, kind)?;
        Ok(claims)
    }

    /// Verifies the signature only. Expired tokens are accepted.
    pub fn parse_signed(&self, token: &str) -> Result<TokenClaims, AppError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    AppError::signature_invalid("Invalid token signature")
                }
                JwtErrorKind::ExpiredSignature => AppError::expired("Token has expired"),
                _ => AppError::malformed(format!("Invalid token format: {e}")),
            },
        )?;
        Ok(data.claims)
    }
}

/// Reject a token of the wrong kind as structurally invalid for its use.
pub fn ensure_kind(claims: &TokenClaims, expected: TokenKind) -> Result<(), AppError> {
    if claims.kind != expected {
        return Err(AppError::malformed(format!(
            "Invalid token type: expected {expected} token"
        )));
    }
    Ok(())
}

fn capitalize(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Access => "Access",
        TokenKind::Refresh => "Refresh",
    }
}
