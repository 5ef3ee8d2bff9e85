//! Token payload: identity claims plus issuance metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tollgate_core::types::Claims;

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token presented on every request.
    Access,
    /// Long-lived token exchanged only during rotation.
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => f.write_str("access"),
            Self::Refresh => f.write_str("refresh"),
        }
    }
}

/// Full payload signed into every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Identity claims, flattened into the top-level payload.
    #[serde(flatten)]
    pub identity: Claims,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Random nonce; makes every issued token distinct.
    pub jti: Uuid,
    /// Token kind.
    pub kind: TokenKind,
}

impl TokenClaims {
    /// A token is valid only while `now < exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_core::types::AccountType;

    #[test]
    fn test_payload_is_flat() {
        let claims = TokenClaims {
            identity: Claims::new(1, "a@example.com", AccountType::Guest),
            iat: 100,
            exp: 200,
            jti: Uuid::nil(),
            kind: TokenKind::Refresh,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["type"], "guest");
        assert_eq!(json["kind"], "refresh");
        assert_eq!(json["exp"], 200);

        let back: TokenClaims = serde_json::from_value(json).unwrap();
        assert_eq!(back.identity, claims.identity);
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = TokenClaims {
            identity: Claims::new(1, "a@example.com", AccountType::Guest),
            iat: 100,
            exp: 200,
            jti: Uuid::nil(),
            kind: TokenKind::Access,
        };
        let at = |secs| DateTime::from_timestamp(secs, 0).unwrap();
        assert!(!claims.is_expired_at(at(199)));
        assert!(claims.is_expired_at(at(200)));
    }
}
