//! Revocation store trait for pluggable denylist backends.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AppError;
use crate::result::AppResult;

/// Separator used by the delimited denylist encoding.
pub const DENYLIST_DELIMITER: char = ';';

/// The two denylists kept by the revocation store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denylist {
    /// Access tokens retired by rotation.
    Access,
    /// Refresh tokens already exchanged once.
    Refresh,
}

impl Denylist {
    /// The fixed store key of this list (before any configured prefix).
    pub fn key(&self) -> &'static str {
        match self {
            Self::Access => "expired_access_tokens",
            Self::Refresh => "expired_refresh_tokens",
        }
    }
}

impl fmt::Display for Denylist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Trait for denylist backends (Redis or in-memory).
///
/// Each list is one store entry with a single TTL. The TTL is set when the
/// list is created and is never extended by later insertions, so every
/// member disappears together when the list expires. A token inserted
/// shortly before that moment is protected for much less than the window.
///
/// Backends must report an unreachable store as
/// [`ErrorKind::StoreUnavailable`](crate::error::ErrorKind::StoreUnavailable);
/// a list that does not exist is simply empty.
#[async_trait]
pub trait RevocationStore: Send + Sync + fmt::Debug + 'static {
    /// Insert `token` into `list`, creating the list with `ttl_if_new` when it
    /// does not exist. Returns `true` only for the caller that inserted the
    /// token; the check and the insert happen in one atomic step.
    async fn insert_if_absent(
        &self,
        list: Denylist,
        token: &str,
        ttl_if_new: Duration,
    ) -> AppResult<bool>;

    /// Membership test. An absent list is an empty set.
    async fn contains(&self, list: Denylist, token: &str) -> AppResult<bool>;

    /// Insert `token` without caring whether it was already present.
    async fn add(&self, list: Denylist, token: &str, ttl_if_new: Duration) -> AppResult<()> {
        self.insert_if_absent(list, token, ttl_if_new).await?;
        Ok(())
    }

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Reject values that cannot be stored as a denylist member.
pub fn ensure_storable(token: &str) -> AppResult<()> {
    if token.is_empty() {
        return Err(AppError::malformed("Empty token"));
    }
    if token.contains(DENYLIST_DELIMITER) || token.chars().any(char::is_whitespace) {
        return Err(AppError::malformed(
            "Token contains characters outside the token alphabet",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_list_keys_are_distinct() {
        assert_ne!(Denylist::Access.key(), Denylist::Refresh.key());
        assert_eq!(Denylist::Refresh.to_string(), "expired_refresh_tokens");
    }

    #[test]
    fn test_delimiter_is_not_storable() {
        let err = ensure_storable("abc;def").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Malformed);
        assert!(ensure_storable("").is_err());
        assert!(ensure_storable("eyJhbGciOi.eyJpZCI6MX0.c2ln-_").is_ok());
    }
}
