//! In-memory denylist implementation using dashmap.
//!
//! Expiry is tracked with [`tokio::time::Instant`], so tests can drive the
//! list-level TTL with a paused clock.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

use tollgate_core::error::AppError;
use tollgate_core::result::AppResult;
use tollgate_core::traits::revocation::{Denylist, RevocationStore, ensure_storable};

/// One denylist: its members and the instant the whole list expires.
#[derive(Debug)]
struct ListEntry {
    members: HashSet<String>,
    expires_at: Instant,
}

impl ListEntry {
    fn new(expires_at: Instant) -> Self {
        Self {
            members: HashSet::new(),
            expires_at,
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Process-local revocation store.
///
/// Only suitable when a single service instance serves all requests.
#[derive(Debug, Clone, Default)]
pub struct MemoryRevocationStore {
    lists: Arc<DashMap<Denylist, ListEntry>>,
}

impl MemoryRevocationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live members in a list.
    pub fn len(&self, list: Denylist) -> usize {
        let now = Instant::now();
        self.lists
            .get(&list)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.members.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn insert_if_absent(
        &self,
        list: Denylist,
        token: &str,
        ttl_if_new: Duration,
    ) -> AppResult<bool> {
        ensure_storable(token)?;
        let now = Instant::now();
        let window_end = now.checked_add(ttl_if_new).ok_or_else(|| {
            AppError::configuration(format!("Denylist window out of range: {ttl_if_new:?}"))
        })?;

        // The shard lock is held for the whole check-and-insert.
        let mut entry = self
            .lists
            .entry(list)
            .or_insert_with(|| ListEntry::new(window_end));

        if !entry.is_live(now) {
            debug!(list = %list, "Denylist expired, starting a new window");
            *entry = ListEntry::new(window_end);
        }

        Ok(entry.members.insert(token.to_string()))
    }

    async fn contains(&self, list: Denylist, token: &str) -> AppResult<bool> {
        let now = Instant::now();
        Ok(self
            .lists
            .get(&list)
            .map(|entry| entry.is_live(now) && entry.members.contains(token))
            .unwrap_or(false))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
