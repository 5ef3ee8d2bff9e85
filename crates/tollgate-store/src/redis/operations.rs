//! Redis revocation store implementation.
//!
//! Insertions run as Lua scripts so the membership check, the insert and
//! the first-insert TTL are one atomic step on the server.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use tollgate_core::config::DenylistEncoding;
use tollgate_core::error::{AppError, ErrorKind};
use tollgate_core::result::AppResult;
use tollgate_core::traits::revocation::{Denylist, RevocationStore, ensure_storable};

use super::client::RedisClient;
use crate::keys;

/// Set encoding: add to a native set, apply the TTL only when the key has none.
///
/// KEYS[1] = list key
/// ARGV[1] = token
/// ARGV[2] = ttl seconds for a new list
///
/// Returns 1 when the token was inserted, 0 when it was already present.
const INSERT_SET_SCRIPT: &str = r#"
    local added = redis.call('SADD', KEYS[1], ARGV[1])
    if redis.call('TTL', KEYS[1]) == -1 then
        redis.call('EXPIRE', KEYS[1], ARGV[2])
    end
    return added
"#;

/// Delimited encoding: append to a `;`-joined string, keeping the existing TTL.
///
/// KEYS[1] = list key
/// ARGV[1] = token
/// ARGV[2] = ttl seconds for a new list
///
/// Returns 1 when the token was inserted, 0 when it was already present.
const INSERT_DELIMITED_SCRIPT: &str = r#"
    local current = redis.call('GET', KEYS[1])
    if not current then
        redis.call('SET', KEYS[1], ARGV[1], 'EX', ARGV[2])
        return 1
    end
    for member in string.gmatch(current, '[^;]+') do
        if member == ARGV[1] then
            return 0
        end
    end
    redis.call('SET', KEYS[1], current .. ';' .. ARGV[1], 'KEEPTTL')
    return 1
"#;

/// Redis-backed revocation store shared by all service instances.
#[derive(Debug, Clone)]
pub struct RedisRevocationStore {
    /// Redis client.
    client: RedisClient,
    /// Layout of each list value.
    encoding: DenylistEncoding,
}

impl RedisRevocationStore {
    /// Create a new Redis revocation store.
    pub fn new(client: RedisClient, encoding: DenylistEncoding) -> Self {
        Self { client, encoding }
    }

    /// Map a Redis error to an AppError. Every Redis failure fails closed.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(
            ErrorKind::StoreUnavailable,
            format!("Revocation store error: {e}"),
            e,
        )
    }

    fn insert_script(&self) -> &'static str {
        match self.encoding {
            DenylistEncoding::Set => INSERT_SET_SCRIPT,
            DenylistEncoding::Delimited => INSERT_DELIMITED_SCRIPT,
        }
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn insert_if_absent(
        &self,
        list: Denylist,
        token: &str,
        ttl_if_new: Duration,
    ) -> AppResult<bool> {
        ensure_storable(token)?;
        let key = self.client.list_key(list);
        let mut conn = self.client.conn_mut();

        // Redis rejects EXPIRE 0; a zero window still creates a one second list.
        let ttl_seconds = ttl_if_new.as_secs().max(1);

        let inserted: i64 = redis::Script::new(self.insert_script())
            .key(&key)
            .arg(token)
            .arg(ttl_seconds)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        debug!(list = %list, inserted = inserted == 1, "Denylist insert");
        Ok(inserted == 1)
    }

    async fn contains(&self, list: Denylist, token: &str) -> AppResult<bool> {
        let key = self.client.list_key(list);
        let mut conn = self.client.conn_mut();

        match self.encoding {
            DenylistEncoding::Set => {
                let present: bool = conn.sismember(&key, token).await.map_err(Self::map_err)?;
                Ok(present)
            }
            DenylistEncoding::Delimited => {
                let value: Option<String> = conn.get(&key).await.map_err(Self::map_err)?;
                Ok(value
                    .map(|joined| keys::contains_member(&joined, token))
                    .unwrap_or(false))
            }
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_core::config::RedisStoreConfig;

    /// Connects to `REDIS_URL` (default `redis://localhost:6379`) with a
    /// per-test key prefix and clears both lists.
    async fn store(name: &str, encoding: DenylistEncoding) -> RedisRevocationStore {
        let config = RedisStoreConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            key_prefix: format!("tollgate-test:{}:{name}:", std::process::id()),
        };
        let client = RedisClient::connect(&config).await.unwrap();
        let mut conn = client.conn_mut();
        let _: () = conn
            .del(&[
                client.list_key(Denylist::Access),
                client.list_key(Denylist::Refresh),
            ])
            .await
            .unwrap();
        RedisRevocationStore::new(client, encoding)
    }

    async fn list_ttl(store: &RedisRevocationStore, list: Denylist) -> i64 {
        let mut conn = store.client.conn_mut();
        conn.ttl(store.client.list_key(list)).await.unwrap()
    }

    async fn check_insert_semantics(store: RedisRevocationStore) {
        let window = Duration::from_secs(100);

        assert!(!store.contains(Denylist::Refresh, "r1").await.unwrap());
        assert!(
            store
                .insert_if_absent(Denylist::Refresh, "r1", window)
                .await
                .unwrap()
        );
        assert!(
            !store
                .insert_if_absent(Denylist::Refresh, "r1", window)
                .await
                .unwrap()
        );
        assert!(store.contains(Denylist::Refresh, "r1").await.unwrap());
        assert!(!store.contains(Denylist::Access, "r1").await.unwrap());

        let first = list_ttl(&store, Denylist::Refresh).await;
        assert!((1..=100).contains(&first), "ttl after first insert: {first}");

        // Appending with a longer window keeps the list's original expiry.
        assert!(
            store
                .insert_if_absent(Denylist::Refresh, "r2", Duration::from_secs(5000))
                .await
                .unwrap()
        );
        let after = list_ttl(&store, Denylist::Refresh).await;
        assert!((1..=100).contains(&after), "ttl after append: {after}");
        assert!(store.contains(Denylist::Refresh, "r1").await.unwrap());
        assert!(store.contains(Denylist::Refresh, "r2").await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires a Redis server at REDIS_URL"]
    async fn test_set_encoding_against_redis() {
        check_insert_semantics(store("set", DenylistEncoding::Set).await).await;
    }

    #[tokio::test]
    #[ignore = "requires a Redis server at REDIS_URL"]
    async fn test_delimited_encoding_against_redis() {
        let store = store("delimited", DenylistEncoding::Delimited).await;
        check_insert_semantics(store.clone()).await;

        // Prefix matches are not membership.
        assert!(!store.contains(Denylist::Refresh, "r").await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires a Redis server at REDIS_URL"]
    async fn test_concurrent_inserts_have_one_winner() {
        let store = store("race", DenylistEncoding::Set).await;
        let attempts = (0..16).map(|_| {
            let store = store.clone();
            async move {
                store
                    .insert_if_absent(Denylist::Refresh, "shared", Duration::from_secs(60))
                    .await
                    .unwrap()
            }
        });
        let winners = futures::future::join_all(attempts)
            .await
            .into_iter()
            .filter(|inserted| *inserted)
            .count();
        assert_eq!(winners, 1);
    }
}
