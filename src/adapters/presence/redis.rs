//! Redis-backed presence registry for production deployments.
//!
//! Stores the online set under a single Redis set key using SADD / SREM /
//! SMEMBERS. Set operations are independently atomic at the store, which is
//! what makes concurrent multi-writer access from a scaled fleet safe without
//! any in-process locking.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::collections::BTreeSet;
use std::time::Duration;

use crate::config::RedisConfig;
use crate::ports::{PresenceError, PresenceRegistry};

/// Redis-backed presence registry.
///
/// Every call is one round trip to Redis, bounded by the configured
/// operation timeout so a stalled store cannot wedge an event handler
/// indefinitely. No retry and no local caching: each write is immediately
/// visible to every server instance sharing the key.
#[derive(Clone)]
pub struct RedisPresenceRegistry {
    conn: MultiplexedConnection,
    key: String,
    op_timeout: Duration,
}

impl RedisPresenceRegistry {
    /// Create a new Redis presence registry.
    pub fn new(conn: MultiplexedConnection, config: &RedisConfig) -> Self {
        Self {
            conn,
            key: config.presence_key.clone(),
            op_timeout: config.op_timeout(),
        }
    }

    /// The Redis set key holding the online usernames.
    pub fn key(&self) -> &str {
        &self.key
    }

    async fn bounded<T>(
        &self,
        op: impl std::future::Future<Output = redis::RedisResult<T>>,
    ) -> Result<T, PresenceError> {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result.map_err(|e| PresenceError::Unavailable(e.to_string())),
            Err(_) => Err(PresenceError::Timeout(self.op_timeout)),
        }
    }
}

#[async_trait]
impl PresenceRegistry for RedisPresenceRegistry {
    async fn add(&self, username: &str) -> Result<(), PresenceError> {
        let mut conn = self.conn.clone();
        // SADD is a no-op for an existing member, so duplicates are free.
        self.bounded(conn.sadd::<_, _, ()>(&self.key, username))
            .await
    }

    async fn remove(&self, username: &str) -> Result<(), PresenceError> {
        let mut conn = self.conn.clone();
        // SREM of an absent member is a no-op, not an error.
        self.bounded(conn.srem::<_, _, ()>(&self.key, username))
            .await
    }

    async fn list(&self) -> Result<BTreeSet<String>, PresenceError> {
        let mut conn = self.conn.clone();
        // A missing key decodes as the empty vec, which keeps the
        // empty-set-never-null contract of the port.
        let members: Vec<String> = self.bounded(conn.smembers(&self.key)).await?;
        Ok(members.into_iter().collect())
    }
}

impl std::fmt::Debug for RedisPresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPresenceRegistry")
            .field("key", &self.key)
            .field("op_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}
