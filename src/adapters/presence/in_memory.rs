//! In-memory presence registry for testing and single-node development.
//!
//! Implements the same port contract as the Redis adapter against a local
//! set. Single-process only: presence is not shared across instances, so
//! production deployments should use [`RedisPresenceRegistry`].
//!
//! [`RedisPresenceRegistry`]: super::RedisPresenceRegistry

use async_trait::async_trait;
use std::collections::BTreeSet;
use tokio::sync::RwLock;

use crate::ports::{PresenceError, PresenceRegistry};

/// In-memory presence registry.
///
/// Infallible in practice, but surfaces the same `Result` contract as the
/// port so handlers exercise identical code paths in tests.
#[derive(Debug, Default)]
pub struct InMemoryPresenceRegistry {
    members: RwLock<BTreeSet<String>>,
}

impl InMemoryPresenceRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns current member count (for test assertions).
    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    /// Returns true if the registry has no members.
    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn add(&self, username: &str) -> Result<(), PresenceError> {
        self.members.write().await.insert(username.to_string());
        Ok(())
    }

    async fn remove(&self, username: &str) -> Result<(), PresenceError> {
        self.members.write().await.remove(username);
        Ok(())
    }

    async fn list(&self) -> Result<BTreeSet<String>, PresenceError> {
        Ok(self.members.read().await.clone())
    }
}
