//! PresenceRegistry port - Interface for the online-user set.
//!
//! In a multi-server deployment every instance mutates the same backing set,
//! so presence is consistent across the fleet without any in-process state.
//! Membership reflects the last known join/leave/disconnect event for a
//! username - it is NOT synchronized with actual transport liveness (there is
//! no heartbeat or expiry).

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::time::Duration;

/// Errors that can occur in presence registry operations.
#[derive(Debug, thiserror::Error)]
pub enum PresenceError {
    /// The backing store could not be reached or rejected the operation.
    #[error("presence store unavailable: {0}")]
    Unavailable(String),

    /// The round trip to the backing store exceeded the configured bound.
    #[error("presence store round trip timed out after {0:?}")]
    Timeout(Duration),
}

/// Port for the set of currently-online usernames.
///
/// Implementations must ensure:
/// - `add` and `remove` are idempotent (duplicate add / absent remove are
///   no-ops, never errors)
/// - `list` returns an empty set, never an optional/null value, when the
///   backing store reports no members
/// - every call is one round trip to the backing store; no local caching or
///   batching, so each write is immediately visible to all server instances
///
/// No retry is performed at this layer; callers decide what a failed round
/// trip means for their event.
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// Insert a username into the online set.
    async fn add(&self, username: &str) -> Result<(), PresenceError>;

    /// Remove a username from the online set.
    async fn remove(&self, username: &str) -> Result<(), PresenceError>;

    /// Current membership of the online set.
    async fn list(&self) -> Result<BTreeSet<String>, PresenceError>;
}
