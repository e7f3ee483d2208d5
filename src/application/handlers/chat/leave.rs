//! Leave handler.
//!
//! Mirror image of the join handler: removes the username from the presence
//! registry, announces the departure, and pushes the reduced online set.
//! Removal is idempotent, so a leave racing the transport-disconnect path
//! for the same username cannot corrupt the set; at worst the presence
//! snapshot is broadcast twice, which clients absorb (last snapshot wins).

use std::sync::Arc;

use crate::domain::{ChatMessage, LeaveMessage};
use crate::ports::{Broadcaster, PresenceError, PresenceRegistry};

/// Handler for the `leave` address.
pub struct LeaveHandler {
    registry: Arc<dyn PresenceRegistry>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl LeaveHandler {
    /// Creates a new handler.
    pub fn new(registry: Arc<dyn PresenceRegistry>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// Remove the user from the online set and broadcast the departure.
    ///
    /// Produces, in order:
    /// 1. a system `LEAVE` announcement on the messages topic
    /// 2. the full updated online set on the presence topic
    ///
    /// # Errors
    ///
    /// Propagates `PresenceError` if a store round trip fails.
    pub async fn execute(&self, msg: LeaveMessage) -> Result<(), PresenceError> {
        self.registry.remove(&msg.username).await?;

        self.broadcaster
            .publish_message(ChatMessage::system_leave(&msg.username))
            .await;

        let online = self.registry.list().await?;
        self.broadcaster.publish_presence(online).await;

        Ok(())
    }
}
