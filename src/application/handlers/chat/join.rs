//! Join handler.
//!
//! Adds the username to the presence registry, then announces the join on
//! the messages topic and pushes the full updated online set to the presence
//! topic. The registry mutation happens-before either broadcast, so any
//! client receiving the snapshot sees a store state that already reflects
//! the join.

use std::sync::Arc;

use crate::domain::{ChatMessage, JoinMessage};
use crate::ports::{Broadcaster, PresenceError, PresenceRegistry};

/// Handler for the `join` address.
pub struct JoinHandler {
    registry: Arc<dyn PresenceRegistry>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl JoinHandler {
    /// Creates a new handler.
    pub fn new(registry: Arc<dyn PresenceRegistry>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// Register the user as online and broadcast the join.
    ///
    /// Produces, in order:
    /// 1. a system `JOIN` announcement on the messages topic
    /// 2. the full updated online set on the presence topic
    ///
    /// # Errors
    ///
    /// Propagates `PresenceError` if a store round trip fails; in that case
    /// the remaining broadcasts for this event are skipped.
    pub async fn execute(&self, msg: JoinMessage) -> Result<(), PresenceError> {
        self.registry.add(&msg.username).await?;

        self.broadcaster
            .publish_message(ChatMessage::system_join(&msg.username))
            .await;

        let online = self.registry.list().await?;
        self.broadcaster.publish_presence(online).await;

        Ok(())
    }
}
