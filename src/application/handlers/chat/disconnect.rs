//! Disconnect handler.
//!
//! Runs when the transport reports a closed connection. Unlike an explicit
//! `leave`, a disconnect produces no system announcement on the messages
//! topic; only the reduced online set goes out on the presence topic.
//! A connection that never bound a username is a no-op.

use std::sync::Arc;

use crate::ports::{Broadcaster, PresenceError, PresenceRegistry};

/// Handler for transport-level disconnects.
pub struct DisconnectHandler {
    registry: Arc<dyn PresenceRegistry>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl DisconnectHandler {
    /// Creates a new handler.
    pub fn new(registry: Arc<dyn PresenceRegistry>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// Drop the session's bound username (if any) from the online set and
    /// broadcast the updated set.
    ///
    /// # Errors
    ///
    /// Propagates `PresenceError` if a store round trip fails.
    pub async fn execute(&self, bound_username: Option<&str>) -> Result<(), PresenceError> {
        let Some(username) = bound_username else {
            // Session closed before ever joining; nothing to clean up.
            return Ok(());
        };

        self.registry.remove(username).await?;

        let online = self.registry.list().await?;
        self.broadcaster.publish_presence(online).await;

        tracing::debug!(username, "user disconnected");
        Ok(())
    }
}
