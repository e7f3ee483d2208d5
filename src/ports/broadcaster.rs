//! Broadcaster port - Interface for publishing to the broadcast topics.
//!
//! A broadcast is a one-to-many publish with no delivery acknowledgment.
//! Two fixed topics exist: the messages topic (chat traffic and system
//! announcements) and the presence topic (full online-set snapshots).
//!
//! The presence topic always carries the full current set, never a delta.
//! Clients treat each snapshot as authoritative-at-time-of-publish and let
//! the latest-received one win.

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::domain::ChatMessage;

/// Port for publishing to the two broadcast topics.
///
/// Fire-and-forget: publishing to a topic with no subscribers is a no-op,
/// and delivery failures are invisible to the caller. There is no ack
/// channel on either side of the protocol.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Publish a chat message to the messages topic.
    async fn publish_message(&self, message: ChatMessage);

    /// Publish a full online-set snapshot to the presence topic.
    async fn publish_presence(&self, users: BTreeSet<String>);
}
