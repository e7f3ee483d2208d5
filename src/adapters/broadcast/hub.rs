//! Topic hub - in-process broadcast transport.
//!
//! One `tokio::sync::broadcast` channel per topic. WebSocket sessions
//! subscribe to both channels on connect; handlers publish through the
//! [`Broadcaster`] port. Delivery is fire-and-forget: publishing with no
//! subscribers is a no-op, and a receiver that lags past the channel
//! capacity loses the oldest frames.

use async_trait::async_trait;
use std::collections::BTreeSet;
use tokio::sync::broadcast;

use crate::domain::ChatMessage;
use crate::ports::Broadcaster;

/// Name of the chat messages topic as seen on the wire.
pub const MESSAGES_TOPIC: &str = "/topic/messages";

/// Name of the presence topic as seen on the wire.
pub const ONLINE_USERS_TOPIC: &str = "/topic/onlineUsers";

/// In-process hub carrying the two broadcast topics.
pub struct TopicHub {
    messages: broadcast::Sender<ChatMessage>,
    online_users: broadcast::Sender<BTreeSet<String>>,
}

impl TopicHub {
    /// Create a hub with the given per-topic channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (messages, _) = broadcast::channel(capacity);
        let (online_users, _) = broadcast::channel(capacity);
        Self {
            messages,
            online_users,
        }
    }

    /// Create with default capacity (128 frames per topic).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Subscribe to the messages topic.
    pub fn subscribe_messages(&self) -> broadcast::Receiver<ChatMessage> {
        self.messages.subscribe()
    }

    /// Subscribe to the presence topic.
    pub fn subscribe_presence(&self) -> broadcast::Receiver<BTreeSet<String>> {
        self.online_users.subscribe()
    }

    /// Number of live subscribers on the messages topic.
    pub fn message_subscriber_count(&self) -> usize {
        self.messages.receiver_count()
    }
}

impl Default for TopicHub {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl Broadcaster for TopicHub {
    async fn publish_message(&self, message: ChatMessage) {
        // No subscribers is OK
        let _ = self.messages.send(message);
    }

    async fn publish_presence(&self, users: BTreeSet<String>) {
        let _ = self.online_users.send(users);
    }
}

impl std::fmt::Debug for TopicHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicHub")
            .field("message_subscribers", &self.messages.receiver_count())
            .field("presence_subscribers", &self.online_users.receiver_count())
            .finish()
    }
}
