//! SendMessage handler.
//!
//! Re-broadcasts an inbound chat message verbatim to the messages topic.
//! No registry mutation, no validation: the envelope is passed through
//! exactly as the client sent it.

use std::sync::Arc;

use crate::domain::ChatMessage;
use crate::ports::Broadcaster;

/// Handler for the `sendMessage` address.
pub struct SendMessageHandler {
    broadcaster: Arc<dyn Broadcaster>,
}

impl SendMessageHandler {
    /// Creates a new handler.
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// Fan the message out to every messages-topic subscriber.
    pub async fn execute(&self, message: ChatMessage) {
        self.broadcaster.publish_message(message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::TopicHub;
    use crate::domain::MessageKind;

    #[tokio::test]
    async fn rebroadcasts_payload_verbatim() {
        let hub = Arc::new(TopicHub::with_default_capacity());
        let mut rx = hub.subscribe_messages();
        let handler = SendMessageHandler::new(hub);

        let message = ChatMessage {
            sender: "dave".to_string(),
            content: "hi".to_string(),
            kind: MessageKind::Chat,
        };
        handler.execute(message.clone()).await;

        assert_eq!(rx.recv().await.unwrap(), message);
    }

    #[tokio::test]
    async fn no_presence_broadcast_is_produced() {
        let hub = Arc::new(TopicHub::with_default_capacity());
        let mut presence_rx = hub.subscribe_presence();
        let handler = SendMessageHandler::new(hub);

        handler
            .execute(ChatMessage {
                sender: "dave".to_string(),
                content: "hi".to_string(),
                kind: MessageKind::Chat,
            })
            .await;

        assert!(presence_rx.try_recv().is_err());
    }
}
