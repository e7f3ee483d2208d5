//! Chat message envelopes.
//!
//! A [`ChatMessage`] is a fire-and-forget envelope broadcast to every
//! subscriber of the messages topic. There is no message identity, no
//! ordering field, and no persistence.
//!
//! The wire shape (`sender` / `content` / `type` with `"CHAT"`, `"JOIN"`,
//! `"LEAVE"` discriminants) is fixed by the frontend protocol and must not
//! change.

use serde::{Deserialize, Serialize};

/// Sender name used for server-generated join/leave announcements.
pub const SYSTEM_SENDER: &str = "System";

/// Discriminant for the three message flavors on the messages topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    /// Ordinary user chat message.
    Chat,
    /// Server announcement that a user joined.
    Join,
    /// Server announcement that a user left.
    Leave,
}

/// An envelope broadcast to all chat subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl ChatMessage {
    /// System announcement for a user joining the room.
    pub fn system_join(username: &str) -> Self {
        Self {
            sender: SYSTEM_SENDER.to_string(),
            content: format!("{} joined", username),
            kind: MessageKind::Join,
        }
    }

    /// System announcement for a user leaving the room.
    pub fn system_leave(username: &str) -> Self {
        Self {
            sender: SYSTEM_SENDER.to_string(),
            content: format!("{} left", username),
            kind: MessageKind::Leave,
        }
    }
}

/// Inbound control event: a client announces its username.
///
/// No validation is performed on the username; an empty string passes
/// through like any other value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinMessage {
    pub username: String,
}

/// Inbound control event: a client leaves the room explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveMessage {
    pub username: String,
}
