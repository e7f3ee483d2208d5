//! WebSocket wire protocol.
//!
//! Inbound frames carry a logical address in the `address` field; the payload
//! fields sit beside it. Outbound frames pair a topic name with its payload,
//! so a client can demultiplex the two subscription streams off one socket:
//!
//! ```text
//! client → server  {"address":"sendMessage","sender":"dave","content":"hi","type":"CHAT"}
//! client → server  {"address":"join","username":"carol"}
//! client → server  {"address":"leave","username":"carol"}
//! server → client  {"topic":"/topic/messages","payload":{...ChatMessage...}}
//! server → client  {"topic":"/topic/onlineUsers","payload":["alice","bob"]}
//! ```
//!
//! Frames that fail to deserialize are dropped at this boundary, before any
//! router logic runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::{ChatMessage, JoinMessage, LeaveMessage};

/// Inbound client event, tagged by logical address.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "address", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Broadcast a chat message to all subscribers.
    SendMessage(ChatMessage),

    /// Announce a username for this connection.
    Join(JoinMessage),

    /// Leave the room explicitly.
    Leave(LeaveMessage),
}

/// Outbound frame: one topic's payload.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "topic", content = "payload")]
pub enum ServerEvent {
    /// Chat traffic and system announcements.
    #[serde(rename = "/topic/messages")]
    Message(ChatMessage),

    /// Full snapshot of currently-online usernames.
    #[serde(rename = "/topic/onlineUsers")]
    OnlineUsers(BTreeSet<String>),
}
