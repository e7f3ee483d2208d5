//! Domain layer - chat message types.
//!
//! The chat domain is deliberately small: messages are transient envelopes
//! with no identity, ordering, or persistence.

pub mod chat;

pub use chat::{ChatMessage, JoinMessage, LeaveMessage, MessageKind, SYSTEM_SENDER};
