//! Broadcast transport adapter.

mod hub;

pub use hub::{TopicHub, MESSAGES_TOPIC, ONLINE_USERS_TOPIC};
