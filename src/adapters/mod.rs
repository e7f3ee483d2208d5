//! Adapters - Implementations of the ports against real infrastructure.
//!
//! - [`presence`] - presence registry (Redis for production, in-memory for tests)
//! - [`broadcast`] - in-process topic hub (broadcast transport)
//! - [`websocket`] - axum WebSocket boundary

pub mod broadcast;
pub mod presence;
pub mod websocket;

pub use broadcast::TopicHub;
pub use presence::{InMemoryPresenceRegistry, RedisPresenceRegistry};
