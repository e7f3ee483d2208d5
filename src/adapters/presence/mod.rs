//! Presence registry adapters.
//!
//! - [`RedisPresenceRegistry`] - production, shared across the fleet
//! - [`InMemoryPresenceRegistry`] - tests and single-node development

mod in_memory;
mod redis;

pub use in_memory::InMemoryPresenceRegistry;
pub use redis::RedisPresenceRegistry;
