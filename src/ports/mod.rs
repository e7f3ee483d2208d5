//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application core and the outside world. Adapters implement them.
//!
//! - `PresenceRegistry` - shared store of currently-online usernames
//! - `Broadcaster` - one-to-many publish to the two broadcast topics

mod broadcaster;
mod presence_registry;

pub use broadcaster::Broadcaster;
pub use presence_registry::{PresenceError, PresenceRegistry};
