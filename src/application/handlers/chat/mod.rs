//! Chat event handlers.
//!
//! The message router maps each inbound logical address to one handler:
//!
//! | Address       | Registry mutation | Broadcasts produced                      |
//! |---------------|-------------------|------------------------------------------|
//! | `sendMessage` | none              | message verbatim → messages topic        |
//! | `join`        | add               | system JOIN + full set → both topics     |
//! | `leave`       | remove            | system LEAVE + full set → both topics    |
//! | (disconnect)  | remove if bound   | full set → presence topic                |
//!
//! The explicit `leave` event and the transport disconnect are independent
//! triggers that can both fire for the same user; both converge on the
//! idempotent remove, and the resulting double presence broadcast is
//! tolerated (each snapshot is authoritative at time of publish).

mod disconnect;
mod join;
mod leave;
mod send_message;

pub use disconnect::DisconnectHandler;
pub use join::JoinHandler;
pub use leave::LeaveHandler;
pub use send_message::SendMessageHandler;

use std::sync::Arc;

use crate::ports::{Broadcaster, PresenceRegistry};

/// Bundle of all chat handlers, wired once at process start.
///
/// The WebSocket boundary dispatches into this; handlers share the same
/// explicitly constructed registry and broadcaster instances.
pub struct ChatHandlers {
    pub send_message: SendMessageHandler,
    pub join: JoinHandler,
    pub leave: LeaveHandler,
    pub disconnect: DisconnectHandler,
}

impl ChatHandlers {
    /// Wire all handlers against one registry and one broadcaster.
    pub fn new(registry: Arc<dyn PresenceRegistry>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            send_message: SendMessageHandler::new(Arc::clone(&broadcaster)),
            join: JoinHandler::new(Arc::clone(&registry), Arc::clone(&broadcaster)),
            leave: LeaveHandler::new(Arc::clone(&registry), Arc::clone(&broadcaster)),
            disconnect: DisconnectHandler::new(registry, broadcaster),
        }
    }
}
