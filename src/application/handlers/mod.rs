//! Event handlers.
//!
//! One handler per inbound logical address plus the transport disconnect
//! path. Handlers are independent, possibly-concurrent invocations driven by
//! the WebSocket boundary; they hold no per-connection state.

pub mod chat;
