//! WebSocket transport boundary.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      TopicHub                            │
//! │   /topic/messages            /topic/onlineUsers          │
//! └──────────────────────────────────────────────────────────┘
//!         ▲ publish                        │ subscribe
//!         │                                ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │   ChatHandlers (router)        session send loop         │
//! │   sendMessage / join / leave   forwards both topics      │
//! └──────────────────────────────────────────────────────────┘
//!         ▲ dispatch                       │ frames
//!         │                                ▼
//!                    WebSocket (one per client)
//! ```
//!
//! # Components
//!
//! - [`messages`] - wire protocol types (inbound events, outbound frames)
//! - [`handler`] - axum upgrade handler and per-connection session loop

pub mod handler;
pub mod messages;

pub use handler::{dispatch, websocket_router, ws_handler, SessionBinding, WsState};
pub use messages::{ClientEvent, ServerEvent};
