//! ChatPP - Real-Time Chat Backend
//!
//! This crate implements a minimal real-time chat backend: clients connect
//! over WebSocket, broadcast chat messages to all subscribers, and the server
//! tracks which usernames are currently online in a shared Redis set so that
//! presence stays consistent across a horizontally scaled fleet.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
