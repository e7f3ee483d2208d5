//! Application layer - event handlers.

pub mod handlers;
