//! folio-relay: WebSocket broadcast relay for Folio group chat.
//!
//! Accepts WebSocket connections on a fixed path, registers each as a member
//! of the broadcast set, and forwards every inbound message verbatim to all
//! other connected clients. Messages are never stored and senders are never
//! echoed back to.

pub mod connection;
pub mod dispatch;
pub mod protocol;
pub mod registry;
pub mod server;
