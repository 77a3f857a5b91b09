//! WebSocket chat room client library.
//!
//! Provides the channel client (connect, subscribe, publish, disconnect over
//! text frames) and the room view (transcript rendering and input validation)
//! behind the `suda-client` binary.

pub mod channel;
pub mod common;
pub mod dto;
pub mod history;
pub mod room;
pub mod runner;
pub mod session;
