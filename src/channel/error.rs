//! Error types for the channel client.

use thiserror::Error;

use super::frame::FrameError;

/// Channel-layer errors
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Transport-level failure (socket connect, read or write)
    #[error("transport error: {0}")]
    Transport(String),

    /// The channel-level handshake did not complete
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// An inbound frame could not be decoded
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// An outbound payload could not be serialized
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The server reported an error frame
    #[error("server error: {0}")]
    Server(String),

    /// The connection closed while a response was expected
    #[error("connection closed")]
    Closed,
}
