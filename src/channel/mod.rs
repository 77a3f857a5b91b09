//! Message-channel client: lifecycle state machine, frame codec, transport.

mod client;
mod error;
pub mod frame;
mod transport;

pub use client::{ChannelClient, ConnectedChannel, RoomChannel};
pub use error::ChannelError;
pub use transport::{FrameTransport, WebSocketTransport};
