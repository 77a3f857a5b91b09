//! Frame transport over WebSocket.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use super::{error::ChannelError, frame::Frame};

/// Full-duplex frame pipe between client and server.
///
/// The channel state machine only ever exchanges whole frames through this
/// seam, never raw socket payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FrameTransport: Send {
    /// Encode and transmit a single frame
    async fn send_frame(&mut self, frame: Frame) -> Result<(), ChannelError>;

    /// Receive the next frame, or `None` once the peer has closed
    async fn next_frame(&mut self) -> Option<Result<Frame, ChannelError>>;

    /// Close the underlying connection
    async fn close(&mut self) -> Result<(), ChannelError>;
}

/// WebSocket-backed transport, one text message per frame
pub struct WebSocketTransport {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketTransport {
    /// Open the WebSocket connection to `url`
    pub async fn connect(url: &str) -> Result<Self, ChannelError> {
        let (ws, _response) = connect_async(url)
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;
        Ok(Self { ws })
    }
}

#[async_trait]
impl FrameTransport for WebSocketTransport {
    async fn send_frame(&mut self, frame: Frame) -> Result<(), ChannelError> {
        self.ws
            .send(Message::Text(frame.encode().into()))
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))
    }

    async fn next_frame(&mut self) -> Option<Result<Frame, ChannelError>> {
        while let Some(message) = self.ws.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    return Some(Frame::parse(&text).map_err(ChannelError::from));
                }
                Ok(Message::Binary(data)) => {
                    tracing::warn!("Ignoring {} bytes of binary data", data.len());
                }
                Ok(Message::Close(_)) => return None,
                // Ping/pong frames are answered by tungstenite itself
                Ok(_) => {}
                Err(e) => return Some(Err(ChannelError::Transport(e.to_string()))),
            }
        }
        None
    }

    async fn close(&mut self) -> Result<(), ChannelError> {
        self.ws
            .close(None)
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))
    }
}
