//! Channel client lifecycle: connect, subscribe, publish, disconnect.
//!
//! The lifecycle is encoded in the types. [`ChannelClient::connect`] completes
//! the channel-level handshake and yields a [`ConnectedChannel`]; subscribing
//! consumes that and yields a [`RoomChannel`], the only value carrying a
//! `publish` method. Code that tries to publish before subscribing does not
//! compile, so the subscribe-before-publish ordering cannot regress.

use uuid::Uuid;

use super::{
    error::ChannelError,
    frame::{Command, Frame},
    transport::{FrameTransport, WebSocketTransport},
};

/// Entry point for opening a channel
pub struct ChannelClient;

impl ChannelClient {
    /// Connect to `endpoint` and complete the channel-level handshake.
    ///
    /// Resolves only once the server's acknowledgment frame has arrived;
    /// callers must not assume channel availability before then.
    pub async fn connect(
        endpoint: &str,
    ) -> Result<ConnectedChannel<WebSocketTransport>, ChannelError> {
        let transport = WebSocketTransport::connect(endpoint).await?;
        ConnectedChannel::handshake(transport, &host_of(endpoint)).await
    }
}

/// Extract the authority part of a `ws://host:port/path` endpoint
fn host_of(endpoint: &str) -> String {
    endpoint
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(endpoint)
        .split('/')
        .next()
        .unwrap_or("")
        .to_string()
}

/// A channel that has completed its handshake but not yet subscribed
pub struct ConnectedChannel<T: FrameTransport> {
    transport: T,
}

impl<T: FrameTransport> ConnectedChannel<T> {
    /// Drive the connect/acknowledge exchange over an open transport
    pub(crate) async fn handshake(mut transport: T, host: &str) -> Result<Self, ChannelError> {
        transport.send_frame(Frame::connect(host)).await?;

        match transport.next_frame().await {
            Some(Ok(frame)) => match frame.command() {
                Command::Connected => {
                    tracing::info!("Channel handshake complete");
                    Ok(Self { transport })
                }
                Command::Error => Err(ChannelError::Server(error_text(&frame))),
                other => Err(ChannelError::Handshake(format!(
                    "expected CONNECTED, got {}",
                    other.as_str()
                ))),
            },
            Some(Err(e)) => Err(e),
            None => Err(ChannelError::Closed),
        }
    }

    /// Subscribe to the broadcast `topic` and move to the subscribed state
    pub async fn subscribe(mut self, topic: &str) -> Result<RoomChannel<T>, ChannelError> {
        let subscription_id = Uuid::new_v4().to_string();
        self.transport
            .send_frame(Frame::subscribe(&subscription_id, topic))
            .await?;
        tracing::debug!("Subscribed to '{}' as '{}'", topic, subscription_id);

        Ok(RoomChannel {
            transport: self.transport,
            topic: topic.to_string(),
            subscription_id,
        })
    }
}

/// A subscribed channel, the only state from which publishing is possible
pub struct RoomChannel<T: FrameTransport> {
    transport: T,
    topic: String,
    subscription_id: String,
}

impl<T: FrameTransport> RoomChannel<T> {
    /// Send `body` addressed to `destination`.
    ///
    /// Fire and forget: no acknowledgment is surfaced. Delivery is inferred
    /// from the broadcast echo arriving on the subscription.
    pub async fn publish(
        &mut self,
        destination: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<(), ChannelError> {
        self.transport
            .send_frame(Frame::send_to(destination, headers, body))
            .await
    }

    /// Next inbound message body for this subscription, in delivery order.
    ///
    /// Frames addressed to other subscriptions are logged and skipped.
    /// `None` means the connection is gone.
    pub async fn next_message(&mut self) -> Option<Result<String, ChannelError>> {
        loop {
            match self.transport.next_frame().await? {
                Ok(frame) => match frame.command() {
                    Command::Message => {
                        if self.is_for_subscription(&frame) {
                            return Some(Ok(frame.into_body()));
                        }
                        tracing::warn!(
                            "Dropping message for foreign destination {:?}",
                            frame.header("destination")
                        );
                    }
                    Command::Error => {
                        return Some(Err(ChannelError::Server(error_text(&frame))));
                    }
                    other => {
                        tracing::warn!("Ignoring unexpected {} frame", other.as_str());
                    }
                },
                Err(e) => return Some(Err(e)),
            }
        }
    }

    fn is_for_subscription(&self, frame: &Frame) -> bool {
        match frame.header("subscription") {
            Some(id) => id == self.subscription_id,
            // Peers that omit the subscription header are matched on topic
            None => frame.header("destination") == Some(self.topic.as_str()),
        }
    }

    /// Tear the channel down.
    ///
    /// Sends the teardown frame with a receipt header and resolves once the
    /// matching receipt arrives, after which it is safe to navigate away.
    /// Messages interleaved before the receipt are discarded.
    pub async fn disconnect(mut self) -> Result<(), ChannelError> {
        let receipt_id = Uuid::new_v4().to_string();
        self.transport
            .send_frame(Frame::disconnect(&receipt_id))
            .await?;

        loop {
            match self.transport.next_frame().await {
                Some(Ok(frame)) => match frame.command() {
                    Command::Receipt if frame.header("receipt-id") == Some(receipt_id.as_str()) => {
                        tracing::info!("Channel teardown acknowledged");
                        break;
                    }
                    Command::Message => {
                        tracing::debug!("Discarding message received during teardown");
                    }
                    other => {
                        tracing::warn!("Ignoring {} frame during teardown", other.as_str());
                    }
                },
                Some(Err(e)) => {
                    tracing::warn!("Read error during teardown: {}", e);
                    break;
                }
                // The peer closing first also completes the teardown
                None => break,
            }
        }

        self.transport.close().await
    }
}

fn error_text(frame: &Frame) -> String {
    frame
        .header("message")
        .map(str::to_string)
        .unwrap_or_else(|| frame.body().to_string())
}
