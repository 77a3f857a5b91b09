//! Channel-level frame codec.
//!
//! A frame is a text record exchanged over the WebSocket transport: a command
//! line, zero or more `name:value` header lines, a blank line, the body, and
//! a NUL terminator. Header names and values escape `\`, carriage return,
//! line feed and `:` with backslash sequences, so a frame always parses
//! unambiguously from a single text message.

use thiserror::Error;

use uuid::Uuid;

/// Decoding errors for inbound frames
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The frame is empty or starts with a blank command line
    #[error("frame is missing the command line")]
    MissingCommand,

    /// The command line names no known command
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// A header line has no `:` separator
    #[error("malformed header line '{0}'")]
    MalformedHeader(String),

    /// A header contains an unknown backslash escape
    #[error("unknown escape sequence '\\{0}' in header")]
    BadEscape(char),

    /// A header ends in the middle of an escape sequence
    #[error("truncated escape sequence in header")]
    TruncatedEscape,

    /// The blank line between headers and body is missing
    #[error("frame has no header/body separator")]
    MissingSeparator,
}

/// Frame command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Connect,
    Connected,
    Subscribe,
    Send,
    Message,
    Receipt,
    Disconnect,
    Error,
}

impl Command {
    /// Wire spelling of the command
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Connected => "CONNECTED",
            Self::Subscribe => "SUBSCRIBE",
            Self::Send => "SEND",
            Self::Message => "MESSAGE",
            Self::Receipt => "RECEIPT",
            Self::Disconnect => "DISCONNECT",
            Self::Error => "ERROR",
        }
    }
}

impl std::str::FromStr for Command {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONNECT" => Ok(Self::Connect),
            "CONNECTED" => Ok(Self::Connected),
            "SUBSCRIBE" => Ok(Self::Subscribe),
            "SEND" => Ok(Self::Send),
            "MESSAGE" => Ok(Self::Message),
            "RECEIPT" => Ok(Self::Receipt),
            "DISCONNECT" => Ok(Self::Disconnect),
            "ERROR" => Ok(Self::Error),
            other => Err(FrameError::UnknownCommand(other.to_string())),
        }
    }
}

/// A single channel frame: command, headers and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    command: Command,
    headers: Vec<(String, String)>,
    body: String,
}

impl Frame {
    /// Create an empty frame for `command`
    pub fn new(command: Command) -> Self {
        Self {
            command,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Append a header (builder style)
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body (builder style)
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// The frame command
    pub fn command(&self) -> Command {
        self.command
    }

    /// Look up a header value. Repeated headers resolve to the first one.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The frame body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the frame and return its body
    pub fn into_body(self) -> String {
        self.body
    }

    /// Build the connection request frame for the channel-level handshake
    pub fn connect(host: &str) -> Self {
        Self::new(Command::Connect)
            .with_header("accept-version", "1.2")
            .with_header("host", host)
    }

    /// Build the server's handshake acknowledgment frame
    pub fn connected(version: &str) -> Self {
        Self::new(Command::Connected).with_header("version", version)
    }

    /// Build a subscription request for the broadcast `destination`
    pub fn subscribe(id: &str, destination: &str) -> Self {
        Self::new(Command::Subscribe)
            .with_header("id", id)
            .with_header("destination", destination)
            .with_header("ack", "auto")
    }

    /// Build a SEND frame addressed to `destination`.
    ///
    /// # Arguments
    ///
    /// * `destination` - Point-to-point send address
    /// * `extra_headers` - Caller-supplied headers appended after the standard ones
    /// * `body` - Serialized payload text
    pub fn send_to(destination: &str, extra_headers: &[(&str, &str)], body: &str) -> Self {
        let mut frame = Self::new(Command::Send)
            .with_header("destination", destination)
            .with_header("content-type", "application/json;charset=utf-8")
            .with_header("content-length", body.len().to_string());
        for (name, value) in extra_headers {
            frame = frame.with_header(*name, *value);
        }
        frame.with_body(body)
    }

    /// Build a broadcast MESSAGE frame as delivered to a subscriber
    pub fn message(destination: &str, subscription: &str, body: &str) -> Self {
        Self::new(Command::Message)
            .with_header("destination", destination)
            .with_header("subscription", subscription)
            .with_header("message-id", Uuid::new_v4().to_string())
            .with_body(body)
    }

    /// Build the teardown request carrying a receipt identifier
    pub fn disconnect(receipt_id: &str) -> Self {
        Self::new(Command::Disconnect).with_header("receipt", receipt_id)
    }

    /// Build the server's teardown acknowledgment
    pub fn receipt(receipt_id: &str) -> Self {
        Self::new(Command::Receipt).with_header("receipt-id", receipt_id)
    }

    /// Build a server error report
    pub fn error(message: &str) -> Self {
        Self::new(Command::Error)
            .with_header("message", message)
            .with_body(message)
    }

    /// Encode the frame to its wire text form
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 64);
        out.push_str(self.command.as_str());
        out.push('\n');
        for (name, value) in &self.headers {
            out.push_str(&escape(name));
            out.push(':');
            out.push_str(&escape(value));
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }

    /// Parse a frame from its wire text form.
    ///
    /// The trailing NUL terminator is optional so hand-built peer frames are
    /// accepted as well.
    pub fn parse(raw: &str) -> Result<Self, FrameError> {
        let raw = raw.strip_suffix('\0').unwrap_or(raw);
        let (head, body) = raw.split_once("\n\n").ok_or(FrameError::MissingSeparator)?;

        let mut lines = head.lines();
        let command = lines
            .next()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .ok_or(FrameError::MissingCommand)?
            .parse()?;

        let mut headers = Vec::new();
        for line in lines {
            let line = line.trim_end_matches('\r');
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| FrameError::MalformedHeader(line.to_string()))?;
            headers.push((unescape(name)?, unescape(value)?));
        }

        Ok(Self {
            command,
            headers,
            body: body.to_string(),
        })
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            ':' => out.push_str("\\c"),
            other => out.push(other),
        }
    }
    out
}

fn unescape(input: &str) -> Result<String, FrameError> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('c') => out.push(':'),
            Some(other) => return Err(FrameError::BadEscape(other)),
            None => return Err(FrameError::TruncatedEscape),
        }
    }
    Ok(out)
}
