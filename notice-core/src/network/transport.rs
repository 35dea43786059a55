//! Transport Trait
//!
//! Platform-agnostic abstraction for the notification push channel.

use serde::{Deserialize, Serialize};

use super::error::NetworkError;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, NetworkError>;

/// Push channel connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Not started, signed out, or auth still resolving.
    #[default]
    Idle,
    /// Channel opened, waiting for the server handshake frame.
    Connecting,
    /// Handshake confirmed; events are flowing.
    Open,
    /// Channel failed or was closed by the server.
    Closed,
}

/// One inbound text frame, undecoded.
///
/// Frames are JSON envelopes of the form `{"event": "<name>", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame(pub String);

impl RawFrame {
    /// Wraps received text.
    pub fn new(text: impl Into<String>) -> Self {
        RawFrame(text.into())
    }

    /// Builds an envelope frame for a named event and JSON payload.
    pub fn named(event: &str, data: serde_json::Value) -> Self {
        RawFrame(serde_json::json!({ "event": event, "data": data }).to_string())
    }

    /// The frame text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Configuration for push channel connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Notification stream endpoint (`ws://` or `wss://`).
    pub stream_url: String,
    /// Connection timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read/write timeout in milliseconds. Reads that time out yield no frame.
    pub io_timeout_ms: u64,
    /// Maximum consecutive reconnection attempts.
    pub max_reconnect_attempts: u32,
    /// Fixed delay before each reconnection attempt (milliseconds).
    pub reconnect_delay_ms: u64,
    /// Session cookie sent with the upgrade request.
    pub session_cookie: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            stream_url: String::new(),
            connect_timeout_ms: 10_000,
            io_timeout_ms: 50,
            max_reconnect_attempts: 5,
            reconnect_delay_ms: 3_000,
            session_cookie: None,
        }
    }
}

impl TransportConfig {
    /// Creates a config for the given stream endpoint.
    pub fn new(stream_url: &str) -> Self {
        TransportConfig {
            stream_url: stream_url.to_string(),
            ..Default::default()
        }
    }

    /// Attaches the session cookie used for authentication.
    pub fn with_session_cookie(mut self, cookie: &str) -> Self {
        self.session_cookie = Some(cookie.to_string());
        self
    }

    /// Overrides the reconnect policy.
    pub fn with_reconnect(mut self, max_attempts: u32, delay_ms: u64) -> Self {
        self.max_reconnect_attempts = max_attempts;
        self.reconnect_delay_ms = delay_ms;
        self
    }
}

/// Transport trait for the push channel.
///
/// The interface is synchronous and non-blocking from the caller's side:
/// `poll_frame` returns `Ok(None)` when nothing is available yet, so a single
/// event loop can drive the channel alongside everything else.
///
/// # Example
///
/// ```ignore
/// use notice_core::network::{MockTransport, PushTransport, TransportConfig};
///
/// let mut transport = MockTransport::new();
/// transport.open(&TransportConfig::new("wss://example.com/notifications"))?;
/// while let Some(frame) = transport.poll_frame()? {
///     println!("{}", frame.as_str());
/// }
/// transport.close()?;
/// ```
pub trait PushTransport: Send {
    /// Opens the channel.
    ///
    /// Success means the socket is up; the session is not `Open` until the
    /// server's `connected` frame arrives.
    fn open(&mut self, config: &TransportConfig) -> TransportResult<()>;

    /// Closes the channel.
    ///
    /// Safe to call even if not open.
    fn close(&mut self) -> TransportResult<()>;

    /// Returns the next inbound frame, if one is ready.
    ///
    /// An error means the channel is gone.
    fn poll_frame(&mut self) -> TransportResult<Option<RawFrame>>;
}
