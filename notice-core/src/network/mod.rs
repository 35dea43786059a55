//! Push Channel Layer
//!
//! Transport abstraction, reconnect policy and frame decoding for the
//! notification push channel.
//!
//! # Architecture
//!
//! The network layer consists of:
//! - **PushTransport trait**: platform-agnostic interface for the channel I/O
//! - **Scheduler trait**: timer source for reconnects (virtual in tests)
//! - **Channel transport**: auth gating, handshake and bounded reconnects
//! - **Event decoder**: frame envelope parsing into typed events
//!
//! # Example
//!
//! ```ignore
//! use notice_core::network::{ChannelTransport, ManualScheduler, MockTransport, TransportConfig};
//! use notice_core::AuthGate;
//!
//! let mut transport = MockTransport::new();
//! transport.set_auto_handshake(true);
//!
//! let mut channel = ChannelTransport::new(transport, ManualScheduler::new(), TransportConfig::default());
//! channel.update_gate(AuthGate::authenticated());
//! channel.start();
//!
//! while let Some(frame) = channel.poll_frame() {
//!     let event = notice_core::network::decode_frame(&frame)?;
//! }
//! ```

mod channel;
mod decoder;
mod error;
mod mock;
mod scheduler;
mod transport;

#[cfg(any(feature = "network-native-tls", feature = "network-rustls"))]
mod websocket;

// Error types
pub use error::NetworkError;

// Transport abstraction
pub use transport::{ConnectionState, PushTransport, RawFrame, TransportConfig, TransportResult};

// Timers
pub use scheduler::{ManualScheduler, Scheduler, SystemScheduler, TimerId};

// Channel transport
pub use channel::ChannelTransport;

// Event decoding
pub use decoder::{
    decode_frame, ChannelEvent, DecodeError, EVENT_BROADCAST, EVENT_CONNECTED, EVENT_DELETED,
    EVENT_INITIAL, EVENT_NOTIFICATION, EVENT_READ,
};

// Mock transport for testing
pub use mock::MockTransport;

// WebSocket transport for production
#[cfg(any(feature = "network-native-tls", feature = "network-rustls"))]
pub use websocket::WebSocketTransport;
