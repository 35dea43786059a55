//! Notice Core Library
//!
//! Real-time notification delivery for a single client: an auth-gated push
//! channel with bounded reconnects, a deduplicated local store, and
//! optimistic mark-read/delete reconciled against server confirmations.

pub mod api;
pub mod auth;
pub mod network;
pub mod notification;

pub use api::{
    ApiError, CallbackHandler, EventDispatcher, EventHandler, MockNotificationApi,
    NotificationApi, NotificationSession, NotifyConfig, NotifyEvent, PollResult,
};
pub use auth::{AuthGate, AuthPhase};
pub use network::{
    ChannelEvent, ChannelTransport, ConnectionState, ManualScheduler, MockTransport,
    NetworkError, PushTransport, RawFrame, Scheduler, SystemScheduler, TransportConfig,
};
#[cfg(any(feature = "network-native-tls", feature = "network-rustls"))]
pub use network::WebSocketTransport;
pub use notification::{NotificationId, NotificationRecord, NotificationStore, NotificationType};
