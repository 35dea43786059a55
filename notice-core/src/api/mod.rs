// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification API Layer
//!
//! High-level session API over the push channel and the notification store.
//!
//! # Overview
//!
//! The API layer coordinates:
//! - Auth-driven channel lifecycle
//! - Applying decoded push events to the store
//! - Optimistic mark-read/delete with remote calls
//! - Event callbacks for the UI
//!
//! # Example
//!
//! ```ignore
//! use notice_core::api::{HttpNotificationApi, NotificationSession, NotifyConfig};
//! use notice_core::network::{SystemScheduler, WebSocketTransport};
//! use notice_core::AuthGate;
//!
//! let config = NotifyConfig::new("https://api.example.com", "wss://api.example.com/notifications/stream")
//!     .with_session_cookie("sid=abc");
//! let api = HttpNotificationApi::new(&config)?;
//!
//! let mut session = NotificationSession::new(
//!     WebSocketTransport::new(),
//!     SystemScheduler::new(),
//!     Box::new(api),
//!     &config,
//! );
//! session.set_auth(AuthGate::authenticated());
//!
//! loop {
//!     session.poll();
//!     render(session.notifications(), session.unread_count(), session.is_healthy());
//! }
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Error types for the API layer
//! - [`config`] - Configuration types
//! - [`events`] - Event system for callbacks
//! - [`client`] - REST mutation trait and mock
//! - [`notifier`] - Desktop notification surface
//! - [`mutation`] - Optimistic mutation outbox
//! - [`lifecycle`] - Auth-driven channel lifecycle
//! - [`session`] - Session service

mod client;
mod config;
mod error;
mod events;
#[cfg(any(feature = "network-native-tls", feature = "network-rustls"))]
mod http;
mod lifecycle;
mod mutation;
mod notifier;
mod session;

// Error types
pub use error::{ApiError, ApiResult, ConfigError};

// Configuration
pub use config::NotifyConfig;

// Events
pub use events::{CallbackHandler, EventDispatcher, EventHandler, NotifyEvent};

// REST client
pub use client::{ApiCall, MockNotificationApi, NotificationApi};
#[cfg(any(feature = "network-native-tls", feature = "network-rustls"))]
pub use http::HttpNotificationApi;

// Desktop notifications
pub use notifier::{DesktopNotifier, NotifierError, NullNotifier, RecordingNotifier};

// Mutations
pub use mutation::{DispatchReport, Mutation, MutationCoordinator};

// Lifecycle
pub use lifecycle::LifecycleController;

// Session
pub use session::{NotificationSession, PollResult};
