// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test Fixtures
//!
//! Record builders and pre-wired sessions.

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use notice_core::api::{MockNotificationApi, NotificationSession, NotifyConfig};
use notice_core::network::{ManualScheduler, MockTransport};
use notice_core::notification::{NotificationId, NotificationRecord, NotificationType};

pub const STREAM_URL: &str = "wss://api.example.com/notifications/stream";
pub const API_URL: &str = "https://api.example.com";

pub type MockSession = NotificationSession<MockTransport, ManualScheduler>;

/// A record with a fixed timestamp, so equality checks are stable.
pub fn record(id: NotificationId, is_read: bool) -> NotificationRecord {
    NotificationRecord {
        id,
        type_code: NotificationType::Booking,
        title: format!("Booking #{}", id),
        message: format!("Booking {} was confirmed", id),
        target_url: Some(format!("/bookings/{}", id)),
        is_read,
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    }
}

/// Wire form of [`record`].
pub fn record_json(id: NotificationId, is_read: bool) -> Value {
    json!({
        "id": id,
        "typeCode": "BOOKING",
        "title": format!("Booking #{}", id),
        "message": format!("Booking {} was confirmed", id),
        "targetUrl": format!("/bookings/{}", id),
        "isRead": is_read,
        "createdAt": "2026-03-01T12:00:00Z",
    })
}

pub fn test_config() -> NotifyConfig {
    NotifyConfig::new(API_URL, STREAM_URL).with_session_cookie("sid=test")
}

/// Transport that confirms the handshake on every successful open.
pub fn handshaking_transport() -> MockTransport {
    let mut transport = MockTransport::new();
    transport.set_auto_handshake(true);
    transport
}

/// Routes `tracing` output to the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A session over mocks, plus a handle to the shared mock API.
pub fn mock_session() -> (MockSession, MockNotificationApi) {
    mock_session_with(handshaking_transport(), &test_config())
}

pub fn mock_session_with(
    transport: MockTransport,
    config: &NotifyConfig,
) -> (MockSession, MockNotificationApi) {
    init_tracing();
    let api = MockNotificationApi::new();
    let session = NotificationSession::new(
        transport,
        ManualScheduler::new(),
        Box::new(api.clone()),
        config,
    );
    (session, api)
}

/// Queues a named frame on the session's transport.
pub fn push(session: &mut MockSession, event: &str, data: Value) {
    session.channel_mut().transport_mut().queue_event(event, data);
}
