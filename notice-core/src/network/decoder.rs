// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Event Decoder
//!
//! Turns inbound push frames into typed channel events.
//!
//! Frames are JSON envelopes:
//!
//! ```text
//! {"event": "connected",              "data": <anything>}
//! {"event": "initial-notifications",  "data": [NotificationRecord, ...]}
//! {"event": "notification",           "data": NotificationRecord}
//! {"event": "broadcast",              "data": NotificationRecord}
//! {"event": "notification-read",      "data": 42 | "42"}
//! {"event": "notification-deleted",   "data": 42 | "42"}
//! ```
//!
//! Decoding never panics; callers log and drop frames that fail.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::transport::RawFrame;
use crate::notification::{NotificationId, NotificationRecord};

/// Handshake acknowledgement.
pub const EVENT_CONNECTED: &str = "connected";
/// Full list sent right after the handshake.
pub const EVENT_INITIAL: &str = "initial-notifications";
/// A new notification for this user.
pub const EVENT_NOTIFICATION: &str = "notification";
/// A notification sent to every user.
pub const EVENT_BROADCAST: &str = "broadcast";
/// Server confirmation that a notification was read.
pub const EVENT_READ: &str = "notification-read";
/// Server confirmation that a notification was deleted.
pub const EVENT_DELETED: &str = "notification-deleted";

/// Typed event decoded from a push frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Server accepted the connection.
    Connected,
    /// Full notification list for a fresh connection.
    InitialSnapshot(Vec<NotificationRecord>),
    /// A notification addressed to this user.
    NewNotification(NotificationRecord),
    /// A notification addressed to everyone.
    Broadcast(NotificationRecord),
    /// A notification was marked read on the server.
    ReadAck(NotificationId),
    /// A notification was deleted on the server.
    DeleteAck(NotificationId),
}

impl ChannelEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            ChannelEvent::Connected => EVENT_CONNECTED,
            ChannelEvent::InitialSnapshot(_) => EVENT_INITIAL,
            ChannelEvent::NewNotification(_) => EVENT_NOTIFICATION,
            ChannelEvent::Broadcast(_) => EVENT_BROADCAST,
            ChannelEvent::ReadAck(_) => EVENT_READ,
            ChannelEvent::DeleteAck(_) => EVENT_DELETED,
        }
    }
}

/// Why a frame could not be decoded.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The frame is not a `{event, data}` envelope.
    #[error("malformed envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// The event name is not one we handle.
    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// The payload does not match the event's shape.
    #[error("invalid payload for {event}: {source}")]
    Payload {
        /// Event name.
        event: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The id payload is not an integer.
    #[error("invalid id for {event}: {value}")]
    InvalidId {
        /// Event name.
        event: String,
        /// Offending payload.
        value: String,
    },
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Decodes one frame.
pub fn decode_frame(frame: &RawFrame) -> Result<ChannelEvent, DecodeError> {
    let envelope: Envelope =
        serde_json::from_str(frame.as_str()).map_err(DecodeError::Envelope)?;

    match envelope.event.as_str() {
        EVENT_CONNECTED => Ok(ChannelEvent::Connected),
        EVENT_INITIAL => {
            decode_payload(&envelope.event, envelope.data).map(ChannelEvent::InitialSnapshot)
        }
        EVENT_NOTIFICATION => {
            decode_payload(&envelope.event, envelope.data).map(ChannelEvent::NewNotification)
        }
        EVENT_BROADCAST => {
            decode_payload(&envelope.event, envelope.data).map(ChannelEvent::Broadcast)
        }
        EVENT_READ => decode_id(&envelope.event, &envelope.data).map(ChannelEvent::ReadAck),
        EVENT_DELETED => decode_id(&envelope.event, &envelope.data).map(ChannelEvent::DeleteAck),
        _ => Err(DecodeError::UnknownEvent(envelope.event)),
    }
}

fn decode_payload<T: serde::de::DeserializeOwned>(
    event: &str,
    data: Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(data).map_err(|source| DecodeError::Payload {
        event: event.to_string(),
        source,
    })
}

fn decode_id(event: &str, data: &Value) -> Result<NotificationId, DecodeError> {
    let id = match data {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| DecodeError::InvalidId {
        event: event.to_string(),
        value: data.to_string(),
    })
}
