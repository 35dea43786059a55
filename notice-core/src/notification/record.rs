// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification Records
//!
//! The record type shared by the push channel, the store and the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned notification identifier.
pub type NotificationId = i64;

/// Category of a notification.
///
/// Unknown codes coming from the server decode as [`NotificationType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationType {
    /// Booking created, changed or cancelled.
    Booking,
    /// Payment received or failed.
    Payment,
    /// A review was left.
    Review,
    /// Platform announcement.
    System,
    /// Anything else.
    #[default]
    #[serde(other)]
    Other,
}

/// A single notification as delivered by the server.
///
/// Identity is `id`. `is_read` is the only field the client mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Unique, server-assigned id.
    pub id: NotificationId,
    /// Notification category.
    #[serde(default)]
    pub type_code: NotificationType,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Where the UI navigates when the notification is opened.
    #[serde(default)]
    pub target_url: Option<String>,
    /// Whether the user has seen it.
    #[serde(default)]
    pub is_read: bool,
    /// Creation time on the server.
    pub created_at: DateTime<Utc>,
}

impl NotificationRecord {
    /// Creates an unread record stamped with the current time.
    pub fn new(
        id: NotificationId,
        type_code: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        NotificationRecord {
            id,
            type_code,
            title: title.into(),
            message: message.into(),
            target_url: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Sets the navigation target.
    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        self.target_url = Some(url.into());
        self
    }

    /// Sets the read flag.
    pub fn with_read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }
}
