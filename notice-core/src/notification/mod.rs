// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification Data Model
//!
//! Records and the local store that caches them.

mod record;
mod store;

pub use record::{NotificationId, NotificationRecord, NotificationType};
pub use store::{NotificationStore, DEFAULT_TOMBSTONE_CAPACITY};
