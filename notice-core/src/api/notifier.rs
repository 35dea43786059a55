// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Desktop Notifications
//!
//! Best-effort local alert for newly pushed notifications. The permission
//! prompt belongs to the host platform; this crate only asks whether it was
//! granted.

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

/// Errors from a desktop notifier. The session ignores them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifierError {
    /// The platform has no notification service.
    #[error("desktop notifications unavailable")]
    Unavailable,

    /// The platform rejected the notification.
    #[error("desktop notification failed: {0}")]
    Failed(String),
}

/// Surface for native desktop notifications.
pub trait DesktopNotifier: Send {
    /// Returns true if the user previously granted permission.
    fn permission_granted(&self) -> bool;

    /// Shows a notification.
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifierError>;
}

/// Notifier that never has permission.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl DesktopNotifier for NullNotifier {
    fn permission_granted(&self) -> bool {
        false
    }

    fn notify(&self, _title: &str, _body: &str) -> Result<(), NotifierError> {
        Err(NotifierError::Unavailable)
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    shown: Vec<(String, String)>,
    permission: bool,
    failing: bool,
}

/// Notifier that records what it was asked to show.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingNotifier {
    /// Creates a notifier with the given permission.
    pub fn new(permission: bool) -> Self {
        let notifier = Self::default();
        notifier.set_permission(permission);
        notifier
    }

    /// Grants or revokes permission.
    pub fn set_permission(&self, granted: bool) {
        self.lock().permission = granted;
    }

    /// Makes every `notify` call fail.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// `(title, body)` pairs shown so far.
    pub fn shown(&self) -> Vec<(String, String)> {
        self.lock().shown.clone()
    }

    fn lock(&self) -> MutexGuard<'_, RecordingState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DesktopNotifier for RecordingNotifier {
    fn permission_granted(&self) -> bool {
        self.lock().permission
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), NotifierError> {
        let mut state = self.lock();
        if state.failing {
            return Err(NotifierError::Failed("rejected".into()));
        }
        state.shown.push((title.to_string(), body.to_string()));
        Ok(())
    }
}
