// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! REST Mutation Client
//!
//! The two remote calls the session issues after an optimistic change.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use super::error::{ApiError, ApiResult};
use crate::notification::NotificationId;

/// Remote mark-read and delete calls.
///
/// Both calls are idempotent on the server, so issuing one for a record the
/// server already handled is harmless.
pub trait NotificationApi: Send + Sync {
    /// Marks a notification as read on the server.
    fn mark_read(&self, id: NotificationId) -> ApiResult<()>;

    /// Deletes a notification on the server.
    fn delete(&self, id: NotificationId) -> ApiResult<()>;
}

/// A call recorded by [`MockNotificationApi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCall {
    /// `mark_read(id)`
    MarkRead(NotificationId),
    /// `delete(id)`
    Delete(NotificationId),
}

#[derive(Debug, Default)]
struct MockApiState {
    calls: Vec<ApiCall>,
    next_errors: VecDeque<ApiError>,
    fail_status: Option<u16>,
}

/// In-memory API that records calls.
///
/// Clones share state, so a test can keep one handle and give the other to
/// the session.
#[derive(Debug, Clone, Default)]
pub struct MockNotificationApi {
    state: Arc<Mutex<MockApiState>>,
}

impl MockNotificationApi {
    /// Creates an API that accepts every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        self.lock().next_errors.push_back(error);
    }

    /// Makes every call fail with the given HTTP status until cleared.
    pub fn fail_all(&self, status: Option<u16>) {
        self.lock().fail_status = status;
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn record(&self, call: ApiCall) -> ApiResult<()> {
        let mut state = self.lock();
        state.calls.push(call);
        if let Some(error) = state.next_errors.pop_front() {
            return Err(error);
        }
        match state.fail_status {
            Some(status) => Err(ApiError::Http(status)),
            None => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockApiState> {
        // A panicking test thread must not hide the recorded calls.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl NotificationApi for MockNotificationApi {
    fn mark_read(&self, id: NotificationId) -> ApiResult<()> {
        self.record(ApiCall::MarkRead(id))
    }

    fn delete(&self, id: NotificationId) -> ApiResult<()> {
        self.record(ApiCall::Delete(id))
    }
}
