// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mutation Coordinator
//!
//! User-initiated mark-read and delete, applied optimistically.
//!
//! A request changes the store at once and queues the remote call in an
//! outbox. The outbox is drained when the session is polled. A failed call is
//! reported and dropped: the local state is never rolled back, and the
//! server's own confirmation frame, if it ever arrives, is a no-op against
//! the already-applied change.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, warn};

use super::client::NotificationApi;
use super::error::ApiError;
use crate::notification::{NotificationId, NotificationStore};

/// A remote change requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    /// Mark one notification read.
    MarkRead(NotificationId),
    /// Delete one notification.
    Delete(NotificationId),
}

impl Mutation {
    /// Target notification.
    pub fn id(&self) -> NotificationId {
        match self {
            Mutation::MarkRead(id) | Mutation::Delete(id) => *id,
        }
    }

    fn send(&self, api: &dyn NotificationApi) -> Result<(), ApiError> {
        match self {
            Mutation::MarkRead(id) => api.mark_read(*id),
            Mutation::Delete(id) => api.delete(*id),
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::MarkRead(id) => write!(f, "mark-read #{}", id),
            Mutation::Delete(id) => write!(f, "delete #{}", id),
        }
    }
}

/// Result of draining the outbox.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Calls the server accepted.
    pub sent: Vec<Mutation>,
    /// Calls that failed, with their errors.
    pub failed: Vec<(Mutation, ApiError)>,
}

/// Applies user mutations to the store and queues the remote calls.
#[derive(Debug, Default)]
pub struct MutationCoordinator {
    outbox: VecDeque<Mutation>,
}

impl MutationCoordinator {
    /// Creates a coordinator with an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a notification read locally and queues the remote call.
    ///
    /// Returns true if the store changed. The call is queued either way; the
    /// endpoint is idempotent.
    pub fn request_mark_read(&mut self, store: &mut NotificationStore, id: NotificationId) -> bool {
        let changed = store.mark_read(id);
        self.enqueue(Mutation::MarkRead(id));
        changed
    }

    /// Removes a notification locally and queues the remote call.
    ///
    /// Returns true if a record was removed. A queued mark-read for the same
    /// id is dropped since the delete supersedes it.
    pub fn request_delete(&mut self, store: &mut NotificationStore, id: NotificationId) -> bool {
        let removed = store.remove(id).is_some();
        self.outbox.retain(|m| *m != Mutation::MarkRead(id));
        self.enqueue(Mutation::Delete(id));
        removed
    }

    /// Issues every queued call, oldest first.
    pub fn dispatch_pending(&mut self, api: &dyn NotificationApi) -> DispatchReport {
        let mut report = DispatchReport::default();
        while let Some(mutation) = self.outbox.pop_front() {
            match mutation.send(api) {
                Ok(()) => {
                    debug!(%mutation, "mutation confirmed by server");
                    report.sent.push(mutation);
                }
                Err(e) => {
                    warn!(%mutation, error = %e, "mutation failed, keeping local state");
                    report.failed.push((mutation, e));
                }
            }
        }
        report
    }

    /// Number of queued calls.
    pub fn pending(&self) -> usize {
        self.outbox.len()
    }

    /// Queued calls, oldest first.
    pub fn pending_mutations(&self) -> impl Iterator<Item = &Mutation> {
        self.outbox.iter()
    }

    /// Drops every queued call.
    pub fn clear(&mut self) {
        self.outbox.clear();
    }

    fn enqueue(&mut self, mutation: Mutation) {
        if !self.outbox.contains(&mutation) {
            self.outbox.push_back(mutation);
        }
    }
}
