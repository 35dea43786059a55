// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification Session
//!
//! Session-scoped service that owns the push channel, the store and the
//! mutation outbox for one signed-in user.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::auth::{AuthGate, AuthPhase};
use crate::network::{
    decode_frame, ChannelEvent, ChannelTransport, ConnectionState, PushTransport, RawFrame,
    Scheduler,
};
use crate::notification::{NotificationId, NotificationRecord, NotificationStore};

use super::client::NotificationApi;
use super::config::NotifyConfig;
use super::events::{EventDispatcher, NotifyEvent};
use super::lifecycle::LifecycleController;
use super::mutation::{Mutation, MutationCoordinator};
use super::notifier::{DesktopNotifier, NullNotifier};

/// Result of one poll.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PollResult {
    /// Frames decoded and applied.
    pub events_applied: usize,
    /// Frames dropped because they could not be decoded.
    pub frames_discarded: usize,
    /// Remote calls the server accepted.
    pub mutations_sent: usize,
    /// Remote calls that failed.
    pub mutations_failed: usize,
    /// A reconnect timer fired and a new connection was attempted.
    pub reconnect_attempted: bool,
}

/// Notification service for one authenticated session.
///
/// Everything goes through `&mut self`, so store operations never interleave.
/// The host calls [`NotificationSession::poll`] from its event loop.
///
/// # Example
///
/// ```ignore
/// use notice_core::api::{MockNotificationApi, NotificationSession, NotifyConfig};
/// use notice_core::network::{ManualScheduler, MockTransport};
/// use notice_core::AuthGate;
///
/// let mut session = NotificationSession::new(
///     MockTransport::new(),
///     ManualScheduler::new(),
///     Box::new(MockNotificationApi::new()),
///     &NotifyConfig::default(),
/// );
/// session.set_auth(AuthGate::authenticated());
/// session.poll();
/// println!("{} unread", session.unread_count());
/// ```
pub struct NotificationSession<T: PushTransport, S: Scheduler> {
    channel: ChannelTransport<T, S>,
    lifecycle: LifecycleController,
    store: NotificationStore,
    mutations: MutationCoordinator,
    api: Box<dyn NotificationApi>,
    notifier: Box<dyn DesktopNotifier>,
    events: Arc<EventDispatcher>,
    last_state: ConnectionState,
    torn_down: bool,
}

impl<T: PushTransport, S: Scheduler> NotificationSession<T, S> {
    /// Creates an idle session. Nothing connects until [`Self::set_auth`].
    pub fn new(
        transport: T,
        scheduler: S,
        api: Box<dyn NotificationApi>,
        config: &NotifyConfig,
    ) -> Self {
        let mut transport_config = config.transport.clone();
        if transport_config.session_cookie.is_none() {
            transport_config.session_cookie = config.session_cookie.clone();
        }

        NotificationSession {
            channel: ChannelTransport::new(transport, scheduler, transport_config),
            lifecycle: LifecycleController::new(),
            store: NotificationStore::with_tombstone_capacity(config.tombstone_capacity),
            mutations: MutationCoordinator::new(),
            api,
            notifier: Box::new(NullNotifier),
            events: Arc::new(EventDispatcher::new()),
            last_state: ConnectionState::Idle,
            torn_down: false,
        }
    }

    /// Uses `notifier` for desktop alerts on new notifications.
    pub fn with_notifier(mut self, notifier: Box<dyn DesktopNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Uses a shared event dispatcher.
    pub fn with_events(mut self, events: Arc<EventDispatcher>) -> Self {
        self.events = events;
        self
    }

    // ============================================================
    // Lifecycle
    // ============================================================

    /// Feeds the host's auth state to the lifecycle controller.
    pub fn set_auth(&mut self, gate: AuthGate) -> AuthPhase {
        if self.torn_down {
            return self.lifecycle.phase();
        }
        let phase = self.lifecycle.observe(gate, &mut self.channel);
        self.sync_connection_state();
        phase
    }

    /// Stops the channel for good. Called on drop as well.
    ///
    /// Remote calls still queued are issued first; their results only
    /// surface as events.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.flush_mutations();
        self.lifecycle.teardown(&mut self.channel);
        self.torn_down = true;
        self.sync_connection_state();
        debug!(pending = self.mutations.pending(), "notification session torn down");
    }

    /// Returns true after [`Self::teardown`].
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ============================================================
    // Event loop
    // ============================================================

    /// Runs one turn of the session.
    ///
    /// Fires due reconnect timers, applies every available frame in arrival
    /// order, then issues queued remote calls.
    pub fn poll(&mut self) -> PollResult {
        let mut result = PollResult::default();
        if self.torn_down {
            return result;
        }

        result.reconnect_attempted = self.channel.fire_due_timers();
        self.sync_connection_state();

        while let Some(frame) = self.channel.poll_frame() {
            if self.handle_frame(&frame) {
                result.events_applied += 1;
            } else {
                result.frames_discarded += 1;
            }
        }
        self.sync_connection_state();

        let (sent, failed) = self.flush_mutations();
        result.mutations_sent = sent;
        result.mutations_failed = failed;

        result
    }

    /// Decodes and applies one frame.
    ///
    /// Returns false if the frame was malformed and dropped.
    pub fn handle_frame(&mut self, frame: &RawFrame) -> bool {
        match decode_frame(frame) {
            Ok(event) => {
                self.apply_event(event);
                true
            }
            Err(e) => {
                warn!(error = %e, "discarding malformed push frame");
                false
            }
        }
    }

    /// Applies a decoded channel event.
    pub fn apply_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Connected => {
                self.channel.confirm_handshake();
                self.sync_connection_state();
            }
            ChannelEvent::InitialSnapshot(records) => {
                self.store.load_snapshot(records);
                self.events.dispatch(NotifyEvent::SnapshotLoaded {
                    count: self.store.len(),
                });
            }
            ChannelEvent::NewNotification(record) | ChannelEvent::Broadcast(record) => {
                self.insert_pushed(record);
            }
            ChannelEvent::ReadAck(id) => {
                if self.store.mark_read(id) {
                    self.events.dispatch(NotifyEvent::NotificationRead { id });
                }
            }
            ChannelEvent::DeleteAck(id) => {
                if self.store.remove(id).is_some() {
                    self.events.dispatch(NotifyEvent::NotificationRemoved { id });
                }
            }
        }
    }

    // ============================================================
    // User mutations
    // ============================================================

    /// Marks a notification read now and queues the remote call.
    ///
    /// Returns true if the store changed. After teardown the call is issued
    /// at once, since nothing polls any more.
    pub fn request_mark_read(&mut self, id: NotificationId) -> bool {
        let changed = self.mutations.request_mark_read(&mut self.store, id);
        if changed {
            self.events.dispatch(NotifyEvent::NotificationRead { id });
        }
        if self.torn_down {
            self.flush_mutations();
        }
        changed
    }

    /// Removes a notification now and queues the remote call.
    ///
    /// Returns true if a record was removed. Issued at once after teardown.
    pub fn request_delete(&mut self, id: NotificationId) -> bool {
        let removed = self.mutations.request_delete(&mut self.store, id);
        if removed {
            self.events.dispatch(NotifyEvent::NotificationRemoved { id });
        }
        if self.torn_down {
            self.flush_mutations();
        }
        removed
    }

    /// Remote calls not yet issued.
    pub fn pending_mutations(&self) -> Vec<Mutation> {
        self.mutations.pending_mutations().copied().collect()
    }

    // ============================================================
    // Read surface
    // ============================================================

    /// Notifications in display order.
    pub fn notifications(&self) -> &[NotificationRecord] {
        self.store.records()
    }

    /// Looks up a notification.
    pub fn get(&self, id: NotificationId) -> Option<&NotificationRecord> {
        self.store.get(id)
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.store.unread_count()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    /// Current push channel state.
    pub fn connection_state(&self) -> ConnectionState {
        self.channel.state()
    }

    /// Connection health flag for the UI: true while the channel is open.
    pub fn is_healthy(&self) -> bool {
        self.channel.is_open()
    }

    /// Shared event dispatcher.
    pub fn events(&self) -> Arc<EventDispatcher> {
        Arc::clone(&self.events)
    }

    /// Returns a reference to the channel transport.
    pub fn channel(&self) -> &ChannelTransport<T, S> {
        &self.channel
    }

    /// Returns a mutable reference to the channel transport.
    pub fn channel_mut(&mut self) -> &mut ChannelTransport<T, S> {
        &mut self.channel
    }

    fn insert_pushed(&mut self, record: NotificationRecord) {
        let id = record.id;
        if !self.store.insert(record) {
            debug!(id, "duplicate or deleted notification ignored");
            return;
        }

        self.events.dispatch(NotifyEvent::NotificationAdded { id });

        if !self.notifier.permission_granted() {
            return;
        }
        if let Some(record) = self.store.get(id) {
            if let Err(e) = self.notifier.notify(&record.title, &record.message) {
                debug!(id, error = %e, "desktop notification failed");
            }
        }
    }

    // Returns (sent, failed).
    fn flush_mutations(&mut self) -> (usize, usize) {
        let report = self.mutations.dispatch_pending(self.api.as_ref());
        let sent = report.sent.len();
        let failed = report.failed.len();
        for (mutation, error) in report.failed {
            self.events.dispatch(NotifyEvent::MutationFailed {
                mutation,
                error: error.to_string(),
            });
        }
        (sent, failed)
    }

    fn sync_connection_state(&mut self) {
        let state = self.channel.state();
        if state != self.last_state {
            self.last_state = state;
            self.events
                .dispatch(NotifyEvent::ConnectionStateChanged { state });
        }
    }
}

impl<T: PushTransport, S: Scheduler> Drop for NotificationSession<T, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
