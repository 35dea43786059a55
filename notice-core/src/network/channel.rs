// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Channel Transport
//!
//! Owns the push transport and its reconnect policy.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::error::NetworkError;
use super::scheduler::{Scheduler, TimerId};
use super::transport::{ConnectionState, PushTransport, RawFrame, TransportConfig};
use crate::auth::AuthGate;

/// Push channel with auth gating and bounded reconnects.
///
/// Wraps a transport implementation and adds:
/// - `Idle → Connecting → Open` transitions, where `Open` requires the
///   server's handshake frame
/// - fixed-delay reconnects, at most `max_reconnect_attempts` in a row
/// - auth gating: nothing opens while signed out or while auth is resolving
///
/// Timers come from an injected [`Scheduler`], so the whole policy can be
/// driven in tests without sleeping.
///
/// # Example
///
/// ```ignore
/// use notice_core::network::{ChannelTransport, ManualScheduler, MockTransport, TransportConfig};
/// use notice_core::AuthGate;
///
/// let mut channel = ChannelTransport::new(
///     MockTransport::new(),
///     ManualScheduler::new(),
///     TransportConfig::new("wss://example.com/notifications"),
/// );
/// channel.update_gate(AuthGate::authenticated());
/// channel.start();
/// ```
pub struct ChannelTransport<T: PushTransport, S: Scheduler> {
    transport: T,
    scheduler: S,
    config: TransportConfig,
    state: ConnectionState,
    gate: AuthGate,
    retry_count: u32,
    reconnect_timer: Option<TimerId>,
}

impl<T: PushTransport, S: Scheduler> ChannelTransport<T, S> {
    /// Creates an idle channel.
    pub fn new(transport: T, scheduler: S, config: TransportConfig) -> Self {
        ChannelTransport {
            transport,
            scheduler,
            config,
            state: ConnectionState::Idle,
            gate: AuthGate::default(),
            retry_count: 0,
            reconnect_timer: None,
        }
    }

    /// Records the latest auth gate.
    ///
    /// Does not start or stop anything; the lifecycle controller decides that.
    /// Reconnects consult the most recent gate.
    pub fn update_gate(&mut self, gate: AuthGate) {
        self.gate = gate;
    }

    /// Last auth gate seen.
    pub fn gate(&self) -> AuthGate {
        self.gate
    }

    /// Opens the channel if allowed.
    ///
    /// No-op while connecting or open, or when the gate does not allow a
    /// connection. An explicit start supersedes a pending reconnect timer and
    /// resets the retry budget. Returns true if an open was attempted.
    pub fn start(&mut self) -> bool {
        if matches!(self.state, ConnectionState::Connecting | ConnectionState::Open) {
            return false;
        }
        if !self.gate.allows_connect() {
            debug!(gate = ?self.gate, "push channel start suppressed by auth gate");
            return false;
        }

        self.cancel_reconnect();
        self.retry_count = 0;
        self.open();
        true
    }

    /// Tears the channel down and returns to `Idle`.
    ///
    /// Cancels any pending reconnect. Idempotent.
    pub fn stop(&mut self) {
        self.cancel_reconnect();
        if self.state != ConnectionState::Idle {
            self.close_transport();
            debug!(from = ?self.state, "push channel stopped");
        }
        self.state = ConnectionState::Idle;
        self.retry_count = 0;
    }

    /// Marks the handshake as confirmed.
    ///
    /// Only valid while connecting; returns false otherwise.
    pub fn confirm_handshake(&mut self) -> bool {
        if self.state != ConnectionState::Connecting {
            debug!(state = ?self.state, "handshake frame outside of connecting state ignored");
            return false;
        }
        self.state = ConnectionState::Open;
        self.retry_count = 0;
        info!(url = %self.config.stream_url, "push channel open");
        true
    }

    /// Returns the next inbound frame, if any.
    ///
    /// A transport error closes the channel and engages the reconnect policy.
    pub fn poll_frame(&mut self) -> Option<RawFrame> {
        if !matches!(self.state, ConnectionState::Connecting | ConnectionState::Open) {
            return None;
        }
        match self.transport.poll_frame() {
            Ok(frame) => frame,
            Err(e) => {
                self.handle_failure(e);
                None
            }
        }
    }

    /// Fires due reconnect timers.
    ///
    /// Returns true if a reconnect was attempted.
    pub fn fire_due_timers(&mut self) -> bool {
        let mut attempted = false;
        for id in self.scheduler.take_due() {
            if self.reconnect_timer != Some(id) {
                continue;
            }
            self.reconnect_timer = None;

            if self.state == ConnectionState::Closed && self.gate.allows_connect() {
                debug!(attempt = self.retry_count, "reconnecting push channel");
                self.open();
                attempted = true;
            } else {
                debug!(state = ?self.state, gate = ?self.gate, "reconnect timer skipped");
            }
        }
        attempted
    }

    /// Returns the current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns true if the handshake has been confirmed.
    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Reconnects scheduled since the last successful handshake.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Returns true if a reconnect timer is pending.
    pub fn has_pending_reconnect(&self) -> bool {
        self.reconnect_timer.is_some()
    }

    /// Returns true if the channel failed and will not retry on its own.
    pub fn has_given_up(&self) -> bool {
        self.state == ConnectionState::Closed && self.reconnect_timer.is_none()
    }

    /// Returns the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a mutable reference to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Returns a reference to the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Returns a mutable reference to the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn open(&mut self) {
        self.state = ConnectionState::Connecting;
        debug!(url = %self.config.stream_url, "opening push channel");
        if let Err(e) = self.transport.open(&self.config) {
            self.handle_failure(e);
        }
    }

    fn handle_failure(&mut self, error: NetworkError) {
        self.close_transport();
        self.state = ConnectionState::Closed;

        if self.retry_count < self.config.max_reconnect_attempts && self.gate.allows_connect() {
            self.retry_count += 1;
            let delay = Duration::from_millis(self.config.reconnect_delay_ms);
            self.reconnect_timer = Some(self.scheduler.schedule(delay));
            warn!(
                %error,
                attempt = self.retry_count,
                max = self.config.max_reconnect_attempts,
                delay_ms = self.config.reconnect_delay_ms,
                "push channel failed, reconnect scheduled"
            );
        } else {
            warn!(%error, retries = self.retry_count, "push channel failed, giving up");
        }
    }

    fn close_transport(&mut self) {
        if let Err(e) = self.transport.close() {
            debug!(error = %e, "push channel close failed");
        }
    }

    fn cancel_reconnect(&mut self) {
        if let Some(id) = self.reconnect_timer.take() {
            self.scheduler.cancel(id);
        }
    }
}
