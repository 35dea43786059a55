// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mock Transport
//!
//! In-memory push transport for tests and for hosts that want to exercise a
//! session without a server.

use std::collections::VecDeque;

use serde_json::Value;

use super::decoder::EVENT_CONNECTED;
use super::error::NetworkError;
use super::transport::{PushTransport, RawFrame, TransportConfig, TransportResult};

/// Scripted push transport.
///
/// Frames queued with [`MockTransport::queue_frame`] are returned by
/// `poll_frame` in order. Errors can be injected for the next `open` or the
/// next `poll_frame`.
#[derive(Debug, Default)]
pub struct MockTransport {
    open: bool,
    frames: VecDeque<RawFrame>,
    open_errors: VecDeque<NetworkError>,
    fail_every_open: Option<NetworkError>,
    receive_error: Option<NetworkError>,
    auto_handshake: bool,
    open_count: usize,
    close_count: usize,
    last_config: Option<TransportConfig>,
}

impl MockTransport {
    /// Creates a closed mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a frame for delivery.
    pub fn queue_frame(&mut self, frame: RawFrame) {
        self.frames.push_back(frame);
    }

    /// Queues a named event with a JSON payload.
    pub fn queue_event(&mut self, event: &str, data: Value) {
        self.queue_frame(RawFrame::named(event, data));
    }

    /// Makes the next `open` call fail with `error`.
    pub fn inject_open_error(&mut self, error: NetworkError) {
        self.open_errors.push_back(error);
    }

    /// Makes every `open` call fail until cleared with `None`.
    pub fn fail_every_open(&mut self, error: Option<NetworkError>) {
        self.fail_every_open = error;
    }

    /// Makes the next `poll_frame` call fail, simulating a dropped channel.
    pub fn inject_receive_error(&mut self, error: NetworkError) {
        self.receive_error = Some(error);
    }

    /// Queue a `connected` frame after every successful open.
    pub fn set_auto_handshake(&mut self, enabled: bool) {
        self.auto_handshake = enabled;
    }

    /// Returns true while the channel is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Number of `open` calls, successful or not.
    pub fn open_count(&self) -> usize {
        self.open_count
    }

    /// Number of `close` calls.
    pub fn close_count(&self) -> usize {
        self.close_count
    }

    /// Frames not yet delivered.
    pub fn queued_frames(&self) -> usize {
        self.frames.len()
    }

    /// Config passed to the most recent `open`.
    pub fn last_config(&self) -> Option<&TransportConfig> {
        self.last_config.as_ref()
    }
}

impl PushTransport for MockTransport {
    fn open(&mut self, config: &TransportConfig) -> TransportResult<()> {
        self.open_count += 1;
        self.last_config = Some(config.clone());

        if let Some(error) = self.open_errors.pop_front() {
            return Err(error);
        }
        if let Some(error) = &self.fail_every_open {
            return Err(error.clone());
        }

        self.open = true;
        if self.auto_handshake {
            self.queue_event(EVENT_CONNECTED, Value::Null);
        }
        Ok(())
    }

    fn close(&mut self) -> TransportResult<()> {
        self.close_count += 1;
        self.open = false;
        Ok(())
    }

    fn poll_frame(&mut self) -> TransportResult<Option<RawFrame>> {
        if !self.open {
            return Err(NetworkError::NotConnected);
        }
        if let Some(error) = self.receive_error.take() {
            self.open = false;
            return Err(error);
        }
        Ok(self.frames.pop_front())
    }
}
