// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network Error Types

use thiserror::Error;

/// Errors raised by a push transport.
///
/// All of them are recoverable from the session's point of view: the channel
/// goes to `Closed` and the reconnect policy decides what happens next.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Could not establish the connection.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The server closed the channel.
    #[error("connection closed")]
    ConnectionClosed,

    /// Operation requires an open channel.
    #[error("not connected")]
    NotConnected,

    /// Reading from the channel failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// Timed out waiting on the server.
    #[error("timeout")]
    Timeout,

    /// Invalid endpoint URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}
