// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! API Error Types
//!
//! Errors for the REST mutation calls and for configuration loading.

use thiserror::Error;

/// Errors from a mark-read or delete call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Http(u16),

    /// Network/request error
    #[cfg(any(feature = "network-native-tls", feature = "network-rustls"))]
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The call could not be made.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The configured base URL is unusable.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Result type for REST mutation calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range or inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}
