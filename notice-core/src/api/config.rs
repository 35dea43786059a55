// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration for a notification session

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::network::TransportConfig;
use crate::notification::DEFAULT_TOMBSTONE_CAPACITY;

/// Configuration for the notification session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Push channel settings.
    pub transport: TransportConfig,

    /// REST base URL (e.g., "https://api.example.com/api")
    pub api_base_url: String,

    /// Session cookie shared by the push channel and REST calls.
    pub session_cookie: Option<String>,

    /// HTTP timeout for mutation calls (milliseconds)
    pub request_timeout_ms: u64,

    /// How many deleted ids the store remembers
    pub tombstone_capacity: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            api_base_url: String::new(),
            session_cookie: None,
            request_timeout_ms: 10_000,
            tombstone_capacity: DEFAULT_TOMBSTONE_CAPACITY,
        }
    }
}

impl NotifyConfig {
    /// Creates a config for the given REST base and stream endpoint.
    pub fn new(api_base_url: &str, stream_url: &str) -> Self {
        Self {
            transport: TransportConfig::new(stream_url),
            api_base_url: api_base_url.to_string(),
            ..Default::default()
        }
    }

    /// Loads a JSON document over the defaults and validates it.
    ///
    /// Missing keys keep their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: NotifyConfig = serde_json::from_str(json)?;
        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Configure the session cookie for both the channel and REST calls
    pub fn with_session_cookie(mut self, cookie: &str) -> Self {
        self.session_cookie = Some(cookie.to_string());
        self.transport.session_cookie = Some(cookie.to_string());
        self
    }

    /// Configure the reconnect policy
    pub fn with_reconnect(mut self, max_attempts: u32, delay_ms: u64) -> Self {
        self.transport = self.transport.with_reconnect(max_attempts, delay_ms);
        self
    }

    /// Configure the tombstone capacity (0 disables tombstones)
    pub fn with_tombstone_capacity(mut self, capacity: usize) -> Self {
        self.tombstone_capacity = capacity;
        self
    }

    /// Checks that endpoints are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let stream = &self.transport.stream_url;
        if !(stream.starts_with("ws://") || stream.starts_with("wss://")) {
            return Err(ConfigError::Invalid(format!(
                "stream_url must be ws:// or wss://, got {:?}",
                stream
            )));
        }
        let api = &self.api_base_url;
        if !(api.starts_with("http://") || api.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_base_url must be http:// or https://, got {:?}",
                api
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("request_timeout_ms must be > 0".into()));
        }
        Ok(())
    }

    // A top-level cookie applies to the channel unless it has its own.
    fn normalized(mut self) -> Self {
        if self.transport.session_cookie.is_none() {
            self.transport.session_cookie = self.session_cookie.clone();
        }
        self
    }
}
