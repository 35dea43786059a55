// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP Mutation Client
//!
//! [`NotificationApi`] over reqwest's blocking client:
//! - `PATCH {base}/notifications/{id}/read`
//! - `DELETE {base}/notifications/{id}`
//!
//! The blocking client must not be created or used from inside an async
//! runtime's worker thread.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use tracing::debug;

use super::client::NotificationApi;
use super::config::NotifyConfig;
use super::error::{ApiError, ApiResult};
use crate::notification::NotificationId;

/// REST client for notification mutations.
pub struct HttpNotificationApi {
    client: Client,
    base_url: String,
}

impl HttpNotificationApi {
    /// Create a client from config
    pub fn new(config: &NotifyConfig) -> ApiResult<Self> {
        let base_url = config.api_base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidEndpoint(config.api_base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| ApiError::RequestFailed(format!("invalid cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("notice-core/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn read_url(&self, id: NotificationId) -> String {
        format!("{}/notifications/{}/read", self.base_url, id)
    }

    fn item_url(&self, id: NotificationId) -> String {
        format!("{}/notifications/{}", self.base_url, id)
    }
}

impl NotificationApi for HttpNotificationApi {
    fn mark_read(&self, id: NotificationId) -> ApiResult<()> {
        let url = self.read_url(id);
        let response = self.client.patch(&url).send()?;
        debug!(%url, status = response.status().as_u16(), "mark-read call finished");

        if !response.status().is_success() {
            return Err(ApiError::Http(response.status().as_u16()));
        }
        Ok(())
    }

    fn delete(&self, id: NotificationId) -> ApiResult<()> {
        let url = self.item_url(id);
        let response = self.client.delete(&url).send()?;
        debug!(%url, status = response.status().as_u16(), "delete call finished");

        if !response.status().is_success() {
            return Err(ApiError::Http(response.status().as_u16()));
        }
        Ok(())
    }
}
