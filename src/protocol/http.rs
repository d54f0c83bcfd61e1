// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of the remote state client.
//!
//! WLED serves its JSON API over plain HTTP without authentication, which is
//! only acceptable on a trusted LAN.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{Error, ParseError, ProtocolError, Result};
use crate::protocol::{DeviceAddress, DeviceInfo, RemoteState, StateClient, StatePayload};

const INFO_PATH: &str = "/json/info";
const STATE_PATH: &str = "/json/state";

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for the HTTP state client.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wled_slide::protocol::HttpConfig;
///
/// let config = HttpConfig::new();
/// assert_eq!(config.port(), 80);
/// assert_eq!(config.timeout(), Duration::from_secs(5));
///
/// let config = HttpConfig::new()
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.port(), 8080);
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration with default port and timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            client,
            port: self.port,
            timeout: self.timeout,
            base_url_override: None,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for WLED's JSON API.
///
/// The client is not bound to a device: every call names its target, so a
/// session can follow address changes reported by discovery.
///
/// # Examples
///
/// ```no_run
/// use wled_slide::protocol::{DeviceAddress, HttpClient, StateClient};
///
/// # async fn example() -> wled_slide::Result<()> {
/// let client = HttpClient::new()?;
/// let address: DeviceAddress = "192.168.1.50".parse()?;
/// let state = client.get_state(address).await?;
/// println!("on: {}, bri: {}", state.is_on(), state.brightness());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    port: u16,
    timeout: Duration,
    base_url_override: Option<String>,
}

impl HttpClient {
    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        HttpConfig::new().into_client()
    }

    /// Sends every request to `base_url`, ignoring the target address.
    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Builds the URL for `path` on `address`.
    fn url(&self, address: DeviceAddress, path: &str) -> String {
        match &self.base_url_override {
            Some(base) => format!("{base}{path}"),
            None if self.port == HttpConfig::DEFAULT_PORT => format!("http://{address}{path}"),
            None => format!("http://{address}:{}{path}", self.port),
        }
    }

    fn map_send_error(&self, address: DeviceAddress, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            // Saturating: timeouts beyond u64::MAX ms are not meaningful
            let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::debug!(%address, timeout_ms = millis, "WLED request timed out");
            ProtocolError::Timeout(millis).into()
        } else if err.is_connect() {
            ProtocolError::ConnectionFailed(format!("{address}: {err}")).into()
        } else {
            ProtocolError::Http(err).into()
        }
    }

    async fn send(
        &self,
        address: DeviceAddress,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>> {
        let response = request
            .send()
            .await
            .map_err(|e| self.map_send_error(address, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            }
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(address, e))?;

        tracing::debug!(%address, path, len = body.len(), "Received WLED response");
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, address: DeviceAddress, path: &str) -> Result<T> {
        let url = self.url(address, path);
        tracing::debug!(url = %url, "Sending WLED GET");
        let body = self.send(address, path, self.client.get(&url)).await?;
        parse_object(&body)
    }
}

/// Parses a response body that must be a JSON object.
fn parse_object<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(ParseError::Json)?;
    if !value.is_object() {
        return Err(ParseError::UnexpectedFormat(format!("expected a JSON object, got {value}")).into());
    }
    serde_json::from_value(value).map_err(|e| ParseError::Json(e).into())
}

impl StateClient for HttpClient {
    async fn get_info(&self, address: DeviceAddress) -> Result<DeviceInfo> {
        self.get_json(address, INFO_PATH).await
    }

    async fn get_state(&self, address: DeviceAddress) -> Result<RemoteState> {
        self.get_json(address, STATE_PATH).await
    }

    async fn set_state(&self, address: DeviceAddress, payload: &StatePayload) -> Result<()> {
        let url = self.url(address, STATE_PATH);
        tracing::debug!(url = %url, "Sending WLED state update");
        self.send(address, STATE_PATH, self.client.post(&url).json(payload))
            .await
            .map(drop)
    }
}
