// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! HTTP transport seam used by the JMAP client.
//!
//! The client never talks to the network directly. It hands a URL, a header
//! map and (for POST) a JSON body to a [`Transport`], and gets parsed JSON
//! back. [`HttpTransport`] is the `reqwest` backed implementation used by the
//! CLI; tests substitute their own.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(String),
    #[error("HTTP {status} from {url}: {body}")]
    Status { url: String, status: u16, body: String },
    #[error("Response body is not valid JSON: {0}")]
    Decode(String),
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Minimal capability the client needs from an HTTP stack.
///
/// Implementations must tolerate concurrent use if the owning client is
/// shared between tasks.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET and parse the response body as JSON.
    async fn get(&self, url: &str, headers: &HashMap<String, String>) -> Result<Value, TransportError>;

    /// Serialize `body` as JSON, POST it and parse the response body as JSON.
    async fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &HashMap<String, String>,
    ) -> Result<Value, TransportError>;
}

/// `reqwest` implementation of [`Transport`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http_client: Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http_client: Client) -> Self {
        Self { http_client, timeout: None }
    }

    /// Per-request timeout. Unset means whatever the inner client does.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn execute(&self, url: &str, builder: RequestBuilder) -> Result<Value, TransportError> {
        let builder = match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if !status.is_success() {
            error!("Request to {} failed with status {}", url, status);
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

fn to_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: &HashMap<String, String>) -> Result<Value, TransportError> {
        debug!("GET {}", url);
        let builder = self.http_client.get(url).headers(to_header_map(headers)?);
        self.execute(url, builder).await
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &HashMap<String, String>,
    ) -> Result<Value, TransportError> {
        debug!("POST {}", url);
        let builder = self
            .http_client
            .post(url)
            .headers(to_header_map(headers)?)
            .json(body);
        self.execute(url, builder).await
    }
}
