// ABOUTME: reqwest-backed HttpTransport with timeout-tuned client construction
// ABOUTME: Default transport for token exchanges and signed resource requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::transport::{HttpRequest, HttpResponse, HttpTransport, RequestBody};
use async_trait::async_trait;
use pierre_oauth2_core::constants::timeouts::{
    OAUTH_CONNECT_TIMEOUT_SECS, OAUTH_REQUEST_TIMEOUT_SECS,
};
use pierre_oauth2_core::TransportError;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Create a new HTTP client optimized for OAuth flows
///
/// Token exchanges should be fast, so timeouts are shorter than for general API calls.
#[must_use]
pub fn oauth_client() -> Client {
    create_client_with_timeout(OAUTH_REQUEST_TIMEOUT_SECS, OAUTH_CONNECT_TIMEOUT_SECS)
}

/// [`HttpTransport`] backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Transport using the OAuth-tuned default client
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: oauth_client(),
        }
    }

    /// Transport reusing an existing client (shares its connection pool)
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Transport with explicit request and connect timeouts
    #[must_use]
    pub fn with_timeouts(timeout_secs: u64, connect_timeout_secs: u64) -> Self {
        Self {
            client: create_client_with_timeout(timeout_secs, connect_timeout_secs),
        }
    }

    /// Underlying HTTP client
    #[must_use]
    pub const fn http_client(&self) -> &Client {
        &self.client
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        debug!(http.method = %method, http.url = %url, "Sending HTTP request");

        let mut builder = self.client.request(method.into(), &url).headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder = match body {
            Some(RequestBody::Form(pairs)) => builder.form(&pairs),
            Some(RequestBody::Raw(raw)) => builder.body(raw),
            None => builder,
        };

        let response = builder.send().await?;
        let code = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        debug!(http.method = %method, http.status = code, "Received HTTP response");

        Ok(HttpResponse {
            code,
            headers,
            body,
        })
    }
}
