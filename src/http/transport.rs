// ABOUTME: HTTP transport abstraction used by the OAuth2 client
// ABOUTME: Defines HttpTransport, HttpRequest, HttpResponse, HttpMethod, and RequestBody
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP Transport
//!
//! The client never talks to the network directly. Every token request and
//! signed query goes through an [`HttpTransport`], which performs exactly one
//! round trip per call and returns the response untouched. Status codes are not
//! interpreted here; non-2xx answers are ordinary responses.

use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use pierre_oauth2_core::{OAuth2Error, TransportError};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// HTTP methods supported for token and resource requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// HEAD
    Head,
    /// DELETE
    Delete,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
}

impl HttpMethod {
    /// Whether requests with this method carry a body
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Upper-case method name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Delete => "DELETE",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = OAuth2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "head" => Ok(Self::Head),
            "delete" => Ok(Self::Delete),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            _ => Err(OAuth2Error::InvalidMethod {
                method: s.to_owned(),
            }),
        }
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Head => Self::HEAD,
            HttpMethod::Delete => Self::DELETE,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
        }
    }
}

/// Request payload: either an ordered form mapping or a raw string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Form fields, sent as `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// Raw body sent as-is
    Raw(String),
}

impl RequestBody {
    /// Build a form body from key/value pairs
    pub fn form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Value of a form field, if this is a form body
    #[must_use]
    pub fn form_value(&self, key: &str) -> Option<&str> {
        match self {
            Self::Form(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            Self::Raw(_) => None,
        }
    }

    /// Set a form field (replacing an existing one) or append `key=value` to a raw body
    pub fn set_param(&mut self, key: &str, value: &str) {
        match self {
            Self::Form(pairs) => {
                if let Some(existing) = pairs.iter_mut().find(|(k, _)| k == key) {
                    existing.1 = value.to_owned();
                } else {
                    pairs.push((key.to_owned(), value.to_owned()));
                }
            }
            Self::Raw(raw) => {
                if !raw.is_empty() {
                    raw.push('&');
                }
                raw.push_str(key);
                raw.push('=');
                raw.push_str(&urlencoding::encode(value));
            }
        }
    }

    /// Form-encode the body (raw bodies are returned unchanged)
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Form(pairs) => serde_urlencoded::to_string(pairs).unwrap_or_default(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::Form(Vec::new())
    }
}

/// A single outgoing HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Payload for body-carrying methods
    pub body: Option<RequestBody>,
    /// Read timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// GET request without a body
    #[must_use]
    pub fn get(url: impl Into<String>, headers: HeaderMap, timeout: Option<Duration>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers,
            body: None,
            timeout,
        }
    }

    /// POST request with a body
    #[must_use]
    pub fn post(
        url: impl Into<String>,
        body: RequestBody,
        headers: HeaderMap,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers,
            body: Some(body),
            timeout,
        }
    }
}

/// Response returned by a transport, passed back to callers unmodified
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub code: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    #[must_use]
    pub fn new(code: u16, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// `Content-Type` header, if present and valid UTF-8
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

/// Performs HTTP round trips on behalf of the client
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request and return its response
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when the request cannot be completed
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}
