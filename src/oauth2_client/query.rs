// ABOUTME: Signed resource requests: request builder, outcome type, and credential placement
// ABOUTME: Places the access token in a bearer header, the query string, or the form body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::token::Token;
use crate::config::{AuthMethod, ClientConfig};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use http::header::{HeaderName, HeaderValue, AUTHORIZATION};
use http::HeaderMap;
use pierre_oauth2_core::constants::params;
use pierre_oauth2_core::{OAuth2Error, OAuth2Result};
use std::time::Duration;
use url::Url;

/// A protected resource call to be signed with the current token
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    /// Target URL
    pub url: String,
    /// Form fields or raw body
    pub data: Option<RequestBody>,
    /// Extra request headers
    pub headers: HeaderMap,
    /// Method override; `None` uses the placement default
    pub method: Option<HttpMethod>,
    /// Timeout override; `None` uses the configured default
    pub timeout: Option<Duration>,
}

impl ResourceRequest {
    /// Request to `url` with no data
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            data: None,
            headers: HeaderMap::new(),
            method: None,
            timeout: None,
        }
    }

    /// Attach form fields
    #[must_use]
    pub fn form<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.data = Some(RequestBody::form(pairs));
        self
    }

    /// Attach a raw body
    #[must_use]
    pub fn raw_body(mut self, body: impl Into<String>) -> Self {
        self.data = Some(RequestBody::Raw(body.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Force the HTTP method
    #[must_use]
    pub const fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Override the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Result of [`OAuth2Client::query`](super::OAuth2Client::query)
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// The request was sent; the response is returned as received
    Completed(HttpResponse),
    /// No valid token and no way to refresh one; nothing was sent
    NotAuthenticated,
}

impl QueryOutcome {
    /// Response, if the request was sent
    #[must_use]
    pub const fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Completed(response) => Some(response),
            Self::NotAuthenticated => None,
        }
    }

    /// Consume the outcome, returning the response if the request was sent
    #[must_use]
    pub fn into_response(self) -> Option<HttpResponse> {
        match self {
            Self::Completed(response) => Some(response),
            Self::NotAuthenticated => None,
        }
    }

    /// Whether the request was sent
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Turn a resource request into a transport request carrying `token`
///
/// The method defaults to the placement's default. Bearer placement adds an
/// `Authorization` header. Otherwise body-less methods get `{getparam}={token}`
/// in the query string and body methods get an `access_token` form field.
/// Form data for body-less methods is moved into the query string.
///
/// # Errors
///
/// Returns `InvalidUrl` if the target URL cannot be parsed, or
/// `TokenParse` if the access token is not a valid header value
pub fn sign_request(
    config: &ClientConfig,
    token: &Token,
    request: ResourceRequest,
) -> OAuth2Result<HttpRequest> {
    let ResourceRequest {
        url,
        data,
        mut headers,
        method,
        timeout,
    } = request;

    let method = method.unwrap_or_else(|| config.auth_method.default_method());
    let mut target = Url::parse(&url).map_err(|e| OAuth2Error::InvalidUrl {
        url: url.clone(),
        reason: e.to_string(),
    })?;

    let bearer = config.auth_method == AuthMethod::Bearer;
    if bearer {
        let value = HeaderValue::from_str(&format!("Bearer {}", token.access_token))
            .map_err(|_| OAuth2Error::token_parse("access_token is not a valid header value"))?;
        headers.insert(AUTHORIZATION, value);
    }

    let body = if method.has_body() {
        let mut body = data.unwrap_or_default();
        if !bearer {
            body.set_param(params::ACCESS_TOKEN, &token.access_token);
        }
        Some(body)
    } else {
        if !bearer {
            target
                .query_pairs_mut()
                .append_pair(config.get_param_name(), &token.access_token);
        }
        if let Some(data) = data {
            append_to_query(&mut target, &data);
        }
        None
    };

    Ok(HttpRequest {
        method,
        url: target.into(),
        headers,
        body,
        timeout: timeout.or(config.timeout),
    })
}

fn append_to_query(target: &mut Url, data: &RequestBody) {
    match data {
        RequestBody::Form(pairs) => {
            if pairs.is_empty() {
                return;
            }
            let mut query = target.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }
        RequestBody::Raw(raw) => {
            if raw.is_empty() {
                return;
            }
            let query = match target.query() {
                Some(existing) if !existing.is_empty() => format!("{existing}&{raw}"),
                _ => raw.clone(),
            };
            target.set_query(Some(&query));
        }
    }
}
