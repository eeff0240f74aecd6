// ABOUTME: Authorization-code leg of the flow: URL construction and callback parameters
// ABOUTME: Builds the provider redirect URL and models the outcome of authenticate()
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::token::Token;
#[cfg(feature = "http-response")]
use axum::response::Redirect;
use crate::config::ClientConfig;
use pierre_oauth2_core::constants::params;
use pierre_oauth2_core::{OAuth2Error, OAuth2Result};
use serde::Deserialize;
use url::form_urlencoded::byte_serialize;
use url::Url;

/// Form-encode a value (spaces become `+`)
fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Build the authorization endpoint URL the user is sent to
///
/// Parameters appear in a fixed order: `response_type`, `client_id`,
/// `redirect_uri`, `scope`, `state`, then every extra request parameter.
/// `client_id`, `state` and the extra parameters are copied verbatim.
///
/// # Errors
///
/// Returns a configuration error if `authurl`, `clientid` or `redirecturi` is
/// missing, or `InvalidUrl` if `authurl` is not an absolute URL
pub fn build_authorization_url(config: &ClientConfig) -> OAuth2Result<String> {
    let endpoint = config.authorization_endpoint()?;
    Url::parse(endpoint.auth_url).map_err(|e| OAuth2Error::InvalidUrl {
        url: endpoint.auth_url.to_owned(),
        reason: e.to_string(),
    })?;

    let separator = if endpoint.auth_url.contains('?') { '&' } else { '?' };
    let mut url = format!(
        "{}{separator}{}={}&{}={}&{}={}",
        endpoint.auth_url,
        params::RESPONSE_TYPE,
        params::RESPONSE_TYPE_CODE,
        params::CLIENT_ID,
        endpoint.client_id,
        params::REDIRECT_URI,
        encode(endpoint.redirect_uri),
    );

    if !config.scopes.is_empty() {
        url.push_str(&format!("&{}={}", params::SCOPE, encode(&config.scopes.join(" "))));
    }
    if let Some(state) = config.state.as_deref().filter(|state| !state.is_empty()) {
        url.push_str(&format!("&{}={state}", params::STATE));
    }
    for (key, value) in &config.request_params {
        url.push_str(&format!("&{key}={value}"));
    }

    Ok(url)
}

/// Result of [`OAuth2Client::authenticate`](super::OAuth2Client::authenticate)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticateOutcome {
    /// The caller should redirect the user agent to `url`
    Redirect {
        /// Authorization URL
        url: String,
    },
    /// The caller should present `url` to the user
    AuthorizationUrl {
        /// Authorization URL
        url: String,
    },
    /// A code was exchanged and the token persisted
    Authenticated(Token),
}

impl AuthenticateOutcome {
    /// Authorization URL for the two non-terminal outcomes
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Redirect { url } | Self::AuthorizationUrl { url } => Some(url),
            Self::Authenticated(_) => None,
        }
    }

    /// Token obtained by a completed exchange
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        match self {
            Self::Authenticated(token) => Some(token),
            Self::Redirect { .. } | Self::AuthorizationUrl { .. } => None,
        }
    }

    /// Consume the outcome, returning the token if one was obtained
    #[must_use]
    pub fn into_token(self) -> Option<Token> {
        match self {
            Self::Authenticated(token) => Some(token),
            Self::Redirect { .. } | Self::AuthorizationUrl { .. } => None,
        }
    }

    /// `303 See Other` response for a redirect instruction
    #[cfg(feature = "http-response")]
    #[must_use]
    pub fn redirect_response(&self) -> Option<Redirect> {
        match self {
            Self::Redirect { url } => Some(Redirect::to(url)),
            Self::AuthorizationUrl { .. } | Self::Authenticated(_) => None,
        }
    }
}

/// Source of the authorization callback parameters
pub trait RequestContext {
    /// Authorization code returned by the provider, if any
    fn authorization_code(&self) -> Option<&str>;

    /// Error reported by the provider instead of a code
    fn provider_error(&self) -> Option<&str> {
        None
    }
}

/// Query parameters delivered to the redirect URI
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    /// Authorization code
    pub code: Option<String>,
    /// State echoed by the provider
    pub state: Option<String>,
    /// Error code (e.g. `access_denied`)
    pub error: Option<String>,
    /// Human-readable error description
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Callback carrying only a code
    #[must_use]
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    /// Parse the query string of a callback request (leading `?` optional)
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the query string is not valid form encoding
    pub fn from_query(query: &str) -> OAuth2Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        serde_urlencoded::from_str(query).map_err(|e| OAuth2Error::InvalidUrl {
            url: query.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Parse the callback parameters out of a full redirect URL
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if `url` cannot be parsed
    pub fn from_url(url: &str) -> OAuth2Result<Self> {
        let parsed = Url::parse(url).map_err(|e| OAuth2Error::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        Self::from_query(parsed.query().unwrap_or_default())
    }
}

impl RequestContext for CallbackParams {
    fn authorization_code(&self) -> Option<&str> {
        self.code.as_deref().filter(|code| !code.is_empty())
    }

    fn provider_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|error| !error.is_empty())
    }
}

impl RequestContext for Option<&str> {
    fn authorization_code(&self) -> Option<&str> {
        self.filter(|code| !code.is_empty())
    }
}
