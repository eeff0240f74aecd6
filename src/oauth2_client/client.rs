// ABOUTME: OAuth2 client driving the authorization-code grant and signed resource calls
// ABOUTME: Owns the option store and transport; persists tokens under the accesstoken option
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::authorization::{build_authorization_url, AuthenticateOutcome, RequestContext};
use super::query::{sign_request, QueryOutcome, ResourceRequest};
use super::response::parse_token_response;
use super::token::{now_timestamp, Token, TokenState};
use crate::config::{ClientConfig, MemoryOptionStore, OptionStore};
use crate::http::{HttpRequest, HttpTransport, ReqwestTransport, RequestBody};
use http::HeaderMap;
use pierre_oauth2_core::constants::{grant_types, options, params};
use pierre_oauth2_core::{OAuth2Error, OAuth2Result};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info, warn};

/// OAuth 2.0 client for one logical session
///
/// Settings and the current token live in the option store `S`; every network
/// round trip goes through the transport `T`. Operations that may write the
/// token take `&mut self`.
pub struct OAuth2Client<S = MemoryOptionStore, T = ReqwestTransport> {
    options: S,
    transport: T,
    awaiting_code: bool,
}

impl OAuth2Client {
    /// Client with an in-memory store seeded from `config` and the default transport
    #[must_use]
    pub fn with_config(config: &ClientConfig) -> Self {
        let mut options = MemoryOptionStore::new();
        config.write_to(&mut options);
        Self::new(options, ReqwestTransport::new())
    }
}

impl<S: OptionStore, T: HttpTransport> OAuth2Client<S, T> {
    /// Create a client over an option store and a transport
    #[must_use]
    pub const fn new(options: S, transport: T) -> Self {
        Self {
            options,
            transport,
            awaiting_code: false,
        }
    }

    /// Set a raw option
    pub fn set_option(&mut self, key: &str, value: impl Into<Value>) {
        self.options.set(key, value.into());
    }

    /// Read a raw option
    #[must_use]
    pub fn option(&self, key: &str) -> Option<Value> {
        self.options.get(key)
    }

    /// Typed view of the current options
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an option holds a value of the wrong type
    pub fn config(&self) -> OAuth2Result<ClientConfig> {
        ClientConfig::from_store(&self.options)
    }

    /// Build the authorization URL from the current options
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `authurl`, `clientid` or `redirecturi` is missing
    pub fn create_url(&self) -> OAuth2Result<String> {
        build_authorization_url(&self.config()?)
    }

    /// Run the authorization step
    ///
    /// Without a code in `context`, returns the authorization URL (as a redirect
    /// instruction when `sendheaders` is set). With a code, exchanges it for a
    /// token, stores the token, and returns it.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for missing options, `AuthExchangeFailed` if
    /// the token endpoint fails or answers non-2xx, and `TokenParse` if the
    /// response body is unusable
    pub async fn authenticate<C>(&mut self, context: &C) -> OAuth2Result<AuthenticateOutcome>
    where
        C: RequestContext + ?Sized,
    {
        let config = self.config()?;

        let Some(code) = context.authorization_code() else {
            if let Some(error) = context.provider_error() {
                warn!(oauth.error = %error, "Provider returned an error instead of an authorization code");
            }
            let url = build_authorization_url(&config)?;
            self.awaiting_code = true;
            debug!(oauth.send_headers = config.send_headers, "Authorization code required");
            return Ok(if config.send_headers {
                AuthenticateOutcome::Redirect { url }
            } else {
                AuthenticateOutcome::AuthorizationUrl { url }
            });
        };

        let endpoint = config.token_endpoint()?;
        let body = RequestBody::form([
            (params::GRANT_TYPE, grant_types::AUTHORIZATION_CODE),
            (params::CODE, code),
            (params::REDIRECT_URI, endpoint.redirect_uri),
            (params::CLIENT_ID, endpoint.client_id),
            (params::CLIENT_SECRET, endpoint.client_secret),
        ]);
        let token = self
            .request_token(&config, endpoint.token_url, grant_types::AUTHORIZATION_CODE, body)
            .await?;

        self.store_token(&token);
        self.awaiting_code = false;
        info!(
            oauth.grant_type = grant_types::AUTHORIZATION_CODE,
            oauth.has_refresh_token = token.has_refresh_token(),
            "Authorization code exchanged for access token"
        );
        Ok(AuthenticateOutcome::Authenticated(token))
    }

    /// Whether the stored token can be used now
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token()
            .is_some_and(|token| token.is_valid_at(now_timestamp()))
    }

    /// Current session state
    #[must_use]
    pub fn state(&self) -> TokenState {
        TokenState::evaluate(self.token(), self.awaiting_code, now_timestamp())
    }

    /// Refresh the stored token using its refresh token
    ///
    /// # Errors
    ///
    /// Returns `MissingRefreshToken` if no refresh token is stored, plus every
    /// error [`Self::refresh_with`] can return
    pub async fn refresh_token(&mut self) -> OAuth2Result<Token> {
        let refresh_token = self
            .token()
            .and_then(|token| token.refresh_token)
            .filter(|refresh_token| !refresh_token.is_empty())
            .ok_or(OAuth2Error::MissingRefreshToken)?;
        self.refresh_with(&refresh_token).await
    }

    /// Refresh using an explicitly supplied refresh token
    ///
    /// The new token replaces the stored one. If the provider omits a refresh
    /// token in its answer, `refresh_token` is carried over.
    ///
    /// # Errors
    ///
    /// Returns `MissingRefreshToken` for an empty refresh token, a configuration
    /// error for missing options, `AuthExchangeFailed` if the token endpoint fails
    /// or answers non-2xx, and `TokenParse` if the response body is unusable
    pub async fn refresh_with(&mut self, refresh_token: &str) -> OAuth2Result<Token> {
        if refresh_token.is_empty() {
            return Err(OAuth2Error::MissingRefreshToken);
        }

        let config = self.config()?;
        let endpoint = config.token_endpoint()?;
        let body = RequestBody::form([
            (params::GRANT_TYPE, grant_types::REFRESH_TOKEN),
            (params::REFRESH_TOKEN, refresh_token),
            (params::CLIENT_ID, endpoint.client_id),
            (params::CLIENT_SECRET, endpoint.client_secret),
            (params::REDIRECT_URI, endpoint.redirect_uri),
        ]);
        let mut token = self
            .request_token(&config, endpoint.token_url, grant_types::REFRESH_TOKEN, body)
            .await?;

        if !token.has_refresh_token() {
            token.refresh_token = Some(refresh_token.to_owned());
        }

        self.store_token(&token);
        info!(oauth.grant_type = grant_types::REFRESH_TOKEN, "Access token refreshed");
        Ok(token)
    }

    /// Send a request signed with the current token
    ///
    /// An expired token is refreshed first when `userefresh` is set and a refresh
    /// token is stored. Without a usable token, nothing is sent and
    /// [`QueryOutcome::NotAuthenticated`] is returned. The response is returned
    /// as received, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns refresh errors, `InvalidUrl` for an unparseable target, and
    /// `Transport` if the request cannot be completed
    pub async fn query(&mut self, request: ResourceRequest) -> OAuth2Result<QueryOutcome> {
        let config = self.config()?;

        let token = match self.state() {
            TokenState::Valid(token) => token,
            TokenState::Expired(token) if config.use_refresh && token.has_refresh_token() => {
                debug!("Stored token expired, refreshing before query");
                self.refresh_token().await?
            }
            state => {
                debug!(oauth.state = ?StateName(&state), "Query skipped: not authenticated");
                return Ok(QueryOutcome::NotAuthenticated);
            }
        };

        let target = request.url.clone();
        let signed = sign_request(&config, &token, request)?;
        debug!(
            http.method = %signed.method,
            http.url = %target,
            oauth.auth_method = %config.auth_method,
            "Sending signed request"
        );

        let response = self.transport.send(signed).await?;
        debug!(http.status = response.code, http.url = %target, "Signed request completed");
        Ok(QueryOutcome::Completed(response))
    }

    /// Replace the stored token
    pub fn set_token(&mut self, token: &Token) {
        self.store_token(token);
    }

    /// Replace the stored token from a raw field mapping
    ///
    /// `expires` is normalized to `expires_in` before storing.
    ///
    /// # Errors
    ///
    /// Returns `TokenParse` if the mapping is not a usable token
    pub fn set_token_value(&mut self, value: Value) -> OAuth2Result<Token> {
        let token = Token::from_value(value)?;
        self.store_token(&token);
        Ok(token)
    }

    /// Stored token, if one is present and well formed
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        let value = self.options.get(options::ACCESS_TOKEN)?;
        if value.is_null() {
            return None;
        }
        match Token::from_value(value) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed stored token");
                None
            }
        }
    }

    /// Option store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.options
    }

    /// HTTP transport
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the client, returning its store and transport
    pub fn into_parts(self) -> (S, T) {
        (self.options, self.transport)
    }

    fn store_token(&mut self, token: &Token) {
        self.options.set(options::ACCESS_TOKEN, token.to_value());
    }

    async fn request_token(
        &self,
        config: &ClientConfig,
        token_url: &str,
        grant_type: &'static str,
        body: RequestBody,
    ) -> OAuth2Result<Token> {
        debug!(oauth.grant_type = grant_type, http.url = %token_url, "Requesting token");

        let request = HttpRequest::post(token_url, body, HeaderMap::new(), config.timeout);
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| OAuth2Error::exchange_transport(grant_type, e))?;

        if !response.is_success() {
            warn!(
                oauth.grant_type = grant_type,
                http.status = response.code,
                "Token endpoint rejected the request"
            );
            return Err(OAuth2Error::exchange_status(grant_type, response.code, &response.body));
        }

        let mut token = parse_token_response(&response)?;
        token.created = Some(now_timestamp());
        Ok(token)
    }
}

/// Logs the state without the token it carries
struct StateName<'a>(&'a TokenState);

impl fmt::Debug for StateName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            TokenState::Unauthenticated => "Unauthenticated",
            TokenState::AwaitingCode => "AwaitingCode",
            TokenState::Valid(_) => "Valid",
            TokenState::Expired(_) => "Expired",
        })
    }
}
