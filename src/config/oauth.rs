// ABOUTME: Typed OAuth2 client configuration read from and written to the option store
// ABOUTME: Validates endpoint/credential options up front and defines credential placement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::options::OptionStore;
use crate::http::HttpMethod;
use pierre_oauth2_core::constants::{options, params};
use pierre_oauth2_core::{OAuth2Error, OAuth2Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Where the access token is placed on signed queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// Query-string parameter, request sent with GET by default
    Get,
    /// Form body field, request sent with POST by default
    #[default]
    Post,
    /// `Authorization: Bearer` header, request sent with GET by default
    Bearer,
}

impl AuthMethod {
    /// HTTP method used when a query does not override it
    #[must_use]
    pub const fn default_method(self) -> HttpMethod {
        match self {
            Self::Get | Self::Bearer => HttpMethod::Get,
            Self::Post => HttpMethod::Post,
        }
    }

    /// Option value for this placement
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Bearer => "bearer",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = OAuth2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" | "" => Ok(Self::Post),
            "bearer" | "header" => Ok(Self::Bearer),
            other => Err(OAuth2Error::invalid_option(
                options::AUTH_METHOD,
                format!("unknown credential placement '{other}' (expected get, post or bearer)"),
            )),
        }
    }
}

/// OAuth2 client configuration
///
/// A typed view of the option store. Every field is optional at this level;
/// each operation checks the subset it needs through [`ClientConfig::authorization_endpoint`]
/// or [`ClientConfig::token_endpoint`] before touching the network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Authorization endpoint URL
    pub auth_url: Option<String>,
    /// Token endpoint URL
    pub token_url: Option<String>,
    /// OAuth client ID from provider
    pub client_id: Option<String>,
    /// OAuth client secret from provider
    pub client_secret: Option<String>,
    /// Redirect URI registered with the provider
    pub redirect_uri: Option<String>,
    /// OAuth scopes to request
    pub scopes: Vec<String>,
    /// Anti-CSRF state echoed in the authorization URL
    pub state: Option<String>,
    /// Extra authorization URL parameters, in insertion order
    pub request_params: Vec<(String, String)>,
    /// Return a redirect instruction instead of the bare authorization URL
    pub send_headers: bool,
    /// Credential placement for signed queries
    pub auth_method: AuthMethod,
    /// Refresh expired tokens during signed queries
    pub use_refresh: bool,
    /// Query-string parameter name for the `get` placement
    pub get_param: Option<String>,
    /// Default request timeout
    pub timeout: Option<Duration>,
}

/// Options required to build the authorization URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationEndpoint<'a> {
    /// Authorization endpoint URL
    pub auth_url: &'a str,
    /// Client identifier
    pub client_id: &'a str,
    /// Redirect URI
    pub redirect_uri: &'a str,
}

/// Options required to talk to the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenEndpoint<'a> {
    /// Token endpoint URL
    pub token_url: &'a str,
    /// Client identifier
    pub client_id: &'a str,
    /// Client secret
    pub client_secret: &'a str,
    /// Redirect URI
    pub redirect_uri: &'a str,
}

impl ClientConfig {
    /// Read the configuration from an option store
    ///
    /// # Errors
    ///
    /// Returns a configuration error when an option holds a value of the wrong type
    pub fn from_store<S: OptionStore + ?Sized>(store: &S) -> OAuth2Result<Self> {
        Ok(Self {
            auth_url: string_option(store, options::AUTH_URL)?,
            token_url: string_option(store, options::TOKEN_URL)?,
            client_id: string_option(store, options::CLIENT_ID)?,
            client_secret: string_option(store, options::CLIENT_SECRET)?,
            redirect_uri: string_option(store, options::REDIRECT_URI)?,
            scopes: scope_option(store)?,
            state: string_option(store, options::STATE)?,
            request_params: request_params_option(store)?,
            send_headers: flag_option(store, options::SEND_HEADERS)?,
            auth_method: string_option(store, options::AUTH_METHOD)?
                .map_or(Ok(AuthMethod::default()), |method| method.parse())?,
            use_refresh: flag_option(store, options::USE_REFRESH)?,
            get_param: string_option(store, options::GET_PARAM)?,
            timeout: timeout_option(store)?,
        })
    }

    /// Write every configured option into a store
    pub fn write_to<S: OptionStore + ?Sized>(&self, store: &mut S) {
        let strings = [
            (options::AUTH_URL, &self.auth_url),
            (options::TOKEN_URL, &self.token_url),
            (options::CLIENT_ID, &self.client_id),
            (options::CLIENT_SECRET, &self.client_secret),
            (options::REDIRECT_URI, &self.redirect_uri),
            (options::STATE, &self.state),
            (options::GET_PARAM, &self.get_param),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                store.set(key, Value::String(value.clone()));
            }
        }

        if !self.scopes.is_empty() {
            store.set(
                options::SCOPE,
                Value::Array(self.scopes.iter().cloned().map(Value::String).collect()),
            );
        }
        if !self.request_params.is_empty() {
            let params: Map<String, Value> = self
                .request_params
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            store.set(options::REQUEST_PARAMS, Value::Object(params));
        }

        store.set(options::SEND_HEADERS, Value::Bool(self.send_headers));
        store.set(options::USE_REFRESH, Value::Bool(self.use_refresh));
        store.set(
            options::AUTH_METHOD,
            Value::String(self.auth_method.as_str().to_owned()),
        );
        if let Some(timeout) = self.timeout {
            store.set(options::TIMEOUT, Value::from(timeout.as_secs()));
        }
    }

    /// Options needed to build the authorization URL
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing option
    pub fn authorization_endpoint(&self) -> OAuth2Result<AuthorizationEndpoint<'_>> {
        Ok(AuthorizationEndpoint {
            auth_url: required(self.auth_url.as_deref(), options::AUTH_URL)?,
            client_id: required(self.client_id.as_deref(), options::CLIENT_ID)?,
            redirect_uri: required(self.redirect_uri.as_deref(), options::REDIRECT_URI)?,
        })
    }

    /// Options needed for code exchange and refresh
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing option
    pub fn token_endpoint(&self) -> OAuth2Result<TokenEndpoint<'_>> {
        Ok(TokenEndpoint {
            token_url: required(self.token_url.as_deref(), options::TOKEN_URL)?,
            client_id: required(self.client_id.as_deref(), options::CLIENT_ID)?,
            client_secret: required(self.client_secret.as_deref(), options::CLIENT_SECRET)?,
            redirect_uri: required(self.redirect_uri.as_deref(), options::REDIRECT_URI)?,
        })
    }

    /// Query-string parameter name for the `get` placement
    #[must_use]
    pub fn get_param_name(&self) -> &str {
        self.get_param
            .as_deref()
            .unwrap_or(params::ACCESS_TOKEN)
    }
}

fn required<'a>(value: Option<&'a str>, option: &'static str) -> OAuth2Result<&'a str> {
    value.ok_or(OAuth2Error::missing_option(option))
}

/// Interpret a textual flag (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`)
pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Empty strings count as unset
fn string_option<S: OptionStore + ?Sized>(
    store: &S,
    key: &'static str,
) -> OAuth2Result<Option<String>> {
    match store.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(OAuth2Error::invalid_option(
            key,
            format!("expected a string, found {}", json_type(&other)),
        )),
    }
}

fn flag_option<S: OptionStore + ?Sized>(store: &S, key: &'static str) -> OAuth2Result<bool> {
    match store.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::Number(n)) => Ok(n.as_f64().is_some_and(|v| v.abs() > f64::EPSILON)),
        Some(Value::String(s)) => parse_flag(&s).ok_or_else(|| {
            OAuth2Error::invalid_option(key, format!("'{s}' is not a boolean"))
        }),
        Some(other) => Err(OAuth2Error::invalid_option(
            key,
            format!("expected a boolean, found {}", json_type(&other)),
        )),
    }
}

/// A single string is taken as an already space-joined scope list
fn scope_option<S: OptionStore + ?Sized>(store: &S) -> OAuth2Result<Vec<String>> {
    match store.get(options::SCOPE) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) if s.is_empty() => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s]),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(OAuth2Error::invalid_option(
                    options::SCOPE,
                    format!("scope entries must be strings, found {}", json_type(&other)),
                )),
            })
            .collect(),
        Some(other) => Err(OAuth2Error::invalid_option(
            options::SCOPE,
            format!("expected a list of strings, found {}", json_type(&other)),
        )),
    }
}

fn request_params_option<S: OptionStore + ?Sized>(
    store: &S,
) -> OAuth2Result<Vec<(String, String)>> {
    match store.get(options::REQUEST_PARAMS) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(params)) => params
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => Ok((key, s)),
                Value::Number(n) => Ok((key, n.to_string())),
                Value::Bool(b) => Ok((key, b.to_string())),
                other => Err(OAuth2Error::invalid_option(
                    options::REQUEST_PARAMS,
                    format!("value for '{key}' must be scalar, found {}", json_type(&other)),
                )),
            })
            .collect(),
        Some(other) => Err(OAuth2Error::invalid_option(
            options::REQUEST_PARAMS,
            format!("expected a mapping, found {}", json_type(&other)),
        )),
    }
}

fn timeout_option<S: OptionStore + ?Sized>(store: &S) -> OAuth2Result<Option<Duration>> {
    let invalid = |found: &str| {
        OAuth2Error::invalid_option(
            options::TIMEOUT,
            format!("expected a whole number of seconds, found {found}"),
        )
    };
    match store.get(options::TIMEOUT) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|secs| Some(Duration::from_secs(secs)))
            .ok_or_else(|| invalid(&n.to_string())),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| invalid(&s)),
        Some(other) => Err(invalid(json_type(&other))),
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
