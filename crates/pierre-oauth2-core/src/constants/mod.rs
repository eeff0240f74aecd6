// ABOUTME: Protocol constants for the OAuth2 client
// ABOUTME: Option store keys, OAuth2 wire parameter names, environment variables, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module

/// Keys understood by the option store
pub mod options {
    /// Authorization endpoint
    pub const AUTH_URL: &str = "authurl";
    /// Token endpoint
    pub const TOKEN_URL: &str = "tokenurl";
    /// Client identifier
    pub const CLIENT_ID: &str = "clientid";
    /// Client secret
    pub const CLIENT_SECRET: &str = "clientsecret";
    /// Registered redirect URI
    pub const REDIRECT_URI: &str = "redirecturi";
    /// Requested scopes
    pub const SCOPE: &str = "scope";
    /// Anti-CSRF state value
    pub const STATE: &str = "state";
    /// Extra authorization URL parameters
    pub const REQUEST_PARAMS: &str = "requestparams";
    /// Emit a redirect instead of returning the authorization URL
    pub const SEND_HEADERS: &str = "sendheaders";
    /// Credential placement for signed queries
    pub const AUTH_METHOD: &str = "authmethod";
    /// Refresh expired tokens during signed queries
    pub const USE_REFRESH: &str = "userefresh";
    /// Query-string parameter name for the `get` credential placement
    pub const GET_PARAM: &str = "getparam";
    /// Default request timeout in seconds
    pub const TIMEOUT: &str = "timeout";
    /// Stored token
    pub const ACCESS_TOKEN: &str = "accesstoken";
}

/// OAuth2 grant types
pub mod grant_types {
    /// Authorization-code exchange
    pub const AUTHORIZATION_CODE: &str = "authorization_code";
    /// Refresh-token exchange
    pub const REFRESH_TOKEN: &str = "refresh_token";
}

/// OAuth2 wire parameter names
pub mod params {
    pub const RESPONSE_TYPE: &str = "response_type";
    pub const CLIENT_ID: &str = "client_id";
    pub const CLIENT_SECRET: &str = "client_secret";
    pub const REDIRECT_URI: &str = "redirect_uri";
    pub const SCOPE: &str = "scope";
    pub const STATE: &str = "state";
    pub const GRANT_TYPE: &str = "grant_type";
    pub const CODE: &str = "code";
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const EXPIRES_IN: &str = "expires_in";
    /// Legacy alias of `expires_in` returned by some providers
    pub const EXPIRES: &str = "expires";
    pub const CREATED: &str = "created";

    /// `response_type` value for the authorization-code grant
    pub const RESPONSE_TYPE_CODE: &str = "code";
}

/// Environment variables read by `ClientConfig::from_env`
pub mod env_vars {
    pub const AUTH_URL: &str = "OAUTH2_AUTH_URL";
    pub const TOKEN_URL: &str = "OAUTH2_TOKEN_URL";
    pub const CLIENT_ID: &str = "OAUTH2_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "OAUTH2_CLIENT_SECRET";
    pub const REDIRECT_URI: &str = "OAUTH2_REDIRECT_URI";
    /// Comma or whitespace separated
    pub const SCOPES: &str = "OAUTH2_SCOPES";
    pub const STATE: &str = "OAUTH2_STATE";
    pub const AUTH_METHOD: &str = "OAUTH2_AUTH_METHOD";
    pub const USE_REFRESH: &str = "OAUTH2_USE_REFRESH";
    pub const SEND_HEADERS: &str = "OAUTH2_SEND_HEADERS";
    pub const GET_PARAM: &str = "OAUTH2_GET_PARAM";
    pub const TIMEOUT_SECS: &str = "OAUTH2_TIMEOUT_SECS";
}

/// HTTP client timeouts
pub mod timeouts {
    /// Token endpoint request timeout (seconds)
    pub const OAUTH_REQUEST_TIMEOUT_SECS: u64 = 15;
    /// Token endpoint connect timeout (seconds)
    pub const OAUTH_CONNECT_TIMEOUT_SECS: u64 = 5;
}

/// Service identity used in structured logs
pub mod service_names {
    pub const PIERRE_OAUTH2_CLIENT: &str = "pierre-oauth2-client";
}

/// Client secrets shorter than this are reported as suspicious
pub const MIN_CLIENT_SECRET_LENGTH: usize = 20;
