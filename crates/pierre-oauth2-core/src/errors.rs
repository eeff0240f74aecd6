// ABOUTME: Error types for OAuth2 token exchange, refresh, and signed resource queries
// ABOUTME: Defines OAuth2Error, TransportError, and the ErrorCode catalogue with HTTP mappings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every fallible client operation returns [`OAuth2Result`]. Errors carry enough
//! structure for callers to decide between re-authorizing the user, fixing
//! configuration, or retrying later. The "not authenticated" outcome of a signed
//! query is not an error; see `QueryOutcome` in the client crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes for the OAuth2 client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,

    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,

    // External Services (5000-5999)
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,
}

impl ErrorCode {
    /// HTTP status a host application should use when surfacing this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::InvalidFormat => 400,
            Self::AuthRequired => 401,
            Self::ExternalServiceUnavailable | Self::ExternalAuthFailed => 502,
            Self::ConfigMissing | Self::ConfigInvalid => 500,
        }
    }

    /// User-facing description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authorization with the provider is required",
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidFormat => "The provider returned data in an unexpected format",
            Self::ExternalServiceUnavailable => "The provider could not be reached",
            Self::ExternalAuthFailed => "The provider rejected the token request",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
        }
    }
}

/// What is wrong with a configuration option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    /// The option is required by the operation but not set
    Missing,
    /// The option is set but holds an unusable value
    Invalid(String),
}

impl fmt::Display for ConfigProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("required option is not set"),
            Self::Invalid(reason) => f.write_str(reason),
        }
    }
}

/// Failures raised by an HTTP transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request exceeded its timeout
    #[error("Request to {url} timed out")]
    Timeout {
        /// Target URL
        url: String,
    },

    /// The connection could not be established
    #[error("Could not connect to {url}: {reason}")]
    Connect {
        /// Target URL
        url: String,
        /// Underlying failure
        reason: String,
    },

    /// The request could not be built or sent
    #[error("Request to {url} failed: {reason}")]
    Request {
        /// Target URL
        url: String,
        /// Underlying failure
        reason: String,
    },

    /// The response body could not be read
    #[error("Failed to read response body from {url}: {reason}")]
    Body {
        /// Target URL
        url: String,
        /// Underlying failure
        reason: String,
    },
}

#[cfg(feature = "reqwest-errors")]
impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let url = error
            .url()
            .map_or_else(String::new, ToString::to_string);

        if error.is_timeout() {
            Self::Timeout { url }
        } else if error.is_connect() {
            Self::Connect {
                url,
                reason: error.to_string(),
            }
        } else if error.is_body() || error.is_decode() {
            Self::Body {
                url,
                reason: error.to_string(),
            }
        } else {
            Self::Request {
                url,
                reason: error.to_string(),
            }
        }
    }
}

/// Errors produced by the OAuth2 client
#[derive(Debug, Error)]
pub enum OAuth2Error {
    /// A required option is missing or holds the wrong type
    #[error("Configuration error for option '{option}': {problem}")]
    Configuration {
        /// Option key
        option: &'static str,
        /// What is wrong with it
        problem: ConfigProblem,
    },

    /// The token endpoint returned a non-success status or could not be reached
    #[error("Token request ({grant_type}) failed: {reason}")]
    AuthExchangeFailed {
        /// Grant type of the failed request
        grant_type: &'static str,
        /// HTTP status, when the endpoint answered
        status: Option<u16>,
        /// Endpoint response body or transport failure summary
        reason: String,
        /// Transport failure, when the endpoint could not be reached
        source: Option<TransportError>,
    },

    /// The token endpoint body could not be parsed or lacked an access token
    #[error("Failed to parse token response: {reason}")]
    TokenParse {
        /// Why parsing failed
        reason: String,
    },

    /// A refresh was requested but no refresh token is available
    #[error("No refresh token is available for this session")]
    MissingRefreshToken,

    /// A resource URL could not be used
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// Offending URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// An HTTP method name was not recognized
    #[error("Unknown HTTP request method: {method}")]
    InvalidMethod {
        /// Offending method name
        method: String,
    },

    /// Transport failure on a resource request
    #[error("HTTP transport error: {0}")]
    Transport(#[from] TransportError),
}

impl OAuth2Error {
    /// Required option is not set
    #[must_use]
    pub const fn missing_option(option: &'static str) -> Self {
        Self::Configuration {
            option,
            problem: ConfigProblem::Missing,
        }
    }

    /// Option is set but unusable
    #[must_use]
    pub fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            option,
            problem: ConfigProblem::Invalid(reason.into()),
        }
    }

    /// Token endpoint answered with a non-success status
    #[must_use]
    pub fn exchange_status(grant_type: &'static str, status: u16, body: &str) -> Self {
        Self::AuthExchangeFailed {
            grant_type,
            status: Some(status),
            reason: format!("error code {status} received: {body}"),
            source: None,
        }
    }

    /// Token endpoint could not be reached
    #[must_use]
    pub fn exchange_transport(grant_type: &'static str, source: TransportError) -> Self {
        Self::AuthExchangeFailed {
            grant_type,
            status: None,
            reason: source.to_string(),
            source: Some(source),
        }
    }

    /// Token response could not be parsed
    #[must_use]
    pub fn token_parse(reason: impl Into<String>) -> Self {
        Self::TokenParse {
            reason: reason.into(),
        }
    }

    /// Error code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Configuration {
                problem: ConfigProblem::Missing,
                ..
            } => ErrorCode::ConfigMissing,
            Self::Configuration { .. } => ErrorCode::ConfigInvalid,
            Self::AuthExchangeFailed { .. } => ErrorCode::ExternalAuthFailed,
            Self::TokenParse { .. } => ErrorCode::InvalidFormat,
            Self::MissingRefreshToken => ErrorCode::AuthRequired,
            Self::InvalidUrl { .. } | Self::InvalidMethod { .. } => ErrorCode::InvalidInput,
            Self::Transport(_) => ErrorCode::ExternalServiceUnavailable,
        }
    }
}

/// Result alias used throughout the OAuth2 client
pub type OAuth2Result<T> = Result<T, OAuth2Error>;
