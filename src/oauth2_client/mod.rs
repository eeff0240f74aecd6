// ABOUTME: OAuth 2.0 authorization-code client with token lifecycle management
// ABOUTME: Builds authorization URLs, exchanges and refreshes tokens, and signs resource requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth 2.0 Client Module
//!
//! Acts as an OAuth 2.0 client on behalf of a single user session:
//! - Authorization URL construction and the code-for-token exchange
//! - Token expiry detection and refresh
//! - Signing resource requests with a bearer header, query parameter, or form field
//!
//! Settings and the current token are kept in an [`OptionStore`](crate::config::OptionStore);
//! all HTTP goes through an [`HttpTransport`](crate::http::HttpTransport).

/// Authorization URL and callback handling
pub mod authorization;
/// Core OAuth 2.0 client implementation
pub mod client;
/// Signed resource requests
pub mod query;
/// Token endpoint response parsing
pub mod response;
/// Token entity and session state
pub mod token;

pub use authorization::{build_authorization_url, AuthenticateOutcome, CallbackParams, RequestContext};
pub use client::OAuth2Client;
pub use query::{sign_request, QueryOutcome, ResourceRequest};
pub use response::{parse_form, parse_json, parse_token_response, ResponseFormat};
pub use token::{now_timestamp, Token, TokenState};
