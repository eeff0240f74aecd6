// ABOUTME: Main library entry point for the Pierre OAuth2 client
// ABOUTME: Authorization-code grant, token lifecycle, and signed resource requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre OAuth2 Client
//!
//! An OAuth 2.0 client for the authorization-code grant. It builds the
//! authorization redirect URL, exchanges the returned code for tokens, tracks
//! token expiry, refreshes tokens, and signs outgoing API requests.
//!
//! ## Architecture
//!
//! - **Config**: option store and the typed [`ClientConfig`] view over it
//! - **HTTP**: the [`HttpTransport`] seam and its `reqwest` implementation
//! - **`OAuth2` client**: the token state machine and request signing
//! - **Logging**: `tracing` subscriber setup for binaries
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_oauth2_client::{CallbackParams, ClientConfig, OAuth2Client, ResourceRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     let mut client = OAuth2Client::with_config(&config);
//!
//!     let callback = CallbackParams::from_url("http://localhost/oauth?code=abc")?;
//!     client.authenticate(&callback).await?;
//!
//!     let outcome = client.query(ResourceRequest::new("https://api.example.com/me")).await?;
//!     if let Some(response) = outcome.response() {
//!         println!("{}: {}", response.code, response.body);
//!     }
//!     Ok(())
//! }
//! ```

/// Client configuration and option storage
pub mod config;

/// HTTP transport abstraction and default implementation
pub mod http;

/// Logging configuration and subscriber setup
pub mod logging;

/// OAuth 2.0 client, tokens, and request signing
pub mod oauth2_client;

pub use crate::config::{AuthMethod, ClientConfig, MemoryOptionStore, OptionStore};
pub use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, RequestBody};
pub use crate::oauth2_client::{
    AuthenticateOutcome, CallbackParams, OAuth2Client, QueryOutcome, RequestContext,
    ResourceRequest, Token, TokenState,
};
pub use pierre_oauth2_core::{ErrorCode, OAuth2Error, OAuth2Result, TransportError};
