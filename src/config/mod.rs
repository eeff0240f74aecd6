// ABOUTME: Configuration management for the OAuth2 client
// ABOUTME: Option store, typed client configuration, and environment loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module
//!
//! - **Options**: ordered key/value store holding settings and the current token
//! - **OAuth**: typed `ClientConfig` view with per-operation validation
//! - **Environment**: `OAUTH2_*` variable loading and credential diagnostics

/// Environment-based configuration loading
pub mod environment;
/// Typed OAuth2 client configuration
pub mod oauth;
/// Option store trait and in-memory implementation
pub mod options;

pub use oauth::{AuthMethod, AuthorizationEndpoint, ClientConfig, TokenEndpoint};
pub use options::{MemoryOptionStore, OptionStore};
