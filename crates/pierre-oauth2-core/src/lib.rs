// ABOUTME: Foundation crate for the Pierre OAuth2 client
// ABOUTME: Exposes the error layer and protocol constants used across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre OAuth2 Core
//!
//! Shared types for the Pierre OAuth2 client. This crate changes rarely and has
//! no network dependencies unless the `reqwest-errors` feature is enabled.
//!
//! ## Modules
//!
//! - **errors**: `OAuth2Error`, `TransportError`, and the `ErrorCode` catalogue
//! - **constants**: option keys, grant types, wire parameter names, and defaults

/// Unified error handling for token exchange, refresh, and signed queries
pub mod errors;

/// Option keys, OAuth2 wire names, and environment variable names
pub mod constants;

pub use errors::{ErrorCode, OAuth2Error, OAuth2Result, TransportError};
