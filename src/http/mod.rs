// ABOUTME: HTTP layer for the OAuth2 client
// ABOUTME: Transport abstraction plus the default reqwest implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Transport trait and request/response types
pub mod transport;

/// reqwest-backed transport and client builders
pub mod reqwest_transport;

pub use reqwest_transport::{oauth_client, ReqwestTransport};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};
