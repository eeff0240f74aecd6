// ABOUTME: Output formatting helpers for pierre-oauth2-cli
// ABOUTME: Token JSON goes to stdout; human-readable notes go to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use pierre_oauth2_client::{HttpResponse, Token};

/// Print a token as pretty JSON, with its expiry on stderr
pub fn display_token(token: &Token) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&token.to_value())?);

    match token.expires_at_datetime() {
        Some(expires) => eprintln!("Expires: {}", expires.format("%Y-%m-%d %H:%M:%S UTC")),
        None => eprintln!("Expires: unknown (no expires_in in response)"),
    }
    if !token.has_refresh_token() {
        eprintln!("No refresh token was issued");
    }
    Ok(())
}

/// Print a resource response: status line, then the body
pub fn display_response(response: &HttpResponse) {
    println!("HTTP {}", response.code);
    if let Some(content_type) = response.content_type() {
        println!("Content-Type: {content_type}");
    }
    println!();
    println!("{}", response.body);
}
