// ABOUTME: Token endpoint response parsing for form-encoded and JSON bodies
// ABOUTME: Dispatches on Content-Type (sniffing the body when absent) into one normalized Token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::token::Token;
use crate::http::HttpResponse;
use pierre_oauth2_core::{OAuth2Error, OAuth2Result};
use serde_json::{Map, Value};

/// Body encoding of a token endpoint response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// `application/json`
    Json,
    /// `application/x-www-form-urlencoded`
    Form,
}

impl ResponseFormat {
    /// Pick the format from the content type, falling back to the body shape
    #[must_use]
    pub fn detect(content_type: Option<&str>, body: &str) -> Self {
        let content_type = content_type.map(str::to_ascii_lowercase);
        match content_type.as_deref() {
            Some(ct) if ct.contains("json") => Self::Json,
            Some(ct) if ct.contains("x-www-form-urlencoded") => Self::Form,
            _ if body.trim_start().starts_with('{') => Self::Json,
            _ => Self::Form,
        }
    }
}

/// Parse a JSON token response into its field mapping
///
/// # Errors
///
/// Returns `TokenParse` if the body is not a JSON object
pub fn parse_json(body: &str) -> OAuth2Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(OAuth2Error::token_parse("JSON response is not an object")),
        Err(e) => Err(OAuth2Error::token_parse(format!("invalid JSON: {e}"))),
    }
}

/// Parse a form-encoded token response into its field mapping
///
/// Values stay strings; numeric fields are converted when the token is built.
///
/// # Errors
///
/// Returns `TokenParse` if the body is not valid form encoding
pub fn parse_form(body: &str) -> OAuth2Result<Map<String, Value>> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body.trim())
        .map_err(|e| OAuth2Error::token_parse(format!("invalid form encoding: {e}")))?;
    Ok(pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect())
}

/// Parse a token endpoint response body into a [`Token`]
///
/// The returned token has no `created` timestamp; the caller stamps it.
///
/// # Errors
///
/// Returns `TokenParse` if the body cannot be decoded or lacks an `access_token`
pub fn parse_token_response(response: &HttpResponse) -> OAuth2Result<Token> {
    let fields = match ResponseFormat::detect(response.content_type(), &response.body) {
        ResponseFormat::Json => parse_json(&response.body)?,
        ResponseFormat::Form => parse_form(&response.body)?,
    };
    Token::from_value(Value::Object(fields))
}
