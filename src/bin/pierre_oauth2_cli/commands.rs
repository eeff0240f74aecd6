// ABOUTME: Subcommand implementations for pierre-oauth2-cli
// ABOUTME: Each command drives one OAuth2Client operation and prints its result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{anyhow, bail, Result};
use pierre_oauth2_client::{
    AuthenticateOutcome, CallbackParams, HttpMethod, OAuth2Client, QueryOutcome, ResourceRequest,
};
use tracing::info;

use crate::display::{display_response, display_token};

/// Parse a `key=value` argument
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

/// Print the authorization URL
pub async fn authorize_url(client: &mut OAuth2Client) -> Result<()> {
    let outcome = client.authenticate(&CallbackParams::default()).await?;
    let url = outcome
        .url()
        .ok_or_else(|| anyhow!("no authorization URL was produced"))?;
    println!("{url}");
    Ok(())
}

/// Exchange a code (or a callback URL carrying one) for a token
pub async fn exchange(client: &mut OAuth2Client, code: &str) -> Result<()> {
    let callback = if code.starts_with("http://") || code.starts_with("https://") {
        CallbackParams::from_url(code)?
    } else {
        CallbackParams::with_code(code)
    };
    if let Some(error) = &callback.error {
        bail!(
            "provider returned '{error}': {}",
            callback.error_description.as_deref().unwrap_or("no description")
        );
    }

    match client.authenticate(&callback).await? {
        AuthenticateOutcome::Authenticated(token) => {
            info!("Authorization code exchanged");
            display_token(&token)
        }
        AuthenticateOutcome::Redirect { .. } | AuthenticateOutcome::AuthorizationUrl { .. } => {
            bail!("no authorization code found in '{code}'")
        }
    }
}

/// Refresh with an explicit refresh token
pub async fn refresh(client: &mut OAuth2Client, refresh_token: &str) -> Result<()> {
    let token = client.refresh_with(refresh_token).await?;
    info!("Token refreshed");
    display_token(&token)
}

/// Send a signed request and print the response
pub async fn query(
    client: &mut OAuth2Client,
    url: String,
    token_json: &str,
    method: Option<HttpMethod>,
    params: Vec<(String, String)>,
) -> Result<()> {
    let token = serde_json::from_str(token_json)
        .map_err(|e| anyhow!("--token is not valid JSON: {e}"))?;
    client.set_token_value(token)?;

    let mut request = ResourceRequest::new(url);
    if !params.is_empty() {
        request = request.form(params);
    }
    if let Some(method) = method {
        request = request.method(method);
    }

    match client.query(request).await? {
        QueryOutcome::Completed(response) => {
            display_response(&response);
            Ok(())
        }
        QueryOutcome::NotAuthenticated => {
            bail!("token is expired and cannot be refreshed; run `exchange` or `refresh` first")
        }
    }
}
