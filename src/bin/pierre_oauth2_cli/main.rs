// ABOUTME: pierre-oauth2-cli - command-line driver for the OAuth2 authorization-code flow
// ABOUTME: Prints authorization URLs, exchanges and refreshes tokens, and sends signed requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Configuration comes from `OAUTH2_*` environment variables.
//!
//! Usage:
//! ```bash
//! # Print the URL to open in a browser
//! pierre-oauth2-cli authorize-url
//!
//! # Exchange the code (or the whole callback URL) for a token
//! pierre-oauth2-cli exchange --code '4/wEr_dK8SDkjfpwmc98Kej'
//!
//! # Refresh a token
//! pierre-oauth2-cli refresh --refresh-token 'refreshvalue'
//!
//! # Call a protected API with a stored token
//! pierre-oauth2-cli query https://www.googleapis.com/calendar/v3/users/me/calendarList \
//!     --token "$(cat token.json)" --method get --param maxResults=10
//! ```

mod commands;
mod display;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pierre_oauth2_client::logging::LoggingConfig;
use pierre_oauth2_client::{ClientConfig, HttpMethod, OAuth2Client};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "pierre-oauth2-cli",
    about = "OAuth 2.0 authorization-code client",
    long_about = "Drives the OAuth 2.0 authorization-code flow against a provider configured through OAUTH2_* environment variables."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the authorization URL the user must visit
    AuthorizeUrl,

    /// Exchange an authorization code for a token
    Exchange {
        /// Authorization code, or the full callback URL containing it
        #[arg(long)]
        code: String,
    },

    /// Obtain a new access token with a refresh token
    Refresh {
        /// Refresh token issued with the original access token
        #[arg(long)]
        refresh_token: String,
    },

    /// Send a request signed with an access token
    Query {
        /// Protected resource URL
        url: String,

        /// Token as JSON (as printed by `exchange` or `refresh`)
        #[arg(long)]
        token: String,

        /// HTTP method (defaults to the configured credential placement's method)
        #[arg(long)]
        method: Option<HttpMethod>,

        /// Request parameter as key=value (repeatable)
        #[arg(long = "param", value_parser = commands::parse_key_value)]
        params: Vec<(String, String)>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let config = ClientConfig::from_env()?;
    debug!(
        oauth.auth_method = %config.auth_method,
        oauth.scopes = config.scopes.len(),
        "Loaded client configuration from environment"
    );
    let mut client = OAuth2Client::with_config(&config);

    match cli.command {
        Command::AuthorizeUrl => commands::authorize_url(&mut client).await?,
        Command::Exchange { code } => {
            config.validate_and_log();
            commands::exchange(&mut client, &code).await?;
        }
        Command::Refresh { refresh_token } => {
            config.validate_and_log();
            commands::refresh(&mut client, &refresh_token).await?;
        }
        Command::Query {
            url,
            token,
            method,
            params,
        } => commands::query(&mut client, url, &token, method, params).await?,
    }

    Ok(())
}
