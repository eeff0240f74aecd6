// ABOUTME: Environment-based loading and credential diagnostics for the OAuth2 client
// ABOUTME: Reads OAUTH2_* variables into ClientConfig and logs secret fingerprints, never secrets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::oauth::{parse_flag, AuthMethod, ClientConfig};
use pierre_oauth2_core::constants::{env_vars, options, MIN_CLIENT_SECRET_LENGTH};
use pierre_oauth2_core::{OAuth2Error, OAuth2Result};
use sha2::{Digest, Sha256};
use std::env;
use std::time::Duration;
use tracing::{info, warn};

impl ClientConfig {
    /// Load client configuration from `OAUTH2_*` environment variables
    ///
    /// Unset or blank variables leave the corresponding option unset.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a flag, auth method, or timeout cannot be parsed
    pub fn from_env() -> OAuth2Result<Self> {
        let auth_method = env_string(env_vars::AUTH_METHOD)
            .map_or(Ok(AuthMethod::default()), |raw| raw.parse())?;

        Ok(Self {
            auth_url: env_string(env_vars::AUTH_URL),
            token_url: env_string(env_vars::TOKEN_URL),
            client_id: env_string(env_vars::CLIENT_ID),
            client_secret: env_string(env_vars::CLIENT_SECRET),
            redirect_uri: env_string(env_vars::REDIRECT_URI),
            scopes: env_string(env_vars::SCOPES)
                .map(|raw| split_scopes(&raw))
                .unwrap_or_default(),
            state: env_string(env_vars::STATE),
            request_params: Vec::new(),
            send_headers: env_flag(env_vars::SEND_HEADERS, options::SEND_HEADERS)?,
            auth_method,
            use_refresh: env_flag(env_vars::USE_REFRESH, options::USE_REFRESH)?,
            get_param: env_string(env_vars::GET_PARAM),
            timeout: env_string(env_vars::TIMEOUT_SECS)
                .map(|raw| {
                    raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                        OAuth2Error::invalid_option(
                            options::TIMEOUT,
                            format!("{} must be a whole number of seconds", env_vars::TIMEOUT_SECS),
                        )
                    })
                })
                .transpose()?,
        })
    }

    /// Compute SHA256 fingerprint of client secret for debugging (first 8 hex chars)
    ///
    /// Allows comparing secrets across deployments without logging actual values.
    #[must_use]
    pub fn secret_fingerprint(&self) -> Option<String> {
        self.client_secret.as_ref().map(|secret| {
            let mut hasher = Sha256::new();
            hasher.update(secret.as_bytes());
            let result = hasher.finalize();
            format!("{result:x}").chars().take(8).collect()
        })
    }

    /// Validate credentials and log diagnostics
    ///
    /// Returns true if the credentials appear usable for token requests.
    pub fn validate_and_log(&self) -> bool {
        let Some(client_id) = self.client_id.as_deref() else {
            warn!("OAuth2 client: client_id is missing or empty");
            return false;
        };
        let Some(client_secret) = self.client_secret.as_deref() else {
            warn!("OAuth2 client: client_secret is missing or empty");
            return false;
        };
        if self.token_url.is_none() {
            warn!("OAuth2 client: token_url is missing or empty");
            return false;
        }

        let fingerprint = self
            .secret_fingerprint()
            .unwrap_or_else(|| "none".to_owned());
        info!(
            oauth.client_id = %client_id,
            oauth.secret_length = client_secret.len(),
            oauth.secret_fingerprint = %fingerprint,
            oauth.auth_method = %self.auth_method,
            oauth.use_refresh = self.use_refresh,
            "OAuth2 client credentials loaded"
        );

        if client_secret.len() < MIN_CLIENT_SECRET_LENGTH {
            warn!(
                "OAuth2 client: client_secret is unusually short ({} chars) - \
                 this may indicate a configuration error",
                client_secret.len()
            );
            return false;
        }
        true
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn env_flag(name: &str, option: &'static str) -> OAuth2Result<bool> {
    env_string(name).map_or(Ok(false), |raw| {
        parse_flag(&raw)
            .ok_or_else(|| OAuth2Error::invalid_option(option, format!("{name}='{raw}' is not a boolean")))
    })
}

/// Scopes may be separated by commas, whitespace, or both
fn split_scopes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|scope| !scope.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_scopes_accepts_commas_and_spaces() {
        assert_eq!(
            split_scopes("read, write  activity:read_all"),
            ["read", "write", "activity:read_all"]
        );
        assert!(split_scopes(" , ").is_empty());
    }

    #[test]
    fn test_secret_fingerprint_is_stable_prefix() {
        let config = ClientConfig {
            client_secret: Some("jeDs8rKw_jDJW8MMf-ff8ejs".to_owned()),
            ..ClientConfig::default()
        };
        let fingerprint = config.secret_fingerprint().unwrap_or_default();
        assert_eq!(fingerprint.len(), 8);
        assert_eq!(Some(fingerprint), config.secret_fingerprint());
        assert_eq!(ClientConfig::default().secret_fingerprint(), None);
    }

    #[test]
    fn test_validate_and_log_rejects_short_secret() {
        let config = ClientConfig {
            client_id: Some("id".to_owned()),
            client_secret: Some("short".to_owned()),
            token_url: Some("https://provider.example/token".to_owned()),
            ..ClientConfig::default()
        };
        assert!(!config.validate_and_log());

        let config = ClientConfig {
            client_secret: Some("a-secret-that-is-long-enough".to_owned()),
            ..config
        };
        assert!(config.validate_and_log());
    }
}
