// ABOUTME: OAuth2 token entity and the session token state machine
// ABOUTME: Normalizes the expires alias, computes validity, and classifies the stored token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use pierre_oauth2_core::constants::params;
use pierre_oauth2_core::{OAuth2Error, OAuth2Result};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Current time as a Unix timestamp
#[must_use]
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// OAuth 2.0 token as stored in the option store
///
/// Provider fields other than the ones modelled here (`token_type`, `scope`, ...)
/// are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The access token string
    pub access_token: String,
    /// Refresh token for obtaining new access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds (accepts the `expires` alias on input)
    #[serde(
        default,
        alias = "expires",
        deserialize_with = "lenient_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_in: Option<i64>,
    /// Unix timestamp at which the client obtained the token
    #[serde(
        default,
        deserialize_with = "lenient_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<i64>,
    /// Remaining provider fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Token {
    /// Token with only an access token
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_in: None,
            created: None,
            extra: Map::new(),
        }
    }

    /// Set the refresh token
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Set the lifetime in seconds
    #[must_use]
    pub const fn with_expires_in(mut self, seconds: i64) -> Self {
        self.expires_in = Some(seconds);
        self
    }

    /// Set the acquisition timestamp
    #[must_use]
    pub const fn with_created(mut self, created: i64) -> Self {
        self.created = Some(created);
        self
    }

    /// Build a token from a raw field mapping
    ///
    /// `expires` is renamed to `expires_in` (an explicit `expires_in` wins), and
    /// numeric strings are accepted for `expires_in` and `created`.
    ///
    /// # Errors
    ///
    /// Returns `TokenParse` if the value is not a mapping, a field has the wrong
    /// type, or `access_token` is missing or empty
    pub fn from_value(value: Value) -> OAuth2Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(OAuth2Error::token_parse("token must be a mapping"));
        };

        if let Some(expires) = fields.remove(params::EXPIRES) {
            if !fields.contains_key(params::EXPIRES_IN) {
                fields.insert(params::EXPIRES_IN.to_owned(), expires);
            }
        }

        let token: Self = serde_json::from_value(Value::Object(fields))
            .map_err(|e| OAuth2Error::token_parse(e.to_string()))?;
        if token.access_token.is_empty() {
            return Err(OAuth2Error::token_parse("access_token is empty"));
        }
        Ok(token)
    }

    /// Normalized mapping written to the option store
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut fields = Map::new();
        fields.insert(
            params::ACCESS_TOKEN.to_owned(),
            Value::String(self.access_token.clone()),
        );
        if let Some(refresh_token) = &self.refresh_token {
            fields.insert(
                params::REFRESH_TOKEN.to_owned(),
                Value::String(refresh_token.clone()),
            );
        }
        if let Some(expires_in) = self.expires_in {
            fields.insert(params::EXPIRES_IN.to_owned(), Value::from(expires_in));
        }
        if let Some(created) = self.created {
            fields.insert(params::CREATED.to_owned(), Value::from(created));
        }
        for (key, value) in &self.extra {
            fields.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Value::Object(fields)
    }

    /// Whether a non-empty refresh token is present
    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }

    /// Unix timestamp at which the token stops being valid
    #[must_use]
    pub fn expires_at(&self) -> Option<i64> {
        self.created?.checked_add(self.expires_in?)
    }

    /// Expiry as a UTC datetime
    #[must_use]
    pub fn expires_at_datetime(&self) -> Option<DateTime<Utc>> {
        self.expires_at()
            .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
    }

    /// Whether the token can be used at `now` without refreshing
    ///
    /// Requires a non-empty access token and `now < created + expires_in`.
    /// A token without `created` or `expires_in` is never valid.
    #[must_use]
    pub fn is_valid_at(&self, now: i64) -> bool {
        if self.access_token.is_empty() {
            return false;
        }
        self.expires_at().is_some_and(|expires_at| now < expires_at)
    }
}

/// Accepts integers, integral floats, numeric strings, and null
fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SecondsVisitor;

    impl<'de> Visitor<'de> for SecondsVisitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a whole number of seconds")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            i64::try_from(v)
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if v.fract().abs() < f64::EPSILON && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
                Ok(Some(v as i64))
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(SecondsVisitor)
}

/// Where the session stands, recomputed from the stored token on every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    /// No usable token and no authorization in progress
    Unauthenticated,
    /// The user was sent to the authorization endpoint; waiting for a code
    AwaitingCode,
    /// Token usable now
    Valid(Token),
    /// Token present but expired, or lacking lifetime information
    Expired(Token),
}

impl TokenState {
    /// Classify a stored token at `now`
    #[must_use]
    pub fn evaluate(token: Option<Token>, awaiting_code: bool, now: i64) -> Self {
        match token {
            Some(token) if !token.access_token.is_empty() => {
                if token.is_valid_at(now) {
                    Self::Valid(token)
                } else {
                    Self::Expired(token)
                }
            }
            _ if awaiting_code => Self::AwaitingCode,
            _ => Self::Unauthenticated,
        }
    }

    /// Whether the token can be used without refreshing
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Whether an expired token carries a refresh token
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        matches!(self, Self::Expired(token) if token.has_refresh_token())
    }

    /// Token held by this state, if any
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        match self {
            Self::Valid(token) | Self::Expired(token) => Some(token),
            Self::Unauthenticated | Self::AwaitingCode => None,
        }
    }
}
