// ABOUTME: Integration tests for token storage, normalization, and validity checks
// ABOUTME: Covers set_token/token round trips, the expires alias, and TokenState classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{empty_client, google_options, MockTransport};
use pierre_oauth2_client::oauth2_client::now_timestamp;
use pierre_oauth2_client::{OAuth2Client, OAuth2Error, OptionStore, Token, TokenState};
use serde_json::json;

#[test]
fn test_set_and_get_option_pass_through_to_store() {
    let (mut client, _) = empty_client();
    client.set_option("key", "value");

    assert_eq!(client.option("key"), Some(json!("value")));
    assert_eq!(client.store().get("key"), Some(json!("value")));
    assert_eq!(client.option("missing"), None);
}

#[test]
fn test_set_token_value_stores_mapping_unchanged() {
    let (mut client, _) = empty_client();

    client
        .set_token_value(json!({"access_token": "RANDOM STRING OF DATA"}))
        .unwrap();
    assert_eq!(
        client.option("accesstoken"),
        Some(json!({"access_token": "RANDOM STRING OF DATA"}))
    );

    client
        .set_token_value(json!({"access_token": "RANDOM STRING OF DATA", "expires_in": 3600}))
        .unwrap();
    assert_eq!(
        client.option("accesstoken"),
        Some(json!({"access_token": "RANDOM STRING OF DATA", "expires_in": 3600}))
    );
}

#[test]
fn test_set_token_value_renames_expires() {
    let (mut client, _) = empty_client();

    client
        .set_token_value(json!({"access_token": "RANDOM STRING OF DATA", "expires": 3600}))
        .unwrap();

    assert_eq!(
        client.option("accesstoken"),
        Some(json!({"access_token": "RANDOM STRING OF DATA", "expires_in": 3600}))
    );
}

#[test]
fn test_set_token_value_rejects_missing_access_token() {
    let (mut client, _) = empty_client();

    let error = client.set_token_value(json!({"refresh_token": "r"})).unwrap_err();

    assert!(matches!(error, OAuth2Error::TokenParse { .. }));
    assert_eq!(client.option("accesstoken"), None);
}

#[test]
fn test_token_reads_back_raw_store_value() {
    let mut store = google_options();
    store.set("accesstoken", json!({"access_token": "RANDOM STRING OF DATA"}));
    let client = OAuth2Client::new(store, MockTransport::new());

    assert_eq!(client.token(), Some(Token::new("RANDOM STRING OF DATA")));
}

#[test]
fn test_malformed_stored_token_reads_as_absent() {
    let (mut client, _) = empty_client();
    client.set_option("accesstoken", json!(["not", "a", "token"]));

    assert_eq!(client.token(), None);
    assert!(!client.is_authenticated());
}

#[test]
fn test_is_authenticated_follows_token_lifetime() {
    let (mut client, _) = empty_client();
    assert!(!client.is_authenticated());

    let now = now_timestamp();
    let token = Token::new("accessvalue")
        .with_refresh_token("refreshvalue")
        .with_created(now)
        .with_expires_in(3600);
    client.set_token(&token);
    assert!(client.is_authenticated());

    client.set_token(&token.clone().with_created(now - 4000));
    assert!(!client.is_authenticated());
}

#[test]
fn test_token_created_slightly_ahead_of_local_clock_is_authenticated() {
    let (mut client, _) = empty_client();

    client.set_token(
        &Token::new("accessvalue")
            .with_created(now_timestamp() + 60)
            .with_expires_in(3600),
    );

    assert!(client.is_authenticated());
    assert!(client.state().is_valid());
}

#[test]
fn test_token_without_lifetime_is_not_authenticated() {
    let (mut client, _) = empty_client();

    client.set_token(&Token::new("accessvalue"));
    assert!(!client.is_authenticated());

    client.set_token(&Token::new("accessvalue").with_expires_in(3600));
    assert!(!client.is_authenticated());
}

#[test]
fn test_numeric_strings_are_accepted_for_lifetime_fields() {
    let (mut client, _) = empty_client();
    let now = now_timestamp();

    client
        .set_token_value(json!({
            "access_token": "accessvalue",
            "expires_in": "3600",
            "created": now.to_string(),
        }))
        .unwrap();

    assert!(client.is_authenticated());
    assert_eq!(
        client.option("accesstoken"),
        Some(json!({"access_token": "accessvalue", "expires_in": 3600, "created": now}))
    );
}

#[test]
fn test_state_reports_expired_token_with_refresh_capability() {
    let (mut client, _) = empty_client();
    assert_eq!(client.state(), TokenState::Unauthenticated);

    let expired = Token::new("accessvalue")
        .with_refresh_token("refreshvalue")
        .with_created(now_timestamp() - 1800)
        .with_expires_in(600);
    client.set_token(&expired);

    let state = client.state();
    assert_eq!(state, TokenState::Expired(expired.clone()));
    assert!(state.can_refresh());
    assert_eq!(state.token(), Some(&expired));
}

#[test]
fn test_provider_fields_are_preserved() {
    let (mut client, _) = empty_client();

    let token = client
        .set_token_value(json!({
            "access_token": "accessvalue",
            "token_type": "Bearer",
            "scope": "https://www.googleapis.com/auth/calendar",
        }))
        .unwrap();

    assert_eq!(token.extra.get("token_type"), Some(&json!("Bearer")));
    assert_eq!(
        client.option("accesstoken").unwrap()["scope"],
        json!("https://www.googleapis.com/auth/calendar")
    );
}
