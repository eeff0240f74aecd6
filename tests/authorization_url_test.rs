// ABOUTME: Integration tests for authorization URL construction and the redirect step
// ABOUTME: Covers parameter ordering and encoding, required options, and authenticate() without a code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{empty_client, google_client, AUTH_URL, CLIENT_ID, REDIRECT_URI};
use pierre_oauth2_client::{AuthenticateOutcome, CallbackParams, ErrorCode, OAuth2Error, TokenState};
use serde_json::json;

const GOOGLE_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/adsense",
    "https://www.googleapis.com/auth/calendar",
];

#[test]
fn test_create_url_matches_google_example() {
    let (mut client, _) = empty_client();
    client.set_option("authurl", AUTH_URL);
    client.set_option("clientid", CLIENT_ID);
    client.set_option("scope", json!(GOOGLE_SCOPES));
    client.set_option("state", "123456");
    client.set_option("redirecturi", REDIRECT_URI);
    client.set_option(
        "requestparams",
        json!({"access_type": "offline", "approval_prompt": "auto"}),
    );

    let expected = "https://accounts.google.com/o/oauth2/auth?response_type=code\
        &client_id=01234567891011.apps.googleusercontent.com\
        &redirect_uri=http%3A%2F%2Flocalhost%2Foauth\
        &scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fadsense\
        +https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fcalendar\
        &state=123456&access_type=offline&approval_prompt=auto";

    assert_eq!(client.create_url().unwrap(), expected);
}

#[test]
fn test_create_url_is_pure() {
    let (client, transport) = google_client();
    assert_eq!(client.create_url().unwrap(), client.create_url().unwrap());
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_create_url_requires_each_endpoint_option() {
    for missing in ["authurl", "clientid", "redirecturi"] {
        let (mut client, _) = google_client();
        client.set_option(missing, "");

        match client.create_url() {
            Err(OAuth2Error::Configuration { option, .. }) => assert_eq!(option, missing),
            other => panic!("expected configuration error for {missing}, got {other:?}"),
        }
    }
}

#[test]
fn test_scope_given_as_single_string_is_encoded_once() {
    let (mut client, _) = google_client();
    client.set_option("scope", "read write");

    let url = client.create_url().unwrap();
    assert!(url.ends_with("&scope=read+write"), "{url}");
}

#[tokio::test]
async fn test_authenticate_without_code_returns_redirect_when_sendheaders() {
    let (mut client, transport) = google_client();
    client.set_option("scope", json!(GOOGLE_SCOPES));
    client.set_option("sendheaders", true);

    let outcome = client.authenticate(&CallbackParams::default()).await.unwrap();
    let expected_url = client.create_url().unwrap();

    assert_eq!(outcome, AuthenticateOutcome::Redirect { url: expected_url });
    assert_eq!(transport.request_count(), 0);
    assert_eq!(client.state(), TokenState::AwaitingCode);
}

#[tokio::test]
async fn test_authenticate_without_code_returns_url_when_not_sendheaders() {
    let (mut client, transport) = google_client();

    let outcome = client.authenticate(&None::<&str>).await.unwrap();

    assert!(matches!(outcome, AuthenticateOutcome::AuthorizationUrl { .. }));
    assert!(outcome.url().unwrap().starts_with(AUTH_URL));
    assert!(outcome.token().is_none());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_provider_error_callback_restarts_authorization() {
    let (mut client, transport) = google_client();
    let callback = CallbackParams::from_query("error=access_denied&state=123456").unwrap();

    let outcome = client.authenticate(&callback).await.unwrap();

    assert!(outcome.url().is_some());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_authenticate_without_code_needs_authorization_options() {
    let (mut client, _) = empty_client();

    let error = client.authenticate(&CallbackParams::default()).await.unwrap_err();
    assert_eq!(error.code(), ErrorCode::ConfigMissing);
    assert_eq!(client.state(), TokenState::Unauthenticated);
}

#[cfg(feature = "http-response")]
#[tokio::test]
async fn test_redirect_outcome_converts_to_see_other_response() {
    use axum::response::IntoResponse;
    use http::header::LOCATION;
    use http::StatusCode;

    let (mut client, _) = google_client();
    client.set_option("sendheaders", true);

    let outcome = client.authenticate(&CallbackParams::default()).await.unwrap();
    let response = outcome.redirect_response().unwrap().into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap().to_str().unwrap(),
        outcome.url().unwrap()
    );

    client.set_option("sendheaders", false);
    let outcome = client.authenticate(&CallbackParams::default()).await.unwrap();
    assert!(outcome.redirect_response().is_none());
}
