// ABOUTME: Integration tests for logging configuration
// ABOUTME: Validates environment handling, format parsing, and filter construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_oauth2_client::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

fn clear_logging_env() {
    for name in ["RUST_LOG", "LOG_FORMAT", "LOG_INCLUDE_LOCATION", "LOG_INCLUDE_THREAD"] {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_logging_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("LOG_INCLUDE_LOCATION", "1");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert!(!config.include_thread);
    assert_eq!(config.service_name, "pierre-oauth2-client");

    clear_logging_env();
}

#[test]
#[serial]
fn test_unknown_log_format_falls_back_to_pretty() {
    clear_logging_env();
    env::set_var("LOG_FORMAT", "xml");

    let config = LoggingConfig::from_env();

    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.level, "info");

    clear_logging_env();
}

#[test]
fn test_default_logging_config() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert!(!config.include_location);
    assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_env_filter_mutes_http_stack() {
    let filter = LoggingConfig::default().with_level("trace").env_filter();
    let rendered = filter.to_string();

    for target in ["hyper=warn", "hyper_util=warn", "reqwest=warn", "rustls=warn"] {
        assert!(rendered.contains(target), "{rendered} missing {target}");
    }
}

#[test]
#[serial]
fn test_init_twice_reports_error() {
    let config = LoggingConfig::default().with_level("warn");
    let _ = config.init();

    assert!(config.init().is_err());
}
