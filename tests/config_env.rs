//! Integration tests for environment-driven configuration.

mod test_helpers;

use chrono::FixedOffset;
use focusboard::config::{
    API_BASE_VAR, API_KEY_VAR, AssistantConfig, ConfigError, LISTEN_VAR, MAX_TOKENS_VAR,
    MODEL_VAR, ProxyConfig, TIMEOUT_VAR, UTC_OFFSET_VAR, parse_offset,
};
use rstest::rstest;
use std::time::Duration;
use test_helpers::ScopedConfigEnv;

#[test]
fn defaults_apply_when_nothing_is_set() {
    let _guard = ScopedConfigEnv::with(&[]);

    let config = ProxyConfig::from_env().expect("defaults are valid");

    assert_eq!(config, ProxyConfig::default());
    assert!(!config.assistant.has_credentials());
    assert_eq!(config.listen.to_string(), "127.0.0.1:3001");
}

#[test]
fn variables_override_defaults() {
    let _guard = ScopedConfigEnv::with(&[
        (API_KEY_VAR, "sk-test"),
        (MODEL_VAR, "claude-test"),
        (API_BASE_VAR, "http://localhost:9000/"),
        (MAX_TOKENS_VAR, "256"),
        (TIMEOUT_VAR, "5"),
        (UTC_OFFSET_VAR, "-300"),
        (LISTEN_VAR, "0.0.0.0:8080"),
    ]);

    let config = ProxyConfig::from_env().expect("values are valid");

    assert_eq!(config.listen.to_string(), "0.0.0.0:8080");
    let assistant = config.assistant;
    assert_eq!(assistant.api_key.as_deref(), Some("sk-test"));
    assert_eq!(assistant.model, "claude-test");
    assert_eq!(assistant.api_base, "http://localhost:9000");
    assert_eq!(assistant.max_tokens, 256);
    assert_eq!(assistant.timeout, Duration::from_secs(5));
    assert_eq!(
        Some(assistant.utc_offset),
        FixedOffset::west_opt(5 * 3600)
    );
}

#[test]
fn blank_api_key_counts_as_missing() {
    let _guard = ScopedConfigEnv::with(&[(API_KEY_VAR, "   ")]);

    let config = AssistantConfig::from_env().expect("blank is valid");

    assert!(!config.has_credentials());
}

#[test]
fn unparsable_value_names_the_variable() {
    let _guard = ScopedConfigEnv::with(&[(MAX_TOKENS_VAR, "lots")]);

    let result = AssistantConfig::from_env();

    assert!(matches!(
        result,
        Err(ConfigError::Invalid { key, ref value, .. }) if key == MAX_TOKENS_VAR && value == "lots"
    ));
}

#[rstest]
#[case("0", Some(0))]
#[case("330", Some(330 * 60))]
#[case(" -480 ", Some(-480 * 60))]
#[case("1440", None)]
#[case("+2h", None)]
fn offsets_are_whole_minutes_under_a_day(#[case] raw: &str, #[case] seconds: Option<i32>) {
    let parsed = parse_offset(raw).ok().map(|offset| offset.local_minus_utc());

    assert_eq!(parsed, seconds);
}
