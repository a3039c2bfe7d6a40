//! Runtime configuration read from the environment.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `ANTHROPIC_API_KEY` | API key for the language model | unset |
//! | `FOCUSBOARD_MODEL` | Model name | `claude-3-5-sonnet-latest` |
//! | `FOCUSBOARD_API_BASE` | API base URL | `https://api.anthropic.com` |
//! | `FOCUSBOARD_MAX_TOKENS` | Answer token limit | `1024` |
//! | `FOCUSBOARD_TIMEOUT_SECS` | Upstream request timeout | `60` |
//! | `FOCUSBOARD_UTC_OFFSET_MINUTES` | Offset defining calendar days | `0` |
//! | `FOCUSBOARD_LISTEN` | Proxy listen address | `127.0.0.1:3001` |

use chrono::{FixedOffset, Offset, Utc};
use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// API key variable.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
/// Model name variable.
pub const MODEL_VAR: &str = "FOCUSBOARD_MODEL";
/// API base URL variable.
pub const API_BASE_VAR: &str = "FOCUSBOARD_API_BASE";
/// Token limit variable.
pub const MAX_TOKENS_VAR: &str = "FOCUSBOARD_MAX_TOKENS";
/// Timeout variable.
pub const TIMEOUT_VAR: &str = "FOCUSBOARD_TIMEOUT_SECS";
/// UTC offset variable.
pub const UTC_OFFSET_VAR: &str = "FOCUSBOARD_UTC_OFFSET_MINUTES";
/// Listen address variable.
pub const LISTEN_VAR: &str = "FOCUSBOARD_LISTEN";

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that does not parse.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
        /// What was expected.
        reason: String,
    },
}

/// Settings for the language-model client and the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    /// API key; requests fail with missing credentials without one.
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// API base URL without a trailing slash.
    pub api_base: String,
    /// Answer token limit.
    pub max_tokens: u32,
    /// Transport timeout for one upstream call.
    pub timeout: Duration,
    /// Offset defining calendar days for due-date flags.
    pub utc_offset: FixedOffset,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "claude-3-5-sonnet-latest".to_owned(),
            api_base: "https://api.anthropic.com".to_owned(),
            max_tokens: 1024,
            timeout: Duration::from_secs(60),
            utc_offset: Utc.fix(),
        }
    }
}

impl AssistantConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set but does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        let utc_offset = match read(UTC_OFFSET_VAR) {
            Some(value) => parse_offset(&value)?,
            None => defaults.utc_offset,
        };
        Ok(Self {
            api_key: read(API_KEY_VAR),
            model: read(MODEL_VAR).unwrap_or(defaults.model),
            api_base: read(API_BASE_VAR)
                .map(|base| base.trim_end_matches('/').to_owned())
                .unwrap_or(defaults.api_base),
            max_tokens: parse_or(read(MAX_TOKENS_VAR), MAX_TOKENS_VAR, defaults.max_tokens)?,
            timeout: Duration::from_secs(parse_or(
                read(TIMEOUT_VAR),
                TIMEOUT_VAR,
                defaults.timeout.as_secs(),
            )?),
            utc_offset,
        })
    }

    /// Returns whether an API key is configured.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Settings for the HTTP proxy binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Address to listen on.
    pub listen: SocketAddr,
    /// Assistant settings.
    pub assistant: AssistantConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::LOCALHOST, 3001)),
            assistant: AssistantConfig::default(),
        }
    }
}

impl ProxyConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set but does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen = lookup(LISTEN_VAR)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        Ok(Self {
            listen: parse_or(listen, LISTEN_VAR, Self::default().listen)?,
            assistant: AssistantConfig::from_lookup(lookup)?,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
            value: raw,
        })
    })
}

/// Parses a UTC offset given in whole minutes east of UTC.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for non-integers and offsets of a day or
/// more.
pub fn parse_offset(value: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key: UTC_OFFSET_VAR,
        value: value.to_owned(),
        reason: reason.to_owned(),
    };
    let minutes: i32 = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected whole minutes"))?;
    if minutes.abs() >= MINUTES_PER_DAY {
        return Err(invalid("offset must be less than a day"));
    }
    FixedOffset::east_opt(minutes * 60).ok_or_else(|| invalid("offset out of range"))
}
