//! Option name and value validation.
//!
//! Option names come from a fixed set plus the `{environment}_content`
//! pattern. Names are checked here once, at the boundary where raw
//! mappings become [`ConsumerOptions`](super::ConsumerOptions); everything
//! past that point works with typed fields.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ConsumerError, Result};

/// Option names with a dedicated field.
pub const KNOWN_OPTIONS: &[&str] = &[
    "base_url",
    "ttl_seconds",
    "timeout_seconds",
    "username",
    "password",
    "error_fallback_content",
    "raise_on_error",
];

static ENVIRONMENT_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9][a-z0-9_-]*)_content$").expect("environment content pattern is valid")
});

/// A recognized option name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionName {
    BaseUrl,
    TtlSeconds,
    TimeoutSeconds,
    Username,
    Password,
    ErrorFallbackContent,
    RaiseOnError,
    /// `{environment}_content`, carrying the environment name.
    EnvironmentContent(String),
}

/// Resolve a raw option name.
///
/// Named options take precedence over the environment pattern, so
/// `error_fallback_content` never becomes an override for an environment
/// called `error_fallback`.
///
/// # Errors
///
/// Returns `InvalidOption` for anything else.
pub fn parse_option_name(name: &str) -> Result<OptionName> {
    let option = match name {
        "base_url" => OptionName::BaseUrl,
        "ttl_seconds" => OptionName::TtlSeconds,
        "timeout_seconds" => OptionName::TimeoutSeconds,
        "username" => OptionName::Username,
        "password" => OptionName::Password,
        "error_fallback_content" => OptionName::ErrorFallbackContent,
        "raise_on_error" => OptionName::RaiseOnError,
        other => match ENVIRONMENT_CONTENT.captures(other) {
            Some(caps) => OptionName::EnvironmentContent(caps[1].to_string()),
            None => {
                return Err(ConsumerError::InvalidOption {
                    name: other.to_string(),
                })
            }
        },
    };

    Ok(option)
}

/// Check an option name without keeping the parsed form.
pub fn is_valid_option_name(name: &str) -> bool {
    parse_option_name(name).is_ok()
}

/// Parse a duration option into whole seconds.
///
/// Accepts a non-negative integer, or a string like "600", "30s", "10m",
/// "2h" or "1d".
pub fn parse_duration_secs(name: &str, value: &serde_yaml::Value) -> Result<u64> {
    let invalid = |message: String| ConsumerError::InvalidOptionValue {
        name: name.to_string(),
        message,
    };

    match value {
        serde_yaml::Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| invalid(format!("expected a non-negative integer, got {}", n))),
        serde_yaml::Value::String(s) => {
            parse_duration_str(s).ok_or_else(|| invalid(format!("invalid duration '{}'", s)))
        }
        _ => Err(invalid("expected a number of seconds".to_string())),
    }
}

/// Parse the request timeout. Like [`parse_duration_secs`] but rejects
/// zero, which would fail every request before it starts.
pub fn parse_timeout_secs(name: &str, value: &serde_yaml::Value) -> Result<u64> {
    match parse_duration_secs(name, value)? {
        0 => Err(zero_timeout(name)),
        secs => Ok(secs),
    }
}

pub(crate) fn zero_timeout(name: &str) -> ConsumerError {
    ConsumerError::InvalidOptionValue {
        name: name.to_string(),
        message: "timeout must be at least 1 second".to_string(),
    }
}

fn parse_duration_str(raw: &str) -> Option<u64> {
    let raw = raw.trim().to_lowercase();

    let (digits, multiplier) = if let Some(days) = raw.strip_suffix('d') {
        (days, 86_400)
    } else if let Some(hours) = raw.strip_suffix('h') {
        (hours, 3_600)
    } else if let Some(mins) = raw.strip_suffix('m') {
        (mins, 60)
    } else if let Some(secs) = raw.strip_suffix('s') {
        (secs, 1)
    } else {
        (raw.as_str(), 1)
    };

    digits.trim().parse::<u64>().ok()?.checked_mul(multiplier)
}

/// Parse a boolean option. Accepts YAML booleans and the strings
/// "true"/"false"/"yes"/"no"/"1"/"0".
pub fn parse_bool(name: &str, value: &serde_yaml::Value) -> Result<bool> {
    let parsed = match value {
        serde_yaml::Value::Bool(b) => Some(*b),
        serde_yaml::Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        serde_yaml::Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };

    parsed.ok_or_else(|| ConsumerError::InvalidOptionValue {
        name: name.to_string(),
        message: "expected true or false".to_string(),
    })
}
