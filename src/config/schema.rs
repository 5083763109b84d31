//! Typed consumer options.
//!
//! [`ConsumerOptions`] describes both the base configuration of a fetcher
//! and the per-call overrides passed to a single fetch. Every field is
//! optional; defaults are applied when options are resolved into
//! [`EffectiveOptions`](super::EffectiveOptions).

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::validator::{
    parse_bool, parse_duration_secs, parse_option_name, parse_timeout_secs, OptionName,
};
use crate::error::{ConsumerError, Result};

/// Options recognized by the content fetcher.
///
/// Environment overrides are written as `{environment}_content` in YAML
/// and land in [`environment_content`](Self::environment_content) keyed by
/// environment name.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsumerOptions {
    /// Root URL of the CMS, e.g. `http://cms.example.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Seconds a fetched value stays fresh. Unset means never expire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_seconds: Option<u64>,

    /// Request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Basic auth user name. Credentials are only sent when this is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Basic auth password. Redacted when serialized.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "redact")]
    pub password: Option<String>,

    /// Content returned in place of a failed fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_fallback_content: Option<String>,

    /// Propagate fetch failures instead of returning an empty result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raise_on_error: Option<bool>,

    /// Static content per environment name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment_content: BTreeMap<String, String>,
}

impl ConsumerOptions {
    /// Options with only a base URL set.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Set the TTL in seconds.
    pub fn with_ttl(mut self, seconds: u64) -> Self {
        self.ttl_seconds = Some(seconds);
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Set basic auth credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the fallback content returned on fetch failure.
    pub fn with_error_fallback(mut self, content: impl Into<String>) -> Self {
        self.error_fallback_content = Some(content.into());
        self
    }

    /// Set whether fetch failures propagate.
    pub fn with_raise_on_error(mut self, raise: bool) -> Self {
        self.raise_on_error = Some(raise);
        self
    }

    /// Add static content for an environment.
    pub fn with_environment_content(
        mut self,
        environment: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.environment_content
            .insert(environment.into(), content.into());
        self
    }

    /// True when no option is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build options from a raw YAML mapping of option names to values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOption` for a name outside the recognized set and
    /// `InvalidOptionValue` for a value of the wrong shape.
    pub fn from_mapping(mapping: &serde_yaml::Mapping) -> Result<Self> {
        let mut options = Self::default();

        for (key, value) in mapping {
            let name = key.as_str().ok_or_else(|| ConsumerError::InvalidOption {
                name: format!("{:?}", key),
            })?;
            options.set(name, value)?;
        }

        Ok(options)
    }

    /// Build options from `key=value` pairs, as given on a command line.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut options = Self::default();

        for pair in pairs {
            let (name, raw) = pair
                .split_once('=')
                .ok_or_else(|| ConsumerError::InvalidOptionValue {
                    name: pair.to_string(),
                    message: "expected key=value".to_string(),
                })?;
            let raw = raw.trim();
            let value = match serde_yaml::from_str::<serde_yaml::Value>(raw) {
                Ok(v) if v.is_bool() || v.is_number() || v.is_string() => v,
                _ => serde_yaml::Value::String(raw.to_string()),
            };
            options.set(name.trim(), &value)?;
        }

        Ok(options)
    }

    /// Set a single option by name.
    ///
    /// A `null` value leaves the option unset.
    pub fn set(&mut self, name: &str, value: &serde_yaml::Value) -> Result<()> {
        let option = parse_option_name(name)?;

        if value.is_null() {
            return Ok(());
        }

        match option {
            OptionName::BaseUrl => self.base_url = Some(string_value(name, value)?),
            OptionName::TtlSeconds => self.ttl_seconds = Some(parse_duration_secs(name, value)?),
            OptionName::TimeoutSeconds => {
                self.timeout_seconds = Some(parse_timeout_secs(name, value)?)
            }
            OptionName::Username => self.username = Some(string_value(name, value)?),
            OptionName::Password => self.password = Some(string_value(name, value)?),
            OptionName::ErrorFallbackContent => {
                self.error_fallback_content = Some(string_value(name, value)?)
            }
            OptionName::RaiseOnError => self.raise_on_error = Some(parse_bool(name, value)?),
            OptionName::EnvironmentContent(environment) => {
                self.environment_content
                    .insert(environment, string_value(name, value)?);
            }
        }

        Ok(())
    }
}

impl fmt::Debug for ConsumerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerOptions")
            .field("base_url", &self.base_url)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("error_fallback_content", &self.error_fallback_content)
            .field("raise_on_error", &self.raise_on_error)
            .field("environment_content", &self.environment_content)
            .finish()
    }
}

fn redact<S>(value: &Option<String>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(_) => serializer.serialize_str("[REDACTED]"),
        None => serializer.serialize_none(),
    }
}

/// Scalars are accepted as strings so `-o base_url=...` and numeric
/// snippets both work.
fn string_value(name: &str, value: &serde_yaml::Value) -> Result<String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ConsumerError::InvalidOptionValue {
            name: name.to_string(),
            message: "expected a string".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> serde_yaml::Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn from_mapping_reads_all_named_options() {
        let options = ConsumerOptions::from_mapping(&mapping(
            r#"
base_url: http://cms.example.com
ttl_seconds: 600
timeout_seconds: 5
username: editor
password: hunter2
error_fallback_content: "<!-- unavailable -->"
raise_on_error: true
"#,
        ))
        .unwrap();

        assert_eq!(options.base_url.as_deref(), Some("http://cms.example.com"));
        assert_eq!(options.ttl_seconds, Some(600));
        assert_eq!(options.timeout_seconds, Some(5));
        assert_eq!(options.username.as_deref(), Some("editor"));
        assert_eq!(options.password.as_deref(), Some("hunter2"));
        assert_eq!(
            options.error_fallback_content.as_deref(),
            Some("<!-- unavailable -->")
        );
        assert_eq!(options.raise_on_error, Some(true));
        assert!(options.environment_content.is_empty());
    }

    #[test]
    fn from_mapping_collects_environment_content() {
        let options = ConsumerOptions::from_mapping(&mapping(
            "staging_content: Test\ntest_content: Fixture\n",
        ))
        .unwrap();

        assert_eq!(options.environment_content["staging"], "Test");
        assert_eq!(options.environment_content["test"], "Fixture");
    }

    #[test]
    fn from_mapping_rejects_unknown_option() {
        let err = ConsumerOptions::from_mapping(&mapping("expire_after: 600")).unwrap_err();
        assert!(matches!(err, ConsumerError::InvalidOption { name } if name == "expire_after"));
    }

    #[test]
    fn from_mapping_rejects_non_string_key() {
        let err = ConsumerOptions::from_mapping(&mapping("42: x")).unwrap_err();
        assert!(matches!(err, ConsumerError::InvalidOption { .. }));
    }

    #[test]
    fn ttl_accepts_duration_strings() {
        let options = ConsumerOptions::from_mapping(&mapping("ttl_seconds: 10m")).unwrap();
        assert_eq!(options.ttl_seconds, Some(600));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ConsumerOptions::from_mapping(&mapping("timeout_seconds: 0")).unwrap_err();
        assert!(
            matches!(&err, ConsumerError::InvalidOptionValue { name, .. } if name == "timeout_seconds")
        );

        let err = ConsumerOptions::from_pairs(["timeout_seconds=0s"]).unwrap_err();
        assert!(matches!(err, ConsumerError::InvalidOptionValue { .. }));
    }

    #[test]
    fn null_value_leaves_option_unset() {
        let options = ConsumerOptions::from_mapping(&mapping("username: null")).unwrap();
        assert!(options.username.is_none());
        assert!(options.is_empty());
    }

    #[test]
    fn from_pairs_parses_typed_values() {
        let options =
            ConsumerOptions::from_pairs(["ttl_seconds=30", "raise_on_error=true", "qa_content=Hi"])
                .unwrap();

        assert_eq!(options.ttl_seconds, Some(30));
        assert_eq!(options.raise_on_error, Some(true));
        assert_eq!(options.environment_content["qa"], "Hi");
    }

    #[test]
    fn from_pairs_keeps_urls_intact() {
        let options = ConsumerOptions::from_pairs(["base_url=http://cms.local:8080"]).unwrap();
        assert_eq!(options.base_url.as_deref(), Some("http://cms.local:8080"));
    }

    #[test]
    fn from_pairs_requires_equals_sign() {
        let err = ConsumerOptions::from_pairs(["ttl_seconds"]).unwrap_err();
        assert!(matches!(err, ConsumerError::InvalidOptionValue { .. }));
    }

    #[test]
    fn builder_methods_set_fields() {
        let options = ConsumerOptions::new("http://example.com")
            .with_ttl(600)
            .with_timeout(3)
            .with_credentials("user", "pass")
            .with_error_fallback("sorry")
            .with_raise_on_error(false)
            .with_environment_content("staging", "Test");

        assert_eq!(options.ttl_seconds, Some(600));
        assert_eq!(options.timeout_seconds, Some(3));
        assert_eq!(options.username.as_deref(), Some("user"));
        assert_eq!(options.environment_content["staging"], "Test");
        assert!(!options.is_empty());
    }

    #[test]
    fn debug_output_redacts_password() {
        let options = ConsumerOptions::new("http://example.com").with_credentials("user", "s3cret");
        let debug = format!("{:?}", options);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn serialized_output_redacts_password() {
        let options = ConsumerOptions::new("http://example.com").with_credentials("user", "s3cret");
        let json = serde_json::to_string(&options).unwrap();
        assert!(!json.contains("s3cret"));
        assert!(json.contains("\"username\":\"user\""));
    }
}
