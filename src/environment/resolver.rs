//! Environment resolution.

/// Variable consulted when no explicit environment is given.
pub const ENVIRONMENT_VAR: &str = "CMS_ENV";

/// Environment used when nothing else names one.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// How the environment was determined.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvironmentSource {
    /// Explicitly set via `--env` flag or by the embedding program.
    Flag,
    /// Read from an environment variable.
    Variable(String),
    /// Fallback to "development".
    Fallback,
}

impl std::fmt::Display for EnvironmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "--env flag"),
            Self::Variable(var) => write!(f, "${}", var),
            Self::Fallback => write!(f, "default"),
        }
    }
}

/// A resolved environment with its name and how it was determined.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEnvironment {
    /// The environment name (e.g., "development", "staging", "test").
    pub name: String,
    /// How this environment was determined.
    pub source: EnvironmentSource,
}

impl ResolvedEnvironment {
    /// Resolve the environment from the flag and the process environment.
    ///
    /// # Example
    ///
    /// ```
    /// use cms_consumer::environment::{EnvironmentSource, ResolvedEnvironment};
    ///
    /// let resolved = ResolvedEnvironment::resolve(Some("staging"));
    /// assert_eq!(resolved.name, "staging");
    /// assert_eq!(resolved.source, EnvironmentSource::Flag);
    /// ```
    pub fn resolve(flag: Option<&str>) -> Self {
        let from_env = std::env::var(ENVIRONMENT_VAR).ok();
        Self::resolve_with_variable(flag, from_env.as_deref())
    }

    /// Resolve with a pre-read variable value (for testing).
    pub fn resolve_with_variable(flag: Option<&str>, variable: Option<&str>) -> Self {
        if let Some(name) = non_blank(flag) {
            return Self {
                name: name.to_string(),
                source: EnvironmentSource::Flag,
            };
        }

        if let Some(name) = non_blank(variable) {
            return Self {
                name: name.to_string(),
                source: EnvironmentSource::Variable(ENVIRONMENT_VAR.to_string()),
            };
        }

        Self {
            name: DEFAULT_ENVIRONMENT.to_string(),
            source: EnvironmentSource::Fallback,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
