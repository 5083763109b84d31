//! Configuration file discovery and loading.
//!
//! Options live in YAML files under the project's `.cms` directory:
//!
//! 1. Project config (`.cms/config.yml`)
//! 2. Local overrides (`.cms/config.local.yml`, usually git-ignored and
//!    holding credentials)
//!
//! Later files override earlier ones key by key.

use crate::config::schema::ConsumerOptions;
use crate::error::{ConsumerError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding config files, relative to the project root.
pub const CONFIG_DIR: &str = ".cms";

/// Paths to configuration files in priority order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .cms/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .cms/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Check if the project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a config file as a raw YAML mapping.
///
/// An empty file yields an empty mapping.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid or not a mapping.
pub fn load_config_mapping(path: &Path) -> Result<serde_yaml::Mapping> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConsumerError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConsumerError::Io(e)
        }
    })?;

    parse_config_mapping(&content, path)
}

/// Parse YAML content into a raw option mapping.
pub fn parse_config_mapping(content: &str, source_path: &Path) -> Result<serde_yaml::Mapping> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConsumerError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        serde_yaml::Value::Null => Ok(serde_yaml::Mapping::new()),
        serde_yaml::Value::Mapping(mapping) => Ok(mapping),
        _ => Err(ConsumerError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: "expected a mapping of option names to values".to_string(),
        }),
    }
}

/// Overlay one mapping onto another. A `null` in the overlay removes the
/// inherited key.
pub fn overlay_mapping(base: &mut serde_yaml::Mapping, overlay: serde_yaml::Mapping) {
    for (key, value) in overlay {
        if value.is_null() {
            base.remove(&key);
        } else {
            base.insert(key, value);
        }
    }
}

/// Load a single config file into typed options.
pub fn load_options_file(path: &Path) -> Result<ConsumerOptions> {
    ConsumerOptions::from_mapping(&load_config_mapping(path)?)
}

/// Load and merge the project and local config files.
///
/// # Errors
///
/// Returns `ConfigNotFound` if no project config exists.
/// Returns `ConfigParseError` if any config file is invalid, and
/// `InvalidOption` for unrecognized option names.
pub fn load_merged_options(project_root: &Path) -> Result<ConsumerOptions> {
    let paths = ConfigPaths::discover(project_root);

    if !paths.has_project_config() {
        return Err(ConsumerError::ConfigNotFound {
            path: project_root.join(CONFIG_DIR).join("config.yml"),
        });
    }

    let mut merged = serde_yaml::Mapping::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading options from {}", path.display());
        overlay_mapping(&mut merged, load_config_mapping(path)?);
    }

    ConsumerOptions::from_mapping(&merged)
}

/// Load options with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
pub fn load_options(project_root: &Path, config_override: Option<&Path>) -> Result<ConsumerOptions> {
    match config_override {
        Some(path) => load_options_file(path),
        None => load_merged_options(project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(config: &str, local: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        if let Some(local) = local {
            fs::write(dir.join("config.local.yml"), local).unwrap();
        }
        temp
    }

    #[test]
    fn discover_finds_project_and_local() {
        let temp = project("base_url: http://example.com", Some("username: me"));

        let paths = ConfigPaths::discover(temp.path());

        assert!(paths.has_project_config());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(!paths.has_project_config());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn load_merged_options_overlays_local() {
        let temp = project(
            "base_url: http://example.com\nttl_seconds: 600\n",
            Some("ttl_seconds: 60\nusername: editor\npassword: pw\n"),
        );

        let options = load_merged_options(temp.path()).unwrap();

        assert_eq!(options.base_url.as_deref(), Some("http://example.com"));
        assert_eq!(options.ttl_seconds, Some(60));
        assert_eq!(options.username.as_deref(), Some("editor"));
    }

    #[test]
    fn local_null_removes_inherited_option() {
        let temp = project(
            "base_url: http://example.com\nerror_fallback_content: oops\n",
            Some("error_fallback_content: null\n"),
        );

        let options = load_merged_options(temp.path()).unwrap();

        assert!(options.error_fallback_content.is_none());
    }

    #[test]
    fn load_merged_options_requires_project_config() {
        let temp = TempDir::new().unwrap();
        let err = load_merged_options(temp.path()).unwrap_err();
        assert!(matches!(err, ConsumerError::ConfigNotFound { .. }));
    }

    #[test]
    fn unknown_option_in_file_is_rejected() {
        let temp = project("radiant_url: http://example.com\n", None);
        let err = load_merged_options(temp.path()).unwrap_err();
        assert!(matches!(err, ConsumerError::InvalidOption { name } if name == "radiant_url"));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = project("base_url: [unclosed", None);
        let err = load_merged_options(temp.path()).unwrap_err();
        assert!(matches!(err, ConsumerError::ConfigParseError { .. }));
    }

    #[test]
    fn scalar_document_is_parse_error() {
        let err = parse_config_mapping("just a string", Path::new("x.yml")).unwrap_err();
        assert!(matches!(err, ConsumerError::ConfigParseError { .. }));
    }

    #[test]
    fn empty_file_is_empty_mapping() {
        let mapping = parse_config_mapping("", Path::new("x.yml")).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn load_options_with_override_reads_only_that_file() {
        let temp = project("base_url: http://project.example.com\n", None);
        let other = temp.path().join("other.yml");
        fs::write(&other, "base_url: http://other.example.com\n").unwrap();

        let options = load_options(temp.path(), Some(&other)).unwrap();

        assert_eq!(options.base_url.as_deref(), Some("http://other.example.com"));
    }

    #[test]
    fn load_options_file_missing_is_config_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_options_file(&temp.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, ConsumerError::ConfigNotFound { .. }));
    }
}
