//! Shared command state.
//!
//! A [`Workspace`] turns the global CLI flags into loaded options, the
//! active environment and a file-backed [`ContentFetcher`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{default_cache_dir, FileStore};
use crate::cli::args::Cli;
use crate::config::{load_options, ConfigPaths, ConsumerOptions};
use crate::environment::ResolvedEnvironment;
use crate::error::Result;
use crate::fetch::ContentFetcher;

/// Project location plus the global flags every command shares.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    project_root: PathBuf,
    config: Option<PathBuf>,
    env: Option<String>,
    cache_dir: Option<PathBuf>,
}

impl Workspace {
    /// Create a workspace rooted at `project_root` with no overrides.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    /// Create a workspace from parsed CLI flags.
    pub fn from_cli(cli: &Cli, project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config: cli.config.clone(),
            env: cli.env.clone(),
            cache_dir: cli.cache_dir.clone(),
        }
    }

    /// Load a specific config file instead of the project files.
    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    /// Set the environment flag.
    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Use a specific cache directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Config file given with `--config`, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    /// Config files that contribute to the loaded options.
    pub fn config_sources(&self) -> Vec<PathBuf> {
        match &self.config {
            Some(path) => vec![path.clone()],
            None => ConfigPaths::discover(&self.project_root)
                .all_existing()
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// Load configured options.
    pub fn load_options(&self) -> Result<ConsumerOptions> {
        load_options(&self.project_root, self.config.as_deref())
    }

    /// Resolve the active environment.
    pub fn environment(&self) -> ResolvedEnvironment {
        ResolvedEnvironment::resolve(self.env.as_deref())
    }

    /// Directory holding cached content.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| default_cache_dir(&self.project_root))
    }

    /// Build a fetcher from the loaded options and the file cache.
    pub fn fetcher(&self) -> Result<ContentFetcher> {
        let options = self.load_options()?;
        let environment = self.environment();
        tracing::debug!(
            "Using environment {} (from {}), cache at {}",
            environment.name,
            environment.source,
            self.cache_dir().display()
        );

        Ok(ContentFetcher::new(options, Arc::new(FileStore::new(self.cache_dir())))?
            .with_environment(environment.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsumerError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_cache_dir_is_under_project() {
        let workspace = Workspace::new("/srv/site");
        assert_eq!(workspace.cache_dir(), PathBuf::from("/srv/site/.cms/cache"));
    }

    #[test]
    fn cache_dir_flag_wins() {
        let workspace = Workspace::new("/srv/site").with_cache_dir("/tmp/cms");
        assert_eq!(workspace.cache_dir(), PathBuf::from("/tmp/cms"));
    }

    #[test]
    fn env_flag_is_used() {
        let workspace = Workspace::new("/srv/site").with_env("staging");
        assert_eq!(workspace.environment().name, "staging");
    }

    #[test]
    fn fetcher_requires_config() {
        let temp = TempDir::new().unwrap();
        let err = Workspace::new(temp.path()).fetcher().unwrap_err();
        assert!(matches!(err, ConsumerError::ConfigNotFound { .. }));
    }

    #[test]
    fn fetcher_uses_explicit_config_file() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("cms.yml");
        fs::write(&config, "base_url: http://cms.test\nttl_seconds: 30\n").unwrap();

        let fetcher = Workspace::new(temp.path())
            .with_config(&config)
            .with_env("production")
            .fetcher()
            .unwrap();

        assert_eq!(fetcher.options().ttl_seconds, Some(30));
        assert_eq!(fetcher.environment(), "production");
    }
}
