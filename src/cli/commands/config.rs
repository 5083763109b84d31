//! Config command implementation.
//!
//! The `cms-consumer config` command shows resolved configuration.

use serde::Serialize;

use crate::cli::args::ConfigArgs;
use crate::config::{ConsumerOptions, EffectiveOptions, DEFAULT_TIMEOUT_SECONDS};
use crate::error::{ConsumerError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::workspace::Workspace;

/// The config command implementation.
pub struct ConfigCommand {
    workspace: Workspace,
    args: ConfigArgs,
}

/// What `config` prints.
#[derive(Debug, Serialize)]
struct ConfigView {
    environment: String,
    environment_source: String,
    cache_dir: String,
    options: ConsumerOptions,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(workspace: &Workspace, args: ConfigArgs) -> Self {
        Self {
            workspace: workspace.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut options = self.workspace.load_options()?;
        EffectiveOptions::resolve(options.clone())?;
        options.timeout_seconds.get_or_insert(DEFAULT_TIMEOUT_SECONDS);
        options.raise_on_error.get_or_insert(false);

        let environment = self.workspace.environment();
        let view = ConfigView {
            environment: environment.name,
            environment_source: environment.source.to_string(),
            cache_dir: self.workspace.cache_dir().display().to_string(),
            options,
        };

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&view).map_err(|e| ConsumerError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        for path in self.workspace.config_sources() {
            ui.message(&format!("# {}", path.display()));
        }
        ui.message("");

        let yaml = serde_yaml::to_string(&view).map_err(|e| ConsumerError::Other(e.into()))?;
        ui.message(yaml.trim_end());

        Ok(CommandResult::success())
    }
}
