//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::error::{ConsumerError, Result};
use crate::fetch::ResourcePath;
use crate::ui::UserInterface;

use super::cache::CacheCommand;
use super::completions::CompletionsCommand;
use super::config::ConfigCommand;
use super::fetch::FetchCommand;
use super::workspace::Workspace;

/// Exit code for a missing configuration.
pub const EXIT_NO_CONFIG: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    workspace: Workspace,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given workspace.
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    /// Get the workspace.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Dispatch and execute a command.
    ///
    /// A missing configuration is reported through `ui` and turned into
    /// exit code 2; other errors are returned.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let result = match &cli.command {
            Commands::Snippet(args) => FetchCommand::new(
                &self.workspace,
                ResourcePath::snippet(&args.name),
                args.options.clone(),
            )
            .execute(ui),
            Commands::Page(args) => FetchCommand::new(
                &self.workspace,
                ResourcePath::page(&args.name),
                args.options.clone(),
            )
            .execute(ui),
            Commands::Part(args) => FetchCommand::new(
                &self.workspace,
                ResourcePath::page_part(&args.name, &args.part),
                args.options.clone(),
            )
            .execute(ui),
            Commands::Cache(args) => CacheCommand::new(&self.workspace, args.clone()).execute(ui),
            Commands::Config(args) => {
                ConfigCommand::new(&self.workspace, args.clone()).execute(ui)
            }
            Commands::Completions(args) => CompletionsCommand::new(args.clone()).execute(ui),
        };

        match result {
            Err(ConsumerError::ConfigNotFound { path }) => {
                ui.error(&format!(
                    "No configuration found at {}. Create it with at least a base_url.",
                    path.display()
                ));
                Ok(CommandResult::failure(EXIT_NO_CONFIG))
            }
            Err(ConsumerError::MissingBaseUrl) => {
                ui.error("No configuration found: base_url is not set.");
                Ok(CommandResult::failure(EXIT_NO_CONFIG))
            }
            other => other,
        }
    }
}
