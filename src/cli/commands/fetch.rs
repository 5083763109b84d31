//! Fetch command implementation.
//!
//! The `snippet`, `page` and `part` commands print a resource's content.

use crate::config::ConsumerOptions;
use crate::error::Result;
use crate::fetch::ResourcePath;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::workspace::Workspace;

/// Fetches one resource and writes it to the UI.
pub struct FetchCommand {
    workspace: Workspace,
    resource: ResourcePath,
    options: Vec<String>,
}

impl FetchCommand {
    /// Create a new fetch command.
    pub fn new(workspace: &Workspace, resource: ResourcePath, options: Vec<String>) -> Self {
        Self {
            workspace: workspace.clone(),
            resource,
            options,
        }
    }

    /// Get the resource being fetched.
    pub fn resource(&self) -> &ResourcePath {
        &self.resource
    }
}

impl Command for FetchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let fetcher = self.workspace.fetcher()?;
        let overrides = ConsumerOptions::from_pairs(self.options.iter().map(String::as_str))?;

        match fetcher.fetch(&self.resource, &overrides)? {
            Some(content) => {
                ui.content(&content);
                Ok(CommandResult::success())
            }
            None => {
                ui.warning(&format!("No content returned for {}", self.resource));
                Ok(CommandResult::failure(1))
            }
        }
    }
}
