//! Cache command implementation.
//!
//! Provides `cms-consumer cache show` and `cms-consumer cache clear`.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use crate::cache::format_duration;
use crate::config::ConsumerOptions;
use crate::error::{ConsumerError, Result};
use crate::fetch::{CachedEntry, ResourceKind, ResourcePath};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::workspace::Workspace;

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Show what is cached for a resource.
    Show {
        #[command(flatten)]
        target: CacheTarget,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Remove a resource from the cache.
    Clear {
        #[command(flatten)]
        target: CacheTarget,
    },
}

/// The resource a cache subcommand acts on.
#[derive(Debug, Clone, Args)]
pub struct CacheTarget {
    /// Resource kind: snippet, page or part.
    pub kind: ResourceKind,
    /// Snippet or page name.
    pub name: String,
    /// Part name, for `part` only.
    pub part: Option<String>,
}

impl CacheTarget {
    fn resource(&self) -> Result<ResourcePath> {
        ResourcePath::from_kind(self.kind, &self.name, self.part.as_deref())
    }
}

/// The cache command implementation.
pub struct CacheCommand {
    workspace: Workspace,
    args: CacheArgs,
}

impl CacheCommand {
    /// Create a new cache command.
    pub fn new(workspace: &Workspace, args: CacheArgs) -> Self {
        Self {
            workspace: workspace.clone(),
            args,
        }
    }
}

impl Command for CacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let fetcher = self.workspace.fetcher()?;
        let none = ConsumerOptions::default();

        match &self.args.command {
            CacheSubcommand::Show { target, json } => {
                let resource = target.resource()?;
                match fetcher.cached_entry(&resource, &none)? {
                    Some(entry) if *json => {
                        let output = serde_json::to_string_pretty(&entry)
                            .map_err(|e| ConsumerError::Other(e.into()))?;
                        ui.message(&output);
                    }
                    Some(entry) => show_entry(&entry, ui),
                    None if *json => ui.message("null"),
                    None => ui.message(&format!("Nothing cached for {}", resource)),
                }
            }
            CacheSubcommand::Clear { target } => {
                let resource = target.resource()?;
                if fetcher.evict(&resource, &none)? {
                    ui.success(&format!("Cleared cache for {}", resource));
                } else {
                    ui.message(&format!("Nothing cached for {}", resource));
                }
            }
        }

        Ok(CommandResult::success())
    }
}

fn show_entry(entry: &CachedEntry, ui: &mut dyn UserInterface) {
    let now = Utc::now().timestamp();

    ui.message(&entry.url);
    ui.message(&format!("  Fetched: {}", format_timestamp(entry.fetched_at)));
    ui.message(&format!(
        "  Status: {}",
        if entry.fresh { "fresh" } else { "expired" }
    ));
    match entry.expires_at {
        Some(expires_at) if expires_at >= now => ui.message(&format!(
            "  Expires: {} (in {})",
            format_timestamp(expires_at),
            format_duration(expires_at - now)
        )),
        Some(expires_at) => ui.message(&format!("  Expired: {}", format_timestamp(expires_at))),
        None => ui.message("  Expires: never"),
    }
    match entry.size_bytes {
        Some(size) => ui.message(&format!("  Size: {} bytes", size)),
        None => ui.message("  Size: missing content"),
    }
}

fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
