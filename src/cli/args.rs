//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::commands::cache::CacheArgs;

/// cms-consumer - Fetch CMS snippets and pages through a TTL cache.
#[derive(Debug, Parser)]
#[command(name = "cms-consumer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .cms/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Active environment (overrides $CMS_ENV)
    #[arg(short, long, global = true, value_name = "ENV")]
    pub env: Option<String>,

    /// Cache directory (overrides default .cms/cache)
    #[arg(long, global = true, value_name = "DIR", env = "CMS_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch a snippet
    Snippet(FetchArgs),

    /// Fetch a page
    Page(FetchArgs),

    /// Fetch a part of a page
    Part(PartArgs),

    /// Inspect or clear cached content
    Cache(CacheArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `snippet` and `page` commands.
#[derive(Debug, Clone, clap::Args)]
pub struct FetchArgs {
    /// Resource name
    pub name: String,

    /// Per-call option override (repeatable), e.g. `-o ttl_seconds=60`
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}

/// Arguments for the `part` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PartArgs {
    /// Page name
    pub name: String,

    /// Part name
    pub part: String,

    /// Per-call option override (repeatable), e.g. `-o ttl_seconds=60`
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
