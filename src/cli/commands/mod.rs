//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Global flags are gathered into a
//! [`Workspace`] that every command shares.

pub mod cache;
pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod fetch;
pub mod workspace;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_NO_CONFIG};
pub use workspace::Workspace;
