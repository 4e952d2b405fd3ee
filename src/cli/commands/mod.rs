//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`venvup run`, `venvup status`)
//! - Shared config loading in [`context`]
//! - Consistent global flag handling

pub mod activate;
pub mod completions;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod init;
pub mod run;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, CONFIG_ERROR_EXIT};
