//! Command-line interface for venvup.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    ActivateArgs, Cli, Commands, CompletionsArgs, ConfigArgs, InitArgs, OverrideArgs, RunArgs,
    StatusArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
