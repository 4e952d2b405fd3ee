//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{ActivationMode, VenvupConfig};
use crate::shell::ShellType;

/// venvup - Bootstrap a Python project's virtual environment.
#[derive(Debug, Parser)]
#[command(name = "venvup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Load only this config file instead of the layered config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Arguments for the bare invocation, which behaves like `run`
    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Set up the environment (default if no command specified)
    Run(RunArgs),

    /// Activate an existing environment
    Activate(ActivateArgs),

    /// Show tool and environment status
    Status(StatusArgs),

    /// Write a starter .venvup/config.yml
    Init(InitArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Per-invocation overrides of the configured values.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OverrideArgs {
    /// Interpreter version for a new environment
    #[arg(long, env = "VENVUP_PYTHON", value_name = "VERSION")]
    pub python: Option<String>,

    /// Environment directory
    #[arg(long, env = "VENVUP_VENV", value_name = "DIR")]
    pub venv: Option<PathBuf>,

    /// Dependency manifest
    #[arg(long, env = "VENVUP_MANIFEST", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Package-manager command
    #[arg(long, env = "VENVUP_TOOL", value_name = "NAME")]
    pub tool: Option<String>,
}

impl OverrideArgs {
    /// Write every given override into `config`.
    pub fn apply(&self, config: &mut VenvupConfig) {
        if let Some(python) = &self.python {
            config.environment.python = python.clone();
        }
        if let Some(venv) = &self.venv {
            config.environment.path = venv.clone();
        }
        if let Some(manifest) = &self.manifest {
            config.dependencies.manifest = manifest.clone();
        }
        if let Some(tool) = &self.tool {
            config.tool.command = tool.clone();
        }
    }
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Show what would run without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Stop at the first failed step
    #[arg(long)]
    pub fail_fast: bool,

    /// How to activate the environment when done
    #[arg(long, value_enum, value_name = "MODE")]
    pub activate: Option<ActivationMode>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the `activate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ActivateArgs {
    /// Print the activation command instead of starting a shell
    #[arg(long)]
    pub print: bool,

    /// Shell to activate for (default: the current shell)
    #[arg(long, value_enum)]
    pub shell: Option<ShellType>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long, conflicts_with = "schema")]
    pub json: bool,

    /// Print the JSON schema of the config file
    #[arg(long)]
    pub schema: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
