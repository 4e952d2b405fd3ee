//! venvup - Bootstrap a Python project's virtual environment.
//!
//! One command takes a checkout to a working environment: make sure the
//! package-management tool is installed (fetching its install script when
//! it is not), create the virtual environment pinned to an interpreter
//! version, install the dependency manifest into it, and activate it.
//!
//! # Modules
//!
//! - [`bootstrap`] - The four-step sequence and its run report
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, layering, and validation
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Fetching and running the tool's install script
//! - [`shell`] - Process execution, tool lookup, and shell detection
//! - [`ui`] - Spinners, step lines, and the run summary
//! - [`venv`] - Environment layout, `pyvenv.cfg`, and activation
//!
//! # Example
//!
//! ```
//! use venvup::config::{resolve_args, InterpolationContext, VenvupConfig};
//!
//! let config = VenvupConfig::default();
//! let mut ctx = InterpolationContext::new();
//! ctx.set("venv", ".venv");
//! ctx.set("python", "3.12");
//! let args = resolve_args(&config.tool.create_args, &ctx).unwrap();
//! assert_eq!(args, ["venv", ".venv", "--python", "3.12"]);
//! ```

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod shell;
pub mod ui;
pub mod venv;

pub use error::{Result, VenvupError};
