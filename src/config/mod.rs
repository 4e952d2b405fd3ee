//! Configuration loading, parsing, and validation for venvup.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layer merging in [`merger`]
//! - Validation in [`validator`]
//! - Argument template interpolation in [`interpolation`]
//!
//! # Example
//!
//! ```
//! use venvup::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("venvup.yml");
//! fs::write(&path, "environment:\n  python: '3.11'").unwrap();
//!
//! let config = load_config(temp.path(), Some(&path)).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.environment.python, "3.11");
//! ```
//!
//! # Configuration File Locations
//!
//! venvup discovers and merges configuration in this order:
//! 1. User global config (`~/.venvup/config.yml`)
//! 2. Project config (`.venvup/config.yml`)
//! 3. Local overrides (`.venvup/config.local.yml`)
//!
//! Command-line flags and `VENVUP_*` variables are applied on top.

pub mod interpolation;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use interpolation::{
    extract_variables, parse_interpolation, resolve_args, resolve_string, InterpolationContext,
    Segment,
};
pub use loader::{
    load_config, load_config_file, load_config_value, load_merged_config, parse_config,
    project_config_path, ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    ActivationConfig, ActivationMode, DependenciesConfig, EnvironmentConfig, InstallerConfig,
    OutputMode, Settings, ToolConfig, VenvupConfig,
};
pub use validator::{validate, TEMPLATE_VARIABLES};
