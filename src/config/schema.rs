//! Configuration schema definitions for venvup.
//!
//! This module contains the struct definitions that map to the
//! `.venvup/config.yml` file format. Every field has a default, so an
//! empty file (or no file at all) yields a working configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `.venvup/config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct VenvupConfig {
    /// Global settings
    pub settings: Settings,

    /// The package-management tool that creates and fills the environment
    pub tool: ToolConfig,

    /// Where to fetch the tool's install script from
    pub installer: InstallerConfig,

    /// The virtual environment to create
    pub environment: EnvironmentConfig,

    /// The dependency manifest to install
    pub dependencies: DependenciesConfig,

    /// How the environment is activated at the end of a run
    pub activation: ActivationConfig,
}

/// Global settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Settings {
    /// Default output mode: verbose, normal, quiet, silent
    pub default_output: OutputMode,

    /// Stop at the first failing step instead of continuing
    #[serde(skip_serializing_if = "is_false")]
    pub fail_fast: bool,
}

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

/// The package-management tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ToolConfig {
    /// Executable name or path
    pub command: String,

    /// Arguments for the availability probe
    pub probe_args: Vec<String>,

    /// Arguments that create the environment
    pub create_args: Vec<String>,

    /// Arguments that install the manifest into the environment
    pub install_args: Vec<String>,

    /// Extra directories searched for the tool after it is installed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_paths: Vec<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            command: "uv".to_string(),
            probe_args: strings(&["--version"]),
            create_args: strings(&["venv", "${venv}", "--python", "${python}"]),
            install_args: strings(&["pip", "install", "-r", "${manifest}"]),
            search_paths: Vec::new(),
        }
    }
}

/// Install script locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InstallerConfig {
    /// Script fetched and piped into `sh` on Unix
    pub unix_url: String,

    /// Script fetched and piped into PowerShell on Windows
    pub windows_url: String,

    /// HTTP timeout for the download, in seconds
    pub timeout_secs: u64,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            unix_url: "https://astral.sh/uv/install.sh".to_string(),
            windows_url: "https://astral.sh/uv/install.ps1".to_string(),
            timeout_secs: 120,
        }
    }
}

impl InstallerConfig {
    /// The install script URL for the platform this binary runs on.
    pub fn url_for_current_platform(&self) -> &str {
        if cfg!(windows) {
            &self.windows_url
        } else {
            &self.unix_url
        }
    }
}

/// The virtual environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Environment directory, relative to the project root
    pub path: PathBuf,

    /// Interpreter version the environment is pinned to
    pub python: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".venv"),
            python: "3.12".to_string(),
        }
    }
}

/// The dependency manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DependenciesConfig {
    /// Manifest path, relative to the project root
    pub manifest: PathBuf,
}

impl Default for DependenciesConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("requirements.txt"),
        }
    }
}

/// Activation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ActivationConfig {
    /// auto, shell, print or none
    pub mode: ActivationMode,
}

/// How a finished run hands the environment to the user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMode {
    /// `shell` on an interactive terminal, `print` otherwise
    #[default]
    Auto,
    /// Spawn an interactive subshell with the environment applied
    Shell,
    /// Print the command that activates the environment
    Print,
    /// Skip activation
    None,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn is_false(v: &bool) -> bool {
    !v
}
