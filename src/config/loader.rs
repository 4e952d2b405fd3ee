//! Configuration file discovery and loading.
//!
//! This module handles finding and loading configuration files from
//! various locations in the correct priority order. Unlike most tools,
//! venvup runs fine with no configuration at all: every missing layer
//! falls back to the built-in defaults.

use crate::config::merger::merge_configs;
use crate::config::schema::VenvupConfig;
use crate::error::{Result, VenvupError};
use crate::shell::home_dir;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding venvup's config files, relative to a root.
pub const CONFIG_DIR: &str = ".venvup";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.venvup/config.yml`)
/// 2. Project config (`.venvup/config.yml`)
/// 3. Local overrides (`.venvup/config.local.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.venvup/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .venvup/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .venvup/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self::discover_with_home(project_root, home_dir().as_deref())
    }

    /// Discover config files with an explicit home directory.
    pub fn discover_with_home(project_root: &Path, home: Option<&Path>) -> Self {
        Self {
            user_global: home
                .map(|h| h.join(CONFIG_DIR).join("config.yml"))
                .filter(|p| p.is_file()),
            project: existing(project_config_path(project_root)),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Check if any project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

/// Where `venvup init` writes the project config.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.yml")
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VenvupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VenvupError::Io(e)
        }
    })
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<VenvupConfig> {
    let content = read_file(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into a config. An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<VenvupConfig> {
    if content.trim().is_empty() {
        return Ok(VenvupConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| VenvupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as a raw YAML value, for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_file(path)?;
    serde_yaml::from_str(&content).map_err(|e| VenvupError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every discovered layer on top of the defaults.
pub fn load_merged_config(paths: &ConfigPaths) -> Result<VenvupConfig> {
    let existing = paths.all_existing();
    if existing.is_empty() {
        tracing::debug!("No config files found, using defaults");
        return Ok(VenvupConfig::default());
    }

    let mut layers = Vec::with_capacity(existing.len());
    for path in &existing {
        tracing::debug!("Loading config layer {}", path.display());
        layers.push(load_config_value(path)?);
    }

    let merged = merge_configs(&layers);
    let report_path = existing
        .last()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();

    serde_yaml::from_value(merged).map_err(|e| VenvupError::ConfigParseError {
        path: report_path,
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges all config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<VenvupConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(&ConfigPaths::discover(project_root)),
    }
}
