//! Reader for `pyvenv.cfg`.
//!
//! Every virtual environment carries a `pyvenv.cfg` of `key = value` lines
//! written by whatever created it. Only `status` reads it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Parsed `pyvenv.cfg`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PyvenvCfg {
    entries: BTreeMap<String, String>,
}

impl PyvenvCfg {
    /// Parse `key = value` lines. Lines without `=` are ignored; keys are
    /// lowercased.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self { entries }
    }

    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Interpreter version. `venv` writes `version`, uv writes `version_info`.
    pub fn version(&self) -> Option<&str> {
        self.get("version").or_else(|| self.get("version_info"))
    }

    /// Directory of the base interpreter.
    pub fn home(&self) -> Option<&str> {
        self.get("home")
    }
}
