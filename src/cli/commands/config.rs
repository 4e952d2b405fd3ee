//! Config command implementation.
//!
//! The `venvup config` command shows the resolved configuration, or the
//! JSON schema of the config file.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::{ConfigPaths, VenvupConfig};
use crate::error::{Result, VenvupError};
use crate::ui::UserInterface;

use super::context::load_command_config;
use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }

    /// The text the command prints on stdout.
    pub fn render(&self, ui: &mut dyn UserInterface) -> Result<String> {
        if self.args.schema {
            let schema = schemars::schema_for!(VenvupConfig);
            return serde_json::to_string_pretty(&schema).map_err(|e| VenvupError::Other(e.into()));
        }

        let config = load_command_config(
            &self.project_root,
            self.config_override.as_deref(),
            &self.args.overrides,
            ui,
        )?;

        // Show config file path(s)
        match &self.config_override {
            Some(path) => ui.message(&format!("# {}", path.display())),
            None => {
                let paths = ConfigPaths::discover(&self.project_root);
                let existing = paths.all_existing();
                if existing.is_empty() {
                    ui.message("# no config files, using defaults");
                }
                for path in existing {
                    ui.message(&format!("# {}", path.display()));
                }
            }
        }

        if self.args.json {
            serde_json::to_string_pretty(&config).map_err(|e| VenvupError::Other(e.into()))
        } else {
            serde_yaml::to_string(&config).map_err(|e| VenvupError::Other(e.into()))
        }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let output = self.render(ui)?;
        println!("{}", output.trim_end());
        Ok(CommandResult::success())
    }
}
