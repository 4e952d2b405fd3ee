//! Init command implementation.
//!
//! The `venvup init` command writes a starter `.venvup/config.yml` holding
//! the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::{project_config_path, VenvupConfig, CONFIG_DIR};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const LOCAL_CONFIG_ENTRY: &str = ".venvup/config.local.yml";

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InitArgs {
        &self.args
    }

    /// Render the default configuration with a short header.
    fn create_config(&self) -> Result<String> {
        let project_name = self
            .project_root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("this project");

        let body = serde_yaml::to_string(&VenvupConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to render config: {}", e))?;

        Ok(format!(
            "# venvup configuration for {project_name}\n\
             #\n\
             # Argument templates may use ${{tool}}, ${{venv}}, ${{python}} and ${{manifest}}.\n\
             # Personal overrides belong in {LOCAL_CONFIG_ENTRY}.\n\
             \n\
             {body}"
        ))
    }

    /// Keep personal overrides out of version control.
    fn update_gitignore(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let gitignore_path = self.project_root.join(".gitignore");

        if gitignore_path.exists() {
            let content = fs::read_to_string(&gitignore_path)?;
            if !content.lines().any(|l| l.trim() == LOCAL_CONFIG_ENTRY) {
                let new_content = if content.is_empty() || content.ends_with('\n') {
                    format!("{}{}\n", content, LOCAL_CONFIG_ENTRY)
                } else {
                    format!("{}\n{}\n", content, LOCAL_CONFIG_ENTRY)
                };
                fs::write(&gitignore_path, new_content)?;
                ui.message(&format!("Added {} to .gitignore", LOCAL_CONFIG_ENTRY));
            }
        }

        Ok(())
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = project_config_path(&self.project_root);

        if path.exists() && !self.args.force {
            ui.warning("Configuration already exists. Use --force to overwrite.");
            return Ok(CommandResult::failure(1));
        }

        fs::create_dir_all(self.project_root.join(CONFIG_DIR))?;
        fs::write(&path, self.create_config()?)?;
        tracing::debug!("Wrote {}", path.display());

        self.update_gitignore(ui)?;

        ui.success("Created .venvup/config.yml");
        ui.message("Run `venvup` to set up the environment.");
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_file;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn init_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs::default());
        assert_eq!(cmd.project_root(), temp.path());
        assert!(!cmd.args().force);
    }

    #[test]
    fn init_writes_loadable_defaults() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        let path = project_config_path(temp.path());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# venvup configuration for"));
        assert!(content.contains("${python}"));
        assert_eq!(load_config_file(&path).unwrap(), VenvupConfig::default());
        assert!(ui.has_success("Created .venvup/config.yml"));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();
        fs::write(project_config_path(temp.path()), "mine: true").unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_warning("--force"));
        let content = fs::read_to_string(project_config_path(temp.path())).unwrap();
        assert_eq!(content, "mine: true");
    }

    #[test]
    fn init_force_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();
        fs::write(project_config_path(temp.path()), "mine: true").unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs { force: true });
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).unwrap().success);
        let content = fs::read_to_string(project_config_path(temp.path())).unwrap();
        assert!(content.contains("environment:"));
    }

    #[test]
    fn init_updates_gitignore() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".gitignore"), "target/").unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();
        cmd.update_gitignore(&mut ui).unwrap();

        let content = fs::read_to_string(temp.path().join(".gitignore")).unwrap();
        assert_eq!(content, "target/\n.venvup/config.local.yml\n");
        assert!(ui.has_message("Added .venvup/config.local.yml"));
    }

    #[test]
    fn init_without_gitignore_creates_none() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand::new(temp.path(), InitArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();
        assert!(!temp.path().join(".gitignore").exists());
    }
}
