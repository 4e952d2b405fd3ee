//! Shared config loading for commands that read `.venvup/config.yml`.

use std::path::Path;

use crate::cli::args::OverrideArgs;
use crate::config::{load_config, validate, OutputMode, VenvupConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Load, override and validate the configuration for a command.
///
/// When the UI is still at the default `normal` mode, the config's
/// `settings.default_output` takes over; `-v`/`-q` on the command line win.
pub fn load_command_config(
    project_root: &Path,
    config_override: Option<&Path>,
    overrides: &OverrideArgs,
    ui: &mut dyn UserInterface,
) -> Result<VenvupConfig> {
    let mut config = load_config(project_root, config_override)?;
    overrides.apply(&mut config);
    validate(&config)?;

    if ui.output_mode() == crate::ui::OutputMode::Normal
        && config.settings.default_output != OutputMode::Normal
    {
        ui.set_output_mode(config.settings.default_output.into());
    }

    tracing::debug!(
        "Config: tool={} venv={} python={} manifest={}",
        config.tool.command,
        config.environment.path.display(),
        config.environment.python,
        config.dependencies.manifest.display()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(root: &Path, content: &str) {
        let dir = root.join(".venvup");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), content).unwrap();
    }

    #[test]
    fn overrides_win_over_file() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "environment:\n  python: '3.10'");
        let overrides = OverrideArgs {
            python: Some("3.13".to_string()),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let config = load_command_config(temp.path(), None, &overrides, &mut ui).unwrap();
        assert_eq!(config.environment.python, "3.13");
    }

    #[test]
    fn default_output_applies_to_normal_ui() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "settings:\n  default_output: quiet");
        let mut ui = MockUI::new();

        load_command_config(temp.path(), None, &OverrideArgs::default(), &mut ui).unwrap();
        assert_eq!(ui.output_mode(), crate::ui::OutputMode::Quiet);
    }

    #[test]
    fn explicit_mode_is_kept() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "settings:\n  default_output: quiet");
        let mut ui = MockUI::with_mode(crate::ui::OutputMode::Verbose);

        load_command_config(temp.path(), None, &OverrideArgs::default(), &mut ui).unwrap();
        assert_eq!(ui.output_mode(), crate::ui::OutputMode::Verbose);
    }

    #[test]
    fn invalid_override_fails_validation() {
        let temp = TempDir::new().unwrap();
        let overrides = OverrideArgs {
            python: Some(String::new()),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let err = load_command_config(temp.path(), None, &overrides, &mut ui).unwrap_err();
        assert!(err.is_config_error());
    }
}
