//! Activate command implementation.
//!
//! The `venvup activate` command runs only the activation step against an
//! environment that already exists.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::bootstrap::resolve_activation_mode;
use crate::cli::args::ActivateArgs;
use crate::config::ActivationMode;
use crate::error::{Result, VenvupError};
use crate::shell::{
    detect_shell, is_interactive_terminal, ProcessRunner, ShellInfo, SystemRunner,
};
use crate::ui::UserInterface;
use crate::venv::{require_activation_script, subshell_spec, VenvLayout};

use super::context::load_command_config;
use super::dispatcher::{Command, CommandResult};

/// The activate command implementation.
pub struct ActivateCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ActivateArgs,
    detected: Option<ShellInfo>,
    caller_dir: Option<PathBuf>,
}

impl ActivateCommand {
    /// Create a new activate command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: ActivateArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
            detected: None,
            caller_dir: None,
        }
    }

    /// Print the activation command relative to `dir` instead of the project.
    pub fn with_caller_dir(mut self, dir: &Path) -> Self {
        self.caller_dir = Some(dir.to_path_buf());
        self
    }

    /// Treat `shell` as the user's current shell instead of detecting it.
    pub fn with_detected_shell(mut self, shell: ShellInfo) -> Self {
        self.detected = Some(shell);
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ActivateArgs {
        &self.args
    }

    /// The shell to activate for: `--shell` if given, else the current one.
    ///
    /// A requested kind that differs from the current shell is launched by
    /// its usual program name.
    pub fn target_shell(&self) -> ShellInfo {
        let detected = self.detected.clone().unwrap_or_else(detect_shell);
        match self.args.shell {
            Some(kind) if kind != detected.kind => ShellInfo {
                executable: PathBuf::from(kind.default_executable()),
                kind,
            },
            _ => detected,
        }
    }

    /// Activate through `runner`, writing a printed command to `out`.
    pub fn execute_with(
        &self,
        ui: &mut dyn UserInterface,
        runner: &dyn ProcessRunner,
        interactive: bool,
        out: &mut dyn Write,
    ) -> Result<CommandResult> {
        let caller = self.caller_dir.as_deref().unwrap_or(&self.project_root);
        self.activate_from(caller, ui, runner, interactive, out)
    }

    fn activate_from(
        &self,
        caller: &Path,
        ui: &mut dyn UserInterface,
        runner: &dyn ProcessRunner,
        interactive: bool,
        out: &mut dyn Write,
    ) -> Result<CommandResult> {
        let config = load_command_config(
            &self.project_root,
            self.config_override.as_deref(),
            &self.args.overrides,
            ui,
        )?;
        let layout =
            VenvLayout::new(&self.project_root, &config.environment.path).seen_from(caller);
        let shell = self.target_shell();

        let mode = if self.args.print {
            ActivationMode::Print
        } else {
            match config.activation.mode {
                // Asking for activation overrides a config that disables it.
                ActivationMode::None => resolve_activation_mode(ActivationMode::Auto, interactive),
                mode => resolve_activation_mode(mode, interactive),
            }
        };
        tracing::debug!("Activating {} for {:?} ({:?})", layout.root().display(), shell.kind, mode);

        if mode == ActivationMode::Print {
            require_activation_script(&layout, shell.kind)?;
            writeln!(out, "{}", layout.activation_command(shell.kind))?;
            return Ok(CommandResult::success());
        }

        let spec = subshell_spec(&layout, &shell, &self.project_root)?;
        ui.message(&format!(
            "Entering {} with {} active. Type `exit` to leave.",
            shell.executable.display(),
            layout.configured().display()
        ));
        let result = runner.run(&spec).map_err(|e| VenvupError::ShellError {
            message: e.to_string(),
        })?;
        Ok(CommandResult::from_exit_code(result.exit_code.unwrap_or(1)))
    }
}

impl Command for ActivateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let caller = match &self.caller_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let mut stdout = std::io::stdout();
        self.activate_from(&caller, ui, &SystemRunner, is_interactive_terminal(), &mut stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockResponse, MockRunner, ShellType};
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn bash() -> ShellInfo {
        ShellInfo {
            executable: PathBuf::from("/usr/local/bin/bash"),
            kind: ShellType::Bash,
        }
    }

    fn make_env(root: &Path) {
        let bin = root.join(".venv").join(crate::venv::BIN_DIR);
        fs::create_dir_all(&bin).unwrap();
        for script in ["activate", "activate.fish", "Activate.ps1"] {
            fs::write(bin.join(script), "# activate").unwrap();
        }
    }

    fn command(root: &Path, args: ActivateArgs) -> ActivateCommand {
        ActivateCommand::new(root, None, args).with_detected_shell(bash())
    }

    #[test]
    fn print_writes_activation_command() {
        let temp = TempDir::new().unwrap();
        make_env(temp.path());
        let args = ActivateArgs {
            print: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let mut out = Vec::new();

        let result = command(temp.path(), args)
            .execute_with(&mut ui, &MockRunner::new(), true, &mut out)
            .unwrap();

        assert!(result.success);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("source "));
        assert!(printed.trim_end().ends_with("activate"));
    }

    #[test]
    fn print_from_outside_the_project_uses_absolute_path() {
        let project = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        make_env(project.path());
        let args = ActivateArgs {
            print: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let mut out = Vec::new();

        command(project.path(), args)
            .with_caller_dir(elsewhere.path())
            .execute_with(&mut ui, &MockRunner::new(), true, &mut out)
            .unwrap();

        let script = project.path().join(".venv").join(crate::venv::BIN_DIR).join("activate");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("source {}\n", script.display())
        );
    }

    #[test]
    fn print_for_other_shell() {
        let temp = TempDir::new().unwrap();
        make_env(temp.path());
        let args = ActivateArgs {
            print: true,
            shell: Some(ShellType::Fish),
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let mut out = Vec::new();

        command(temp.path(), args)
            .execute_with(&mut ui, &MockRunner::new(), true, &mut out)
            .unwrap();

        assert!(String::from_utf8(out).unwrap().contains("activate.fish"));
    }

    #[test]
    fn missing_environment_is_an_error() {
        let temp = TempDir::new().unwrap();
        let args = ActivateArgs {
            print: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let mut out = Vec::new();

        let err = command(temp.path(), args)
            .execute_with(&mut ui, &MockRunner::new(), true, &mut out)
            .unwrap_err();

        assert!(matches!(err, VenvupError::ActivationScriptMissing { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn interactive_enters_subshell_and_returns_its_status() {
        let temp = TempDir::new().unwrap();
        make_env(temp.path());
        let mut runner = MockRunner::new();
        runner.respond("/usr/local/bin/bash -i", MockResponse::Exit(4));
        let mut ui = MockUI::new();
        let mut out = Vec::new();

        let result = command(temp.path(), ActivateArgs::default())
            .execute_with(&mut ui, &runner, true, &mut out)
            .unwrap();

        assert_eq!(result.exit_code, 4);
        let spec = &runner.calls()[0];
        assert!(spec.env.contains_key("VIRTUAL_ENV"));
        assert!(ui.has_message("Type `exit` to leave"));
    }

    #[test]
    fn non_interactive_falls_back_to_print() {
        let temp = TempDir::new().unwrap();
        make_env(temp.path());
        let runner = MockRunner::new();
        let mut ui = MockUI::new();
        let mut out = Vec::new();

        command(temp.path(), ActivateArgs::default())
            .execute_with(&mut ui, &runner, false, &mut out)
            .unwrap();

        assert_eq!(runner.call_count(), 0);
        assert!(!out.is_empty());
    }

    #[test]
    fn requested_shell_uses_default_program() {
        let temp = TempDir::new().unwrap();
        let args = ActivateArgs {
            shell: Some(ShellType::Zsh),
            ..Default::default()
        };
        let shell = command(temp.path(), args).target_shell();
        assert_eq!(shell.kind, ShellType::Zsh);
        assert_eq!(shell.executable, PathBuf::from("zsh"));
    }

    #[test]
    fn requested_current_shell_keeps_its_path() {
        let temp = TempDir::new().unwrap();
        let args = ActivateArgs {
            shell: Some(ShellType::Bash),
            ..Default::default()
        };
        let shell = command(temp.path(), args).target_shell();
        assert_eq!(shell.executable, PathBuf::from("/usr/local/bin/bash"));
    }
}
