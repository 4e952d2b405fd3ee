//! Run command implementation.
//!
//! The `venvup run` command (and bare `venvup`) carries out the bootstrap
//! sequence and then the chosen activation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::bootstrap::{resolve_activation_mode, BootstrapOptions, Bootstrapper};
use crate::cli::args::RunArgs;
use crate::config::{ActivationMode, VenvupConfig};
use crate::error::Result;
use crate::installer::{HttpFetcher, ScriptFetcher};
use crate::shell::{
    detect_shell, is_interactive_terminal, ProcessRunner, ShellInfo, SystemRunner,
};
use crate::ui::{OutputMode, UserInterface};

use super::context::load_command_config;
use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: RunArgs,
    shell: Option<ShellInfo>,
    caller_dir: Option<PathBuf>,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
            shell: None,
            caller_dir: None,
        }
    }

    /// Print activation commands relative to `dir` instead of the project.
    pub fn with_caller_dir(mut self, dir: &Path) -> Self {
        self.caller_dir = Some(dir.to_path_buf());
        self
    }

    /// Activate for this shell instead of the detected one.
    pub fn with_shell(mut self, shell: ShellInfo) -> Self {
        self.shell = Some(shell);
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Get the project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn load(&self, ui: &mut dyn UserInterface) -> Result<VenvupConfig> {
        load_command_config(
            &self.project_root,
            self.config_override.as_deref(),
            &self.args.overrides,
            ui,
        )
    }

    /// Run against explicit process and network seams.
    ///
    /// `interactive` decides what `auto` activation means; `out` receives
    /// the printed activation command.
    pub fn execute_with(
        &self,
        ui: &mut dyn UserInterface,
        runner: &dyn ProcessRunner,
        fetcher: &dyn ScriptFetcher,
        interactive: bool,
        out: &mut dyn std::io::Write,
    ) -> Result<CommandResult> {
        let config = self.load(ui)?;
        let caller = self.caller_dir.as_deref().unwrap_or(&self.project_root);
        self.run_loaded(&config, caller, ui, runner, fetcher, interactive, out)
    }

    #[allow(clippy::too_many_arguments)]
    fn run_loaded(
        &self,
        config: &VenvupConfig,
        caller: &Path,
        ui: &mut dyn UserInterface,
        runner: &dyn ProcessRunner,
        fetcher: &dyn ScriptFetcher,
        interactive: bool,
        out: &mut dyn std::io::Write,
    ) -> Result<CommandResult> {
        let requested = self.args.activate.unwrap_or(config.activation.mode);
        let activation = resolve_activation_mode(requested, interactive);
        let options = BootstrapOptions {
            project_root: self.project_root.clone(),
            dry_run: self.args.dry_run,
            fail_fast: self.args.fail_fast || config.settings.fail_fast,
            activation,
            shell: self.shell.clone().unwrap_or_else(detect_shell),
            // Streamed tool output would land in front of a printed command.
            stream_output: ui.output_mode() == OutputMode::Verbose
                && activation != ActivationMode::Print,
        };
        tracing::debug!(
            "Run options: dry_run={} fail_fast={} activation={:?}",
            options.dry_run,
            options.fail_fast,
            options.activation
        );

        let bootstrapper =
            Bootstrapper::new(config, options, runner, fetcher).with_caller_dir(caller);
        let report = bootstrapper.run(ui)?;

        if self.args.dry_run {
            return Ok(if report.failures().next().is_none() {
                CommandResult::success()
            } else {
                CommandResult::failure(1)
            });
        }

        let code = bootstrapper.activate(&report.activation, out, ui)?;
        Ok(CommandResult::from_exit_code(code))
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.load(ui)?;
        let fetcher = HttpFetcher::new(Duration::from_secs(config.installer.timeout_secs))?;
        let caller = match &self.caller_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let mut stdout = std::io::stdout();
        self.run_loaded(
            &config,
            &caller,
            ui,
            &SystemRunner,
            &fetcher,
            is_interactive_terminal(),
            &mut stdout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::MockFetcher;
    use crate::shell::{MockResponse, MockRunner, ShellType};
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn probe_ok(runner: &mut MockRunner) {
        runner.respond(
            "uv --version",
            MockResponse::Output {
                code: 0,
                stdout: "uv 0.5.1".to_string(),
                stderr: String::new(),
            },
        );
    }

    fn bash() -> ShellInfo {
        ShellInfo {
            executable: PathBuf::from("/bin/bash"),
            kind: ShellType::Bash,
        }
    }

    fn command(root: &Path, args: RunArgs) -> RunCommand {
        RunCommand::new(root, None, args).with_shell(bash())
    }

    fn make_env(root: &Path) {
        let bin = root.join(".venv").join(crate::venv::BIN_DIR);
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("activate"), "# activate").unwrap();
    }

    fn print_args() -> RunArgs {
        RunArgs {
            activate: Some(ActivationMode::Print),
            ..Default::default()
        }
    }

    #[test]
    fn run_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = RunCommand::new(temp.path(), None, RunArgs::default());
        assert_eq!(cmd.project_root(), temp.path());
        assert!(!cmd.args().dry_run);
    }

    #[test]
    fn print_activation_writes_command_to_out() {
        let temp = TempDir::new().unwrap();
        make_env(temp.path());
        fs::write(temp.path().join("requirements.txt"), "requests\n").unwrap();
        let mut runner = MockRunner::new();
        probe_ok(&mut runner);
        let fetcher = MockFetcher::new();
        let mut ui = MockUI::new();
        let mut out = Vec::new();

        let cmd = command(temp.path(), print_args());
        let result = cmd
            .execute_with(&mut ui, &runner, &fetcher, false, &mut out)
            .unwrap();

        assert!(result.success);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains(".venv"));
        assert!(printed.contains("activate"));
        assert!(fetcher.requests().is_empty());
    }

    #[test]
    fn failed_activation_exits_one() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        probe_ok(&mut runner);
        let fetcher = MockFetcher::new();
        let mut ui = MockUI::new();
        let mut out = Vec::new();

        // Environment creation is mocked, so nothing appears on disk.
        let cmd = command(temp.path(), print_args());
        let result = cmd
            .execute_with(&mut ui, &runner, &fetcher, false, &mut out)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(out.is_empty());
    }

    #[test]
    fn fail_fast_from_config_stops_run() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".venvup");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "settings:\n  fail_fast: true").unwrap();

        let mut runner = MockRunner::new();
        probe_ok(&mut runner);
        runner.respond(
            "uv venv",
            MockResponse::Output {
                code: 2,
                stdout: String::new(),
                stderr: "no interpreter".to_string(),
            },
        );
        let fetcher = MockFetcher::new();
        let mut ui = MockUI::new();
        let mut out = Vec::new();

        let cmd = command(temp.path(), print_args());
        let result = cmd
            .execute_with(&mut ui, &runner, &fetcher, false, &mut out)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(!runner.was_called("uv pip install"));
        assert!(ui.has_error("fail-fast"));
    }

    #[test]
    fn dry_run_runs_only_probe() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        probe_ok(&mut runner);
        let fetcher = MockFetcher::new();
        let mut ui = MockUI::new();
        let mut out = Vec::new();

        let args = RunArgs {
            dry_run: true,
            ..print_args()
        };
        let cmd = command(temp.path(), args);
        let result = cmd
            .execute_with(&mut ui, &runner, &fetcher, false, &mut out)
            .unwrap();

        assert!(result.success);
        assert_eq!(runner.call_count(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn disabled_activation_exits_zero() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        probe_ok(&mut runner);
        let fetcher = MockFetcher::new();
        let mut ui = MockUI::new();
        let mut out = Vec::new();

        let args = RunArgs {
            activate: Some(ActivationMode::None),
            ..Default::default()
        };
        let cmd = command(temp.path(), args);
        let result = cmd
            .execute_with(&mut ui, &runner, &fetcher, false, &mut out)
            .unwrap();

        assert!(result.success);
        assert!(out.is_empty());
    }
}
