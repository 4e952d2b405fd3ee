//! The bootstrap sequence.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::{resolve_args, ActivationMode, InterpolationContext, VenvupConfig};
use crate::error::{Result, VenvupError};
use crate::installer::{run_installer, ScriptFetcher, ScriptHost};
use crate::shell::{locate_tool, ProcessRunner, ProcessSpec, ShellInfo};
use crate::ui::{RunSummary, UserInterface};
use crate::venv::{require_activation_script, subshell_spec, VenvLayout};

use super::probe::{probe_tool, ToolPresence};
use super::step::{StepKind, StepResult};

/// How a run behaves.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// Directory commands run in and relative paths resolve against.
    pub project_root: PathBuf,
    /// Probe and check, but run nothing that changes the system.
    pub dry_run: bool,
    /// Stop at the first failed step.
    pub fail_fast: bool,
    /// Activation mode, already resolved from `auto`.
    pub activation: ActivationMode,
    /// Shell used for activation.
    pub shell: ShellInfo,
    /// Let tool output through instead of capturing it behind a spinner.
    pub stream_output: bool,
}

/// What the activation step left to do once the summary has been shown.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedActivation {
    /// Enter this subshell.
    Shell(ProcessSpec),
    /// Print this command on stdout.
    Print(String),
    /// Nothing to do.
    Skipped,
    /// The activation step failed.
    Failed,
    /// The sequence stopped before reaching activation.
    NotRun,
}

/// Everything a run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub steps: Vec<StepResult>,
    pub tool: ToolPresence,
    pub activation: PreparedActivation,
    /// True when fail-fast stopped the sequence.
    pub stopped_early: bool,
    pub total_duration: Duration,
}

impl RunReport {
    pub fn step(&self, kind: StepKind) -> Option<&StepResult> {
        self.steps.iter().find(|s| s.kind == kind)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepResult> {
        self.steps.iter().filter(|s| s.failed())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            steps: self.steps.iter().map(StepResult::summary).collect(),
            total_duration: self.total_duration,
            success: self.failures().next().is_none() && !self.stopped_early,
        }
    }
}

/// Pick `shell` or `print` for `auto` depending on whether a user is at a
/// terminal. Other modes are returned unchanged.
pub fn resolve_activation_mode(mode: ActivationMode, interactive: bool) -> ActivationMode {
    match mode {
        ActivationMode::Auto if interactive => ActivationMode::Shell,
        ActivationMode::Auto => ActivationMode::Print,
        other => other,
    }
}

type Locator<'a> = Box<dyn Fn(&str, &[PathBuf]) -> Option<PathBuf> + 'a>;

/// Runs the four bootstrap steps against one project.
pub struct Bootstrapper<'a> {
    config: &'a VenvupConfig,
    options: BootstrapOptions,
    runner: &'a dyn ProcessRunner,
    fetcher: &'a dyn ScriptFetcher,
    host: ScriptHost,
    locate: Locator<'a>,
    layout: VenvLayout,
}

impl<'a> Bootstrapper<'a> {
    pub fn new(
        config: &'a VenvupConfig,
        options: BootstrapOptions,
        runner: &'a dyn ProcessRunner,
        fetcher: &'a dyn ScriptFetcher,
    ) -> Self {
        let layout = VenvLayout::new(&options.project_root, &config.environment.path);
        Self {
            config,
            options,
            runner,
            fetcher,
            host: ScriptHost::current(),
            locate: Box::new(locate_tool),
            layout,
        }
    }

    /// Run installer scripts in `host` instead of the platform default.
    pub fn with_script_host(mut self, host: ScriptHost) -> Self {
        self.host = host;
        self
    }

    /// Replace the lookup used to find the tool after installing it.
    pub fn with_locator(
        mut self,
        locate: impl Fn(&str, &[PathBuf]) -> Option<PathBuf> + 'a,
    ) -> Self {
        self.locate = Box::new(locate);
        self
    }

    /// Print activation commands for a shell sitting in `dir`.
    pub fn with_caller_dir(mut self, dir: &Path) -> Self {
        self.layout = self.layout.clone().seen_from(dir);
        self
    }

    /// Run the sequence and show the summary.
    ///
    /// Step failures are recorded in the report, not returned as errors.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<RunReport> {
        let started = Instant::now();
        let total = StepKind::ALL.len();

        let mut steps = Vec::with_capacity(total);
        let mut tool = ToolPresence::Absent;
        let mut activation = PreparedActivation::NotRun;
        let mut stopped_early = false;

        if self.options.dry_run {
            ui.show_header("venvup (dry run)");
        } else {
            ui.show_header("venvup");
        }

        for (index, kind) in StepKind::ALL.iter().copied().enumerate() {
            if stopped_early {
                steps.push(StepResult::not_run(kind));
                continue;
            }

            ui.show_step(index + 1, total, kind.title());
            let program = self.program(&tool);

            let result = match kind {
                StepKind::EnsureTool => {
                    let (result, presence) = self.ensure_tool(ui)?;
                    tool = presence;
                    result
                }
                StepKind::EnsureEnvironment => self.ensure_environment(&program, ui)?,
                StepKind::InstallDependencies => self.install_dependencies(&program, ui)?,
                StepKind::Activate => {
                    let (result, prepared) = self.prepare_activation(ui);
                    activation = prepared;
                    result
                }
            };

            if result.failed() {
                report_failure(&result, ui, !self.options.fail_fast);
                if self.options.fail_fast && kind != StepKind::Activate {
                    ui.error(&format!(
                        "Stopping after failed step '{}' (fail-fast)",
                        kind.name()
                    ));
                    stopped_early = true;
                }
            }
            steps.push(result);
        }

        let report = RunReport {
            steps,
            tool,
            activation,
            stopped_early,
            total_duration: started.elapsed(),
        };
        ui.show_summary(&report.summary());
        Ok(report)
    }

    /// Carry out a prepared activation and return the exit code for the run.
    ///
    /// `print` writes to `out`. `shell` blocks until the subshell exits and
    /// returns its status.
    pub fn activate(
        &self,
        prepared: &PreparedActivation,
        out: &mut dyn Write,
        ui: &mut dyn UserInterface,
    ) -> Result<i32> {
        match prepared {
            PreparedActivation::Shell(spec) => {
                ui.message(&format!(
                    "Entering {} with {} active. Type `exit` to leave.",
                    spec.program.display(),
                    self.layout.configured().display()
                ));
                let result = self.runner.run(spec).map_err(|e| VenvupError::ShellError {
                    message: e.to_string(),
                })?;
                tracing::debug!("Subshell exited with {:?}", result.exit_code);
                Ok(result.exit_code.unwrap_or(1))
            }
            PreparedActivation::Print(command) => {
                writeln!(out, "{}", command)?;
                Ok(0)
            }
            PreparedActivation::Skipped => Ok(0),
            PreparedActivation::Failed | PreparedActivation::NotRun => Ok(1),
        }
    }

    /// The program later steps invoke: the located binary if the tool was
    /// found, otherwise the configured command name.
    fn program(&self, tool: &ToolPresence) -> PathBuf {
        match tool {
            ToolPresence::Present { program, .. } => program.clone(),
            ToolPresence::Absent => PathBuf::from(&self.config.tool.command),
        }
    }

    fn context(&self, program: &Path) -> InterpolationContext {
        let mut ctx = InterpolationContext::new();
        ctx.set("tool", program.display().to_string());
        ctx.set("venv", self.layout.configured().display().to_string());
        ctx.set("python", self.config.environment.python.clone());
        ctx.set(
            "manifest",
            self.config.dependencies.manifest.display().to_string(),
        );
        ctx
    }

    fn ensure_tool(&self, ui: &mut dyn UserInterface) -> Result<(StepResult, ToolPresence)> {
        let kind = StepKind::EnsureTool;
        let cfg = &self.config.tool;
        let started = Instant::now();

        let probe_args = resolve_args(&cfg.probe_args, &self.context(Path::new(&cfg.command)))?;
        let mut spinner = ui.start_spinner(&format!("Looking for {}", cfg.command));
        let presence = probe_tool(self.runner, &cfg.command, &probe_args);

        if presence.is_present() {
            let reason = match presence.version() {
                Some(version) => format!("{} {} is installed", cfg.command, version),
                None => format!("{} is installed", cfg.command),
            };
            spinner.finish_skipped(&reason);
            return Ok((StepResult::skipped(kind, reason), presence));
        }

        let url = self.config.installer.url_for_current_platform();
        spinner.finish_skipped(&format!("{} not found", cfg.command));

        if self.options.dry_run {
            let reason = format!("dry run: would install from {}", url);
            ui.message(&format!("Would install {} from {}", cfg.command, url));
            return Ok((StepResult::skipped(kind, reason), ToolPresence::Absent));
        }

        tracing::info!("{} not found, installing from {}", cfg.command, url);
        ui.message(&format!("Installing {} from {}", cfg.command, url));

        let result = match run_installer(url, self.host, self.fetcher, self.runner) {
            Ok(result) => result,
            Err(e) => {
                let step = StepResult::failure(kind, started.elapsed(), None, e.to_string(), None);
                return Ok((step, ToolPresence::Absent));
            }
        };
        if !result.success {
            let step = StepResult::failure(
                kind,
                started.elapsed(),
                result.exit_code,
                format!("installer {}", describe_exit(result.exit_code)),
                None,
            );
            return Ok((step, ToolPresence::Absent));
        }

        match (self.locate)(&cfg.command, &cfg.search_paths) {
            Some(program) => {
                tracing::debug!("Located {} at {}", cfg.command, program.display());
                ui.success(&format!("Installed {} at {}", cfg.command, program.display()));
                let step = StepResult::success(
                    kind,
                    started.elapsed(),
                    Some(program.display().to_string()),
                );
                let presence = ToolPresence::Present {
                    program,
                    version: None,
                };
                Ok((step, presence))
            }
            None => {
                ui.warning(&format!(
                    "Installed {} but cannot find it on PATH; later steps may fail",
                    cfg.command
                ));
                let step = StepResult::success(
                    kind,
                    started.elapsed(),
                    Some("installed, not on PATH".to_string()),
                );
                Ok((step, ToolPresence::Absent))
            }
        }
    }

    fn ensure_environment(&self, program: &Path, ui: &mut dyn UserInterface) -> Result<StepResult> {
        let kind = StepKind::EnsureEnvironment;

        if self.layout.exists() {
            let reason = format!("{} already exists", self.layout.configured().display());
            ui.start_spinner(kind.title()).finish_skipped(&reason);
            return Ok(StepResult::skipped(kind, reason));
        }

        let args = resolve_args(&self.config.tool.create_args, &self.context(program))?;
        let spec = ProcessSpec::new(program)
            .args(args)
            .cwd(&self.options.project_root);
        Ok(self.run_command(kind, spec, ui))
    }

    fn install_dependencies(
        &self,
        program: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<StepResult> {
        let kind = StepKind::InstallDependencies;
        let args = resolve_args(&self.config.tool.install_args, &self.context(program))?;
        let spec = ProcessSpec::new(program)
            .args(args)
            .cwd(&self.options.project_root)
            .env("VIRTUAL_ENV", self.layout.root().display().to_string());
        Ok(self.run_command(kind, spec, ui))
    }

    fn prepare_activation(&self, ui: &mut dyn UserInterface) -> (StepResult, PreparedActivation) {
        let kind = StepKind::Activate;
        let shell = &self.options.shell;

        if self.options.activation == ActivationMode::None {
            return (
                StepResult::skipped(kind, "activation disabled"),
                PreparedActivation::Skipped,
            );
        }

        if self.options.dry_run {
            let command = self.layout.activation_command(shell.kind);
            ui.message(&format!("Would activate with: {}", command));
            return (
                StepResult::skipped(kind, format!("dry run: {}", command)),
                PreparedActivation::Skipped,
            );
        }

        if let Err(e) = require_activation_script(&self.layout, shell.kind) {
            return (
                StepResult::failure(kind, Duration::ZERO, None, e.to_string(), None),
                PreparedActivation::Failed,
            );
        }

        match self.options.activation {
            ActivationMode::Shell => {
                match subshell_spec(&self.layout, shell, &self.options.project_root) {
                    Ok(spec) => (
                        StepResult::success(
                            kind,
                            Duration::ZERO,
                            Some(format!("subshell {}", shell.executable.display())),
                        ),
                        PreparedActivation::Shell(spec),
                    ),
                    Err(e) => (
                        StepResult::failure(kind, Duration::ZERO, None, e.to_string(), None),
                        PreparedActivation::Failed,
                    ),
                }
            }
            _ => {
                let command = self.layout.activation_command(shell.kind);
                (
                    StepResult::success(kind, Duration::ZERO, Some(command.clone())),
                    PreparedActivation::Print(command),
                )
            }
        }
    }

    fn run_command(&self, kind: StepKind, spec: ProcessSpec, ui: &mut dyn UserInterface) -> StepResult {
        let line = spec.command_line();

        if self.options.dry_run {
            ui.message(&format!("Would run: {}", line));
            return StepResult::skipped(kind, format!("dry run: {}", line));
        }

        let spec = if self.options.stream_output {
            ui.message(&line);
            spec
        } else {
            spec.captured()
        };
        let mut spinner = ui.start_spinner(&line);

        match self.runner.run(&spec) {
            Ok(result) if result.success => {
                spinner.finish_success(&line);
                StepResult::success(kind, result.duration, None)
            }
            Ok(result) => {
                spinner.finish_error(&line);
                StepResult::failure(
                    kind,
                    result.duration,
                    result.exit_code,
                    format!("`{}` {}", line, describe_exit(result.exit_code)),
                    Some(result.diagnostic().to_string()),
                )
            }
            Err(e) => {
                spinner.finish_error(&line);
                StepResult::failure(kind, Duration::ZERO, None, e.to_string(), None)
            }
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

fn report_failure(result: &StepResult, ui: &mut dyn UserInterface, continuing: bool) {
    let error = result.error.as_deref().unwrap_or("failed");
    tracing::warn!("Step {} failed: {}", result.kind.name(), error);
    ui.warning(&format!("{} step failed: {}", result.kind.name(), error));
    if let Some(output) = &result.output {
        for line in output.lines() {
            ui.message(&format!("    {}", line));
        }
    }
    if continuing && result.kind != StepKind::Activate {
        ui.message("    continuing with the next step");
    }
}
