//! Status command implementation.
//!
//! The `venvup status` command reports what a run would find, without
//! installing or creating anything.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::bootstrap::{probe_tool, ToolPresence};
use crate::cli::args::StatusArgs;
use crate::config::{resolve_args, InterpolationContext, VenvupConfig};
use crate::error::Result;
use crate::shell::{ProcessRunner, SystemRunner};
use crate::ui::UserInterface;
use crate::venv::{PyvenvCfg, VenvLayout};

use super::context::load_command_config;
use super::dispatcher::{Command, CommandResult};

/// Snapshot of a project's environment.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub generated_at: DateTime<Utc>,
    pub project_root: PathBuf,
    pub tool: ToolStatus,
    pub environment: EnvironmentStatus,
    pub manifest: ManifestStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    pub command: String,
    #[serde(flatten)]
    pub presence: ToolPresence,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentStatus {
    pub path: PathBuf,
    pub exists: bool,
    /// Interpreter version recorded in `pyvenv.cfg`.
    pub python: Option<String>,
    /// The environment's interpreter, when present.
    pub interpreter: Option<PathBuf>,
    /// Version a new environment would be pinned to.
    pub configured_python: String,
    /// Whether `VIRTUAL_ENV` points at this environment.
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestStatus {
    pub path: PathBuf,
    pub exists: bool,
}

impl StatusReport {
    /// Probe the tool and inspect the filesystem.
    ///
    /// `active_env` is the current `VIRTUAL_ENV`, if any.
    pub fn collect(
        config: &VenvupConfig,
        project_root: &Path,
        runner: &dyn ProcessRunner,
        active_env: Option<&Path>,
    ) -> Result<Self> {
        let layout = VenvLayout::new(project_root, &config.environment.path);

        let mut ctx = InterpolationContext::new();
        ctx.set("tool", config.tool.command.clone());
        ctx.set("venv", config.environment.path.display().to_string());
        ctx.set("python", config.environment.python.clone());
        ctx.set("manifest", config.dependencies.manifest.display().to_string());
        let probe_args = resolve_args(&config.tool.probe_args, &ctx)?;
        let presence = probe_tool(runner, &config.tool.command, &probe_args);

        let python = if layout.exists() {
            match PyvenvCfg::load(&layout.pyvenv_cfg()) {
                Ok(cfg) => cfg.version().map(str::to_string),
                Err(e) => {
                    tracing::debug!("No readable pyvenv.cfg: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let interpreter = Some(layout.python()).filter(|p| p.is_file());
        let active = active_env.is_some_and(|env| same_path(env, layout.root()));
        let manifest = project_root.join(&config.dependencies.manifest);

        Ok(Self {
            generated_at: Utc::now(),
            project_root: project_root.to_path_buf(),
            tool: ToolStatus {
                command: config.tool.command.clone(),
                presence,
            },
            environment: EnvironmentStatus {
                path: layout.root().to_path_buf(),
                exists: layout.exists(),
                python,
                interpreter,
                configured_python: config.environment.python.clone(),
                active,
            },
            manifest: ManifestStatus {
                exists: manifest.is_file(),
                path: manifest,
            },
        })
    }

    /// Whether a run would only need to install dependencies and activate.
    pub fn is_ready(&self) -> bool {
        self.tool.presence.is_present() && self.environment.exists && self.manifest.exists
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// The status command implementation.
pub struct StatusCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: StatusArgs) -> Self {
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
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }

    /// Build the report with an explicit runner and active environment.
    pub fn report(
        &self,
        ui: &mut dyn UserInterface,
        runner: &dyn ProcessRunner,
        active_env: Option<&Path>,
    ) -> Result<StatusReport> {
        let config = load_command_config(
            &self.project_root,
            self.config_override.as_deref(),
            &self.args.overrides,
            ui,
        )?;
        StatusReport::collect(&config, &self.project_root, runner, active_env)
    }

    fn show(&self, report: &StatusReport, ui: &mut dyn UserInterface) {
        ui.show_header("venvup status");

        match &report.tool.presence {
            ToolPresence::Present { version, .. } => ui.success(&format!(
                "{} {}",
                report.tool.command,
                version.as_deref().unwrap_or("(version unknown)")
            )),
            ToolPresence::Absent => {
                ui.warning(&format!("{} not found (run installs it)", report.tool.command))
            }
        }

        let env = &report.environment;
        if env.exists {
            let python = env.python.as_deref().unwrap_or("unknown Python");
            let active = if env.active { ", active" } else { "" };
            ui.success(&format!("{} ({}{})", env.path.display(), python, active));
            match &env.interpreter {
                Some(path) => ui.message(&format!("  interpreter: {}", path.display())),
                None => ui.warning("  no interpreter in the environment"),
            }
        } else {
            ui.warning(&format!(
                "{} missing (run creates it with Python {})",
                env.path.display(),
                env.configured_python
            ));
        }

        if report.manifest.exists {
            ui.success(&report.manifest.path.display().to_string());
        } else {
            ui.warning(&format!("{} missing", report.manifest.path.display()));
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let active = std::env::var_os("VIRTUAL_ENV").map(PathBuf::from);
        let report = self.report(ui, &SystemRunner, active.as_deref())?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| anyhow::anyhow!("Failed to serialize status: {}", e))?;
            println!("{}", json);
        } else {
            self.show(&report, ui);
        }
        Ok(CommandResult::success())
    }
}
