//! Bootstrap steps and their results.

use std::time::Duration;

use crate::ui::{StepStatus, StepSummary};

/// The four steps, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    EnsureTool,
    EnsureEnvironment,
    InstallDependencies,
    Activate,
}

impl StepKind {
    pub const ALL: [StepKind; 4] = [
        StepKind::EnsureTool,
        StepKind::EnsureEnvironment,
        StepKind::InstallDependencies,
        StepKind::Activate,
    ];

    /// Short name used in summaries and logs.
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::EnsureTool => "tool",
            StepKind::EnsureEnvironment => "environment",
            StepKind::InstallDependencies => "dependencies",
            StepKind::Activate => "activate",
        }
    }

    /// Heading shown when the step starts.
    pub fn title(&self) -> &'static str {
        match self {
            StepKind::EnsureTool => "Check tool",
            StepKind::EnsureEnvironment => "Create environment",
            StepKind::InstallDependencies => "Install dependencies",
            StepKind::Activate => "Activate environment",
        }
    }
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub kind: StepKind,
    pub status: StepStatus,
    pub duration: Duration,
    /// Exit code of the step's command, if one ran.
    pub exit_code: Option<i32>,
    /// Short note for the summary, such as why the step was skipped.
    pub detail: Option<String>,
    /// Error message when the step failed.
    pub error: Option<String>,
    /// Captured command output kept for failure reports.
    pub output: Option<String>,
}

impl StepResult {
    pub fn skipped(kind: StepKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            status: StepStatus::Skipped,
            duration: Duration::ZERO,
            exit_code: None,
            detail: Some(reason.into()),
            error: None,
            output: None,
        }
    }

    pub fn success(kind: StepKind, duration: Duration, detail: Option<String>) -> Self {
        Self {
            kind,
            status: StepStatus::Completed,
            duration,
            exit_code: Some(0),
            detail,
            error: None,
            output: None,
        }
    }

    pub fn failure(
        kind: StepKind,
        duration: Duration,
        exit_code: Option<i32>,
        error: impl Into<String>,
        output: Option<String>,
    ) -> Self {
        Self {
            kind,
            status: StepStatus::Failed,
            duration,
            exit_code,
            detail: None,
            error: Some(error.into()),
            output: output.filter(|o| !o.trim().is_empty()),
        }
    }

    /// A step that never started because the sequence stopped first.
    pub fn not_run(kind: StepKind) -> Self {
        Self {
            kind,
            status: StepStatus::NotRun,
            duration: Duration::ZERO,
            exit_code: None,
            detail: None,
            error: None,
            output: None,
        }
    }

    pub fn failed(&self) -> bool {
        self.status == StepStatus::Failed
    }

    /// Summary row for the UI.
    pub fn summary(&self) -> StepSummary {
        let detail = match self.status {
            StepStatus::Failed => self.error.clone(),
            _ => self.detail.clone(),
        };
        StepSummary {
            name: self.kind.name().to_string(),
            status: self.status,
            detail,
            duration: (self.duration > Duration::ZERO).then_some(self.duration),
        }
    }
}
