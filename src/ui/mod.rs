//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait so the bootstrap sequence can be driven by a
//!   mock in tests
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI, pipes and headless environments
//! - [`MockUI`] which records everything shown
//!
//! # Example
//!
//! ```
//! use venvup::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("venvup");
//! ui.success("Environment ready");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::{format_duration, OutputMode};
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, VenvupTheme};

use std::time::Duration;

/// Trait for user interface interactions.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode, e.g. to the configured default.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Announce step `index` (1-based) of `total`.
    fn show_step(&mut self, index: usize, total: usize, title: &str);

    /// Show the end-of-run summary.
    fn show_summary(&mut self, summary: &RunSummary);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);
}

/// How a step ended, as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Skipped,
    Failed,
    /// Never started because an earlier step failed under fail-fast.
    NotRun,
}

impl StepStatus {
    /// Status icon, styled with `theme`.
    pub fn styled(&self, theme: &VenvupTheme) -> String {
        match self {
            StepStatus::Completed => theme.success.apply_to("✓").to_string(),
            StepStatus::Skipped => theme.dim.apply_to("○").to_string(),
            StepStatus::Failed => theme.error.apply_to("✗").to_string(),
            StepStatus::NotRun => theme.dim.apply_to("·").to_string(),
        }
    }
}

/// One row of the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSummary {
    pub name: String,
    pub status: StepStatus,
    pub detail: Option<String>,
    pub duration: Option<Duration>,
}

/// Everything the end-of-run summary shows.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: Vec<StepSummary>,
    pub total_duration: Duration,
    pub success: bool,
}

impl RunSummary {
    /// Number of steps with `status`.
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, status: StepStatus) -> StepSummary {
        StepSummary {
            name: name.to_string(),
            status,
            detail: None,
            duration: None,
        }
    }

    #[test]
    fn summary_counts_by_status() {
        let summary = RunSummary {
            steps: vec![
                row("tool", StepStatus::Skipped),
                row("environment", StepStatus::Completed),
                row("dependencies", StepStatus::Failed),
                row("activate", StepStatus::Completed),
            ],
            total_duration: Duration::from_secs(3),
            success: false,
        };
        assert_eq!(summary.count(StepStatus::Completed), 2);
        assert_eq!(summary.count(StepStatus::Failed), 1);
        assert_eq!(summary.count(StepStatus::NotRun), 0);
    }

    #[test]
    fn status_icons_in_plain_theme() {
        let theme = VenvupTheme::plain();
        assert_eq!(StepStatus::Completed.styled(&theme), "✓");
        assert_eq!(StepStatus::Skipped.styled(&theme), "○");
        assert_eq!(StepStatus::Failed.styled(&theme), "✗");
        assert_eq!(StepStatus::NotRun.styled(&theme), "·");
    }
}
