//! Non-interactive UI for CI and piped output.
//!
//! Writes plain lines to stderr with no cursor movement, so stdout stays
//! free for `activate --print` and JSON output.

use super::{
    format_duration, OutputMode, RunSummary, SpinnerHandle, StepStatus, UserInterface,
};

/// UI implementation for non-interactive mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            eprintln!("  {}", message);
        }
        Box::new(LineSpinner { mode: self.mode })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", title);
        }
    }

    fn show_step(&mut self, index: usize, total: usize, title: &str) {
        if self.mode.shows_steps() {
            eprintln!("[{}/{}] {}", index, total, title);
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_status() {
            return;
        }
        for step in &summary.steps {
            let label = match step.status {
                StepStatus::Completed => "done",
                StepStatus::Skipped => "skipped",
                StepStatus::Failed => "FAILED",
                StepStatus::NotRun => "not run",
            };
            match &step.detail {
                Some(detail) => eprintln!("  {:<14} {:<8} {}", step.name, label, detail),
                None => eprintln!("  {:<14} {}", step.name, label),
            }
        }
        eprintln!(
            "Total {} ({} failed)",
            format_duration(summary.total_duration),
            summary.count(StepStatus::Failed)
        );
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints its final state as one line.
struct LineSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("  ✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  ✗ {}", msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("  ○ {}", msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn keeps_mode() {
        let ui = NonInteractiveUI::new(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn spinner_lifecycle_does_not_panic() {
        let mut ui = NonInteractiveUI::new(OutputMode::Silent);
        let mut spinner = ui.start_spinner("Probing");
        spinner.set_message("still probing");
        spinner.finish_skipped("already installed");
    }
}
