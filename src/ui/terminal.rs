//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::{
    format_duration, should_use_colors, NonInteractiveUI, OutputMode, ProgressSpinner,
    RunSummary, SpinnerHandle, StepStatus, UserInterface, VenvupTheme,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: VenvupTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            VenvupTheme::new()
        } else {
            VenvupTheme::plain()
        };

        Self {
            term: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_step(&mut self, index: usize, total: usize, title: &str) {
        if self.mode.shows_steps() {
            writeln!(self.term, "{}", self.theme.format_step(index, total, title)).ok();
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_status() {
            return;
        }

        let b = &self.theme.border;

        writeln!(self.term).ok();
        writeln!(
            self.term,
            "  {} {}",
            b.apply_to("┌─"),
            b.apply_to("Summary ──────────────────────────")
        )
        .ok();

        for step in &summary.steps {
            let right_side = match (step.duration, step.detail.as_deref()) {
                (_, Some(detail)) if !detail.is_empty() => {
                    self.theme.dim.apply_to(detail).to_string()
                }
                (Some(d), _) => self.theme.dim.apply_to(format_duration(d)).to_string(),
                _ => String::new(),
            };

            writeln!(
                self.term,
                "  {} {} {:<14} {}",
                b.apply_to("│"),
                step.status.styled(&self.theme),
                step.name,
                right_side,
            )
            .ok();
        }

        writeln!(
            self.term,
            "  {}",
            b.apply_to("├────────────────────────────────────")
        )
        .ok();
        writeln!(
            self.term,
            "  {} Total: {} {} {} done {} {} skipped {} {} failed",
            b.apply_to("│"),
            self.theme.dim.apply_to(format_duration(summary.total_duration)),
            self.theme.dim.apply_to("·"),
            summary.count(StepStatus::Completed),
            self.theme.dim.apply_to("·"),
            summary.count(StepStatus::Skipped),
            self.theme.dim.apply_to("·"),
            summary.count(StepStatus::Failed),
        )
        .ok();
        writeln!(
            self.term,
            "  {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stderr().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
