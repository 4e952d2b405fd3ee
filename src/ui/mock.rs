//! Mock UI implementation for testing.
//!
//! `MockUI` implements [`UserInterface`] and captures every interaction for
//! later assertion.
//!
//! # Example
//!
//! ```
//! use venvup::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Starting");
//! ui.success("Done!");
//!
//! assert!(ui.has_message("Starting"));
//! assert!(ui.has_success("Done"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, RunSummary, SpinnerHandle, UserInterface};

/// How a mock spinner was finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinnerEnd {
    Success(String),
    Error(String),
    Skipped(String),
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    steps: Vec<(usize, usize, String)>,
    spinners: Vec<String>,
    spinner_ends: Rc<RefCell<Vec<SpinnerEnd>>>,
    summaries: Vec<RunSummary>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Step announcements as (index, total, title).
    pub fn steps(&self) -> &[(usize, usize, String)] {
        &self.steps
    }

    /// Messages of every spinner started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// How each spinner finished, in order.
    pub fn spinner_ends(&self) -> Vec<SpinnerEnd> {
        self.spinner_ends.borrow().clone()
    }

    pub fn summaries(&self) -> &[RunSummary] {
        &self.summaries
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            ends: Rc::clone(&self.spinner_ends),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_step(&mut self, index: usize, total: usize, title: &str) {
        self.steps.push((index, total, title.to_string()));
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        self.summaries.push(summary.clone());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner that reports how it finished back to its [`MockUI`].
pub struct MockSpinner {
    ends: Rc<RefCell<Vec<SpinnerEnd>>>,
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.ends.borrow_mut().push(SpinnerEnd::Success(msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.ends.borrow_mut().push(SpinnerEnd::Error(msg.to_string()));
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.ends.borrow_mut().push(SpinnerEnd::Skipped(msg.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages_by_kind() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.warning("careful");
        ui.error("broken");

        assert!(ui.has_message("hello"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn records_spinner_outcomes() {
        let mut ui = MockUI::new();
        let mut first = ui.start_spinner("one");
        first.finish_success("ok");
        let mut second = ui.start_spinner("two");
        second.finish_error("bad");

        assert_eq!(ui.spinners(), &["one", "two"]);
        assert_eq!(
            ui.spinner_ends(),
            vec![
                SpinnerEnd::Success("ok".to_string()),
                SpinnerEnd::Error("bad".to_string())
            ]
        );
    }

    #[test]
    fn records_steps() {
        let mut ui = MockUI::new();
        ui.show_step(1, 4, "Check tool");
        assert_eq!(ui.steps(), &[(1, 4, "Check tool".to_string())]);
    }

    #[test]
    fn interactive_flag() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        assert!(!ui.is_interactive());
        ui.set_interactive(true);
        assert!(ui.is_interactive());
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
