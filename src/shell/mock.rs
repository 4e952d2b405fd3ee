//! Recording process runner for tests.
//!
//! `MockRunner` implements [`ProcessRunner`] without spawning anything. It
//! records every spec it receives and answers from canned responses matched
//! by command-line prefix.
//!
//! # Example
//!
//! ```
//! use venvup::shell::{MockResponse, MockRunner, ProcessRunner, ProcessSpec};
//!
//! let mut runner = MockRunner::new();
//! runner.respond("uv --version", MockResponse::SpawnError);
//!
//! let probe = ProcessSpec::new("uv").arg("--version");
//! assert!(runner.run(&probe).is_err());
//! assert!(runner.was_called("uv --version"));
//! ```

use std::cell::RefCell;
use std::time::Duration;

use super::command::{CommandResult, ProcessSpec};
use super::runner::ProcessRunner;
use crate::error::{Result, VenvupError};

/// A canned answer for a matched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// Exit with this code and no output.
    Exit(i32),
    /// Exit with this code and output.
    Output {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// The program could not be spawned.
    SpawnError,
}

type Hook = Box<dyn Fn(&ProcessSpec)>;

/// Process runner that records calls instead of spawning processes.
///
/// Unmatched commands succeed with empty output. When several prefixes
/// match, the one registered last wins.
#[derive(Default)]
pub struct MockRunner {
    calls: RefCell<Vec<ProcessSpec>>,
    responses: Vec<(String, MockResponse)>,
    hooks: Vec<(String, Hook)>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands whose command line starts with `prefix`.
    pub fn respond(&mut self, prefix: &str, response: MockResponse) {
        self.responses.push((prefix.to_string(), response));
    }

    /// Run `hook` whenever a matching command is run, before answering.
    ///
    /// Used to emulate side effects such as a tool creating a directory.
    pub fn on_run(&mut self, prefix: &str, hook: impl Fn(&ProcessSpec) + 'static) {
        self.hooks.push((prefix.to_string(), Box::new(hook)));
    }

    /// Every spec run so far, in order.
    pub fn calls(&self) -> Vec<ProcessSpec> {
        self.calls.borrow().clone()
    }

    /// Command lines run so far, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|s| s.command_line()).collect()
    }

    /// Check whether any command line started with `prefix`.
    pub fn was_called(&self, prefix: &str) -> bool {
        self.command_lines().iter().any(|c| c.starts_with(prefix))
    }

    /// Number of commands run so far.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, spec: &ProcessSpec) -> Result<CommandResult> {
        let line = spec.command_line();
        self.calls.borrow_mut().push(spec.clone());

        for (prefix, hook) in &self.hooks {
            if line.starts_with(prefix.as_str()) {
                hook(spec);
            }
        }

        let response = self
            .responses
            .iter()
            .rev()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, r)| r.clone())
            .unwrap_or(MockResponse::Exit(0));

        match response {
            MockResponse::SpawnError => Err(VenvupError::CommandFailed {
                command: line,
                code: None,
                message: "No such file or directory (os error 2)".to_string(),
            }),
            MockResponse::Exit(code) => Ok(result(code, String::new(), String::new())),
            MockResponse::Output {
                code,
                stdout,
                stderr,
            } => Ok(result(code, stdout, stderr)),
        }
    }
}

fn result(code: i32, stdout: String, stderr: String) -> CommandResult {
    if code == 0 {
        CommandResult::success(stdout, stderr, Duration::ZERO)
    } else {
        CommandResult::failure(Some(code), stdout, stderr, Duration::ZERO)
    }
}
