//! The process-runner seam.
//!
//! Bootstrap steps never spawn processes themselves; they go through a
//! [`ProcessRunner`] so tests can substitute [`MockRunner`](super::MockRunner).

use super::command::{execute, CommandResult, ProcessSpec};
use crate::error::Result;

/// Something that can run a [`ProcessSpec`] to completion.
pub trait ProcessRunner {
    /// Run the process and wait for it to exit.
    fn run(&self, spec: &ProcessSpec) -> Result<CommandResult>;
}

/// Runs processes on the real system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: &ProcessSpec) -> Result<CommandResult> {
        tracing::debug!("Running: {}", spec.command_line());
        let result = execute(spec)?;
        tracing::debug!(
            "Exited with {:?} after {:?}: {}",
            result.exit_code,
            result.duration,
            spec.command_line()
        );
        Ok(result)
    }
}
