//! The bootstrap sequence: ensure the tool, ensure the environment, install
//! dependencies, activate.
//!
//! Steps run strictly in order. A failed step is reported and the next one
//! runs anyway unless fail-fast is on. The one recovery the sequence makes
//! is installing the tool when its probe fails.
//!
//! # Example
//!
//! ```
//! use venvup::bootstrap::{BootstrapOptions, Bootstrapper, StepKind};
//! use venvup::config::{ActivationMode, VenvupConfig};
//! use venvup::installer::MockFetcher;
//! use venvup::shell::{MockRunner, ShellInfo, ShellType};
//! use venvup::ui::MockUI;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let config = VenvupConfig::default();
//! let runner = MockRunner::new();
//! let fetcher = MockFetcher::new();
//! let options = BootstrapOptions {
//!     project_root: temp.path().to_path_buf(),
//!     dry_run: false,
//!     fail_fast: false,
//!     activation: ActivationMode::None,
//!     shell: ShellInfo { executable: "/bin/sh".into(), kind: ShellType::Sh },
//!     stream_output: false,
//! };
//!
//! let mut ui = MockUI::new();
//! let report = Bootstrapper::new(&config, options, &runner, &fetcher)
//!     .run(&mut ui)
//!     .unwrap();
//! assert!(runner.was_called("uv pip install -r requirements.txt"));
//! assert!(report.step(StepKind::Activate).is_some());
//! ```

pub mod probe;
pub mod sequence;
pub mod step;

pub use probe::{parse_version, probe_tool, ToolPresence};
pub use sequence::{
    resolve_activation_mode, BootstrapOptions, Bootstrapper, PreparedActivation, RunReport,
};
pub use step::{StepKind, StepResult};
