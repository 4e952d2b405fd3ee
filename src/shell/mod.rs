//! Process execution and shell environment.

pub mod command;
pub mod mock;
pub mod path;
pub mod platform;
pub mod runner;

pub use command::{execute, CommandResult, ProcessSpec};
pub use mock::{MockResponse, MockRunner};
pub use path::{home_dir, locate_tool, parse_system_path, resolve_tool_path};
pub use platform::{detect_shell, is_ci, is_interactive_terminal, ShellInfo, ShellType};
pub use runner::{ProcessRunner, SystemRunner};
