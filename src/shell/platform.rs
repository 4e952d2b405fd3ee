//! Platform-specific shell detection.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Information about the user's shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInfo {
    /// Shell executable path.
    pub executable: PathBuf,

    /// Shell kind.
    pub kind: ShellType,
}

/// Known shell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    Sh,
    Csh,
    #[value(name = "powershell")]
    PowerShell,
    Cmd,
    #[value(skip)]
    Unknown,
}

impl ShellType {
    /// Parse shell type from executable name.
    pub fn from_executable(exe: &str) -> Self {
        // Split on both separators so Windows paths parse on any host.
        let file = exe.rsplit(['/', '\\']).next().unwrap_or(exe);
        let name = Path::new(file)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "bash" => ShellType::Bash,
            "zsh" => ShellType::Zsh,
            "fish" => ShellType::Fish,
            "sh" | "dash" | "ash" => ShellType::Sh,
            "csh" | "tcsh" => ShellType::Csh,
            "powershell" | "pwsh" => ShellType::PowerShell,
            "cmd" => ShellType::Cmd,
            _ => ShellType::Unknown,
        }
    }

    /// Program name to launch this shell when only its kind is known.
    pub fn default_executable(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
            ShellType::Csh => "csh",
            ShellType::PowerShell if cfg!(windows) => "powershell",
            ShellType::PowerShell => "pwsh",
            ShellType::Cmd => "cmd",
            ShellType::Sh | ShellType::Unknown => "sh",
        }
    }

    /// Whether this shell reads POSIX `source`/`export` syntax.
    pub fn is_posix(&self) -> bool {
        matches!(self, ShellType::Bash | ShellType::Zsh | ShellType::Sh)
    }
}

/// Detect the user's shell from `SHELL` (Unix) or `COMSPEC` (Windows).
pub fn detect_shell() -> ShellInfo {
    let executable = if cfg!(windows) {
        std::env::var("COMSPEC")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("cmd.exe"))
    } else {
        std::env::var("SHELL")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/bin/sh"))
    };
    let kind = ShellType::from_executable(&executable.to_string_lossy());
    ShellInfo { executable, kind }
}

/// Check if running in a CI environment.
///
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS", "JENKINS_URL"]
        .iter()
        .any(|k| std::env::var_os(k).is_some())
}

/// Whether a human is at the keyboard: stdin and stdout are terminals and
/// we are not in CI.
pub fn is_interactive_terminal() -> bool {
    std::io::stdin().is_terminal() && console::user_attended() && !is_ci()
}
