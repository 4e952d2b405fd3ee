//! On-disk layout of a virtual environment.

use std::path::{Path, PathBuf};

use crate::shell::ShellType;

/// Name of the executables directory inside an environment.
pub const BIN_DIR: &str = if cfg!(windows) { "Scripts" } else { "bin" };

/// Paths of a virtual environment rooted in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenvLayout {
    root: PathBuf,
    configured: PathBuf,
    shown: PathBuf,
}

impl VenvLayout {
    /// Layout for `path` (as configured) inside `project_root`.
    ///
    /// Absolute paths are used as-is.
    pub fn new(project_root: &Path, path: &Path) -> Self {
        let root = if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        };
        Self {
            root,
            configured: path.to_path_buf(),
            shown: path.to_path_buf(),
        }
    }

    /// Render activation commands for a shell whose working directory is `dir`.
    ///
    /// The environment is shown relative to `dir` when it lies below it and
    /// as an absolute path otherwise.
    pub fn seen_from(mut self, dir: &Path) -> Self {
        self.shown = match self.root.strip_prefix(dir) {
            Ok(rest) if rest.as_os_str().is_empty() => PathBuf::from("."),
            Ok(rest) => rest.to_path_buf(),
            Err(_) => self.root.clone(),
        };
        self
    }

    /// Absolute environment directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path as written in the configuration, for display.
    pub fn configured(&self) -> &Path {
        &self.configured
    }

    /// Whether the environment directory exists.
    ///
    /// This is the only check the bootstrap sequence makes; a directory that
    /// exists counts as a created environment.
    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    /// Directory holding the environment's executables.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(BIN_DIR)
    }

    /// The environment's interpreter.
    pub fn python(&self) -> PathBuf {
        let name = if cfg!(windows) { "python.exe" } else { "python" };
        self.bin_dir().join(name)
    }

    /// The `pyvenv.cfg` marker file.
    pub fn pyvenv_cfg(&self) -> PathBuf {
        self.root.join("pyvenv.cfg")
    }

    /// Activation script file name for `shell`.
    pub fn activation_script_name(shell: ShellType) -> &'static str {
        match shell {
            ShellType::Fish => "activate.fish",
            ShellType::Csh => "activate.csh",
            ShellType::PowerShell => "Activate.ps1",
            ShellType::Cmd => "activate.bat",
            ShellType::Bash | ShellType::Zsh | ShellType::Sh | ShellType::Unknown => "activate",
        }
    }

    /// Absolute path of the activation script for `shell`.
    pub fn activation_script(&self, shell: ShellType) -> PathBuf {
        self.bin_dir().join(self.script_file(shell))
    }

    // uv writes `activate.ps1`, the stdlib `venv` module `Activate.ps1`.
    fn script_file(&self, shell: ShellType) -> &'static str {
        let name = Self::activation_script_name(shell);
        if shell == ShellType::PowerShell {
            let bin = self.bin_dir();
            if !bin.join(name).is_file() && bin.join("activate.ps1").is_file() {
                return "activate.ps1";
            }
        }
        name
    }

    /// The command a user types in `shell` to activate the environment.
    pub fn activation_command(&self, shell: ShellType) -> String {
        let script = self.shown.join(BIN_DIR).join(self.script_file(shell));
        let script = quote_path(&script);

        match shell {
            ShellType::Sh => format!(". {}", script),
            ShellType::PowerShell => format!("& {}", script),
            ShellType::Cmd => script,
            ShellType::Bash
            | ShellType::Zsh
            | ShellType::Fish
            | ShellType::Csh
            | ShellType::Unknown => format!("source {}", script),
        }
    }
}

fn quote_path(path: &Path) -> String {
    let text = path.display().to_string();
    if text.contains(char::is_whitespace) {
        format!("\"{}\"", text)
    } else {
        text
    }
}
