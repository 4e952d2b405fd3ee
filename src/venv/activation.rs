//! Activating an environment.
//!
//! A child process cannot change the shell that started it. Activation is
//! therefore either a subshell launched with the environment applied, or
//! the command the user runs themselves.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;

use super::layout::VenvLayout;
use crate::error::{Result, VenvupError};
use crate::shell::{ProcessSpec, ShellInfo, ShellType};

/// Environment changes an activation script makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationEnv {
    /// Variables to set.
    pub set: BTreeMap<String, String>,
    /// Variables to unset.
    pub remove: Vec<String>,
}

/// The variables the activation scripts set, computed against `current_path`.
pub fn activation_env(layout: &VenvLayout, current_path: Option<OsString>) -> Result<ActivationEnv> {
    let mut entries = vec![layout.bin_dir()];
    if let Some(path) = current_path {
        entries.extend(std::env::split_paths(&path));
    }
    let path = std::env::join_paths(entries)
        .map_err(|e| VenvupError::Other(anyhow::anyhow!("cannot build PATH: {}", e)))?;

    let prompt = layout
        .root()
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "venv".to_string());

    let mut set = BTreeMap::new();
    set.insert(
        "VIRTUAL_ENV".to_string(),
        layout.root().display().to_string(),
    );
    set.insert("VIRTUAL_ENV_PROMPT".to_string(), prompt);
    set.insert("PATH".to_string(), path.to_string_lossy().to_string());

    Ok(ActivationEnv {
        set,
        remove: vec!["PYTHONHOME".to_string()],
    })
}

/// Fail with `ActivationScriptMissing` unless the environment has an
/// activation script for `shell`.
pub fn require_activation_script(layout: &VenvLayout, shell: ShellType) -> Result<()> {
    let script = layout.activation_script(shell);
    if script.is_file() {
        Ok(())
    } else {
        Err(VenvupError::ActivationScriptMissing { path: script })
    }
}

/// Build the interactive subshell that has the environment applied.
pub fn subshell_spec(
    layout: &VenvLayout,
    shell: &ShellInfo,
    project_root: &Path,
) -> Result<ProcessSpec> {
    require_activation_script(layout, shell.kind)?;

    let env = activation_env(layout, std::env::var_os("PATH"))?;
    let script = layout.activation_script(shell.kind).display().to_string();

    let mut spec = ProcessSpec::new(&shell.executable).cwd(project_root);
    spec = match shell.kind {
        // PowerShell and cmd rewrite their prompt only when the script runs.
        ShellType::PowerShell => spec.args(["-NoExit", "-Command", &format!("& '{}'", script)]),
        ShellType::Cmd => spec.args(["/K", &script]),
        ShellType::Bash
        | ShellType::Zsh
        | ShellType::Fish
        | ShellType::Sh
        | ShellType::Csh
        | ShellType::Unknown => spec.arg("-i"),
    };

    for (key, value) in env.set {
        spec = spec.env(key, value);
    }
    for key in env.remove {
        spec = spec.env_remove(key);
    }
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venv::layout::BIN_DIR;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn created_env(temp: &TempDir) -> VenvLayout {
        let layout = VenvLayout::new(temp.path(), Path::new(".venv"));
        std::fs::create_dir_all(layout.bin_dir()).unwrap();
        std::fs::write(layout.activation_script(ShellType::Bash), "# activate").unwrap();
        layout
    }

    #[test]
    fn env_prepends_bin_dir() {
        let layout = VenvLayout::new(Path::new("/p"), Path::new(".venv"));
        let original = std::env::join_paths([PathBuf::from("/usr/bin")]).unwrap();
        let env = activation_env(&layout, Some(original)).unwrap();

        let path = OsString::from(&env.set["PATH"]);
        let entries: Vec<PathBuf> = std::env::split_paths(&path).collect();
        assert_eq!(entries[0], Path::new("/p/.venv").join(BIN_DIR));
        assert_eq!(entries[1], PathBuf::from("/usr/bin"));
        assert_eq!(env.set["VIRTUAL_ENV_PROMPT"], ".venv");
        assert_eq!(env.remove, vec!["PYTHONHOME"]);
    }

    #[test]
    fn env_without_existing_path() {
        let layout = VenvLayout::new(Path::new("/p"), Path::new("env"));
        let env = activation_env(&layout, None).unwrap();
        assert_eq!(
            PathBuf::from(&env.set["PATH"]),
            Path::new("/p/env").join(BIN_DIR)
        );
    }

    #[test]
    fn missing_script_is_reported() {
        let temp = TempDir::new().unwrap();
        let layout = VenvLayout::new(temp.path(), Path::new(".venv"));
        let err = require_activation_script(&layout, ShellType::Bash).unwrap_err();
        assert!(matches!(err, VenvupError::ActivationScriptMissing { .. }));
    }

    #[test]
    fn powershell_script_in_either_case_is_found() {
        let temp = TempDir::new().unwrap();
        let layout = created_env(&temp);
        assert!(require_activation_script(&layout, ShellType::PowerShell).is_err());

        std::fs::write(layout.bin_dir().join("activate.ps1"), "# uv").unwrap();
        require_activation_script(&layout, ShellType::PowerShell).unwrap();
    }

    #[test]
    fn subshell_for_bash_is_interactive_with_env() {
        let temp = TempDir::new().unwrap();
        let layout = created_env(&temp);
        let shell = ShellInfo {
            executable: PathBuf::from("/bin/bash"),
            kind: ShellType::Bash,
        };

        let spec = subshell_spec(&layout, &shell, temp.path()).unwrap();

        assert_eq!(spec.program, PathBuf::from("/bin/bash"));
        assert_eq!(spec.args, vec!["-i"]);
        assert_eq!(spec.cwd.as_deref(), Some(temp.path()));
        assert_eq!(
            spec.env.get("VIRTUAL_ENV").map(String::as_str),
            Some(layout.root().to_str().unwrap())
        );
        assert!(spec.env_remove.contains(&"PYTHONHOME".to_string()));
        assert!(!spec.capture);
    }

    #[test]
    fn subshell_requires_script() {
        let temp = TempDir::new().unwrap();
        let layout = VenvLayout::new(temp.path(), Path::new(".venv"));
        let shell = ShellInfo {
            executable: PathBuf::from("/bin/zsh"),
            kind: ShellType::Zsh,
        };
        assert!(subshell_spec(&layout, &shell, temp.path()).is_err());
    }
}
