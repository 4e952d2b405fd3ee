//! Locating executables.
//!
//! A freshly installed tool usually lands in a directory that is not on the
//! `PATH` this process inherited, so lookups also cover the directories
//! install scripts write to.

use std::path::{Path, PathBuf};

/// The user's home directory, from `HOME` (or `USERPROFILE` on Windows).
pub fn home_dir() -> Option<PathBuf> {
    home_dir_with_env(&|key: &str| std::env::var(key))
}

fn home_dir_with_env<F>(env_fn: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let keys: &[&str] = if cfg!(windows) {
        &["USERPROFILE", "HOME"]
    } else {
        &["HOME"]
    };
    keys.iter()
        .filter_map(|k| env_fn(k).ok())
        .find(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn candidate_names(tool: &str) -> Vec<String> {
    if cfg!(windows) && Path::new(tool).extension().is_none() {
        vec![format!("{tool}.exe"), format!("{tool}.cmd"), tool.to_string()]
    } else {
        vec![tool.to_string()]
    }
}

/// Resolve a tool's binary path by iterating over directories.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let names = candidate_names(tool);
    dirs.iter()
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|candidate| is_executable(candidate))
}

/// Directories install scripts commonly place binaries in, most specific
/// first: `$UV_INSTALL_DIR`, `$XDG_BIN_HOME`, `$CARGO_HOME/bin`,
/// `~/.local/bin`, `~/.cargo/bin`.
pub fn installer_target_dirs<F>(env_fn: &F, home: Option<&Path>) -> Vec<PathBuf>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let mut dirs = Vec::new();

    if let Ok(dir) = env_fn("UV_INSTALL_DIR") {
        let dir = PathBuf::from(dir);
        // Older installers put binaries in a bin/ subdirectory.
        dirs.push(dir.join("bin"));
        dirs.push(dir);
    }
    if let Ok(dir) = env_fn("XDG_BIN_HOME") {
        dirs.push(PathBuf::from(dir));
    }
    if let Ok(dir) = env_fn("CARGO_HOME") {
        dirs.push(PathBuf::from(dir).join("bin"));
    }
    if let Some(home) = home {
        dirs.push(home.join(".local").join("bin"));
        dirs.push(home.join(".cargo").join("bin"));
    }

    dirs
}

/// Find `tool` on `PATH`, then in installer target directories, then in
/// `extra_dirs`.
///
/// A `tool` containing a path separator is checked as-is.
pub fn locate_tool(tool: &str, extra_dirs: &[PathBuf]) -> Option<PathBuf> {
    locate_tool_with(tool, extra_dirs, parse_system_path(), &|k: &str| std::env::var(k))
}

/// [`locate_tool`] with injectable `PATH` entries and environment lookup.
pub fn locate_tool_with<F>(
    tool: &str,
    extra_dirs: &[PathBuf],
    path_entries: Vec<PathBuf>,
    env_fn: &F,
) -> Option<PathBuf>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let as_path = Path::new(tool);
    if as_path.components().count() > 1 {
        return is_executable(as_path).then(|| as_path.to_path_buf());
    }

    let home = home_dir_with_env(env_fn);
    let mut dirs = path_entries;
    dirs.extend(installer_target_dirs(env_fn, home.as_deref()));
    dirs.extend(extra_dirs.iter().cloned());

    resolve_tool_path(tool, &dirs)
}
