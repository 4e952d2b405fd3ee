//! Tool availability probe.
//!
//! Presence is decided by the probe's exit status alone. The version string
//! is informational and may be missing even when the tool is present.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::shell::{ProcessRunner, ProcessSpec};

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d+\.\d+(?:\.\d+)?(?:[-+.]?(?:a|b|rc|dev|post)\d*)?)\b")
        .expect("version regex is valid")
});

/// Whether the tool answered its probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ToolPresence {
    Present {
        program: PathBuf,
        version: Option<String>,
    },
    Absent,
}

impl ToolPresence {
    pub fn is_present(&self) -> bool {
        matches!(self, ToolPresence::Present { .. })
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            ToolPresence::Present { version, .. } => version.as_deref(),
            ToolPresence::Absent => None,
        }
    }
}

/// Extract the first version number from probe output, e.g. `0.5.11` from
/// `uv 0.5.11 (c4d0caaee 2024-12-19)`.
pub fn parse_version(output: &str) -> Option<String> {
    VERSION_REGEX
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Run `program probe_args...` and report presence.
///
/// A spawn failure and a non-zero exit both mean absent.
pub fn probe_tool(runner: &dyn ProcessRunner, program: &str, probe_args: &[String]) -> ToolPresence {
    let spec = ProcessSpec::new(program).args(probe_args).captured();

    match runner.run(&spec) {
        Ok(result) if result.success => {
            let version = parse_version(&result.stdout).or_else(|| parse_version(&result.stderr));
            tracing::debug!("Probe found {} (version {:?})", program, version);
            ToolPresence::Present {
                program: PathBuf::from(program),
                version,
            }
        }
        Ok(result) => {
            tracing::debug!("Probe of {} exited with {:?}", program, result.exit_code);
            ToolPresence::Absent
        }
        Err(e) => {
            tracing::debug!("Probe of {} could not run: {}", program, e);
            ToolPresence::Absent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockResponse, MockRunner};

    fn version_args() -> Vec<String> {
        vec!["--version".to_string()]
    }

    #[test]
    fn parses_uv_version() {
        assert_eq!(
            parse_version("uv 0.5.11 (c4d0caaee 2024-12-19)").as_deref(),
            Some("0.5.11")
        );
    }

    #[test]
    fn parses_two_part_and_prerelease_versions() {
        assert_eq!(parse_version("tool 1.2").as_deref(), Some("1.2"));
        assert_eq!(parse_version("Python 3.13.0rc1").as_deref(), Some("3.13.0rc1"));
    }

    #[test]
    fn no_version_in_output() {
        assert_eq!(parse_version("usage: tool [options]"), None);
    }

    #[test]
    fn successful_probe_is_present() {
        let mut runner = MockRunner::new();
        runner.respond(
            "uv --version",
            MockResponse::Output {
                code: 0,
                stdout: "uv 0.5.1\n".to_string(),
                stderr: String::new(),
            },
        );

        let presence = probe_tool(&runner, "uv", &version_args());

        assert_eq!(
            presence,
            ToolPresence::Present {
                program: PathBuf::from("uv"),
                version: Some("0.5.1".to_string())
            }
        );
        assert!(runner.calls()[0].capture);
    }

    #[test]
    fn non_zero_exit_is_absent() {
        let mut runner = MockRunner::new();
        runner.respond("uv --version", MockResponse::Exit(127));
        assert_eq!(probe_tool(&runner, "uv", &version_args()), ToolPresence::Absent);
    }

    #[test]
    fn spawn_failure_is_absent() {
        let mut runner = MockRunner::new();
        runner.respond("uv", MockResponse::SpawnError);
        assert!(!probe_tool(&runner, "uv", &version_args()).is_present());
    }

    #[test]
    fn present_without_parseable_version() {
        let runner = MockRunner::new();
        let presence = probe_tool(&runner, "uv", &version_args());
        assert!(presence.is_present());
        assert_eq!(presence.version(), None);
    }
}
