//! The interpreter a downloaded installer script runs in.
//!
//! The script is never written to disk. It is piped to the interpreter on
//! stdin, the same as `curl ... | sh` or `irm ... | iex`.

use crate::shell::ProcessSpec;

const READ_STDIN_AND_EVALUATE: &str = "[Console]::In.ReadToEnd() | Invoke-Expression";

/// Interpreter for installer scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptHost {
    /// `sh -s`, reading the script from stdin.
    Posix,
    /// Windows PowerShell with the execution policy bypassed for this
    /// process only. The whole of stdin is read before evaluation, so
    /// multi-line statements parse as one script.
    PowerShell,
}

impl ScriptHost {
    /// The host for the platform venvup was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            ScriptHost::PowerShell
        } else {
            ScriptHost::Posix
        }
    }

    /// Process that runs `script` with output streamed to the terminal.
    pub fn spec(&self, script: &str) -> ProcessSpec {
        match self {
            ScriptHost::Posix => ProcessSpec::new("sh").arg("-s").stdin(script),
            ScriptHost::PowerShell => ProcessSpec::new("powershell")
                .args([
                    "-NoProfile",
                    "-NonInteractive",
                    "-ExecutionPolicy",
                    "ByPass",
                    "-Command",
                    READ_STDIN_AND_EVALUATE,
                ])
                .stdin(script),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn posix_pipes_to_sh() {
        let spec = ScriptHost::Posix.spec("echo hi");
        assert_eq!(spec.program, PathBuf::from("sh"));
        assert_eq!(spec.args, vec!["-s"]);
        assert_eq!(spec.stdin.as_deref(), Some("echo hi"));
        assert!(!spec.capture);
    }

    #[test]
    fn powershell_bypasses_execution_policy() {
        let spec = ScriptHost::PowerShell.spec("Write-Host hi");
        insta::assert_snapshot!(
            spec.command_line(),
            @r#"powershell -NoProfile -NonInteractive -ExecutionPolicy ByPass -Command "[Console]::In.ReadToEnd() | Invoke-Expression""#
        );
        assert_eq!(spec.stdin.as_deref(), Some("Write-Host hi"));
    }

    #[test]
    fn powershell_reads_the_whole_script_before_running_it() {
        let script = "if ($true) {\n  Write-Host one\n}\nWrite-Host two\n";
        let spec = ScriptHost::PowerShell.spec(script);
        assert_ne!(spec.args.last().map(String::as_str), Some("-"));
        assert!(spec.args.iter().any(|a| a.contains("ReadToEnd()")));
        assert_eq!(spec.stdin.as_deref(), Some(script));
    }

    #[test]
    fn current_matches_platform() {
        if cfg!(windows) {
            assert_eq!(ScriptHost::current(), ScriptHost::PowerShell);
        } else {
            assert_eq!(ScriptHost::current(), ScriptHost::Posix);
        }
    }
}
