//! Error types for venvup operations.
//!
//! This module defines [`VenvupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `VenvupError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `VenvupError::Other`) for unexpected errors
//! - A failed bootstrap step is not an error: it is recorded in the run
//!   report and the sequence moves on

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for venvup operations.
#[derive(Debug, Error)]
pub enum VenvupError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A `${name}` reference that no variable resolves.
    #[error("Unknown variable '${{{name}}}' in '{template}'")]
    UnknownVariable { name: String, template: String },

    /// External command could not be spawned or exited non-zero.
    #[error("Command `{command}` failed: {message}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        message: String,
    },

    /// The installer script could not be downloaded.
    #[error("Failed to fetch installer from {url}: {message}")]
    InstallerFetchFailed { url: String, message: String },

    /// The environment has no activation script for the requested shell.
    #[error("Activation script not found: {path}")]
    ActivationScriptMissing { path: PathBuf },

    /// Spawning or waiting on an interactive shell failed.
    #[error("Shell error: {message}")]
    ShellError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for venvup operations.
pub type Result<T> = std::result::Result<T, VenvupError>;

impl VenvupError {
    /// Whether this error comes from reading or checking configuration.
    ///
    /// The CLI exits with status 2 for these.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            VenvupError::ConfigNotFound { .. }
                | VenvupError::ConfigParseError { .. }
                | VenvupError::ConfigValidationError { .. }
                | VenvupError::UnknownVariable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = VenvupError::ConfigNotFound {
            path: PathBuf::from("/foo/config.yml"),
        };
        assert!(err.to_string().contains("/foo/config.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = VenvupError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn unknown_variable_displays_braced_name() {
        let err = VenvupError::UnknownVariable {
            name: "pyhton".into(),
            template: "--python ${pyhton}".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("${pyhton}"));
        assert!(msg.contains("--python"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = VenvupError::CommandFailed {
            command: "uv pip install -r requirements.txt".into(),
            code: Some(2),
            message: "exited with code 2".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("uv pip install"));
        assert!(msg.contains("exited with code 2"));
    }

    #[test]
    fn command_failed_carries_spawn_reason() {
        let err = VenvupError::CommandFailed {
            command: "uv --version".into(),
            code: None,
            message: "Permission denied (os error 13)".into(),
        };
        assert_eq!(
            err.to_string(),
            "Command `uv --version` failed: Permission denied (os error 13)"
        );
    }

    #[test]
    fn installer_fetch_failed_displays_url() {
        let err = VenvupError::InstallerFetchFailed {
            url: "https://example.test/install.sh".into(),
            message: "HTTP 404".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.test/install.sh"));
        assert!(msg.contains("HTTP 404"));
    }

    #[test]
    fn activation_script_missing_displays_path() {
        let err = VenvupError::ActivationScriptMissing {
            path: PathBuf::from(".venv/bin/activate"),
        };
        assert!(err.to_string().contains(".venv/bin/activate"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: VenvupError = io_err.into();
        assert!(matches!(err, VenvupError::Io(_)));
    }

    #[test]
    fn config_errors_are_classified() {
        let parse = VenvupError::ConfigParseError {
            path: PathBuf::from("c.yml"),
            message: "bad".into(),
        };
        let shell = VenvupError::ShellError {
            message: "no shell".into(),
        };
        assert!(parse.is_config_error());
        assert!(!shell.is_config_error());
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(VenvupError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
