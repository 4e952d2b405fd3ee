//! Configuration validation.
//!
//! Checks run after layering and before any command is spawned, so a typo in
//! an argument template is reported up front instead of as a failed step.

use crate::config::interpolation::extract_variables;
use crate::config::schema::VenvupConfig;
use crate::error::{Result, VenvupError};

/// Variables every argument template may reference.
pub const TEMPLATE_VARIABLES: &[&str] = &["tool", "venv", "python", "manifest"];

/// Validate a merged configuration.
///
/// Collects every problem and reports them together.
pub fn validate(config: &VenvupConfig) -> Result<()> {
    let mut problems = Vec::new();

    if config.tool.command.trim().is_empty() {
        problems.push("tool.command must not be empty".to_string());
    }
    if config.tool.create_args.is_empty() {
        problems.push("tool.create_args must not be empty".to_string());
    }
    if config.tool.install_args.is_empty() {
        problems.push("tool.install_args must not be empty".to_string());
    }
    if config.environment.path.as_os_str().is_empty() {
        problems.push("environment.path must not be empty".to_string());
    }
    if config.environment.python.trim().is_empty() {
        problems.push("environment.python must not be empty".to_string());
    }
    if config.dependencies.manifest.as_os_str().is_empty() {
        problems.push("dependencies.manifest must not be empty".to_string());
    }
    if config.installer.timeout_secs == 0 {
        problems.push("installer.timeout_secs must be greater than zero".to_string());
    }

    let templates = [
        ("tool.probe_args", &config.tool.probe_args),
        ("tool.create_args", &config.tool.create_args),
        ("tool.install_args", &config.tool.install_args),
    ];
    for (field, args) in templates {
        for arg in args.iter() {
            let mut unknown: Vec<String> = extract_variables(arg)
                .into_iter()
                .filter(|v| !TEMPLATE_VARIABLES.contains(&v.as_str()))
                .collect();
            unknown.sort();
            for name in unknown {
                problems.push(format!("{field}: unknown variable '${{{name}}}' in '{arg}'"));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(VenvupError::ConfigValidationError {
            message: problems.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&VenvupConfig::default()).is_ok());
    }

    #[test]
    fn empty_python_is_rejected() {
        let mut config = VenvupConfig::default();
        config.environment.python = "  ".to_string();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("environment.python"));
    }

    #[test]
    fn empty_paths_are_rejected_together() {
        let mut config = VenvupConfig::default();
        config.environment.path = PathBuf::new();
        config.dependencies.manifest = PathBuf::new();
        let msg = validate(&config).unwrap_err().to_string();
        assert!(msg.contains("environment.path"));
        assert!(msg.contains("dependencies.manifest"));
    }

    #[test]
    fn unknown_template_variable_is_rejected() {
        let mut config = VenvupConfig::default();
        config.tool.create_args = vec!["venv".into(), "${venv_dir}".into()];
        let msg = validate(&config).unwrap_err().to_string();
        assert!(msg.contains("tool.create_args"));
        assert!(msg.contains("${venv_dir}"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = VenvupConfig::default();
        config.installer.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }
}
