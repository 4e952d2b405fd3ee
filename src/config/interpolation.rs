//! Variable interpolation for command argument templates.
//!
//! The `tool.create_args` and `tool.install_args` lists may reference the
//! run's resolved values using `${variable}` syntax.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with variable value
//! - `$${escaped}` - produces literal `${escaped}` in output
//!
//! # Example
//!
//! ```
//! use venvup::config::{resolve_string, InterpolationContext};
//!
//! let mut ctx = InterpolationContext::new();
//! ctx.set("python", "3.12");
//! assert_eq!(resolve_string("--python=${python}", &ctx).unwrap(), "--python=3.12");
//! ```

use crate::error::{Result, VenvupError};
use std::collections::{BTreeMap, HashSet};

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a string containing `${var}` interpolations into segments.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    literal.push_str("${");
                    for c in chars.by_ref() {
                        literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    literal.push('$');
                }
            }
            Some('{') => {
                chars.next();
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                let mut name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    name.push(c);
                }
                segments.push(Segment::Variable(name));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

/// Unique variable names referenced by a template.
pub fn extract_variables(input: &str) -> HashSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Values available to argument templates.
#[derive(Debug, Clone, Default)]
pub struct InterpolationContext {
    vars: BTreeMap<String, String>,
}

impl InterpolationContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Names of all variables in the context.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }
}

/// Resolve every `${name}` in `template` against `ctx`.
pub fn resolve_string(template: &str, ctx: &InterpolationContext) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    for segment in parse_interpolation(template) {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Variable(name) => match ctx.get(&name) {
                Some(value) => out.push_str(value),
                None => {
                    return Err(VenvupError::UnknownVariable {
                        name,
                        template: template.to_string(),
                    })
                }
            },
        }
    }
    Ok(out)
}

/// Resolve a list of argument templates.
pub fn resolve_args(templates: &[String], ctx: &InterpolationContext) -> Result<Vec<String>> {
    templates.iter().map(|t| resolve_string(t, ctx)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> InterpolationContext {
        let mut ctx = InterpolationContext::new();
        ctx.set("venv", ".venv");
        ctx.set("python", "3.12");
        ctx
    }

    #[test]
    fn parses_literal_only() {
        assert_eq!(
            parse_interpolation("venv"),
            vec![Segment::Literal("venv".to_string())]
        );
    }

    #[test]
    fn parses_variable_between_literals() {
        assert_eq!(
            parse_interpolation("a${b}c"),
            vec![
                Segment::Literal("a".to_string()),
                Segment::Variable("b".to_string()),
                Segment::Literal("c".to_string()),
            ]
        );
    }

    #[test]
    fn escaped_variable_is_literal() {
        let resolved = resolve_string("$${venv}", &ctx()).unwrap();
        assert_eq!(resolved, "${venv}");
    }

    #[test]
    fn lone_dollar_is_kept() {
        assert_eq!(resolve_string("cost$5", &ctx()).unwrap(), "cost$5");
    }

    #[test]
    fn resolves_known_variables() {
        let args = vec![
            "venv".to_string(),
            "${venv}".to_string(),
            "--python".to_string(),
            "${python}".to_string(),
        ];
        let resolved = resolve_args(&args, &ctx()).unwrap();
        assert_eq!(resolved, vec!["venv", ".venv", "--python", "3.12"]);
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let err = resolve_string("${manifest}", &ctx()).unwrap_err();
        assert!(matches!(err, VenvupError::UnknownVariable { ref name, .. } if name == "manifest"));
    }

    #[test]
    fn extract_variables_is_unique() {
        let vars = extract_variables("${a}-${b}-${a}");
        assert_eq!(vars.len(), 2);
        assert!(vars.contains("a"));
        assert!(vars.contains("b"));
    }
}
