//! Layering of YAML configuration values.
//!
//! The user config, the project config and the local overrides are merged
//! as raw YAML before being deserialized, so a layer only needs to mention
//! the keys it changes.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences and scalars in the overlay replace the base value
//! - A null in the overlay removes the key, restoring the built-in default

use serde_yaml::Value;

/// Merge `overlay` on top of `base`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }
        // An empty file parses to null; it must not wipe the layers below.
        (base, Value::Null) => base.clone(),
        (_, overlay) => overlay.clone(),
    }
}

/// Fold config layers in order; the last layer has the highest priority.
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn overlay_replaces_only_conflicting_keys() {
        let base = yaml(
            r#"
environment:
  path: .venv
  python: "3.12"
"#,
        );
        let overlay = yaml(
            r#"
environment:
  python: "3.11"
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["environment"]["python"], "3.11");
        assert_eq!(result["environment"]["path"], ".venv");
    }

    #[test]
    fn sequences_are_replaced_not_appended() {
        let base = yaml("tool:\n  probe_args: [--version]");
        let overlay = yaml("tool:\n  probe_args: [self, version]");

        let result = deep_merge(&base, &overlay);

        let args = result["tool"]["probe_args"].as_sequence().unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0], "self");
    }

    #[test]
    fn null_removes_key() {
        let base = yaml("dependencies:\n  manifest: requirements-dev.txt");
        let overlay = yaml("dependencies:\n  manifest: null");

        let result = deep_merge(&base, &overlay);

        assert!(result["dependencies"].get("manifest").is_none());
    }

    #[test]
    fn empty_layer_keeps_base() {
        let base = yaml("environment:\n  path: env");
        let result = deep_merge(&base, &Value::Null);
        assert_eq!(result["environment"]["path"], "env");
    }

    #[test]
    fn merge_configs_applies_layers_in_order() {
        let layers = vec![
            yaml("environment:\n  python: '3.10'"),
            yaml("environment:\n  python: '3.11'"),
            yaml("environment:\n  python: '3.12'\nsettings:\n  fail_fast: true"),
        ];

        let result = merge_configs(&layers);

        assert_eq!(result["environment"]["python"], "3.12");
        assert_eq!(result["settings"]["fail_fast"], true);
    }

    #[test]
    fn merge_configs_of_nothing_is_empty_mapping() {
        let result = merge_configs(&[]);
        assert!(result.as_mapping().unwrap().is_empty());
    }
}
