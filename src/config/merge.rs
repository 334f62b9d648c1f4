//! Configuration merge logic
//!
//! Layers are merged key by key at the top level only:
//! - Keys in the overlay replace the base value wholesale, objects included
//! - Keys only in the base are kept
//! - Keys only in the overlay are added

use serde_json::{Map, Value};

/// Shallow merge of two configuration objects.
///
/// A reporter options object present in `overlay` replaces the one in `base`
/// entirely; nested keys are never merged.
pub fn shallow_merge(
    mut base: Map<String, Value>,
    overlay: Map<String, Value>,
) -> Map<String, Value> {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}

/// Merge configuration layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Map<String, Value>>) -> Map<String, Value> {
    layers.into_iter().fold(Map::new(), shallow_merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_scalar_override() {
        let base = object(json!({"reporterEnabled": "spec, xunit"}));
        let overlay = object(json!({"reporterEnabled": "dot"}));
        let result = shallow_merge(base, overlay);
        assert_eq!(result["reporterEnabled"], "dot");
    }

    #[test]
    fn test_object_replaced_not_merged() {
        let base = object(json!({
            "xunitReporterOptions": {
                "id": "xunit",
                "output": "xunit.xml"
            }
        }));
        let overlay = object(json!({
            "xunitReporterOptions": {
                "output": "artifacts/test/custom-xunit.xml"
            }
        }));
        let result = shallow_merge(base, overlay);

        assert_eq!(
            Value::Object(result),
            json!({
                "xunitReporterOptions": {
                    "output": "artifacts/test/custom-xunit.xml"
                }
            })
        );
    }

    #[test]
    fn test_add_new_key() {
        let base = object(json!({"reporterEnabled": "spec"}));
        let overlay = object(json!({"tapReporterOptions": {"id": "tap"}}));
        let result = shallow_merge(base, overlay);

        assert_eq!(result["reporterEnabled"], "spec");
        assert_eq!(result["tapReporterOptions"]["id"], "tap");
    }

    #[test]
    fn test_null_override() {
        let base = object(json!({"reporterOptions": {"id": "default"}}));
        let overlay = object(json!({"reporterOptions": null}));
        let result = shallow_merge(base, overlay);

        assert!(result["reporterOptions"].is_null());
    }

    #[test]
    fn test_merge_layers() {
        let defaults = object(json!({
            "reporterEnabled": "spec, xunit",
            "dotReporterOptions": {"id": "dot"}
        }));
        let custom = object(json!({
            "reporterEnabled": "dot",
            "dotReporterOptions": {"output": "dots.txt"}
        }));
        let inline = object(json!({
            "reporterEnabled": "tap"
        }));

        let result = merge_layers(vec![defaults, custom, inline]);

        // Inline wins for reporterEnabled
        assert_eq!(result["reporterEnabled"], "tap");
        // Custom replaced dot options wholesale
        assert_eq!(result["dotReporterOptions"], json!({"output": "dots.txt"}));
    }

    #[test]
    fn test_merge_no_layers() {
        assert!(merge_layers(Vec::new()).is_empty());
    }
}
