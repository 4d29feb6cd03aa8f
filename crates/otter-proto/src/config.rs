//! Model configuration.
//!
//! Defaults applied by [`ObjectBuilder`](crate::ObjectBuilder) when a
//! construction leaves something unspecified. The struct deserializes with
//! serde so a host can keep it in whatever configuration file it already has.

use serde::{Deserialize, Serialize};

use crate::shape::TypeTag;
use crate::value::ValueType;

/// Construction defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Tag for objects built without an explicit one
    #[serde(default = "default_tag")]
    pub default_tag: String,

    /// Give every object a dynamic store even when none was requested
    #[serde(default)]
    pub dynamic_by_default: bool,

    /// Element type of dynamic stores created without an explicit type
    #[serde(default)]
    pub dynamic_element: ValueType,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_tag: default_tag(),
            dynamic_by_default: false,
            dynamic_element: ValueType::Any,
        }
    }
}

impl ModelConfig {
    /// Tag used for untagged objects
    pub fn tag(&self) -> TypeTag {
        TypeTag::from(self.default_tag.as_str())
    }
}

fn default_tag() -> String {
    "Object".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.tag(), TypeTag::default());
        assert!(!config.dynamic_by_default);
        assert_eq!(config.dynamic_element, ValueType::Any);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ModelConfig = serde_json::from_str(r#"{ "dynamic_by_default": true }"#).unwrap();
        assert!(config.dynamic_by_default);
        assert_eq!(config.default_tag, "Object");
        assert_eq!(config.dynamic_element, ValueType::Any);

        let config: ModelConfig =
            serde_json::from_str(r#"{ "default_tag": "Record", "dynamic_element": "Int" }"#).unwrap();
        assert_eq!(config.tag().as_str(), "Record");
        assert_eq!(config.dynamic_element, ValueType::Int);
    }
}
