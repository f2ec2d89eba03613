//! Type-safe schema generation for OpenAI structured outputs.
//!
//! Uses the `schemars` crate to automatically generate JSON schemas from Rust types.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use openai_client::StructuredOutput;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Review {
//!     score: u8,
//!     reasoning: String,
//! }
//!
//! // Get OpenAI-compatible schema
//! let schema = Review::openai_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Trait for types that can be used as OpenAI structured output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate an OpenAI-compatible JSON schema for this type.
    ///
    /// OpenAI strict mode requires:
    /// 1. `additionalProperties: false` on all object schemas
    /// 2. ALL properties listed in `required`, even nullable ones
    /// 3. Fully inlined schemas (no `$ref` references)
    ///
    /// This method transforms the schemars output to meet these requirements.
    fn openai_schema() -> serde_json::Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        fix_object_schemas(&mut value);

        let definitions = value.get("definitions").cloned();
        if let Some(defs) = definitions {
            inline_refs(&mut value, &defs);
        }

        if let serde_json::Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Fix all object schemas for OpenAI strict mode compatibility.
///
/// Adds `additionalProperties: false` and lists every property in `required`.
fn fix_object_schemas(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if map.get("type") == Some(&serde_json::Value::String("object".to_string())) {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );

                if let Some(serde_json::Value::Object(props)) = map.get("properties") {
                    let all_keys: Vec<serde_json::Value> = props
                        .keys()
                        .map(|k| serde_json::Value::String(k.clone()))
                        .collect();
                    map.insert("required".to_string(), serde_json::Value::Array(all_keys));
                }
            }

            for (_, v) in map.iter_mut() {
                fix_object_schemas(v);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                fix_object_schemas(item);
            }
        }
        _ => {}
    }
}

/// Replace every `$ref` with the inlined schema from `definitions`.
///
/// OpenAI's strict mode validation doesn't properly traverse $ref references.
fn inline_refs(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(type_name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        // Inlined definitions may themselves carry refs
                        inline_refs(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs(v, definitions);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}
