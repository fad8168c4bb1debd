//! Static tool catalog served for `tools/list`.
//!
//! Input schemas are generated from the typed parameter structs, so the
//! advertised defaults, enum values and ranges cannot drift from what
//! [`crate::operation::Operation::parse`] accepts.

use crate::handler::{ImageGenerateParams, ModelsListParams, TextGenerateParams};
use crate::operation::OperationKind;
use rmcp::model::Tool;
use schemars::JsonSchema;
use schemars::r#gen::SchemaSettings;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

static CATALOG: LazyLock<Vec<Tool>> = LazyLock::new(|| OperationKind::ALL.iter().map(|kind| tool(*kind)).collect());

/// The tool catalog, built once per process.
pub fn tools() -> &'static [Tool] {
    &CATALOG
}

impl OperationKind {
    /// Description shown to clients in `tools/list`.
    pub fn description(&self) -> &'static str {
        match self {
            OperationKind::GenerateImage => {
                "Generate an image from a text prompt using Pollinations AI. \
                 Returns the image URL along with the generation parameters."
            }
            OperationKind::GenerateText => {
                "Generate text from a prompt using Pollinations AI language models. \
                 Supports an optional system prompt, temperature, seed and token limit."
            }
            OperationKind::GetAvailableModels => {
                "List the image and text models available on Pollinations AI."
            }
        }
    }

    /// JSON Schema for the tool's arguments.
    pub fn input_schema(&self) -> Arc<Map<String, Value>> {
        match self {
            OperationKind::GenerateImage => input_schema::<ImageGenerateParams>(),
            OperationKind::GenerateText => input_schema::<TextGenerateParams>(),
            OperationKind::GetAvailableModels => input_schema::<ModelsListParams>(),
        }
    }
}

fn tool(kind: OperationKind) -> Tool {
    Tool {
        name: Cow::Borrowed(kind.name()),
        description: Some(Cow::Borrowed(kind.description())),
        input_schema: kind.input_schema(),
        annotations: None,
        icons: None,
        meta: None,
        output_schema: None,
        title: None,
    }
}

/// Draft-07 schema with sub-schemas inlined and `Option` fields left
/// non-nullable, so enums and defaults sit directly on each property.
fn input_schema<T: JsonSchema>() -> Arc<Map<String, Value>> {
    let settings = SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
        s.option_add_null_type = false;
        s.option_nullable = false;
        s.meta_schema = None;
    });
    let schema = settings.into_generator().into_root_schema_for::<T>();

    let mut map = match serde_json::to_value(&schema) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    map.remove("title");
    map.remove("definitions");
    map.entry("type").or_insert_with(|| Value::String("object".to_string()));
    map.entry("properties").or_insert_with(|| Value::Object(Map::new()));
    Arc::new(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollinations_mcp_common::models::ModelRegistry;
    use serde_json::json;

    fn schema_of(name: &str) -> Value {
        let tool = tools().iter().find(|t| t.name == name).unwrap();
        Value::Object((*tool.input_schema).clone())
    }

    #[test]
    fn test_catalog_names_in_order() {
        let names: Vec<&str> = tools().iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, vec!["generate_image", "generate_text", "get_available_models"]);
    }

    #[test]
    fn test_catalog_is_stable() {
        let first = serde_json::to_value(tools()).unwrap();
        let second = serde_json::to_value(tools()).unwrap();
        assert_eq!(first, second);
        assert!(std::ptr::eq(tools(), tools()));
    }

    #[test]
    fn test_every_tool_has_description_and_object_schema() {
        for tool in tools() {
            assert!(tool.description.as_ref().is_some_and(|d| !d.is_empty()), "{}", tool.name);
            assert_eq!(tool.input_schema.get("type"), Some(&json!("object")), "{}", tool.name);
            assert!(tool.input_schema.get("properties").is_some_and(Value::is_object), "{}", tool.name);
        }
    }

    #[test]
    fn test_image_schema() {
        let schema = schema_of("generate_image");
        assert_eq!(schema["required"], json!(["prompt"]));
        let props = &schema["properties"];
        assert_eq!(props["prompt"]["type"], "string");
        assert_eq!(props["width"]["default"], 1024);
        assert_eq!(props["height"]["default"], 1024);
        assert_eq!(props["model"]["default"], "flux");
        assert_eq!(props["model"]["enum"], json!(ModelRegistry::image_model_names()));
        assert_eq!(props["nologo"]["default"], true);
        assert_eq!(props["enhance"]["default"], false);
        assert!(props["seed"].is_object());
        assert!(props["seed"].get("default").is_none_or(Value::is_null));
    }

    #[test]
    fn test_text_schema() {
        let schema = schema_of("generate_text");
        assert_eq!(schema["required"], json!(["prompt"]));
        let props = &schema["properties"];
        assert_eq!(props["model"]["default"], "openai");
        assert_eq!(props["model"]["enum"], json!(ModelRegistry::text_model_names()));
        assert_eq!(props["temperature"]["default"], 0.7);
        assert_eq!(props["temperature"]["minimum"], 0.0);
        assert_eq!(props["temperature"]["maximum"], 2.0);
        for optional in ["seed", "max_tokens", "system"] {
            assert!(props[optional].is_object(), "{} should be declared", optional);
        }
    }

    #[test]
    fn test_models_schema_has_no_arguments() {
        let schema = schema_of("get_available_models");
        assert_eq!(schema["properties"], json!({}));
        assert!(schema.get("required").is_none_or(|r| r.as_array().is_some_and(Vec::is_empty)));
        assert_eq!(schema["description"], "No arguments are needed");
    }

    #[test]
    fn test_schema_descriptions_are_plain_prose() {
        for tool in tools() {
            let schema = Value::Object((*tool.input_schema).clone());
            let text = schema.to_string();
            assert!(!text.contains('`'), "{} schema carries markup: {}", tool.name, text);
        }
    }
}
