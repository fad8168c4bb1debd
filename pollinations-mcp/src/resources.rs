//! MCP Resources for the Pollinations server.
//!
//! - `pollinations://models` - the image and text model listing

use pollinations_mcp_common::models::ModelRegistry;
use rmcp::model::{RawResource, Resource};

/// URI of the model listing resource.
pub const MODELS_URI: &str = "pollinations://models";

/// The resources advertised in `resources/list`.
pub fn list_resources() -> Vec<Resource> {
    vec![Resource {
        raw: RawResource {
            uri: MODELS_URI.to_string(),
            name: "Available Models".to_string(),
            title: None,
            description: Some("Image and text models available on Pollinations AI".to_string()),
            mime_type: Some("application/json".to_string()),
            size: None,
            icons: None,
            meta: None,
        },
        annotations: None,
    }]
}

/// Get the models resource as a JSON string.
pub fn models_resource_json() -> String {
    serde_json::to_string_pretty(&ModelRegistry::catalog()).unwrap_or_else(|_| "{}".to_string())
}

/// Resolve a resource URI to its body.
pub fn read(uri: &str) -> Option<String> {
    match uri {
        MODELS_URI => Some(models_resource_json()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_resources() {
        let resources = list_resources();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].raw.uri, MODELS_URI);
        assert_eq!(resources[0].raw.mime_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_models_resource_json() {
        let json: serde_json::Value = serde_json::from_str(&models_resource_json()).unwrap();
        assert_eq!(json["image_models"].as_array().unwrap().len(), 5);
        assert_eq!(json["text_models"].as_array().unwrap().len(), 7);
        assert_eq!(json["image_models"][0]["name"], "flux");
    }

    #[test]
    fn test_read_unknown_uri() {
        assert!(read(MODELS_URI).is_some());
        assert!(read("pollinations://providers").is_none());
    }
}
