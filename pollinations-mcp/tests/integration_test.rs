//! Integration tests for the pollinations-mcp server.
//!
//! The Pollinations image and text services are replaced by a local
//! `wiremock` server, so these tests run offline.
//!
//! Run with: `cargo test --package pollinations-mcp --test integration_test`

use pollinations_mcp::{PollinationsHandler, PollinationsServer};
use pollinations_mcp_common::config::Config;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Map, Value, json};
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a server whose image and text endpoints both point at the mock.
fn server_for(mock_server: &MockServer) -> PollinationsServer {
    let config = Config::with_base_urls(&mock_server.uri(), &mock_server.uri()).expect("mock URI is http");
    PollinationsServer::with_handler(PollinationsHandler::with_client(config, reqwest::Client::new()))
}

fn args(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => panic!("arguments must be an object"),
    }
}

fn text_json(result: &CallToolResult, index: usize) -> Value {
    match &result.content[index].raw {
        RawContent::Text(text) => serde_json::from_str(&text.text).expect("text part is JSON"),
        other => panic!("expected text content, got {:?}", other),
    }
}

fn assert_failure(result: &CallToolResult, message: &str) {
    assert_eq!(result.is_error, Some(true), "expected failure envelope");
    assert_eq!(result.content.len(), 1);
    assert_eq!(text_json(result, 0), json!({ "success": false, "error": message }));
}

mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn image_without_prompt_fails_before_network() {
        let mock_server = MockServer::start().await;
        let result = server_for(&mock_server).invoke("generate_image", args(json!({}))).await;
        assert_failure(&result, "Prompt is required");
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn text_without_prompt_fails_before_network() {
        let mock_server = MockServer::start().await;
        let result = server_for(&mock_server).invoke("generate_text", args(json!({}))).await;
        assert_failure(&result, "Prompt is required");
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_tool_fails() {
        let mock_server = MockServer::start().await;
        let result = server_for(&mock_server)
            .invoke("unknown_op", args(json!({ "prompt": "x" })))
            .await;
        assert_failure(&result, "Unknown tool: unknown_op");
    }
}

mod image_tests {
    use super::*;

    #[tokio::test]
    async fn generate_image_success_returns_text_and_image_parts() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/prompt/a%20cat"))
            .and(query_param("width", "1024"))
            .and(query_param("height", "1024"))
            .and(query_param("model", "flux"))
            .and(query_param("nologo", "true"))
            .and(query_param("enhance", "false"))
            .and(query_param_is_missing("seed"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = server_for(&mock_server)
            .invoke("generate_image", args(json!({ "prompt": "a cat" })))
            .await;

        assert_ne!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 2);

        let json = text_json(&result, 0);
        assert_eq!(json["success"], true);
        assert_eq!(json["width"], 1024);
        assert_eq!(json["height"], 1024);
        assert_eq!(json["model"], "flux");
        assert_eq!(json["prompt"], "a cat");
        assert!(json["seed"].is_null());
        assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));

        let image_url = json["imageUrl"].as_str().unwrap();
        assert!(image_url.contains("/prompt/a%20cat?"), "{}", image_url);

        match &result.content[1].raw {
            RawContent::Image(image) => {
                assert_eq!(image.data, image_url);
                assert!(image.mime_type.starts_with("image/"));
            }
            other => panic!("expected image content, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn generate_image_passes_seed_and_options() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path_regex(r"^/prompt/.+$"))
            .and(query_param("width", "640"))
            .and(query_param("height", "480"))
            .and(query_param("model", "turbo"))
            .and(query_param("nologo", "false"))
            .and(query_param("enhance", "true"))
            .and(query_param("seed", "42"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = server_for(&mock_server)
            .invoke(
                "generate_image",
                args(json!({
                    "prompt": "neon city",
                    "width": 640,
                    "height": 480,
                    "model": "turbo",
                    "nologo": false,
                    "enhance": true,
                    "seed": 42
                })),
            )
            .await;

        assert_ne!(result.is_error, Some(true));
        let json = text_json(&result, 0);
        assert_eq!(json["seed"], 42);
        assert_eq!(json["model"], "turbo");
    }

    #[tokio::test]
    async fn generate_image_not_found_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = server_for(&mock_server)
            .invoke("generate_image", args(json!({ "prompt": "x" })))
            .await;

        assert_failure(&result, "Failed to generate image: Not Found");
    }

    #[tokio::test]
    async fn connection_failure_is_reported_in_band() {
        // Reserve a free port, then release it so connections are refused.
        let uri = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
            format!("http://{}", listener.local_addr().expect("local addr"))
        };
        let config = Config::with_base_urls(&uri, &uri).unwrap();
        let server = PollinationsServer::with_handler(PollinationsHandler::with_client(config, reqwest::Client::new()));

        let result = server.invoke("generate_image", args(json!({ "prompt": "x" }))).await;

        assert_eq!(result.is_error, Some(true));
        let error = text_json(&result, 0)["error"].as_str().unwrap().to_string();
        assert!(!error.is_empty());
        assert!(!error.starts_with("Failed to generate"), "{}", error);
    }
}

mod text_tests {
    use super::*;

    #[tokio::test]
    async fn generate_text_success_returns_raw_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "messages": [{ "role": "user", "content": "hello" }],
                "model": "mistral",
                "temperature": 1.5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("hi there"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = server_for(&mock_server)
            .invoke(
                "generate_text",
                args(json!({ "prompt": "hello", "model": "mistral", "temperature": 1.5 })),
            )
            .await;

        assert_ne!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
        let json = text_json(&result, 0);
        assert_eq!(json["success"], true);
        assert_eq!(json["response"], "hi there");
        assert_eq!(json["model"], "mistral");
        assert_eq!(json["temperature"], 1.5);
        assert_eq!(json["prompt"], "hello");
        assert!(json["seed"].is_null());
    }

    #[tokio::test]
    async fn generate_text_sends_system_seed_and_max_tokens() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_json(json!({
                "messages": [
                    { "role": "system", "content": "Answer in one word" },
                    { "role": "user", "content": "Sky colour?" }
                ],
                "model": "openai",
                "temperature": 0.7,
                "seed": 3,
                "max_tokens": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("Blue"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = server_for(&mock_server)
            .invoke(
                "generate_text",
                args(json!({
                    "prompt": "Sky colour?",
                    "system": "Answer in one word",
                    "seed": 3,
                    "max_tokens": 5
                })),
            )
            .await;

        assert_ne!(result.is_error, Some(true));
        let json = text_json(&result, 0);
        assert_eq!(json["response"], "Blue");
        assert_eq!(json["seed"], 3);
        assert_eq!(json["model"], "openai");
        assert_eq!(json["temperature"], 0.7);
    }

    #[tokio::test]
    async fn generate_text_server_error_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let result = server_for(&mock_server)
            .invoke("generate_text", args(json!({ "prompt": "hello" })))
            .await;

        assert_failure(&result, "Failed to generate text: Internal Server Error");
    }
}

mod models_tests {
    use super::*;

    #[tokio::test]
    async fn get_available_models_lists_every_model() {
        let mock_server = MockServer::start().await;

        let result = server_for(&mock_server).invoke("get_available_models", None).await;

        assert_ne!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
        let json = text_json(&result, 0);

        let image: Vec<&str> = json["image_models"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        let text: Vec<&str> = json["text_models"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();

        assert_eq!(image, vec!["flux", "flux-realism", "flux-anime", "flux-3d", "turbo"]);
        assert_eq!(
            text,
            vec![
                "openai",
                "mistral",
                "mistral-large",
                "claude-3.5-sonnet",
                "llama-3.3-70b",
                "qwen-2.5-coder-32b",
                "searchgpt"
            ]
        );
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_operations_is_idempotent() {
        let mock_server = MockServer::start().await;
        let server = server_for(&mock_server);
        let first = serde_json::to_value(server.list_operations()).unwrap();
        let second = serde_json::to_value(server.list_operations()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.as_array().unwrap().len(), 3);
    }
}
