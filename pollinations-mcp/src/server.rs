//! MCP Server implementation for the Pollinations server.
//!
//! This module provides the MCP server handler that exposes:
//! - `generate_image` tool for text-to-image generation
//! - `generate_text` tool for text generation
//! - `get_available_models` tool listing the supported models
//! - The `pollinations://models` resource
//!
//! Every tool call resolves to a well-formed `CallToolResult`. Failures are
//! reported in-band as `{"success": false, "error": "..."}` with `is_error`
//! set, never as a protocol error.

use crate::catalog;
use crate::handler::{IMAGE_MIME_TYPE, PollinationsHandler};
use crate::operation::{Arguments, Operation};
use crate::resources;
use pollinations_mcp_common::config::Config;
use pollinations_mcp_common::error::Error;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Content, ListResourcesResult, ListToolsResult,
        PaginatedRequestParams, ReadResourceRequestParams, ReadResourceResult, ResourceContents,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::{RequestContext, RoleServer},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// MCP Server for Pollinations image and text generation.
#[derive(Clone)]
pub struct PollinationsServer {
    handler: Arc<PollinationsHandler>,
}

impl PollinationsServer {
    /// Create a new server with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, Error> {
        Ok(Self::with_handler(PollinationsHandler::new(config)?))
    }

    /// Create a server around an existing handler.
    pub fn with_handler(handler: PollinationsHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// The tool catalog, unmodified.
    pub fn list_operations(&self) -> Vec<Tool> {
        catalog::tools().to_vec()
    }

    /// Invoke a tool by name.
    ///
    /// Always returns a result envelope; errors of every kind are folded
    /// into a failure result.
    pub async fn invoke(&self, name: &str, arguments: Option<Arguments>) -> CallToolResult {
        info!(tool = %name, "Invoking tool");

        match self.dispatch(name, arguments).await {
            Ok(content) => CallToolResult::success(content),
            Err(e) => {
                let message = e.failure_message();
                warn!(tool = %name, error = %message, "Tool invocation failed");
                failure_result(&message)
            }
        }
    }

    async fn dispatch(&self, name: &str, arguments: Option<Arguments>) -> Result<Vec<Content>, Error> {
        match Operation::parse(name, arguments)? {
            Operation::GenerateImage(params) => {
                let result = self.handler.generate_image(params).await?;
                Ok(vec![
                    json_content(&result)?,
                    Content::image(result.image_url, IMAGE_MIME_TYPE),
                ])
            }
            Operation::GenerateText(params) => {
                let result = self.handler.generate_text(params).await?;
                Ok(vec![json_content(&result)?])
            }
            Operation::GetAvailableModels => {
                Ok(vec![json_content(&self.handler.available_models())?])
            }
        }
    }
}

fn json_content<T: Serialize>(value: &T) -> Result<Content, Error> {
    Ok(Content::text(serde_json::to_string_pretty(value)?))
}

/// Build the failure envelope for a message.
pub fn failure_result(message: &str) -> CallToolResult {
    let body = json!({ "success": false, "error": message });
    CallToolResult::error(vec![Content::text(body.to_string())])
}

impl ServerHandler for PollinationsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Image and text generation server backed by Pollinations AI. \
                 Use generate_image to create an image URL from a prompt, \
                 generate_text for language model responses, \
                 and get_available_models to see which models can be selected."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _params: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move {
            debug!("Listing tools");
            Ok(ListToolsResult {
                tools: self.list_operations(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        params: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move { Ok(self.invoke(params.name.as_ref(), params.arguments).await) }
    }

    fn list_resources(
        &self,
        _params: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        async move {
            debug!("Listing resources");
            Ok(ListResourcesResult {
                resources: resources::list_resources(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn read_resource(
        &self,
        params: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            let uri = &params.uri;
            debug!(uri = %uri, "Reading resource");

            let content = resources::read(uri).ok_or_else(|| {
                McpError::resource_not_found(format!("Unknown resource: {}", uri), None)
            })?;

            Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(content, uri.clone())],
            })
        }
    }
}
