//! Generation handler for the Pollinations MCP server.
//!
//! This module provides the `PollinationsHandler` struct and the typed
//! parameter types for the image and text generation calls made against
//! the Pollinations HTTP API.

use pollinations_mcp_common::config::Config;
use pollinations_mcp_common::error::{Error, Generation};
use pollinations_mcp_common::models::{ImageModel, ModelCatalog, ModelRegistry, TextModel};
use reqwest::header::CONTENT_TYPE;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Default width and height of generated images, in pixels.
pub const DEFAULT_DIMENSION: u32 = 1024;

/// Default sampling temperature for text generation.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Lowest accepted temperature.
pub const MIN_TEMPERATURE: f64 = 0.0;

/// Highest accepted temperature.
pub const MAX_TEMPERATURE: f64 = 2.0;

/// MIME type reported for image content parts.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Message returned alongside a generated image URL.
pub const IMAGE_SUCCESS_MESSAGE: &str = "Image generated successfully. Use the imageUrl to view or download the image.";

/// Message used when the prompt is missing or blank.
pub const PROMPT_REQUIRED: &str = "Prompt is required";

const USER_AGENT: &str = concat!("pollinations-mcp/", env!("CARGO_PKG_VERSION"));

/// Image generation parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct ImageGenerateParams {
    /// Text description of the image to generate
    pub prompt: String,

    /// Image width in pixels
    #[serde(default = "default_dimension")]
    #[schemars(range(min = 1))]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_dimension")]
    #[schemars(range(min = 1))]
    pub height: u32,

    /// Random seed for reproducible generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,

    /// Image model to use
    #[serde(default)]
    pub model: ImageModel,

    /// Remove the Pollinations logo from the image
    #[serde(default = "default_true")]
    pub nologo: bool,

    /// Let the service rewrite the prompt for more detailed results
    #[serde(default)]
    pub enhance: bool,
}

/// Text generation parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct TextGenerateParams {
    /// The user message to respond to
    pub prompt: String,

    /// Text model to use
    #[serde(default)]
    pub model: TextModel,

    /// Random seed for reproducible generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,

    /// Sampling temperature between 0 and 2
    #[serde(default = "default_temperature")]
    #[schemars(range(min = 0, max = 2))]
    pub temperature: f64,

    /// Maximum number of tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub max_tokens: Option<u32>,

    /// Optional system prompt that steers the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// Parameters for the model listing, which takes no arguments.
#[derive(Debug, Clone, Default, JsonSchema)]
#[schemars(description = "No arguments are needed")]
pub struct ModelsListParams {}

fn default_dimension() -> u32 {
    DEFAULT_DIMENSION
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_true() -> bool {
    true
}

/// Validation error details for generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

pub(crate) fn into_error(errors: Vec<ValidationError>) -> Error {
    let messages: Vec<String> = errors.iter().map(ValidationError::to_string).collect();
    Error::validation(messages.join("; "))
}

fn check_prompt(prompt: &str, errors: &mut Vec<ValidationError>) {
    if prompt.trim().is_empty() {
        errors.push(ValidationError {
            field: "prompt".to_string(),
            message: PROMPT_REQUIRED.to_string(),
        });
    }
}

impl ImageGenerateParams {
    /// Build parameters with every optional field at its default.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
            seed: None,
            model: ImageModel::default(),
            nologo: true,
            enhance: false,
        }
    }

    /// Validate the parameters.
    ///
    /// # Returns
    /// - `Ok(())` if all parameters are valid
    /// - `Err(Vec<ValidationError>)` with all validation errors
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        check_prompt(&self.prompt, &mut errors);

        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 {
                errors.push(ValidationError {
                    field: field.to_string(),
                    message: format!("{} must be at least 1", field),
                });
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl TextGenerateParams {
    /// Build parameters with every optional field at its default.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: TextModel::default(),
            seed: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            system: None,
        }
    }

    /// Validate the parameters.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        check_prompt(&self.prompt, &mut errors);

        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.temperature) {
            errors.push(ValidationError {
                field: "temperature".to_string(),
                message: format!(
                    "temperature must be between {} and {}, got {}",
                    MIN_TEMPERATURE, MAX_TEMPERATURE, self.temperature
                ),
            });
        }

        if self.max_tokens == Some(0) {
            errors.push(ValidationError {
                field: "max_tokens".to_string(),
                message: "max_tokens must be at least 1".to_string(),
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Build the chat request body sent to the text service.
    pub fn to_request(&self) -> TextRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system {
            messages.push(ChatMessage {
                role: Role::System,
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: Role::User,
            content: self.prompt.clone(),
        });

        TextRequest {
            messages,
            model: self.model,
            temperature: self.temperature,
            seed: self.seed,
            max_tokens: self.max_tokens,
        }
    }
}

// =============================================================================
// Text API Request Types
// =============================================================================

/// Chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One chat message in a text request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// JSON body posted to the text service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRequest {
    pub messages: Vec<ChatMessage>,
    pub model: TextModel,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

// =============================================================================
// Results
// =============================================================================

/// Outcome of a successful image generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerateResult {
    pub success: bool,
    pub image_url: String,
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub model: ImageModel,
    pub seed: Option<i64>,
    pub message: String,
}

/// Outcome of a successful text generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextGenerateResult {
    pub success: bool,
    /// Raw response body from the text service
    pub response: String,
    pub model: TextModel,
    pub prompt: String,
    pub seed: Option<i64>,
    pub temperature: f64,
}

/// Generation handler.
///
/// Performs one HTTP call per generation request; nothing is shared between
/// calls apart from the connection pool inside `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct PollinationsHandler {
    /// Application configuration.
    pub config: Config,
    /// HTTP client for API requests.
    pub http: reqwest::Client,
}

impl PollinationsHandler {
    /// Create a new handler with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(level = "debug", name = "pollinations_handler_new", skip_all)]
    pub fn new(config: Config) -> Result<Self, Error> {
        debug!("Initializing PollinationsHandler");

        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(config, http))
    }

    /// Create a handler around an existing HTTP client.
    pub fn with_client(config: Config, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Build the image URL for the given parameters.
    ///
    /// The prompt becomes a percent-encoded path segment; the query string
    /// always carries width, height, model, nologo and enhance, plus seed when set.
    pub fn image_url(&self, params: &ImageGenerateParams) -> String {
        let encoded_prompt = urlencoding::encode(&params.prompt);
        let mut url = format!(
            "{}?width={}&height={}&model={}&nologo={}&enhance={}",
            self.config.image_endpoint(&encoded_prompt),
            params.width,
            params.height,
            params.model,
            params.nologo,
            params.enhance
        );
        if let Some(seed) = params.seed {
            url.push_str(&format!("&seed={}", seed));
        }
        url
    }

    /// Generate an image and return its URL.
    ///
    /// The service renders images on request, so a HEAD request is enough to
    /// confirm the URL resolves; the pixels are never downloaded here.
    ///
    /// `params` must already have passed validation in
    /// [`crate::operation::Operation::parse`].
    ///
    /// # Errors
    /// * `Error::Api` - if the service answers with a non-success status
    /// * `Error::Http` - if the request could not be completed
    #[instrument(level = "info", name = "generate_image", skip(self, params), fields(model = %params.model, width = params.width, height = params.height))]
    pub async fn generate_image(&self, params: ImageGenerateParams) -> Result<ImageGenerateResult, Error> {
        debug_assert!(params.validate().is_ok(), "parameters must be validated before dispatch");

        let url = self.image_url(&params);
        debug!(url = %url, "Checking image URL");

        let response = self.http.head(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::from_status(Generation::Image, &url, status));
        }

        info!("Image URL resolved");

        Ok(ImageGenerateResult {
            success: true,
            image_url: url,
            prompt: params.prompt,
            width: params.width,
            height: params.height,
            model: params.model,
            seed: params.seed,
            message: IMAGE_SUCCESS_MESSAGE.to_string(),
        })
    }

    /// Generate text from a prompt.
    ///
    /// `params` must already have passed validation in
    /// [`crate::operation::Operation::parse`].
    ///
    /// # Errors
    /// * `Error::Api` - if the service answers with a non-success status
    /// * `Error::Http` - if the request or body read fails
    #[instrument(level = "info", name = "generate_text", skip(self, params), fields(model = %params.model, temperature = params.temperature))]
    pub async fn generate_text(&self, params: TextGenerateParams) -> Result<TextGenerateResult, Error> {
        debug_assert!(params.validate().is_ok(), "parameters must be validated before dispatch");

        let endpoint = self.config.text_endpoint();
        let request = params.to_request();
        debug!(endpoint = %endpoint, messages = request.messages.len(), "Calling text API");

        let response = self
            .http
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::from_status(Generation::Text, &endpoint, status));
        }

        // The service answers with plain text, not JSON.
        let body = response.text().await?;
        info!(response_len = body.len(), "Text generated");

        Ok(TextGenerateResult {
            success: true,
            response: body,
            model: params.model,
            prompt: params.prompt,
            seed: params.seed,
            temperature: params.temperature,
        })
    }

    /// List every available model. No network call is made.
    pub fn available_models(&self) -> ModelCatalog {
        ModelRegistry::catalog()
    }
}
