//! Error types for the common library.
//!
//! This module provides a unified error hierarchy using `thiserror` for consistent
//! error handling across the Pollinations MCP server.
//!
//! # Error Categories
//!
//! - `ConfigError`: Missing or invalid configuration
//! - `Error::UnknownTool` / `Error::Validation` / `Error::InvalidParams`: rejected
//!   before any network call is made
//! - `Error::Api`: non-success HTTP status from the Pollinations service
//! - `Error::Http`: connection-level failures (DNS, reset, timeout)
//! - `Error::Serialization`: JSON encoding failures

use thiserror::Error;

/// Message used when a failure carries no description of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Unified error type for the common library.
///
/// Every variant renders to the exact message that is reported back to the
/// MCP client inside a failure envelope.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (invalid env var values)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The requested tool is not part of the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Argument validation failures, rendered verbatim
    #[error("{0}")]
    Validation(String),

    /// Arguments that could not be decoded into the tool's parameter type
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Remote service answered with a non-success status.
    #[error("Failed to generate {generation}: {status_text}")]
    Api {
        /// Which generation call failed
        generation: Generation,
        /// The endpoint that was called
        endpoint: String,
        /// HTTP status code returned by the service
        status_code: u16,
        /// Reason phrase for the status
        status_text: String,
    },

    /// Network-level failure from the HTTP client
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new API error from a failed response status.
    ///
    /// # Example
    ///
    /// ```
    /// use pollinations_mcp_common::error::{Error, Generation};
    ///
    /// let err = Error::api(
    ///     Generation::Image,
    ///     "https://image.pollinations.ai/prompt/cat",
    ///     404,
    ///     "Not Found",
    /// );
    /// assert_eq!(err.to_string(), "Failed to generate image: Not Found");
    /// ```
    pub fn api(
        generation: Generation,
        endpoint: impl Into<String>,
        status_code: u16,
        status_text: impl Into<String>,
    ) -> Self {
        Error::Api {
            generation,
            endpoint: endpoint.into(),
            status_code,
            status_text: status_text.into(),
        }
    }

    /// Build an API error from a `reqwest` status code.
    ///
    /// Uses the canonical reason phrase, falling back to the numeric code.
    pub fn from_status(
        generation: Generation,
        endpoint: impl Into<String>,
        status: reqwest::StatusCode,
    ) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        Self::api(generation, endpoint, status.as_u16(), status_text)
    }

    /// Create a new validation error.
    ///
    /// # Example
    ///
    /// ```
    /// use pollinations_mcp_common::error::Error;
    ///
    /// let err = Error::validation("Prompt is required");
    /// assert_eq!(err.to_string(), "Prompt is required");
    /// ```
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Create a new unknown tool error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Error::UnknownTool(name.into())
    }

    /// Create a new invalid parameters error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Error::InvalidParams(message.into())
    }

    /// Message reported to the client for this error.
    ///
    /// Falls back to [`UNKNOWN_ERROR_MESSAGE`] when the rendered message is blank.
    pub fn failure_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Configuration errors.
///
/// These errors occur when loading or validating configuration from
/// environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl ConfigError {
    /// Create a new invalid value error.
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue(name.into(), reason.into())
    }
}

/// Generation call type for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// Image generation
    Image,
    /// Text generation
    Text,
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generation::Image => write!(f, "image"),
            Generation::Text => write!(f, "text"),
        }
    }
}

/// Result type alias using the unified Error type.
pub type Result<T> = std::result::Result<T, Error>;
