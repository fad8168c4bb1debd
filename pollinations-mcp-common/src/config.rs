//! Configuration module for loading environment variables and settings.

use crate::error::ConfigError;

/// Default base URL of the Pollinations image service.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.pollinations.ai";

/// Default base URL of the Pollinations text service.
pub const DEFAULT_TEXT_BASE_URL: &str = "https://text.pollinations.ai";

/// Default HTTP server port, used when `--port` and `PORT` are unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the image generation service (no trailing slash)
    pub image_base_url: String,
    /// Base URL of the text generation service (no trailing slash)
    pub text_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            text_base_url: DEFAULT_TEXT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and .env file.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if a base URL override is not an
    /// http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let image_base_url = match std::env::var("POLLINATIONS_IMAGE_URL") {
            Ok(url) => normalize_base_url("POLLINATIONS_IMAGE_URL", &url)?,
            Err(_) => DEFAULT_IMAGE_BASE_URL.to_string(),
        };

        let text_base_url = match std::env::var("POLLINATIONS_TEXT_URL") {
            Ok(url) => normalize_base_url("POLLINATIONS_TEXT_URL", &url)?,
            Err(_) => DEFAULT_TEXT_BASE_URL.to_string(),
        };

        Ok(Self {
            image_base_url,
            text_base_url,
        })
    }

    /// Build a config that talks to the given base URLs.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for non-http(s) URLs.
    pub fn with_base_urls(image_base_url: &str, text_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            image_base_url: normalize_base_url("image_base_url", image_base_url)?,
            text_base_url: normalize_base_url("text_base_url", text_base_url)?,
        })
    }

    /// Get the image endpoint for an already percent-encoded prompt.
    pub fn image_endpoint(&self, encoded_prompt: &str) -> String {
        format!("{}/prompt/{}", self.image_base_url, encoded_prompt)
    }

    /// Get the text generation endpoint.
    pub fn text_endpoint(&self) -> String {
        format!("{}/", self.text_base_url)
    }
}

/// Validate a base URL and strip trailing slashes.
pub fn normalize_base_url(name: &str, url: &str) -> Result<String, ConfigError> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::invalid_value(
            name,
            format!("'{}' must start with http:// or https://", url),
        ));
    }
    Ok(url.trim_end_matches('/').to_string())
}
