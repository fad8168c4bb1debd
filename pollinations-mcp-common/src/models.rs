//! Model definitions and registry for Pollinations image and text models.
//!
//! The enums are the typed form used in tool arguments; the static tables
//! carry the descriptions served by `get_available_models` and the
//! `pollinations://models` resource.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image generation models accepted by the image service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum ImageModel {
    #[default]
    #[serde(rename = "flux")]
    Flux,
    #[serde(rename = "flux-realism")]
    FluxRealism,
    #[serde(rename = "flux-anime")]
    FluxAnime,
    #[serde(rename = "flux-3d")]
    Flux3d,
    #[serde(rename = "turbo")]
    Turbo,
}

impl ImageModel {
    /// Every image model, in catalog order.
    pub const ALL: [ImageModel; 5] = [
        ImageModel::Flux,
        ImageModel::FluxRealism,
        ImageModel::FluxAnime,
        ImageModel::Flux3d,
        ImageModel::Turbo,
    ];

    /// Wire name of the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::Flux => "flux",
            ImageModel::FluxRealism => "flux-realism",
            ImageModel::FluxAnime => "flux-anime",
            ImageModel::Flux3d => "flux-3d",
            ImageModel::Turbo => "turbo",
        }
    }

    /// Human-readable description of the model.
    pub fn description(&self) -> &'static str {
        match self {
            ImageModel::Flux => "High-quality general purpose image generation (default)",
            ImageModel::FluxRealism => "Photorealistic images with natural lighting and detail",
            ImageModel::FluxAnime => "Anime and manga style illustrations",
            ImageModel::Flux3d => "3D rendered style images",
            ImageModel::Turbo => "Fast image generation with lower latency",
        }
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text generation models accepted by the text service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum TextModel {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "mistral")]
    Mistral,
    #[serde(rename = "mistral-large")]
    MistralLarge,
    #[serde(rename = "claude-3.5-sonnet")]
    Claude35Sonnet,
    #[serde(rename = "llama-3.3-70b")]
    Llama3370b,
    #[serde(rename = "qwen-2.5-coder-32b")]
    Qwen25Coder32b,
    #[serde(rename = "searchgpt")]
    SearchGpt,
}

impl TextModel {
    /// Every text model, in catalog order.
    pub const ALL: [TextModel; 7] = [
        TextModel::OpenAi,
        TextModel::Mistral,
        TextModel::MistralLarge,
        TextModel::Claude35Sonnet,
        TextModel::Llama3370b,
        TextModel::Qwen25Coder32b,
        TextModel::SearchGpt,
    ];

    /// Wire name of the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextModel::OpenAi => "openai",
            TextModel::Mistral => "mistral",
            TextModel::MistralLarge => "mistral-large",
            TextModel::Claude35Sonnet => "claude-3.5-sonnet",
            TextModel::Llama3370b => "llama-3.3-70b",
            TextModel::Qwen25Coder32b => "qwen-2.5-coder-32b",
            TextModel::SearchGpt => "searchgpt",
        }
    }

    /// Human-readable description of the model.
    pub fn description(&self) -> &'static str {
        match self {
            TextModel::OpenAi => "OpenAI GPT-4o mini, balanced general purpose model (default)",
            TextModel::Mistral => "Mistral Nemo, fast open-weight model",
            TextModel::MistralLarge => "Mistral Large, high capability reasoning model",
            TextModel::Claude35Sonnet => "Anthropic Claude 3.5 Sonnet",
            TextModel::Llama3370b => "Meta Llama 3.3 70B Instruct",
            TextModel::Qwen25Coder32b => "Qwen 2.5 Coder 32B, specialized for programming tasks",
            TextModel::SearchGpt => "SearchGPT with real-time web search",
        }
    }
}

impl fmt::Display for TextModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `{name, description}` entry in the model listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelEntry {
    pub name: &'static str,
    pub description: &'static str,
}

/// The full model listing, serialized as `{image_models, text_models}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelCatalog {
    pub image_models: Vec<ModelEntry>,
    pub text_models: Vec<ModelEntry>,
}

/// Registry for looking up model definitions.
pub struct ModelRegistry;

impl ModelRegistry {
    /// Build the ordered listing of every model.
    pub fn catalog() -> ModelCatalog {
        ModelCatalog {
            image_models: ImageModel::ALL
                .iter()
                .map(|m| ModelEntry {
                    name: m.as_str(),
                    description: m.description(),
                })
                .collect(),
            text_models: TextModel::ALL
                .iter()
                .map(|m| ModelEntry {
                    name: m.as_str(),
                    description: m.description(),
                })
                .collect(),
        }
    }

    /// Wire names of all image models.
    pub fn image_model_names() -> Vec<&'static str> {
        ImageModel::ALL.iter().map(ImageModel::as_str).collect()
    }

    /// Wire names of all text models.
    pub fn text_model_names() -> Vec<&'static str> {
        TextModel::ALL.iter().map(TextModel::as_str).collect()
    }
}
