//! Typed dispatch for tool invocations.
//!
//! A `tools/call` request carries a tool name and an untyped JSON object.
//! [`Operation::parse`] turns that pair into one variant per tool, each
//! holding its validated, defaulted parameter struct.

use crate::handler::{ImageGenerateParams, PROMPT_REQUIRED, TextGenerateParams, into_error};
use pollinations_mcp_common::error::Error;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

/// Untyped tool arguments as received over MCP.
pub type Arguments = Map<String, Value>;

/// The tools exposed by the server, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    GenerateImage,
    GenerateText,
    GetAvailableModels,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::GenerateImage,
        OperationKind::GenerateText,
        OperationKind::GetAvailableModels,
    ];

    /// Tool name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::GenerateImage => "generate_image",
            OperationKind::GenerateText => "generate_text",
            OperationKind::GetAvailableModels => "get_available_models",
        }
    }

    /// Look up a tool by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    GenerateImage(ImageGenerateParams),
    GenerateText(TextGenerateParams),
    GetAvailableModels,
}

impl Operation {
    /// Parse a tool name and its raw arguments.
    ///
    /// Checks run in order: tool name, prompt presence, typed decoding with
    /// defaults, then range validation.
    ///
    /// # Errors
    /// * `Error::UnknownTool` - the name is not in the catalog
    /// * `Error::Validation` - the prompt is missing or a value is out of range
    /// * `Error::InvalidParams` - an argument has the wrong type or an unknown enum value
    pub fn parse(name: &str, arguments: Option<Arguments>) -> Result<Self, Error> {
        let kind = OperationKind::from_name(name).ok_or_else(|| Error::unknown_tool(name))?;
        let arguments = arguments.unwrap_or_default();

        match kind {
            OperationKind::GenerateImage => {
                require_prompt(&arguments)?;
                let params: ImageGenerateParams = decode(arguments)?;
                params.validate().map_err(into_error)?;
                Ok(Operation::GenerateImage(params))
            }
            OperationKind::GenerateText => {
                require_prompt(&arguments)?;
                let params: TextGenerateParams = decode(arguments)?;
                params.validate().map_err(into_error)?;
                Ok(Operation::GenerateText(params))
            }
            OperationKind::GetAvailableModels => Ok(Operation::GetAvailableModels),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::GenerateImage(_) => OperationKind::GenerateImage,
            Operation::GenerateText(_) => OperationKind::GenerateText,
            Operation::GetAvailableModels => OperationKind::GetAvailableModels,
        }
    }
}

/// A prompt that is absent, null, or a blank string counts as missing.
fn require_prompt(arguments: &Arguments) -> Result<(), Error> {
    match arguments.get("prompt") {
        None | Some(Value::Null) => Err(Error::validation(PROMPT_REQUIRED)),
        Some(Value::String(prompt)) if prompt.trim().is_empty() => Err(Error::validation(PROMPT_REQUIRED)),
        Some(_) => Ok(()),
    }
}

fn decode<T: DeserializeOwned>(arguments: Arguments) -> Result<T, Error> {
    serde_json::from_value(Value::Object(arguments)).map_err(|e| Error::invalid_params(e.to_string()))
}
