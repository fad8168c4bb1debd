//! Pollinations MCP Common Library
//!
//! Shared utilities for configuration, model definitions, error handling,
//! transport selection, and tracing for the Pollinations MCP server.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod tracing;
pub mod transport;


pub use config::Config;
pub use error::{ConfigError, Error, Generation, Result};
pub use models::{ImageModel, ModelCatalog, ModelEntry, ModelRegistry, TextModel};
pub use server::{McpServerBuilder, ServerError, shutdown_channel};
pub use transport::{Transport, TransportArgs, TransportMode};
