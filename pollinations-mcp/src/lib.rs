//! Pollinations MCP Server Library
//!
//! This library exposes Pollinations AI image and text generation as MCP tools.

pub mod catalog;
pub mod handler;
pub mod operation;
pub mod resources;
pub mod server;

pub use handler::{ImageGenerateParams, ImageGenerateResult, PollinationsHandler, TextGenerateParams, TextGenerateResult};
pub use operation::{Operation, OperationKind};
pub use server::PollinationsServer;
