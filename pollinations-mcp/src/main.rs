//! Pollinations MCP Server
//!
//! MCP server for image and text generation using the Pollinations API.

use anyhow::Result;
use clap::Parser;
use pollinations_mcp::PollinationsServer;
use pollinations_mcp_common::tracing::init_tracing;
use pollinations_mcp_common::{Config, McpServerBuilder, TransportArgs};

/// Command-line arguments for the Pollinations server.
#[derive(Parser, Debug)]
#[command(name = "pollinations-mcp")]
#[command(about = "MCP server for image and text generation using Pollinations AI")]
#[command(version)]
struct Args {
    /// Transport configuration
    #[command(flatten)]
    transport: TransportArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    tracing::info!("pollinations-mcp server starting...");

    let args = Args::parse();

    let config = Config::from_env()?;
    tracing::info!(
        image_base_url = %config.image_base_url,
        text_base_url = %config.text_base_url,
        "Configuration loaded"
    );

    let server = PollinationsServer::new(config)?;

    let transport = args.transport.into_transport();

    McpServerBuilder::new(server)
        .with_transport(transport)
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
