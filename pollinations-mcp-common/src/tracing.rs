//! Tracing initialization for the Pollinations MCP server.
//!
//! Logs always go to stderr: with the stdio transport, stdout carries the
//! MCP JSON-RPC stream and must stay clean.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls the log level and filtering. Examples:
//!   - `RUST_LOG=debug` - Enable debug logging for all modules
//!   - `RUST_LOG=pollinations_mcp=debug` - Enable debug for the server crate
//!   - `RUST_LOG=warn,pollinations_mcp_common=debug` - Warn by default, debug for common

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
    registry::Registry,
    util::TryInitError,
};

fn subscriber(default_level: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_span_events(FmtSpan::NONE);

    Registry::default().with(env_filter).with(fmt_layer)
}

/// Initialize the tracing subscriber with `RUST_LOG` filtering (default `info`).
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
///
/// ```no_run
/// use pollinations_mcp_common::tracing::init_tracing;
///
/// init_tracing();
/// tracing::info!("Server starting");
/// ```
pub fn init_tracing() {
    subscriber("info").init();
}

/// Initialize tracing with a custom default level used when `RUST_LOG` is unset.
pub fn init_tracing_with_default(default_level: &str) {
    subscriber(default_level).init();
}

/// Try to initialize tracing, returning an error if already initialized.
pub fn try_init_tracing() -> Result<(), TryInitError> {
    subscriber("info").try_init()
}
