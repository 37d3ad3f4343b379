//! MCP Server Entry Point
//!
//! Initializes logging, loads and validates configuration, builds the server
//! (logging in with configured credentials if no token is set) and starts the server
//! with the configured transport.

use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use einvoice_mcp_server::core::{Config, McpServer, TransportService};
use einvoice_mcp_server::domains::tools::ToolRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("API base URL: {}", config.api.base_url);

    // Create the MCP server
    let server = McpServer::from_config(config.clone())?;
    let client = server.client();

    if config.api.token.is_none() {
        if let Some((email, password)) = config.api.login_credentials() {
            info!("Logging in as {}", email);
            let response = client.login(email, password).await;
            if !response.is_ok() {
                warn!(
                    "Startup login failed ({}); use the auth_login tool to authenticate",
                    response.error().unwrap_or("unknown error")
                );
            }
        }
    }

    info!(
        "Server initialized with {} tools: {}",
        ToolRegistry::tool_names().len(),
        ToolRegistry::tool_names().join(", ")
    );

    // Create and run the transport service
    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the MCP protocol on the stdio transport.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
