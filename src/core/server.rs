//! MCP Server implementation and lifecycle management.
//!
//! The server only exposes tools. Each tool is defined in its own file under
//! `domains/tools/definitions/` and calls the remote API through the shared
//! [`ApiClient`]; the router is built in `domains/tools/router.rs`.

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;

use super::api::ApiClient;
use super::config::Config;
use super::error;
use crate::domains::tools::build_tool_router;

const INSTRUCTIONS: &str = "Tools for an e-invoicing platform. Authenticate with auth_login \
    (or a configured API key), pick a tenant with tenant_select, then use the invoice tools \
    or api_request for any other endpoint. Binary downloads are returned as base64.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Client shared by every tool call.
    client: Arc<ApiClient>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server over an existing API client.
    pub fn new(config: Config, client: Arc<ApiClient>) -> Self {
        let config = Arc::new(config);

        Self {
            tool_router: build_tool_router::<Self>(config.clone(), client.clone()),
            config,
            client,
        }
    }

    /// Validate the configuration and build the server with a reqwest-backed
    /// client seeded from it.
    pub fn from_config(config: Config) -> error::Result<Self> {
        config.validate()?;
        let client = Arc::new(ApiClient::from_config(&config.api)?);
        Ok(Self::new(config, client))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the API client.
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
