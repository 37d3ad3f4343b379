//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the remote API client, server
//! lifecycle management, and transport layer abstractions.

pub mod api;
pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod transport;

pub use api::ApiClient;
pub use config::Config;
pub use error::{Error, Result};
pub use security::{PathSecurityError, validate_path};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
