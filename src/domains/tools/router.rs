//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; this module only wires them
//! to the shared configuration and API client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::api::ApiClient;
use crate::core::config::Config;

use super::definitions::{
    ApiRequestTool, AuthLoginTool, AuthRefreshTool, AuthStatusTool, InvoiceDownloadPdfTool,
    InvoiceGetTool, InvoiceUploadTool, InvoicesListTool, TenantSelectTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>, client: Arc<ApiClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(AuthLoginTool::create_route(client.clone()))
        .with_route(AuthRefreshTool::create_route(client.clone()))
        .with_route(AuthStatusTool::create_route(client.clone()))
        .with_route(TenantSelectTool::create_route(client.clone()))
        .with_route(InvoicesListTool::create_route(client.clone()))
        .with_route(InvoiceGetTool::create_route(client.clone()))
        .with_route(InvoiceDownloadPdfTool::create_route(client.clone()))
        .with_route(InvoiceUploadTool::create_route(config, client.clone()))
        .with_route(ApiRequestTool::create_route(client))
}
