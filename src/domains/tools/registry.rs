//! Tool Registry - metadata for every available tool.
//!
//! Lists tool names and `Tool` models without needing an API client, e.g.
//! for startup logging.

use rmcp::model::Tool;

use super::definitions::{
    ApiRequestTool, AuthLoginTool, AuthRefreshTool, AuthStatusTool, InvoiceDownloadPdfTool,
    InvoiceGetTool, InvoiceUploadTool, InvoicesListTool, TenantSelectTool,
};

/// Tool registry - the list of all available tools.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            AuthLoginTool::NAME,
            AuthRefreshTool::NAME,
            AuthStatusTool::NAME,
            TenantSelectTool::NAME,
            InvoicesListTool::NAME,
            InvoiceGetTool::NAME,
            InvoiceDownloadPdfTool::NAME,
            InvoiceUploadTool::NAME,
            ApiRequestTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            AuthLoginTool::to_tool(),
            AuthRefreshTool::to_tool(),
            AuthStatusTool::to_tool(),
            TenantSelectTool::to_tool(),
            InvoicesListTool::to_tool(),
            InvoiceGetTool::to_tool(),
            InvoiceDownloadPdfTool::to_tool(),
            InvoiceUploadTool::to_tool(),
            ApiRequestTool::to_tool(),
        ]
    }
}
