//! Invoice PDF download tool.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::invoice_path;
use crate::core::api::{ApiClient, ApiRequest};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    SharedClient, error_result, non_empty, parse_params, render_response, tool_model,
};

/// Parameters for downloading an invoice PDF.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InvoiceDownloadPdfParams {
    #[schemars(description = "Invoice ID")]
    pub invoice_id: String,

    #[schemars(description = "Tenant ID overriding the session default")]
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Invoice PDF download tool.
pub struct InvoiceDownloadPdfTool;

impl InvoiceDownloadPdfTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "invoice_download_pdf";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Download the PDF rendition of an invoice. \
        Returns a JSON object with the base64-encoded file and its content type.";

    pub async fn execute(params: &InvoiceDownloadPdfParams, client: &ApiClient) -> CallToolResult {
        if params.invoice_id.trim().is_empty() {
            return error_result(&ToolError::invalid_arguments("invoice_id must not be empty").to_string());
        }
        info!("Downloading PDF for invoice {}", params.invoice_id);

        let path = format!("{}/pdf", invoice_path(&params.invoice_id));
        let request = ApiRequest::get()
            .binary()
            .tenant_opt(non_empty(&params.tenant_id));
        render_response(client.request(&path, request).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<InvoiceDownloadPdfParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Create a ToolRoute bound to the shared API client.
    pub fn create_route<S>(client: SharedClient) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let client = client.clone();
            async move {
                let params: InvoiceDownloadPdfParams = parse_params(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
