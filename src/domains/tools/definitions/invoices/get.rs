//! Single invoice lookup tool.

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

/// Parameters for fetching one invoice.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InvoiceGetParams {
    #[schemars(description = "Invoice ID")]
    pub invoice_id: String,

    #[schemars(description = "Tenant ID overriding the session default")]
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Invoice lookup tool.
pub struct InvoiceGetTool;

impl InvoiceGetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "invoice_get";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the full details of one invoice: parties, lines, totals, \
        status and lifecycle history.";

    pub async fn execute(params: &InvoiceGetParams, client: &ApiClient) -> CallToolResult {
        if params.invoice_id.trim().is_empty() {
            return error_result(&ToolError::invalid_arguments("invoice_id must not be empty").to_string());
        }
        info!("Fetching invoice {}", params.invoice_id);

        let request = ApiRequest::get().tenant_opt(non_empty(&params.tenant_id));
        render_response(client.request(&invoice_path(&params.invoice_id), request).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<InvoiceGetParams>(Self::NAME, Self::DESCRIPTION)
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
                let params: InvoiceGetParams = parse_params(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::Session;
    use crate::domains::tools::definitions::common::testing::{is_error, mock_client, result_text};
    use serde_json::json;

    #[tokio::test]
    async fn test_get_encodes_id() {
        let (client, transport) = mock_client(Session::new("https://api.test"));
        transport.push_json(200, json!({"id": "2024/001", "total": "120.00"}));

        let params = InvoiceGetParams {
            invoice_id: "2024/001".to_string(),
            tenant_id: None,
        };
        let result = InvoiceGetTool::execute(&params, &client).await;

        assert!(!is_error(&result));
        assert_eq!(
            transport.requests()[0].url,
            "https://api.test/api/v1/invoices/2024%2F001"
        );
    }

    #[tokio::test]
    async fn test_get_rejects_empty_id() {
        let (client, transport) = mock_client(Session::new("https://api.test"));

        let params = InvoiceGetParams {
            invoice_id: "  ".to_string(),
            tenant_id: None,
        };
        let result = InvoiceGetTool::execute(&params, &client).await;

        assert!(is_error(&result));
        assert!(result_text(&result).contains("invoice_id"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let (client, transport) = mock_client(Session::new("https://api.test"));
        transport.push_json(404, json!({"message": "Invoice not found"}));

        let params = InvoiceGetParams {
            invoice_id: "missing".to_string(),
            tenant_id: None,
        };
        let result = InvoiceGetTool::execute(&params, &client).await;

        let text = result_text(&result);
        assert!(is_error(&result));
        assert!(text.starts_with("Error (HTTP 404): Invoice not found\n\nDetails:\n"));
        assert!(text.contains("\"message\": \"Invoice not found\""));
    }
}
