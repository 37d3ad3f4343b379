//! Invoice listing tool.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::INVOICES_PATH;
use crate::core::api::{ApiClient, ApiRequest};
use crate::domains::tools::definitions::common::{
    SharedClient, non_empty, parse_params, render_response, tool_model,
};

/// Parameters for listing invoices.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct InvoicesListParams {
    #[schemars(description = "Page number, starting at 1")]
    #[serde(default)]
    pub page: Option<u32>,

    #[schemars(description = "Number of invoices per page")]
    #[serde(default)]
    pub limit: Option<u32>,

    #[schemars(description = "Filter by status (e.g. 'draft', 'sent', 'paid')")]
    #[serde(default)]
    pub status: Option<String>,

    #[schemars(description = "Free-text search on number, customer or supplier")]
    #[serde(default)]
    pub search: Option<String>,

    #[schemars(description = "Tenant ID overriding the session default")]
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Invoice listing tool.
pub struct InvoicesListTool;

impl InvoicesListTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "invoices_list";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List invoices of the current tenant, optionally filtered by status \
        or a search term. Results are paginated with page and limit.";

    #[instrument(skip_all)]
    pub async fn execute(params: &InvoicesListParams, client: &ApiClient) -> CallToolResult {
        info!("Invoices list tool called: {:?}", params);

        let request = ApiRequest::get()
            .query_opt("page", params.page)
            .query_opt("limit", params.limit)
            .query_opt("status", non_empty(&params.status))
            .query_opt("search", non_empty(&params.search))
            .tenant_opt(non_empty(&params.tenant_id));

        render_response(client.request(INVOICES_PATH, request).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<InvoicesListParams>(Self::NAME, Self::DESCRIPTION)
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
                let params: InvoicesListParams = parse_params(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
