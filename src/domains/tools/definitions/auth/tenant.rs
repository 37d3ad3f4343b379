//! Tenant selection tool.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::core::api::{ApiClient, SessionUpdate};
use crate::domains::tools::definitions::common::{
    SharedClient, non_empty, parse_params, success_result, tool_model,
};

/// Parameters for the tenant selection tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TenantSelectParams {
    /// Tenant to use by default. Omit or leave empty to clear it.
    #[schemars(description = "Tenant ID to use by default (omit to clear)")]
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Tenant selection tool - sets the default tenant of the session.
pub struct TenantSelectTool;

impl TenantSelectTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "tenant_select";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Set the default tenant sent with every request. \
        Individual tools can still override it with their own tenant_id. Omit tenant_id to clear it.";

    pub async fn execute(params: &TenantSelectParams, client: &ApiClient) -> CallToolResult {
        let tenant = non_empty(&params.tenant_id);
        info!("Selecting default tenant: {:?}", tenant);

        client
            .session()
            .update(SessionUpdate::tenant(tenant.clone()))
            .await;

        match tenant {
            Some(t) => success_result(format!("Default tenant set to {}.", t)),
            None => success_result("Default tenant cleared.".to_string()),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<TenantSelectParams>(Self::NAME, Self::DESCRIPTION)
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
                let params: TenantSelectParams = parse_params(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
