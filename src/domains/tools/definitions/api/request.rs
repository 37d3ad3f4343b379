//! Generic request tool.
//!
//! Reaches any endpoint of the remote API through the same executor as the
//! dedicated tools, so authentication, tenant scoping and refresh behave the
//! same way.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::core::api::{ApiClient, ApiRequest, HttpMethod};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    SharedClient, error_result, non_empty, parse_params, render_response, tool_model,
};

/// Parameters for a raw API call.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ApiRequestParams {
    #[schemars(description = "HTTP method (GET, POST, PUT, PATCH, DELETE). Defaults to GET")]
    #[serde(default)]
    pub method: HttpMethod,

    #[schemars(description = "API path relative to the base URL, e.g. '/api/v1/customers'")]
    pub path: String,

    #[schemars(description = "Query parameters; arrays are joined with commas")]
    #[serde(default)]
    pub query: Option<Map<String, Value>>,

    #[schemars(description = "JSON request body")]
    #[serde(default)]
    pub body: Option<Value>,

    #[schemars(description = "Tenant ID overriding the session default")]
    #[serde(default)]
    pub tenant_id: Option<String>,

    #[schemars(description = "Return the response as base64 (for files such as PDFs or archives)")]
    #[serde(default)]
    pub expect_binary: bool,
}

/// Generic request tool.
pub struct ApiRequestTool;

impl ApiRequestTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "api_request";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Call any endpoint of the e-invoicing API. Use this for operations \
        without a dedicated tool (customers, suppliers, credit notes, webhooks, reports...). \
        The session's credentials and default tenant are applied automatically.";

    #[instrument(skip_all, fields(method = %params.method, path = %params.path))]
    pub async fn execute(params: &ApiRequestParams, client: &ApiClient) -> CallToolResult {
        info!("API request tool called");

        let path = match normalize_path(&params.path) {
            Ok(path) => path,
            Err(e) => return error_result(&e.to_string()),
        };

        let mut request = ApiRequest::new(params.method).tenant_opt(non_empty(&params.tenant_id));
        if let Some(query) = &params.query {
            request = request.query_map(query.clone());
        }
        if let Some(body) = &params.body {
            request = request.json(body.clone());
        }
        if params.expect_binary {
            request = request.binary();
        }

        render_response(client.request(&path, request).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<ApiRequestParams>(Self::NAME, Self::DESCRIPTION)
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
                let params: ApiRequestParams = parse_params(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}

/// Paths are relative to the configured base URL; full URLs would leak the
/// session's credentials to another host.
fn normalize_path(path: &str) -> Result<String, ToolError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(ToolError::invalid_arguments("path must not be empty"));
    }
    let route = path.split('?').next().unwrap_or(path);
    if route.contains("://") || route.starts_with("//") {
        return Err(ToolError::invalid_arguments(
            "path must be relative to the API base URL, not a full URL",
        ));
    }
    if path.starts_with('/') {
        Ok(path.to_string())
    } else {
        Ok(format!("/{}", path))
    }
}
