//! Session status tool.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::api::{API_KEY_PREFIX, ApiClient, Session};
use crate::domains::tools::definitions::common::{
    SharedClient, parse_params, success_result, tool_model,
};

/// The status tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct AuthStatusParams {}

/// Status tool - describes the current session. No network calls.
pub struct AuthStatusTool;

impl AuthStatusTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "auth_status";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Show the current API session: base URL, whether an access token \
        (API key or bearer token) and refresh token are set, the default tenant and the last token refresh. \
        Secrets are never shown.";

    pub async fn execute(_params: &AuthStatusParams, client: &ApiClient) -> CallToolResult {
        let session = client.session().get().await;
        success_result(describe(&session))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<AuthStatusParams>(Self::NAME, Self::DESCRIPTION)
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
                let params: AuthStatusParams = parse_params(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}

fn describe(session: &Session) -> String {
    let token = match session.access_token.as_deref() {
        Some(t) if t.starts_with(API_KEY_PREFIX) => "set (API key)",
        Some(_) => "set (bearer token)",
        None => "not set",
    };
    let refresh = if session.refresh_token.is_some() {
        "set"
    } else {
        "not set"
    };
    let tenant = session.default_tenant_id.as_deref().unwrap_or("none");
    let refreshed = session
        .last_refreshed_at
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());

    format!(
        "API: {}\nAccess token: {}\nRefresh token: {}\nDefault tenant: {}\nLast token update: {}",
        session.base_url, token, refresh, tenant, refreshed
    )
}
