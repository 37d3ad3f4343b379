//! Token refresh tool.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::core::api::ApiClient;
use crate::domains::tools::definitions::common::{
    SharedClient, parse_params, render_response, success_result, tool_model,
};

/// The refresh tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct AuthRefreshParams {}

/// Refresh tool - exchanges the stored refresh token for a new token pair.
pub struct AuthRefreshTool;

impl AuthRefreshTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "auth_refresh";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Refresh the session's access token using the stored refresh token. \
        Expired tokens are also refreshed automatically, so this is only needed to renew early.";

    pub async fn execute(_params: &AuthRefreshParams, client: &ApiClient) -> CallToolResult {
        info!("Refresh tool called");

        let response = client.refresh().await;
        if response.is_ok() {
            success_result("Access token refreshed.".to_string())
        } else {
            render_response(response)
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<AuthRefreshParams>(Self::NAME, Self::DESCRIPTION)
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
                let params: AuthRefreshParams = parse_params(args)?;
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
    async fn test_refresh_updates_session() {
        let (client, transport) =
            mock_client(Session::new("https://api.test").with_refresh_token("r1"));
        transport.push_json(200, json!({"token": "t2", "refresh_token": "r2"}));

        let result = AuthRefreshTool::execute(&AuthRefreshParams::default(), &client).await;

        assert!(!is_error(&result));
        assert!(!result_text(&result).contains("t2"));
        let session = client.session().get().await;
        assert_eq!(session.access_token.as_deref(), Some("t2"));
        assert_eq!(session.refresh_token.as_deref(), Some("r2"));
    }

    #[tokio::test]
    async fn test_refresh_without_token_reports_error() {
        let (client, _transport) = mock_client(Session::new("https://api.test"));

        let result = AuthRefreshTool::execute(&AuthRefreshParams::default(), &client).await;

        assert!(is_error(&result));
        assert_eq!(result_text(&result), "Error: No refresh token available");
    }
}
