//! Login tool.
//!
//! Exchanges email and password for a token pair and stores it in the
//! session. Tokens are never echoed back to the client.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::api::ApiClient;
use crate::domains::tools::definitions::common::{
    SharedClient, parse_params, render_response, success_result, tool_model,
};

/// Parameters for the login tool.
#[derive(Clone, Deserialize, JsonSchema)]
pub struct AuthLoginParams {
    #[schemars(description = "Account email address")]
    pub email: String,

    #[schemars(description = "Account password")]
    pub password: String,
}

impl std::fmt::Debug for AuthLoginParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthLoginParams")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login tool - authenticates the session with email and password.
pub struct AuthLoginTool;

impl AuthLoginTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "auth_login";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Log in to the e-invoicing platform with email and password. \
        The returned access and refresh tokens are stored in the server session and used for all \
        subsequent calls; they are not included in the output.";

    #[instrument(skip_all, fields(email = %params.email))]
    pub async fn execute(params: &AuthLoginParams, client: &ApiClient) -> CallToolResult {
        info!("Login tool called");

        let response = client.login(&params.email, &params.password).await;
        if !response.is_ok() {
            return render_response(response);
        }

        let tenant = client.session().get().await.default_tenant_id;
        let mut message = format!("Logged in as {}. Session tokens updated.", params.email);
        if let Some(tenant) = tenant {
            message.push_str(&format!(" Default tenant: {}.", tenant));
        }
        success_result(message)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<AuthLoginParams>(Self::NAME, Self::DESCRIPTION)
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
                let params: AuthLoginParams = parse_params(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
