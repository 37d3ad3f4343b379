//! Invoice upload tool.
//!
//! Sends a local invoice file (PDF, Factur-X, UBL or CII XML) as a multipart
//! form. The path must pass [`validate_path`] against the configured upload
//! root before anything is read.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::INVOICES_PATH;
use crate::core::api::{ApiClient, ApiRequest, Upload};
use crate::core::config::Config;
use crate::core::validate_path;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    SharedClient, error_result, non_empty, parse_params, render_response, tool_model,
};

/// Parameters for uploading an invoice file.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InvoiceUploadParams {
    #[schemars(description = "Path of the local invoice file to upload")]
    pub file_path: String,

    #[schemars(description = "Declared file format (e.g. 'facturx', 'ubl', 'cii'); detected by the API when omitted")]
    #[serde(default)]
    pub format: Option<String>,

    #[schemars(description = "Tenant ID overriding the session default")]
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Invoice upload tool.
pub struct InvoiceUploadTool;

impl InvoiceUploadTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "invoice_upload";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Upload a local invoice file (PDF, Factur-X, UBL or CII) to create \
        an invoice. The file must be inside the server's configured upload directory.";

    #[instrument(skip_all, fields(path = %params.file_path))]
    pub async fn execute(
        params: &InvoiceUploadParams,
        config: &Config,
        client: &ApiClient,
    ) -> CallToolResult {
        info!("Invoice upload tool called");

        let path = match validate_path(&params.file_path, &config.security) {
            Ok(path) => path,
            Err(e) => return error_result(&ToolError::from(e).to_string()),
        };

        let mut upload = Upload::new(path);
        if let Some(format) = non_empty(&params.format) {
            upload = upload.field("format", format);
        }

        let request = ApiRequest::post()
            .upload(upload)
            .tenant_opt(non_empty(&params.tenant_id));
        let path = format!("{}/upload", INVOICES_PATH);
        render_response(client.request(&path, request).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model::<InvoiceUploadParams>(Self::NAME, Self::DESCRIPTION)
    }

    /// Create a ToolRoute bound to the configuration and shared API client.
    pub fn create_route<S>(config: Arc<Config>, client: SharedClient) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let config = config.clone();
            let client = client.clone();
            async move {
                let params: InvoiceUploadParams = parse_params(args)?;
                Ok(Self::execute(&params, &config, &client).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::Session;
    use crate::core::api::transport::RequestBody;
    use crate::domains::tools::definitions::common::testing::{is_error, mock_client, result_text};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn config_with_root(root: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.security.root_path = Some(root.to_path_buf());
        config
    }

    #[tokio::test]
    async fn test_upload_sends_multipart() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("facture.xml");
        fs::write(&file, b"<Invoice/>").unwrap();

        let (client, transport) = mock_client(Session::new("https://api.test"));
        transport.push_json(201, json!({"id": "inv_9", "status": "draft"}));

        let params = InvoiceUploadParams {
            file_path: file.to_string_lossy().to_string(),
            format: Some("ubl".to_string()),
            tenant_id: None,
        };
        let result =
            InvoiceUploadTool::execute(&params, &config_with_root(dir.path()), &client).await;

        assert!(!is_error(&result));
        assert!(result_text(&result).contains("inv_9"));

        let sent = &transport.requests()[0];
        assert_eq!(sent.url, "https://api.test/api/v1/invoices/upload");
        match &sent.body {
            RequestBody::Multipart(form) => {
                assert_eq!(form.field_name, "file");
                assert_eq!(form.file_name, "facture.xml");
                assert_eq!(form.bytes, b"<Invoice/>");
                assert_eq!(form.fields, vec![("format".to_string(), "ubl".to_string())]);
            }
            other => panic!("Expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_outside_root_is_rejected() {
        let root = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let file = elsewhere.path().join("secret.pdf");
        fs::write(&file, b"%PDF").unwrap();

        let (client, transport) = mock_client(Session::new("https://api.test"));
        let params = InvoiceUploadParams {
            file_path: file.to_string_lossy().to_string(),
            format: None,
            tenant_id: None,
        };
        let result =
            InvoiceUploadTool::execute(&params, &config_with_root(root.path()), &client).await;

        assert!(is_error(&result));
        assert!(result_text(&result).starts_with("Upload rejected:"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let (client, transport) = mock_client(Session::new("https://api.test"));

        let params = InvoiceUploadParams {
            file_path: dir.path().join("nope.pdf").to_string_lossy().to_string(),
            format: None,
            tenant_id: None,
        };
        let result =
            InvoiceUploadTool::execute(&params, &config_with_root(dir.path()), &client).await;

        assert!(is_error(&result));
        assert!(result_text(&result).contains("does not exist"));
        assert!(transport.requests().is_empty());
    }
}
