//! Common utilities shared across tools.
//!
//! Turns executor results into tool output and holds the small helpers every
//! tool definition needs (argument parsing, Tool metadata).

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    handler::server::tool::schema_for_type,
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::core::api::{ApiResponse, ResponseData};

/// Render an executor result as tool output.
///
/// Successes become text content (JSON pretty-printed, binary as a
/// `{base64, contentType}` object); failures become error results carrying
/// the status, message and any structured details.
pub fn render_response(response: ApiResponse) -> CallToolResult {
    match response {
        ApiResponse::Success { status, data } => match data {
            ResponseData::Json(value) => success_result(to_pretty_json(&value)),
            ResponseData::Text(text) if text.is_empty() => {
                success_result(format!("Success (HTTP {})", status))
            }
            ResponseData::Text(text) => success_result(text),
            ResponseData::Binary(payload) => success_result(to_pretty_json(&payload)),
            ResponseData::Empty => success_result(format!("Success (HTTP {} No Content)", status)),
        },
        ApiResponse::Failure {
            status,
            error,
            details,
        } => {
            let mut message = if status == 0 {
                format!("Error: {}", error)
            } else {
                format!("Error (HTTP {}): {}", status, error)
            };
            if let Some(details) = details {
                message.push_str("\n\nDetails:\n");
                message.push_str(&to_pretty_json(&details));
            }
            error_result(&message)
        }
    }
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Deserialize tool arguments into a params struct.
pub fn parse_params<P: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<P, McpError> {
    let args = arguments.unwrap_or_default();
    serde_json::from_value(Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Build the Tool model for a params type.
pub fn tool_model<P: JsonSchema>(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: schema_for_type::<P>().into(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Percent-encode a value used as a single path segment.
pub fn path_segment(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Empty strings mean "not given" for optional tool arguments.
pub fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}

/// Shared state handed to every tool route.
pub type SharedClient = Arc<crate::core::api::ApiClient>;
