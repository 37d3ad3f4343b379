//! Response envelope returned by the executor.

use serde::Serialize;
use serde_json::Value;

/// Base64-encoded binary response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryPayload {
    pub base64: String,
    pub content_type: Option<String>,
}

/// Payload of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Parsed JSON body.
    Json(Value),

    /// Body of a non-JSON response, decoded as text.
    Text(String),

    /// Body requested as binary.
    Binary(BinaryPayload),

    /// No body (204).
    Empty,
}

/// Outcome of one executor call. Exactly one variant per call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Success {
        status: u16,
        data: ResponseData,
    },
    /// `status == 0` means no response was received at all.
    Failure {
        status: u16,
        error: String,
        details: Option<Value>,
    },
}

impl ApiResponse {
    pub fn success(status: u16, data: ResponseData) -> Self {
        Self::Success { status, data }
    }

    pub fn failure(status: u16, error: impl Into<String>) -> Self {
        Self::Failure {
            status,
            error: error.into(),
            details: None,
        }
    }

    pub fn failure_with_details(status: u16, error: impl Into<String>, details: Value) -> Self {
        Self::Failure {
            status,
            error: error.into(),
            details: Some(details),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }

    /// The payload if this is a success.
    pub fn data(&self) -> Option<&ResponseData> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// The parsed JSON body if this is a JSON success.
    pub fn json(&self) -> Option<&Value> {
        match self.data() {
            Some(ResponseData::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// The error message if this is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error, .. } => Some(error),
            Self::Success { .. } => None,
        }
    }

    /// Wire form: `{ok, status, data}` or `{ok, status, error, details?}`.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Success { status, data } => serde_json::json!({
                "ok": true,
                "status": status,
                "data": data,
            }),
            Self::Failure {
                status,
                error,
                details,
            } => {
                let mut value = serde_json::json!({
                    "ok": false,
                    "status": status,
                    "error": error,
                });
                if let (Some(details), Some(obj)) = (details, value.as_object_mut()) {
                    obj.insert("details".to_string(), details.clone());
                }
                value
            }
        }
    }
}
