//! Request descriptor passed to the executor.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default multipart field name for uploaded files.
pub const DEFAULT_UPLOAD_FIELD: &str = "file";

/// HTTP methods supported by the remote API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file to send as a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    /// Local path of the file to attach.
    pub path: PathBuf,

    /// Form field carrying the file.
    pub field_name: String,

    /// Extra scalar form fields appended after the file.
    pub extra_fields: Vec<(String, String)>,
}

impl Upload {
    /// Upload the file at `path` under the default `file` field.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            field_name: DEFAULT_UPLOAD_FIELD.to_string(),
            extra_fields: Vec::new(),
        }
    }

    /// Use a different form field for the file.
    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    /// Append an extra form field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_fields.push((name.into(), value.into()));
        self
    }
}

/// Everything the executor needs to know about one call besides its path.
///
/// Built with a fluent API:
///
/// ```rust
/// use einvoice_mcp_server::core::api::ApiRequest;
///
/// let request = ApiRequest::get()
///     .query("page", 1)
///     .query_opt("status", None::<String>)
///     .tenant("acme");
/// assert_eq!(request.query_pairs(), vec![("page".to_string(), "1".to_string())]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub query: Vec<(String, Value)>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
    pub upload: Option<Upload>,
    pub bypass_auth: bool,
    pub expect_binary: bool,
    pub tenant_id: Option<String>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    pub fn post() -> Self {
        Self::new(HttpMethod::Post)
    }

    pub fn put() -> Self {
        Self::new(HttpMethod::Put)
    }

    pub fn patch() -> Self {
        Self::new(HttpMethod::Patch)
    }

    pub fn delete() -> Self {
        Self::new(HttpMethod::Delete)
    }

    /// Set a query parameter, replacing any earlier value for the same key.
    /// `null` and empty strings are dropped when the query string is built.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// Add a query parameter only if it is present.
    pub fn query_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Add all entries of a JSON object as query parameters.
    pub fn query_map(self, map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().fold(self, |request, (key, value)| request.query(key, value))
    }

    /// Add a caller-supplied header. Computed headers take precedence.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Send a JSON body. Ignored when an upload is attached.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Send a multipart upload instead of a JSON body.
    pub fn upload(mut self, upload: Upload) -> Self {
        self.upload = Some(upload);
        self
    }

    /// Return the response body as base64 instead of parsing it.
    pub fn binary(mut self) -> Self {
        self.expect_binary = true;
        self
    }

    /// Skip authorization header injection and the refresh protocol.
    pub fn bypass_auth(mut self) -> Self {
        self.bypass_auth = true;
        self
    }

    /// Override the session's default tenant for this call.
    pub fn tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Override the tenant only when one is given.
    pub fn tenant_opt(mut self, tenant_id: Option<String>) -> Self {
        if tenant_id.is_some() {
            self.tenant_id = tenant_id;
        }
        self
    }

    /// Stringified query parameters, with absent and empty values removed.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .filter_map(|(key, value)| query_value(value).map(|v| (key.clone(), v)))
            .collect()
    }
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_method_is_get() {
        assert_eq!(ApiRequest::default().method, HttpMethod::Get);
    }

    #[test]
    fn test_query_drops_absent_and_empty() {
        let request = ApiRequest::get()
            .query("page", 1)
            .query_opt("limit", None::<u32>)
            .query("search", "")
            .query("cursor", Value::Null);
        assert_eq!(
            request.query_pairs(),
            vec![("page".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn test_query_stringifies_scalars() {
        let request = ApiRequest::get()
            .query("archived", false)
            .query("amount", 12.5)
            .query("status", "paid")
            .query("ids", json!(["a", "b", 3]));
        assert_eq!(
            request.query_pairs(),
            vec![
                ("archived".to_string(), "false".to_string()),
                ("amount".to_string(), "12.5".to_string()),
                ("status".to_string(), "paid".to_string()),
                ("ids".to_string(), "a,b,3".to_string()),
            ]
        );
    }

    #[test]
    fn test_repeated_query_key_keeps_last_value() {
        let request = ApiRequest::get()
            .query("page", 1)
            .query("limit", 20)
            .query("page", 2);
        assert_eq!(
            request.query_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );

        let map = json!({"page": 3}).as_object().cloned().unwrap();
        let pairs = request.query_map(map).query_pairs();
        assert_eq!(pairs[0], ("page".to_string(), "3".to_string()));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_query_map_keeps_zero() {
        let map = json!({"page": 0, "q": ""}).as_object().cloned().unwrap();
        let pairs = ApiRequest::get().query_map(map).query_pairs();
        assert_eq!(pairs, vec![("page".to_string(), "0".to_string())]);
    }

    #[test]
    fn test_upload_defaults_to_file_field() {
        let upload = Upload::new("/tmp/invoice.pdf").field("format", "facturx");
        assert_eq!(upload.field_name, "file");
        assert_eq!(
            upload.extra_fields,
            vec![("format".to_string(), "facturx".to_string())]
        );
    }

    #[test]
    fn test_method_deserializes_uppercase() {
        let method: HttpMethod = serde_json::from_str("\"PATCH\"").unwrap();
        assert_eq!(method, HttpMethod::Patch);
        assert_eq!(method.to_string(), "PATCH");
    }

    #[test]
    fn test_tenant_opt_keeps_existing_on_none() {
        let request = ApiRequest::get().tenant("a").tenant_opt(None);
        assert_eq!(request.tenant_id.as_deref(), Some("a"));
    }
}
