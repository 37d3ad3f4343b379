//! HTTP transport used by the executor.
//!
//! The executor only speaks in [`HttpRequest`] / [`HttpResponse`]; the
//! reqwest-backed [`ReqwestTransport`] is the production implementation.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};

use super::error::{ApiError, ApiResult};
use super::request::HttpMethod;

/// Fully resolved outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Look up a header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Encoded request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,

    /// Serialized JSON; the content type is already among the headers.
    Json(Vec<u8>),

    /// Multipart form; the transport picks the boundary and content type.
    Multipart(MultipartBody),
}

/// In-memory multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    pub field_name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub fields: Vec<(String, String)>,
}

/// A received HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,

    /// Body bytes, or why they could not be read.
    pub body: Result<Vec<u8>, String>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the response.
///
/// Implementations return `Err` only when no response was received.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport, optionally with a request timeout.
    pub fn new(timeout: Option<Duration>) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));

        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder.body(bytes),
            RequestBody::Multipart(multipart) => {
                let mut form = Form::new().part(
                    multipart.field_name,
                    Part::bytes(multipart.bytes).file_name(multipart.file_name),
                );
                for (name, value) in multipart.fields {
                    form = form.text(name, value);
                }
                builder.multipart(form)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| e.to_string());

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Scripted transport for tests.
#[cfg(test)]
pub(crate) mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays queued responses in order and records every request sent.
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<ApiResult<HttpResponse>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, response: ApiResult<HttpResponse>) -> &Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
            self.push(Ok(json_response(status, body)))
        }

        pub fn push_raw(&self, status: u16, content_type: Option<&str>, body: &[u8]) -> &Self {
            self.push(Ok(HttpResponse {
                status,
                content_type: content_type.map(str::to_string),
                body: Ok(body.to_vec()),
            }))
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
            self.requests()
                .into_iter()
                .filter(|r| r.url.split('?').next().is_some_and(|u| u.ends_with(path)))
                .collect()
        }
    }

    pub fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: Ok(body.to_string().into_bytes()),
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::network("no scripted response")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), "af_key".to_string());
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "https://api.test/x".to_string(),
            headers,
            body: RequestBody::Empty,
        };
        assert_eq!(request.header("authorization"), Some("af_key"));
        assert_eq!(request.header("x-tenant-id"), None);
    }

    #[test]
    fn test_response_success_range() {
        let mut response = HttpResponse {
            status: 204,
            content_type: None,
            body: Ok(Vec::new()),
        };
        assert!(response.is_success());
        response.status = 301;
        assert!(!response.is_success());
        response.status = 199;
        assert!(!response.is_success());
    }

    #[test]
    fn test_reqwest_transport_builds() {
        assert!(ReqwestTransport::new(Some(Duration::from_secs(5))).is_ok());
    }
}
