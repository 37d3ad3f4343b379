//! Authenticated request executor.
//!
//! Every call to the remote API goes through [`ApiClient::request`]. It builds
//! the URL and headers from the current [`Session`], encodes the body, sends
//! the request, refreshes the token pair once on a 401, and folds the outcome
//! into an [`ApiResponse`]. It never returns an error and never panics.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use super::error::{ApiError, ApiResult};
use super::request::ApiRequest;
use super::response::{ApiResponse, BinaryPayload, ResponseData};
use super::session::{Session, SessionStore, SessionUpdate};
use super::transport::{HttpRequest, HttpResponse, HttpTransport, MultipartBody, RequestBody, ReqwestTransport};
use crate::core::config::ApiConfig;

/// Tokens with this prefix are pre-shared API keys and are sent without the
/// `Bearer` scheme.
pub const API_KEY_PREFIX: &str = "af_";

/// Header scoping a request to one tenant.
pub const TENANT_HEADER: &str = "X-Tenant-ID";

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Exchanges a refresh token for a new token pair.
pub const REFRESH_PATH: &str = "/api/v1/auth/refresh";

/// Exchanges email and password for a token pair.
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

const JSON_PARSE_ERROR: &str = "Failed to parse JSON response";
const BINARY_ERROR_PLACEHOLDER: &str = "Failed to read error response";
const NO_REFRESH_TOKEN: &str = "No refresh token available";

/// Client for the remote e-invoicing API.
pub struct ApiClient {
    session: Arc<SessionStore>,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    /// Create a client over an existing session store and transport.
    pub fn new(session: Arc<SessionStore>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { session, transport }
    }

    /// Create a reqwest-backed client seeded from configuration.
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(config.timeout_secs.map(Duration::from_secs))?;
        Ok(Self::new(
            Arc::new(SessionStore::from_config(config)),
            Arc::new(transport),
        ))
    }

    /// The session store this client reads credentials from.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Execute a request against `path`, refreshing the token once on 401.
    #[instrument(skip_all, fields(method = %request.method, path = %path))]
    pub async fn request(&self, path: &str, request: ApiRequest) -> ApiResponse {
        let body = match encode_body(&request).await {
            Ok(body) => body,
            Err(e) => return failure_from(e),
        };

        let session = self.session.get().await;
        let response = match self.dispatch(path, &request, &session, &body).await {
            Ok(response) => response,
            Err(e) => return failure_from(e),
        };

        if response.status == 401 && !request.bypass_auth && session.refresh_token.is_some() {
            info!("Received 401, attempting token refresh");

            if self.refresh().await.is_ok() {
                let session = self.session.get().await;
                return match self.dispatch(path, &request, &session, &body).await {
                    Ok(retried) => parse_response(retried, request.expect_binary),
                    Err(e) => failure_from(e),
                };
            }

            warn!("Token refresh failed, returning original response");
        }

        parse_response(response, request.expect_binary)
    }

    /// Exchange the stored refresh token for a new token pair.
    pub async fn refresh(&self) -> ApiResponse {
        let Some(refresh_token) = self.session.get().await.refresh_token else {
            return ApiResponse::failure(0, NO_REFRESH_TOKEN);
        };

        let request = ApiRequest::post()
            .bypass_auth()
            .json(json!({ "refresh_token": refresh_token }));

        let response = self.execute_once(REFRESH_PATH, &request).await;
        let response = self.store_tokens(response).await;

        if response.is_ok() {
            info!("Access token refreshed");
        }
        response
    }

    /// Log in with email and password and store the returned token pair.
    pub async fn login(&self, email: &str, password: &str) -> ApiResponse {
        let request = ApiRequest::post()
            .bypass_auth()
            .json(json!({ "email": email, "password": password }));

        let response = self.execute_once(LOGIN_PATH, &request).await;
        let response = self.store_tokens(response).await;

        if response.is_ok() {
            info!("Logged in as {}", email);
        }
        response
    }

    /// Send once and parse, without the refresh protocol.
    async fn execute_once(&self, path: &str, request: &ApiRequest) -> ApiResponse {
        let body = match encode_body(request).await {
            Ok(body) => body,
            Err(e) => return failure_from(e),
        };

        let session = self.session.get().await;
        match self.dispatch(path, request, &session, &body).await {
            Ok(response) => parse_response(response, request.expect_binary),
            Err(e) => failure_from(e),
        }
    }

    async fn dispatch(
        &self,
        path: &str,
        request: &ApiRequest,
        session: &Session,
        body: &RequestBody,
    ) -> ApiResult<HttpResponse> {
        let url = build_url(&session.base_url, path, &request.query_pairs())?;
        let headers = build_headers(request, session, body);

        debug!("{} {}", request.method, url);

        let outbound = HttpRequest {
            method: request.method,
            url,
            headers,
            body: body.clone(),
        };

        self.transport.send(outbound).await.inspect_err(|e| {
            warn!("Request to {} failed: {}", path, e);
        })
    }

    /// Persist `token` / `refresh_token` from a successful auth response.
    async fn store_tokens(&self, response: ApiResponse) -> ApiResponse {
        if !response.is_ok() {
            return response;
        }

        let body = response.json();
        let token = body
            .and_then(|b| b.get("token"))
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty());

        let Some(token) = token else {
            return ApiResponse::failure(
                response.status(),
                "Authentication response did not contain a token",
            );
        };

        let refresh_token = body
            .and_then(|b| b.get("refresh_token"))
            .and_then(Value::as_str)
            .map(str::to_string);

        self.session
            .update(SessionUpdate::tokens(token, refresh_token))
            .await;

        response
    }
}

fn failure_from(err: ApiError) -> ApiResponse {
    ApiResponse::failure(0, err.to_string())
}

fn build_url(base_url: &str, path: &str, query: &[(String, String)]) -> ApiResult<String> {
    let mut url = String::with_capacity(base_url.len() + path.len() + 1);
    url.push_str(base_url);
    if !path.starts_with('/') {
        url.push('/');
    }
    url.push_str(path);

    if !query.is_empty() {
        let encoded =
            serde_urlencoded::to_string(query).map_err(|e| ApiError::encode(e.to_string()))?;
        url.push(if path.contains('?') { '&' } else { '?' });
        url.push_str(&encoded);
    }

    Ok(url)
}

fn build_headers(
    request: &ApiRequest,
    session: &Session,
    body: &RequestBody,
) -> BTreeMap<String, String> {
    let mut headers = request.headers.clone();

    if !request.bypass_auth {
        if let Some(token) = non_empty(session.access_token.as_deref()) {
            set_header(&mut headers, AUTHORIZATION_HEADER, authorization_value(token));
        }
    }

    let tenant = non_empty(request.tenant_id.as_deref())
        .or_else(|| non_empty(session.default_tenant_id.as_deref()));
    if let Some(tenant) = tenant {
        set_header(&mut headers, TENANT_HEADER, tenant.to_string());
    }

    match body {
        RequestBody::Json(_) => {
            set_header(&mut headers, CONTENT_TYPE_HEADER, "application/json".to_string());
        }
        RequestBody::Multipart(_) => {
            headers.retain(|k, _| !k.eq_ignore_ascii_case(CONTENT_TYPE_HEADER));
        }
        RequestBody::Empty => {}
    }

    headers
}

/// API keys go out verbatim; the key-based auth path rejects `Bearer`.
fn authorization_value(token: &str) -> String {
    if token.starts_with(API_KEY_PREFIX) {
        token.to_string()
    } else {
        format!("Bearer {}", token)
    }
}

fn set_header(headers: &mut BTreeMap<String, String>, name: &str, value: String) {
    headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value);
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

async fn encode_body(request: &ApiRequest) -> ApiResult<RequestBody> {
    if let Some(upload) = &request.upload {
        let bytes = tokio::fs::read(&upload.path)
            .await
            .map_err(|e| ApiError::upload_read(upload.path.clone(), e))?;

        let file_name = upload
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| upload.field_name.clone());

        return Ok(RequestBody::Multipart(MultipartBody {
            field_name: upload.field_name.clone(),
            file_name,
            bytes,
            fields: upload.extra_fields.clone(),
        }));
    }

    match &request.body {
        Some(body) => serde_json::to_vec(body)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::encode(e.to_string())),
        None => Ok(RequestBody::Empty),
    }
}

fn parse_response(response: HttpResponse, expect_binary: bool) -> ApiResponse {
    let ok = response.is_success();
    let HttpResponse {
        status,
        content_type,
        body,
    } = response;

    if status == 204 {
        return ApiResponse::success(204, ResponseData::Empty);
    }

    if expect_binary {
        if !ok {
            let text = body
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_else(|_| BINARY_ERROR_PLACEHOLDER.to_string());
            return ApiResponse::failure(status, text);
        }

        return match body {
            Ok(bytes) => ApiResponse::success(
                status,
                ResponseData::Binary(BinaryPayload {
                    base64: STANDARD.encode(&bytes),
                    content_type,
                }),
            ),
            Err(e) => ApiResponse::failure(status, format!("Failed to read response body: {}", e)),
        };
    }

    if !is_json(content_type.as_deref()) {
        let text = body
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default();

        if !ok {
            let error = if text.is_empty() {
                format!("HTTP {}", status)
            } else {
                text
            };
            return ApiResponse::failure(status, error);
        }
        return ApiResponse::success(status, ResponseData::Text(text));
    }

    let Some(value) = body
        .ok()
        .and_then(|b| serde_json::from_slice::<Value>(&b).ok())
    else {
        return ApiResponse::failure(status, JSON_PARSE_ERROR);
    };

    if !ok {
        let error = error_message(&value).unwrap_or_else(|| format!("HTTP {}", status));
        return ApiResponse::failure_with_details(status, error, value);
    }

    ApiResponse::success(status, ResponseData::Json(value))
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase())
        .is_some_and(|ct| ct.contains("application/json") || ct.contains("+json"))
}

/// First usable `message`, then `error`, from an error body.
fn error_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| match body.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Null | Value::String(_) | Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        })
}
