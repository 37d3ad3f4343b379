//! Session store for the remote API connection.
//!
//! The session holds the base URL, the current token pair and the default
//! tenant. It is built once at startup from [`ApiConfig`] and shared with the
//! executor; login, refresh and tenant selection mutate it in place.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::core::config::ApiConfig;

/// Connection and identity state for the remote API.
#[derive(Clone, Default)]
pub struct Session {
    /// Base URL of the remote API, without trailing slash.
    pub base_url: String,

    /// Current access token (pre-shared API key or bearer token).
    pub access_token: Option<String>,

    /// Refresh token used to obtain a new access token.
    pub refresh_token: Option<String>,

    /// Tenant sent with every request unless overridden per call.
    pub default_tenant_id: Option<String>,

    /// When the token pair was last replaced by a login or refresh.
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a session for the given base URL with no credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            ..Default::default()
        }
    }

    /// Create a session from API configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            base_url: normalize_base_url(&config.base_url),
            access_token: config.token.clone(),
            refresh_token: config.refresh_token.clone(),
            default_tenant_id: config.tenant_id.clone(),
            last_refreshed_at: None,
        }
    }

    /// Set the access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the refresh token.
    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Set the default tenant.
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.default_tenant_id = Some(tenant_id.into());
        self
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("default_tenant_id", &self.default_tenant_id)
            .field("last_refreshed_at", &self.last_refreshed_at)
            .finish()
    }
}

/// A partial session update.
///
/// For each field, `None` leaves the session untouched, `Some(None)` clears
/// the value and `Some(Some(v))` replaces it.
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub access_token: Option<Option<String>>,
    pub refresh_token: Option<Option<String>>,
    pub default_tenant_id: Option<Option<String>>,
    pub last_refreshed_at: Option<Option<DateTime<Utc>>>,
}

impl SessionUpdate {
    /// Replace the token pair and stamp the refresh time.
    ///
    /// A missing refresh token keeps the stored one.
    pub fn tokens(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: Some(Some(access_token.into())),
            refresh_token: refresh_token.map(Some),
            last_refreshed_at: Some(Some(Utc::now())),
            ..Default::default()
        }
    }

    /// Set or clear the default tenant.
    pub fn tenant(tenant_id: Option<String>) -> Self {
        Self {
            default_tenant_id: Some(tenant_id),
            ..Default::default()
        }
    }
}

/// Shared, mutable holder of the [`Session`].
///
/// Reads hand out snapshots, so no lock is held across network I/O.
/// Concurrent refreshes are last-write-wins.
#[derive(Debug)]
pub struct SessionStore {
    inner: RwLock<Session>,
}

impl SessionStore {
    /// Create a store holding the given session.
    pub fn new(session: Session) -> Self {
        Self {
            inner: RwLock::new(session),
        }
    }

    /// Create a store seeded from API configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(Session::from_config(config))
    }

    /// Get a snapshot of the current session.
    pub async fn get(&self) -> Session {
        self.inner.read().await.clone()
    }

    /// Shallow-merge the given fields into the session.
    ///
    /// No validation is performed.
    pub async fn update(&self, update: SessionUpdate) {
        let mut session = self.inner.write().await;

        if let Some(token) = update.access_token {
            session.access_token = token;
        }
        if let Some(token) = update.refresh_token {
            session.refresh_token = token;
        }
        if let Some(tenant) = update.default_tenant_id {
            session.default_tenant_id = tenant;
        }
        if let Some(at) = update.last_refreshed_at {
            session.last_refreshed_at = at;
        }

        debug!(
            "Session updated (token: {}, refresh token: {}, tenant: {:?})",
            session.access_token.is_some(),
            session.refresh_token.is_some(),
            session.default_tenant_id
        );
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        assert_eq!(Session::new("https://api.test/").base_url, "https://api.test");
        assert_eq!(Session::new("https://api.test//").base_url, "https://api.test");
        assert_eq!(Session::new("https://api.test").base_url, "https://api.test");
    }

    #[test]
    fn test_session_from_config() {
        let config = ApiConfig {
            base_url: "https://api.test/".to_string(),
            token: Some("af_key".to_string()),
            refresh_token: None,
            tenant_id: Some("tenant-1".to_string()),
            ..Default::default()
        };
        let session = Session::from_config(&config);
        assert_eq!(session.base_url, "https://api.test");
        assert_eq!(session.access_token.as_deref(), Some("af_key"));
        assert!(session.refresh_token.is_none());
        assert_eq!(session.default_tenant_id.as_deref(), Some("tenant-1"));
    }

    #[test]
    fn test_session_redacted_in_debug() {
        let session = Session::new("https://api.test")
            .with_access_token("secret-access")
            .with_refresh_token("secret-refresh");
        let debug_str = format!("{:?}", session);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("secret-access"));
        assert!(!debug_str.contains("secret-refresh"));
    }

    #[tokio::test]
    async fn test_update_is_visible_to_next_get() {
        let store = SessionStore::new(Session::new("https://api.test").with_tenant("a"));
        store.update(SessionUpdate::tenant(Some("b".to_string()))).await;
        assert_eq!(store.get().await.default_tenant_id.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_update_leaves_untouched_fields() {
        let store = SessionStore::new(
            Session::new("https://api.test")
                .with_access_token("old")
                .with_refresh_token("keep-me")
                .with_tenant("t"),
        );

        store.update(SessionUpdate::tokens("new", None)).await;

        let session = store.get().await;
        assert_eq!(session.access_token.as_deref(), Some("new"));
        assert_eq!(session.refresh_token.as_deref(), Some("keep-me"));
        assert_eq!(session.default_tenant_id.as_deref(), Some("t"));
        assert!(session.last_refreshed_at.is_some());
    }

    #[test]
    fn test_update_can_clear_tenant() {
        let store = SessionStore::new(Session::new("https://api.test").with_tenant("t"));
        tokio_test::block_on(store.update(SessionUpdate::tenant(None)));
        let session = tokio_test::block_on(store.get());
        assert!(session.default_tenant_id.is_none());
    }
}
