//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Production API host used when `MCP_API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "https://api.einvoice.app";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Remote API connection and credentials.
    pub api: ApiConfig,

    /// Restrictions on local files the server may upload.
    pub security: SecurityConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Remote API connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the e-invoicing API.
    pub base_url: String,

    /// Access token or pre-shared API key (`af_...`).
    pub token: Option<String>,

    /// Refresh token for renewing the access token.
    pub refresh_token: Option<String>,

    /// Default tenant for tenant-scoped endpoints.
    pub tenant_id: Option<String>,

    /// Email for the one-time login at startup.
    pub email: Option<String>,

    /// Password for the one-time login at startup.
    pub password: Option<String>,

    /// Request timeout in seconds. Unset means the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Credentials for auto-login, if both are configured.
    pub fn login_credentials(&self) -> Option<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        }
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("tenant_id", &self.tenant_id)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            refresh_token: None,
            tenant_id: None,
            email: None,
            password: None,
            timeout_secs: None,
        }
    }
}

/// Configuration for upload path validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Optional root directory for uploaded files.
    /// If None, any readable file may be uploaded.
    pub root_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "einvoice-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            api: ApiConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_API_TOKEN`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();
        config.api = ApiConfig::from_env();

        if let Ok(root_path) = std::env::var("MCP_ROOT_PATH") {
            config.security.root_path = Some(PathBuf::from(root_path));
            info!("Upload root directory set to {:?}", config.security.root_path);
        } else {
            warn!("MCP_ROOT_PATH not set - any readable file may be uploaded.");
        }

        config
    }

    /// Check settings that would otherwise only fail on first use.
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.to_ascii_lowercase();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::config(format!(
                "MCP_API_BASE_URL must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }

        if let Some(root) = &self.security.root_path {
            if !root.is_dir() {
                return Err(Error::config(format!(
                    "MCP_ROOT_PATH '{}' is not an existing directory",
                    root.display()
                )));
            }
        }

        Ok(())
    }
}

impl ApiConfig {
    /// Load API settings from `MCP_API_*` / `MCP_TENANT_ID`.
    pub fn from_env() -> Self {
        let mut api = Self::default();

        if let Some(url) = env_non_empty("MCP_API_BASE_URL") {
            api.base_url = url;
        }

        api.token = env_non_empty("MCP_API_TOKEN");
        api.refresh_token = env_non_empty("MCP_API_REFRESH_TOKEN");
        api.tenant_id = env_non_empty("MCP_TENANT_ID");
        api.email = env_non_empty("MCP_API_EMAIL");
        api.password = env_non_empty("MCP_API_PASSWORD");

        if let Some(timeout) = env_non_empty("MCP_API_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => api.timeout_secs = Some(secs),
                Err(_) => warn!("Ignoring invalid MCP_API_TIMEOUT_SECS: {}", timeout),
            }
        }

        if api.token.is_some() {
            info!("API token loaded from environment");
        } else if api.login_credentials().is_none() {
            warn!(
                "No MCP_API_TOKEN or MCP_API_EMAIL/MCP_API_PASSWORD set. \
                 Use the auth_login tool before calling authenticated endpoints."
            );
        }

        api
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const API_VARS: &[&str] = &[
        "MCP_API_BASE_URL",
        "MCP_API_TOKEN",
        "MCP_API_REFRESH_TOKEN",
        "MCP_TENANT_ID",
        "MCP_API_EMAIL",
        "MCP_API_PASSWORD",
        "MCP_API_TIMEOUT_SECS",
    ];

    fn clear_api_vars() {
        for var in API_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_api_config_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_api_vars();
        unsafe {
            std::env::set_var("MCP_API_BASE_URL", "https://staging.einvoice.test/");
            std::env::set_var("MCP_API_TOKEN", "af_test_key");
            std::env::set_var("MCP_TENANT_ID", "tenant-42");
            std::env::set_var("MCP_API_TIMEOUT_SECS", "30");
        }

        let api = ApiConfig::from_env();
        assert_eq!(api.base_url, "https://staging.einvoice.test/");
        assert_eq!(api.token.as_deref(), Some("af_test_key"));
        assert_eq!(api.tenant_id.as_deref(), Some("tenant-42"));
        assert_eq!(api.timeout_secs, Some(30));
        assert!(api.refresh_token.is_none());

        clear_api_vars();
    }

    #[test]
    fn test_api_config_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_api_vars();
        unsafe {
            std::env::set_var("MCP_API_TOKEN", "");
            std::env::set_var("MCP_API_TIMEOUT_SECS", "soon");
        }

        let api = ApiConfig::from_env();
        assert_eq!(api.base_url, DEFAULT_API_BASE_URL);
        assert!(api.token.is_none());
        assert!(api.timeout_secs.is_none());

        clear_api_vars();
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.api.base_url = "api.einvoice.app".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.security.root_path = Some(dir.path().to_path_buf());
        assert!(config.validate().is_ok());

        config.security.root_path = Some(dir.path().join("missing"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("MCP_ROOT_PATH"));
    }

    #[test]
    fn test_login_credentials_require_both() {
        let mut api = ApiConfig {
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        assert!(api.login_credentials().is_none());

        api.password = Some("hunter2".to_string());
        assert_eq!(api.login_credentials(), Some(("ada@example.com", "hunter2")));
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let api = ApiConfig {
            token: Some("super_secret_token".to_string()),
            refresh_token: Some("super_secret_refresh".to_string()),
            password: Some("super_secret_password".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", api);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret"));
    }
}
