//! Configuration loading and management.
//!
//! Credentials and the search string come from a JSON (or TOML) file, the
//! Graph and login endpoints from built-in defaults with environment variable overrides.

use crate::error::ConfigError;
use crate::secure::SecureString;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration file read when `ENTRA_FINDER_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Microsoft identity platform host.
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Base URL for Microsoft Graph API.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Scope requested with the client credentials grant.
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Applications requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest `$top` Graph accepts for the applications collection.
const MAX_PAGE_SIZE: u32 = 999;

const KEY_TENANT_ID: &str = "TENANT_ID";
const KEY_CLIENT_ID: &str = "CLIENT_ID";
const KEY_CLIENT_SECRET: &str = "CLIENT_SECRET";
const KEY_SEARCH_STRING: &str = "SEARCH_STRING";

/// Credentials and search input for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: SecureString,
    pub search_string: String,
}

/// The file as written on disk. Every key is optional here so a missing one
/// can be reported by name instead of as a generic decode failure.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "TENANT_ID")]
    tenant_id: Option<String>,
    #[serde(rename = "CLIENT_ID")]
    client_id: Option<String>,
    #[serde(rename = "CLIENT_SECRET")]
    client_secret: Option<String>,
    #[serde(rename = "SEARCH_STRING")]
    search_string: Option<String>,
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Config {
    /// Load configuration from `ENTRA_FINDER_CONFIG` or `config.json`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("ENTRA_FINDER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::from_path(&path)
    }

    /// Load configuration from a specific file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        debug!("Read configuration from {:?}", path);

        let raw: RawConfig = match Format::from_path(path) {
            Format::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
        }
        .map_err(|reason| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason,
        })?;

        Self::from_raw(raw, path)
    }

    fn from_raw(raw: RawConfig, path: &Path) -> Result<Self, ConfigError> {
        let required = |key: &'static str, value: Option<String>| {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingKey {
                    key,
                    path: path.to_path_buf(),
                })
        };

        Ok(Self {
            tenant_id: required(KEY_TENANT_ID, raw.tenant_id)?,
            client_id: required(KEY_CLIENT_ID, raw.client_id)?,
            client_secret: required(KEY_CLIENT_SECRET, raw.client_secret)?.into(),
            search_string: required(KEY_SEARCH_STRING, raw.search_string)?,
        })
    }
}

/// Endpoints and paging used against Entra ID and Microsoft Graph.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub authority_host: String,
    pub graph_base_url: String,
    pub scope: String,
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            scope: GRAPH_DEFAULT_SCOPE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ApiConfig {
    /// Defaults with environment variable overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(host) = env::var("ENTRA_AUTHORITY_HOST") {
            config.authority_host = host;
        }

        if let Ok(base_url) = env::var("ENTRA_GRAPH_BASE_URL") {
            config.graph_base_url = base_url;
        }

        if let Ok(page_size) = env::var("ENTRA_PAGE_SIZE") {
            config.page_size = parse_page_size(&page_size)?;
        }

        Ok(config)
    }

    /// Get the token URL for a tenant.
    pub fn token_url(&self, tenant: &str) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host.trim_end_matches('/'),
            tenant
        )
    }

    /// Graph base URL without a trailing slash.
    pub fn graph_base(&self) -> &str {
        self.graph_base_url.trim_end_matches('/')
    }
}

fn parse_page_size(value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=MAX_PAGE_SIZE).contains(n))
        .ok_or_else(|| ConfigError::InvalidValue {
            key: "ENTRA_PAGE_SIZE",
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn write_config(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const FULL_JSON: &str = r#"{
        "TENANT_ID": "test-tenant",
        "CLIENT_ID": "test-client",
        "CLIENT_SECRET": "s3cret",
        "SEARCH_STRING": "example.com"
    }"#;

    #[test]
    fn test_load_json() {
        let file = write_config(".json", FULL_JSON);
        let config = Config::from_path(file.path()).unwrap();

        assert_eq!(config.tenant_id, "test-tenant");
        assert_eq!(config.client_id, "test-client");
        assert_eq!(config.client_secret.as_str(), "s3cret");
        assert_eq!(config.search_string, "example.com");
    }

    #[test]
    fn test_load_toml() {
        let file = write_config(
            ".toml",
            r#"
TENANT_ID = "test-tenant"
CLIENT_ID = "test-client"
CLIENT_SECRET = "s3cret"
SEARCH_STRING = "example.com"
"#,
        );
        let config = Config::from_path(file.path()).unwrap();
        assert_eq!(config.search_string, "example.com");
    }

    #[test]
    fn test_each_missing_key_is_reported() {
        for key in [
            KEY_TENANT_ID,
            KEY_CLIENT_ID,
            KEY_CLIENT_SECRET,
            KEY_SEARCH_STRING,
        ] {
            let mut value: serde_json::Value = serde_json::from_str(FULL_JSON).unwrap();
            value.as_object_mut().unwrap().remove(key);
            let file = write_config(".json", &value.to_string());

            match Config::from_path(file.path()) {
                Err(ConfigError::MissingKey { key: missing, .. }) => assert_eq!(missing, key),
                other => panic!("expected MissingKey for {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let file = write_config(
            ".json",
            r#"{"TENANT_ID": "t", "CLIENT_ID": "c", "CLIENT_SECRET": "  ", "SEARCH_STRING": "x"}"#,
        );
        let result = Config::from_path(file.path());
        assert!(matches!(
            result,
            Err(ConfigError::MissingKey {
                key: "CLIENT_SECRET",
                ..
            })
        ));
    }

    #[test]
    fn test_null_value_counts_as_missing() {
        let file = write_config(
            ".json",
            r#"{"TENANT_ID": null, "CLIENT_ID": "c", "CLIENT_SECRET": "s", "SEARCH_STRING": "x"}"#,
        );
        let result = Config::from_path(file.path());
        assert!(matches!(
            result,
            Err(ConfigError::MissingKey {
                key: "TENANT_ID",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_path(&dir.path().join("config.json"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_config(".json", "{ TENANT_ID: ");
        let result = Config::from_path(file.path());
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_non_string_value_is_malformed() {
        let file = write_config(
            ".json",
            r#"{"TENANT_ID": 42, "CLIENT_ID": "c", "CLIENT_SECRET": "s", "SEARCH_STRING": "x"}"#,
        );
        let result = Config::from_path(file.path());
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_secret_not_in_debug_output() {
        let file = write_config(".json", FULL_JSON);
        let config = Config::from_path(file.path()).unwrap();
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("s3cret"));
    }

    #[test]
    fn test_urls() {
        let api = ApiConfig::default();
        assert_eq!(
            api.token_url("test-tenant"),
            "https://login.microsoftonline.com/test-tenant/oauth2/v2.0/token"
        );
        assert_eq!(api.graph_base(), "https://graph.microsoft.com/v1.0");
        assert_eq!(api.scope, "https://graph.microsoft.com/.default");
    }

    #[test]
    fn test_trailing_slashes_are_trimmed() {
        let api = ApiConfig {
            authority_host: "http://127.0.0.1:8080/".into(),
            graph_base_url: "http://127.0.0.1:8080/v1.0/".into(),
            ..ApiConfig::default()
        };
        assert_eq!(
            api.token_url("t"),
            "http://127.0.0.1:8080/t/oauth2/v2.0/token"
        );
        assert_eq!(api.graph_base(), "http://127.0.0.1:8080/v1.0");
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("250").unwrap(), 250);
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("1000").is_err());
        assert!(matches!(
            parse_page_size("lots"),
            Err(ConfigError::InvalidValue {
                key: "ENTRA_PAGE_SIZE",
                ..
            })
        ));
    }
}
