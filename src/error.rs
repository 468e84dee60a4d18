//! Error types for entra-uri-finder.
//!
//! Uses `thiserror` for library-style errors with automatic `Display` and `Error` implementations.
//! Every error is fatal: the run stops at the first one and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("HTTP client error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file '{}' not found; create it with TENANT_ID, CLIENT_ID, CLIENT_SECRET and SEARCH_STRING", .path.display())]
    NotFound { path: PathBuf },

    #[error("could not read configuration file '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode configuration file '{}': {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("'{key}' is missing or empty in '{}'", .path.display())]
    MissingKey { key: &'static str, path: PathBuf },

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Token acquisition errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    RequestFailed(String),

    #[error("token request rejected (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("token response could not be decoded (HTTP {status}): {body}")]
    MalformedResponse { status: u16, body: String },

    #[error("access token not found in the response: {body}")]
    MissingAccessToken { body: String },
}

/// Errors raised while paging through applications or resolving owners.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("request to {endpoint} failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    #[error("HTTP {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("failed to decode response from {endpoint}: {reason}")]
    ParseFailed { endpoint: String, reason: String },
}

impl SearchError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Network(_) | Self::Io(_) => 1,
            Self::Config(_) => 2,
            Self::Auth(_) => 3,
            Self::Search(_) => 4,
        }
    }

    /// Returns a short hint for the operator.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Config(ConfigError::NotFound { .. }) => {
                "Create the configuration file with your Entra ID app details."
            }
            Self::Config(_) => "Check the configuration file and environment.",
            Self::Auth(AuthError::Rejected { status: 400 | 401, .. }) => {
                "Check TENANT_ID, CLIENT_ID and CLIENT_SECRET."
            }
            Self::Auth(_) => "Could not obtain an access token.",
            Self::Search(e) if e.status() == Some(403) => {
                "The app registration needs Application.Read.All (and User.Read.All for owner names) with admin consent."
            }
            Self::Search(_) => "The search was aborted.",
            Self::Network(_) => "Network error. Check your connection.",
            Self::Io(_) => "Could not start the async runtime.",
        }
    }
}
