//! OAuth2 client credentials grant against the Microsoft identity platform.

use crate::config::{ApiConfig, Config};
use crate::error::AuthError;
use crate::secure::SecureString;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

/// HTTP request timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// HTTP connection timeout.
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Bearer token for Microsoft Graph.
///
/// Acquired once per run. The expiry is informational only.
#[derive(Debug, Clone)]
pub struct AccessToken {
    secret: SecureString,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(secret: impl Into<SecureString>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            secret: secret.into(),
            expires_at,
        }
    }

    /// The raw bearer value for the `Authorization` header.
    pub fn secret(&self) -> &str {
        self.secret.as_str()
    }
}

/// Token response from Azure AD.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Exchanges application credentials for an app-only Graph token.
pub struct ClientCredentialsClient {
    api: ApiConfig,
    http_client: reqwest::Client,
}

impl ClientCredentialsClient {
    /// Create a new client for the configured identity endpoints.
    pub fn new(api: &ApiConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            api: api.clone(),
            http_client,
        })
    }

    /// Request an access token with the client credentials grant.
    ///
    /// Exactly one request is made; any failure is returned as is.
    pub async fn acquire(&self, config: &Config) -> Result<AccessToken, AuthError> {
        let token_endpoint = self.api.token_url(&config.tenant_id);

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("scope", self.api.scope.as_str()),
        ];

        debug!("Requesting client credentials token from {}", token_endpoint);

        let response = self
            .http_client
            .post(&token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        if status != 200 {
            error!("Token request failed: HTTP {} - {}", status, body);
            return Err(AuthError::Rejected { status, body });
        }

        let token_response: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Token response is not valid JSON: {}", e);
            AuthError::MalformedResponse {
                status,
                body: body.clone(),
            }
        })?;

        let secret = match token_response.access_token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::MissingAccessToken { body }),
        };

        let expires_at = token_response
            .expires_in
            .and_then(ChronoDuration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));

        info!(
            "Acquired {} token, expires at {:?}",
            token_response.token_type.as_deref().unwrap_or("Bearer"),
            expires_at
        );

        Ok(AccessToken::new(secret, expires_at))
    }
}
