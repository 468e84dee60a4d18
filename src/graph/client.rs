//! Microsoft Graph API client for listing application registrations and their owners.

use super::models::{Application, Owner, Page};
use crate::auth::AccessToken;
use crate::config::ApiConfig;
use crate::error::SearchError;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

/// HTTP request timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// HTTP connection timeout.
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Properties requested for each application. Only web and spa clients carry URIs.
const APPLICATION_SELECT: &str = "id,appId,displayName,web,spa";

/// Microsoft Graph API client.
pub struct GraphClient {
    base_url: String,
    page_size: u32,
    http_client: reqwest::Client,
}

impl GraphClient {
    /// Create a new Graph client.
    pub fn new(api: &ApiConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: api.graph_base().to_string(),
            page_size: api.page_size,
            http_client,
        })
    }

    /// URL of the first page of the application listing.
    pub fn applications_url(&self) -> Result<Url, SearchError> {
        let endpoint = format!("{}/applications", self.base_url);
        let mut url = Url::parse(&endpoint).map_err(|e| SearchError::RequestFailed {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("$select", APPLICATION_SELECT)
            .append_pair("$top", &self.page_size.to_string());

        Ok(url)
    }

    /// Start walking the application listing.
    pub fn pages<'a>(&'a self, token: &'a AccessToken) -> Result<ApplicationPages<'a>, SearchError> {
        let first = self.applications_url()?;

        Ok(ApplicationPages {
            client: self,
            token,
            cursor: Some(first.to_string()),
            fetched: 0,
        })
    }

    /// Fetch the owners of an application.
    pub async fn list_owners(
        &self,
        token: &AccessToken,
        application: &Application,
    ) -> Result<Vec<Owner>, SearchError> {
        let url = match (&application.id, &application.app_id) {
            (Some(id), _) => format!(
                "{}/applications/{}/owners",
                self.base_url,
                urlencoding::encode(id)
            ),
            (None, Some(app_id)) => format!(
                "{}/applications(appId='{}')/owners",
                self.base_url,
                urlencoding::encode(app_id)
            ),
            (None, None) => {
                warn!(
                    "Application '{}' has neither object id nor app id, skipping owner lookup",
                    application.name()
                );
                return Ok(Vec::new());
            }
        };

        debug!("Fetching owners from {}", url);

        let page: Page<Owner> = self.get_json(token, &url).await?;
        Ok(page.value)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        url: &str,
    ) -> Result<T, SearchError> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed {
                endpoint: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        match status.as_u16() {
            200 => response.json().await.map_err(|e| SearchError::ParseFailed {
                endpoint: url.to_string(),
                reason: e.to_string(),
            }),
            code => {
                let body = response.text().await.unwrap_or_default();
                error!("Graph request failed: HTTP {} - {}", status, body);
                Err(SearchError::UnexpectedStatus {
                    status: code,
                    endpoint: url.to_string(),
                })
            }
        }
    }
}

/// A fetched page of applications.
#[derive(Debug)]
pub struct PageBatch {
    /// 1-based page number.
    pub number: usize,
    pub applications: Vec<Application>,
}

/// Lazily fetched pages of the application listing.
///
/// Each call to [`next_page`](Self::next_page) issues one request and follows
/// `@odata.nextLink`. Once a page arrives without a cursor, or a request fails,
/// the sequence is exhausted and yields `None`.
pub struct ApplicationPages<'a> {
    client: &'a GraphClient,
    token: &'a AccessToken,
    cursor: Option<String>,
    fetched: usize,
}

impl ApplicationPages<'_> {
    pub async fn next_page(&mut self) -> Result<Option<PageBatch>, SearchError> {
        let Some(url) = self.cursor.take() else {
            return Ok(None);
        };

        debug!("Fetching page {} from {}", self.fetched + 1, url);

        let page: Page<Application> = self.client.get_json(self.token, &url).await?;
        self.fetched += 1;
        self.cursor = page.next_link;

        Ok(Some(PageBatch {
            number: self.fetched,
            applications: page.value,
        }))
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }
}
