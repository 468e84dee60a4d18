//! The single-shot pipeline: acquire a token, search every application, print the summary.

use std::io::Write;

use tracing::{debug, info};

use crate::auth::ClientCredentialsClient;
use crate::config::{ApiConfig, Config};
use crate::error::AppError;
use crate::graph::GraphClient;
use crate::report::Reporter;
use crate::search::{SearchSummary, Searcher};

/// Run the search for an already loaded configuration.
///
/// The summary is only printed when the whole listing was searched.
pub async fn run<W: Write>(
    config: &Config,
    api: &ApiConfig,
    reporter: &mut Reporter<W>,
) -> Result<SearchSummary, AppError> {
    let auth_client = ClientCredentialsClient::new(api)?;
    let graph_client = GraphClient::new(api)?;

    reporter.requesting_token();
    let token = auth_client.acquire(config).await?;
    reporter.token_acquired();

    if let Some(expires_at) = token.expires_at {
        debug!("Access token valid until {}", expires_at);
    }

    reporter.search_started(&config.search_string);
    let summary = Searcher::new(&graph_client)
        .run(&token, &config.search_string, reporter)
        .await?;

    reporter.summary(&summary);
    info!(
        "Found {} matching application(s) across {} page(s)",
        summary.count(),
        summary.pages_fetched
    );

    Ok(summary)
}
