//! Search over every application registration in the tenant.
//!
//! Pages are pulled one at a time; each application is checked against the
//! search string and owners are resolved only for matches.

pub mod matcher;

use std::collections::HashSet;

use tracing::{debug, info};

use crate::auth::AccessToken;
use crate::error::SearchError;
use crate::graph::{Application, GraphClient, Owner};

use matcher::first_match;

/// An application whose URIs contain the search string.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub application: Application,
    /// The first URI that contained the search string.
    pub matched_uri: String,
    /// Owner display names, in the order Graph returned them.
    pub owners: Vec<String>,
}

/// Outcome of a completed search.
#[derive(Debug, Clone, Default)]
pub struct SearchSummary {
    pub pages_fetched: usize,
    /// Matches in discovery order.
    pub matches: Vec<MatchResult>,
}

impl SearchSummary {
    pub fn count(&self) -> usize {
        self.matches.len()
    }
}

/// Progress callbacks fired while the search runs.
pub trait SearchObserver {
    fn page_fetched(&mut self, number: usize, applications: usize);
    fn match_found(&mut self, result: &MatchResult);
}

/// Walks the application listing and collects matches.
pub struct Searcher<'a> {
    graph: &'a GraphClient,
}

impl<'a> Searcher<'a> {
    pub fn new(graph: &'a GraphClient) -> Self {
        Self { graph }
    }

    /// Run the search to completion.
    ///
    /// Stops at the first failed request; nothing gathered so far is returned.
    pub async fn run<O: SearchObserver>(
        &self,
        token: &AccessToken,
        needle: &str,
        observer: &mut O,
    ) -> Result<SearchSummary, SearchError> {
        info!("Searching application URIs for '{}'", needle);

        let mut pages = self.graph.pages(token)?;
        let mut matches = Vec::new();
        let mut seen_app_ids = HashSet::new();

        while let Some(batch) = pages.next_page().await? {
            observer.page_fetched(batch.number, batch.applications.len());

            for application in batch.applications {
                let Some(uri) = first_match(&application, needle) else {
                    continue;
                };
                let matched_uri = uri.to_string();

                // Same app id reported on an earlier page.
                if let Some(app_id) = &application.app_id {
                    if !seen_app_ids.insert(app_id.clone()) {
                        debug!("Skipping already matched application {}", app_id);
                        continue;
                    }
                }

                let owners = self
                    .graph
                    .list_owners(token, &application)
                    .await?
                    .iter()
                    .map(Owner::display_name_or_upn)
                    .collect();

                let result = MatchResult {
                    application,
                    matched_uri,
                    owners,
                };
                observer.match_found(&result);
                matches.push(result);
            }
        }

        info!(
            "Search finished: {} match(es) across {} page(s)",
            matches.len(),
            pages.pages_fetched()
        );

        Ok(SearchSummary {
            pages_fetched: pages.pages_fetched(),
            matches,
        })
    }
}
