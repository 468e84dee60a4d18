//! Human-readable console output: progress lines while searching and the final summary.

use std::fmt::Arguments;
use std::io::{self, Stdout, Write};

use tracing::warn;

use crate::search::{MatchResult, SearchObserver, SearchSummary};

/// Width of the separator rule.
const RULE_WIDTH: usize = 50;

/// Writes the run's progress to a line-oriented sink (stdout in production).
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the reporter and return the sink.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            warn!("Failed to write report output: {}", e);
        }
    }

    fn rule(&mut self) {
        self.line(format_args!("{}", "=".repeat(RULE_WIDTH)));
    }

    pub fn config_loaded(&mut self) {
        self.line(format_args!("Configuration loaded successfully."));
    }

    pub fn requesting_token(&mut self) {
        self.line(format_args!("Requesting access token..."));
    }

    pub fn token_acquired(&mut self) {
        self.line(format_args!("Access token acquired successfully."));
    }

    pub fn search_started(&mut self, needle: &str) {
        self.line(format_args!(
            "\nStarting search for URI containing: '{}'",
            needle
        ));
        self.rule();
    }

    /// Final block: match count and each application's owners.
    pub fn summary(&mut self, summary: &SearchSummary) {
        self.rule();
        self.line(format_args!("Search complete."));
        self.line(format_args!(
            "\nSummary: Found {} application(s) with the specified URI.",
            summary.count()
        ));

        if summary.matches.is_empty() {
            self.line(format_args!("No applications found matching the criteria."));
            return;
        }

        for result in &summary.matches {
            self.line(format_args!(
                "- App: {} ({})",
                result.application.name(),
                result.application.client_id()
            ));
            self.line(format_args!("  Owners: {}", owner_list(&result.owners)));
        }
    }
}

impl<W: Write> SearchObserver for Reporter<W> {
    fn page_fetched(&mut self, number: usize, applications: usize) {
        self.line(format_args!(
            "Fetched page {} ({} applications)",
            number, applications
        ));
    }

    fn match_found(&mut self, result: &MatchResult) {
        self.line(format_args!(
            "  [FOUND] Match in App: '{}' (App ID: {})",
            result.application.name(),
            result.application.client_id()
        ));
        self.line(format_args!("  > Matched URI: {}", result.matched_uri));
        self.line(format_args!("  > Owners: {}\n", owner_list(&result.owners)));
    }
}

fn owner_list(owners: &[String]) -> String {
    if owners.is_empty() {
        "No owners listed".to_string()
    } else {
        owners.join(", ")
    }
}
