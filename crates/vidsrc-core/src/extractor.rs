//! Title search extractor
//!
//! Combines the HTTP client with the search parser: one request per call,
//! no caching, candidates in provider order.

use tracing::{debug, warn};

use crate::client::{ClientConfig, ProviderClient};
use crate::error::{LookupError, Result};
use crate::parser::parse_search_results;
use crate::types::Candidate;

/// Searches the provider and turns the result page into candidates
///
/// # Example
/// ```no_run
/// use vidsrc_core::Extractor;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let extractor = Extractor::new()?;
///
///     for candidate in extractor.search("Inception").await {
///         println!("{} [{}]", candidate, candidate.external_id);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    client: ProviderClient,
}

impl Extractor {
    /// Create an extractor with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(ProviderClient::new()?))
    }

    /// Create an extractor with custom client configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_client(ProviderClient::with_config(config)?))
    }

    /// Create an extractor with a pre-configured client.
    pub fn with_client(client: ProviderClient) -> Self {
        Self { client }
    }

    /// Search for titles, collapsing every failure into an empty list.
    ///
    /// The cause of a failure is logged but not returned; callers cannot
    /// tell "no matches" from "request failed".
    pub async fn search(&self, query: &str) -> Vec<Candidate> {
        match self.try_search(query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(query, error = %e, "title search failed");
                Vec::new()
            }
        }
    }

    /// Search for titles.
    ///
    /// # Returns
    /// * `Ok(Vec<Candidate>)` in provider order, possibly empty
    /// * `Err(LookupError::InvalidQuery)` if query is empty or whitespace-only
    /// * `Err(LookupError::Http | LookupError::Status)` if the fetch fails
    pub async fn try_search(&self, query: &str) -> Result<Vec<Candidate>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(LookupError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }

        let path = search_path(trimmed);
        let html = self.client.fetch(&path).await?;
        let candidates = parse_search_results(&html)?;

        debug!(query = trimmed, count = candidates.len(), "parsed search results");
        Ok(candidates)
    }
}

/// Path and query of the title search endpoint.
fn search_path(query: &str) -> String {
    format!(
        "/find?q={}&s=tt&ref_=fn_al_tt_mr",
        urlencoding::encode(query)
    )
}
