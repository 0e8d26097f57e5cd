//! HTTP client for the title search provider
//!
//! A thin wrapper around `reqwest` that sets the browser-like identification
//! header and a bounded request timeout. Every fetch is a single attempt.

use std::time::Duration;

use tracing::debug;

use crate::error::{LookupError, Result};

/// Default provider base URL
pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com";

/// Generic browser identification, enough to avoid trivial blocking
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for the provider HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host of the provider, without trailing slash
    pub base_url: String,
    /// Value of the User-Agent header
    pub user_agent: String,
    /// Request timeout in seconds (default: 5)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at another host (mirrors, test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// HTTP client for the provider
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProviderClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch HTML content from a provider path.
    ///
    /// # Arguments
    /// * `path` - Path and query on the provider (e.g. "/find?q=test")
    ///
    /// # Errors
    /// - `LookupError::Http` - Network error, timeout or unreadable body
    /// - `LookupError::Status` - Any non-2xx status code
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching provider page");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
