//! Web search through SerpAPI's Google engine.

pub mod types;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::config::{ApiKey, DEFAULT_SEARCH_URL};
pub use types::SearchResult;
use types::SearchResponse;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("SERPAPI_KEY not set. Get one at https://serpapi.com/manage-api-key")]
    ApiKeyNotSet,

    #[error("invalid search endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request URL is stripped before wrapping: it carries the API key.
    #[error("search request failed: {0}")]
    Network(reqwest::Error),

    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Abstraction over the web search provider.
/// Implemented by `SerpClient` for production; mock implementations used in tests.
pub trait WebSearch {
    /// Organic results for `query`. Empty when the provider answers with a non-200 status.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

impl<T: WebSearch> WebSearch for &T {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        (**self).search(query).await
    }
}

#[derive(Clone, Debug)]
pub struct SerpClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl SerpClient {
    pub fn new(http: Client, api_key: &str) -> Result<Self, SearchError> {
        let api_key = ApiKey::new(api_key).ok_or(SearchError::ApiKeyNotSet)?;
        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_SEARCH_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    fn request_url(&self, query: &str) -> Result<Url, SearchError> {
        Ok(Url::parse_with_params(
            &self.base_url,
            [
                ("engine", "google"),
                ("q", query),
                ("api_key", self.api_key.expose()),
            ],
        )?)
    }
}

impl WebSearch for SerpClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.request_url(query)?;

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = %status, query, "search provider returned non-200, treating as no results");
            return Ok(Vec::new());
        }

        let text = response.text().await.map_err(network_error)?;
        let body: SearchResponse = serde_json::from_str(&text)?;
        let results: Vec<SearchResult> = body
            .organic_results
            .unwrap_or_default()
            .into_iter()
            .map(SearchResult::from)
            .collect();

        debug!(query, results = results.len(), "search complete");
        Ok(results)
    }
}

fn network_error(e: reqwest::Error) -> SearchError {
    SearchError::Network(e.without_url())
}
