use std::env;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub const SEARCH_KEY_VAR: &str = "SERPAPI_KEY";
pub const EXTRACT_KEY_VAR: &str = "GROQ_API_KEY";
const SEARCH_URL_VAR: &str = "SERPAPI_BASE_URL";
const EXTRACT_URL_VAR: &str = "EXTRACT_ENDPOINT";

pub const DEFAULT_SEARCH_URL: &str = "https://serpapi.com/search";
pub const DEFAULT_EXTRACT_URL: &str = "https://api.groq.com/v1/process";

/// Problems with run inputs, reported before any network call is made.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set. Export it or add it to a .env file")]
    MissingKey(&'static str),

    #[error("no entities found in the selected column")]
    NoEntities,

    #[error("query template is empty; pass a query containing the {{entity}} placeholder")]
    MissingTemplate,
}

/// A provider credential. `Debug` never prints the secret.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for empty or whitespace-only keys.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Run configuration, built once from the environment and handed to the clients.
///
/// Recognised variables:
/// - `SERPAPI_KEY`: search provider key
/// - `GROQ_API_KEY`: inference endpoint key
/// - `SERPAPI_BASE_URL` / `EXTRACT_ENDPOINT`: endpoint overrides (optional)
#[derive(Debug, Clone)]
pub struct Config {
    pub search_key: Option<ApiKey>,
    pub extract_key: Option<ApiKey>,
    pub search_url: String,
    pub extract_url: String,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => debug!(error = %e, "ignoring unreadable .env"),
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let url_or = |name: &str, default: &str| {
            lookup(name)
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            search_key: lookup(SEARCH_KEY_VAR).as_deref().and_then(ApiKey::new),
            extract_key: lookup(EXTRACT_KEY_VAR).as_deref().and_then(ApiKey::new),
            search_url: url_or(SEARCH_URL_VAR, DEFAULT_SEARCH_URL),
            extract_url: url_or(EXTRACT_URL_VAR, DEFAULT_EXTRACT_URL),
        }
    }

    /// Both provider keys, or the name of the first one missing.
    pub fn require_keys(&self) -> Result<(&ApiKey, &ApiKey), ConfigError> {
        let search = self
            .search_key
            .as_ref()
            .ok_or(ConfigError::MissingKey(SEARCH_KEY_VAR))?;
        let extract = self
            .extract_key
            .as_ref()
            .ok_or(ConfigError::MissingKey(EXTRACT_KEY_VAR))?;
        Ok((search, extract))
    }
}

pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()
}
