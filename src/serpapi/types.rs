use serde::Deserialize;

/// Body of a `GET /search` response. Only the organic results are read.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub organic_results: Option<Vec<OrganicResult>>,
}

#[derive(Debug, Deserialize)]
pub struct OrganicResult {
    pub title: Option<String>,
    pub snippet: Option<String>,
}

/// One web search hit as seen by the extraction prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
}

impl SearchResult {
    #[cfg(test)]
    pub(crate) fn new(title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
        }
    }
}

impl From<OrganicResult> for SearchResult {
    fn from(raw: OrganicResult) -> Self {
        Self {
            title: raw.title.unwrap_or_default(),
            snippet: raw.snippet.unwrap_or_default(),
        }
    }
}
