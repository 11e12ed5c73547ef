//! Structured-fact extraction from search results via an LLM inference endpoint.

pub mod prompt;
pub mod types;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::{ApiKey, DEFAULT_EXTRACT_URL};
use crate::serpapi::SearchResult;
use prompt::{DEFAULT_TARGET, build_prompt};
use types::{ExtractRequest, ExtractResponse};

/// Returned when the endpoint answers 200 without an `extracted_info` field.
pub const NO_DATA_FOUND: &str = "No data found.";
/// Returned when the endpoint answers with any non-200 status.
pub const EXTRACTION_FAILED: &str = "Error retrieving data.";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("GROQ_API_KEY not set. Get one at https://console.groq.com/keys")]
    ApiKeyNotSet,

    #[error("extraction request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed extraction response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Abstraction over the inference endpoint.
/// Implemented by `ExtractClient` for production; mock implementations used in tests.
pub trait Extractor {
    async fn extract(&self, entity: &str, results: &[SearchResult]) -> Result<String, ExtractError>;
}

impl<T: Extractor> Extractor for &T {
    async fn extract(&self, entity: &str, results: &[SearchResult]) -> Result<String, ExtractError> {
        (**self).extract(entity, results).await
    }
}

#[derive(Clone, Debug)]
pub struct ExtractClient {
    http: Client,
    api_key: ApiKey,
    endpoint: String,
    target: String,
}

impl ExtractClient {
    pub fn new(http: Client, api_key: &str) -> Result<Self, ExtractError> {
        let api_key = ApiKey::new(api_key).ok_or(ExtractError::ApiKeyNotSet)?;
        Ok(Self {
            http,
            api_key,
            endpoint: DEFAULT_EXTRACT_URL.to_string(),
            target: DEFAULT_TARGET.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// What the prompt asks for, e.g. "the email address".
    pub fn with_target(mut self, target: &str) -> Self {
        self.target = target.to_string();
        self
    }
}

impl Extractor for ExtractClient {
    async fn extract(&self, entity: &str, results: &[SearchResult]) -> Result<String, ExtractError> {
        let prompt = build_prompt(&self.target, entity, results);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&ExtractRequest { prompt: &prompt })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = %status, entity, "extraction endpoint returned non-200");
            return Ok(EXTRACTION_FAILED.to_string());
        }

        let text = response.text().await?;
        let body: ExtractResponse = serde_json::from_str(&text)?;
        let info = body.into_text();
        debug!(entity, found = info.is_some(), "extraction complete");

        Ok(info.unwrap_or_else(|| NO_DATA_FOUND.to_string()))
    }
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ExtractClient {
        ExtractClient::new(Client::new(), "test-key")
            .unwrap()
            .with_endpoint(&format!("{}/v1/process", server.uri()))
    }

    #[tokio::test]
    async fn extract_success_returns_extracted_info() {
        let server = MockServer::start().await;
        let expected_prompt =
            "Extract the email address of Alice from the following web results:\n\nA: alice@x.com";
        Mock::given(method("POST"))
            .and(path("/v1/process"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_json(serde_json::json!({ "prompt": expected_prompt })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "extracted_info": "alice@x.com" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let info = client_for(&server)
            .extract("Alice", &[SearchResult::new("A", "alice@x.com")])
            .await
            .unwrap();
        assert_eq!(info, "alice@x.com");
    }

    #[tokio::test]
    async fn extract_missing_field_returns_no_data_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/process"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "other": 1 })),
            )
            .mount(&server)
            .await;

        let info = client_for(&server).extract("Bob", &[]).await.unwrap();
        assert_eq!(info, NO_DATA_FOUND);
        assert_eq!(info, "No data found.");
    }

    #[tokio::test]
    async fn extract_non_200_returns_error_sentinel() {
        for status in [400, 401, 404, 500] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/v1/process"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let info = client_for(&server)
                .extract("Bob", &[SearchResult::new("t", "s")])
                .await
                .unwrap();
            assert_eq!(info, "Error retrieving data.", "status {status}");
        }
    }

    #[tokio::test]
    async fn extract_non_string_answer_is_rendered_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/process"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "extracted_info": ["a@x.com"] })),
            )
            .mount(&server)
            .await;

        let info = client_for(&server)
            .extract("Alice", &[SearchResult::new("t", "s")])
            .await
            .unwrap();
        assert_eq!(info, r#"["a@x.com"]"#);
    }

    #[tokio::test]
    async fn extract_sends_prompt_even_without_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/process"))
            .and(body_json(serde_json::json!({
                "prompt": "Extract the email address of Test Entity from the following web results:\n\n"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "extracted_info": "none" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let info = client_for(&server).extract("Test Entity", &[]).await.unwrap();
        assert_eq!(info, "none");
    }

    #[tokio::test]
    async fn extract_200_with_invalid_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/process"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).extract("Bob", &[]).await;
        assert!(matches!(result, Err(ExtractError::Decode(_))), "got: {result:?}");
    }
}
