//! Per-entity driver: render the query, search, then extract.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ConfigError;
use crate::llm::{ExtractError, Extractor};
use crate::serpapi::{SearchError, WebSearch};

pub const ENTITY_PLACEHOLDER: &str = "{entity}";
/// Record value when the search returned nothing; extraction is skipped.
pub const NO_DATA_RETRIEVED: &str = "No data retrieved";
/// Record value when processing an entity failed outright.
pub const ENTITY_FAILED: &str = "Error retrieving data";

const MAX_CONCURRENCY: usize = 16;

/// One output row per input entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionRecord {
    #[serde(rename = "Entity")]
    pub entity: String,
    #[serde(rename = "Extracted Info")]
    pub extracted_info: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("{0}")]
    Search(#[from] SearchError),
    #[error("{0}")]
    Extract(#[from] ExtractError),
}

/// Literal replacement of every `{entity}` in `template`.
pub fn render_query(template: &str, entity: &str) -> String {
    template.replace(ENTITY_PLACEHOLDER, entity)
}

/// Drops blank entities and rejects runs that could never do useful work.
pub fn validate_inputs(entities: &[String], template: &str) -> Result<Vec<String>, ConfigError> {
    let entities: Vec<String> = entities
        .iter()
        .filter(|e| !e.trim().is_empty())
        .cloned()
        .collect();

    if entities.is_empty() {
        return Err(ConfigError::NoEntities);
    }
    if template.is_empty() {
        return Err(ConfigError::MissingTemplate);
    }
    if !template.contains(ENTITY_PLACEHOLDER) {
        warn!(template, "query template has no {{entity}} placeholder; every entity runs the same query");
    }
    Ok(entities)
}

pub struct Pipeline<S, E> {
    search: S,
    extractor: E,
    concurrency: usize,
}

impl<S: WebSearch, E: Extractor> Pipeline<S, E> {
    pub fn new(search: S, extractor: E) -> Self {
        Self {
            search,
            extractor,
            concurrency: 1,
        }
    }

    /// Entities processed at once (1-16). Output order never depends on this.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_CONCURRENCY);
        self
    }

    /// Produces exactly one record per non-blank entity, in input order.
    ///
    /// Only input problems fail the run; they are detected before any request is sent.
    /// Provider and per-entity failures end up as sentinel text inside the affected record.
    pub async fn run(
        &self,
        entities: &[String],
        template: &str,
    ) -> Result<Vec<ExtractionRecord>, ConfigError> {
        let entities = validate_inputs(entities, template)?;
        Ok(self.run_validated(entities, template).await)
    }

    /// Like `run`, for entities that already went through `validate_inputs`.
    pub async fn run_validated(&self, entities: Vec<String>, template: &str) -> Vec<ExtractionRecord> {
        let total = entities.len();

        info!(entities = total, concurrency = self.concurrency, "pipeline started");

        let records: Vec<ExtractionRecord> = stream::iter(entities.into_iter().enumerate())
            .map(|(index, entity)| async move {
                let extracted_info = match self.process(&entity, template).await {
                    Ok(info) => info,
                    Err(e) => {
                        warn!(entity = %entity, error = %e, "entity failed (continuing with the rest)");
                        ENTITY_FAILED.to_string()
                    }
                };
                debug!(position = index + 1, total, entity = %entity, "entity done");
                ExtractionRecord {
                    entity,
                    extracted_info,
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let failed = records
            .iter()
            .filter(|r| r.extracted_info == ENTITY_FAILED)
            .count();
        info!(records = records.len(), failed, "pipeline finished");
        records
    }

    async fn process(&self, entity: &str, template: &str) -> Result<String, EntityError> {
        let query = render_query(template, entity);
        info!(entity, query = %query, "query generated");

        let results = self.search.search(&query).await?;
        if results.is_empty() {
            warn!(query = %query, "no results found");
            return Ok(NO_DATA_RETRIEVED.to_string());
        }

        debug!(entity, results = ?results, "search results");
        let info = self.extractor.extract(entity, &results).await?;
        info!(entity, extracted_info = %info, "extracted information");
        Ok(info)
    }
}
