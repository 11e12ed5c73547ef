mod args;

pub use args::Args;

use std::path::Path;

use tracing::info;

use crate::config::{Config, ConfigError, http_client};
use crate::llm::{ExtractClient, ExtractError};
use crate::markdown::sanitize_heading;
use crate::pipeline::{self, Pipeline};
use crate::report::{self, ReportError};
use crate::serpapi::{SearchError, SerpClient};
use crate::table::{Table, TableError};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Loads the table, then either previews the queries or runs the full pipeline.
///
/// Every input and credential check happens before the first request.
pub async fn run(args: &Args, config: &Config) -> Result<(), RunError> {
    let table = Table::from_path(&args.input, args.encoding.as_deref())?;
    info!(
        rows = table.row_count(),
        columns = table.headers().len(),
        "table loaded"
    );

    let entities = pipeline::validate_inputs(&table.column(&args.column)?, &args.query)?;

    if args.dry_run {
        let preview = dry_run_report(&table, args, &entities);
        write_output(args.output.as_deref(), &preview)?;
        return Ok(());
    }

    let (search_key, extract_key) = config.require_keys()?;
    let http = http_client()?;
    let search = SerpClient::new(http.clone(), search_key.expose())?.with_base_url(&config.search_url);
    let extractor = ExtractClient::new(http, extract_key.expose())?
        .with_endpoint(&config.extract_url)
        .with_target(&args.target);

    info!(
        example = %pipeline::render_query(&args.query, &entities[0]),
        "query example"
    );

    let records = Pipeline::new(search, extractor)
        .with_concurrency(args.concurrency)
        .run_validated(entities, &args.query)
        .await;

    let output = report::render(&records, args.format)?;
    write_output(args.output.as_deref(), &output)?;

    info!(records = records.len(), "run complete");
    Ok(())
}

fn dry_run_report(table: &Table, args: &Args, entities: &[String]) -> String {
    let mut out = String::from("## Table preview\n\n");
    out.push_str(&table.preview(args.preview_rows));
    out.push_str(&format!(
        "\n## Queries for column {}\n\n",
        sanitize_heading(&args.column)
    ));
    for entity in entities {
        out.push_str(&format!(
            "- {}\n",
            sanitize_heading(&pipeline::render_query(&args.query, entity))
        ));
    }
    out
}

fn write_output(path: Option<&Path>, text: &str) -> Result<(), ReportError> {
    match path {
        Some(path) => {
            std::fs::write(path, text)?;
            info!(path = %path.display(), "results written");
        }
        None => print!("{text}"),
    }
    Ok(())
}
