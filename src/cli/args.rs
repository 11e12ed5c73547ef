use std::path::PathBuf;

use clap::Parser;

use crate::llm::prompt::DEFAULT_TARGET;
use crate::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "dossier",
    version,
    about = "Research every entity in a CSV column: web search, then LLM extraction",
    after_help = "Environment: SERPAPI_KEY and GROQ_API_KEY (read from .env if present)."
)]
pub struct Args {
    /// CSV file with a header row
    pub input: PathBuf,

    /// Column whose values are the entities to research
    #[arg(short, long)]
    pub column: String,

    /// Search query; every "{entity}" is replaced by the entity (e.g. "Find {entity}'s email")
    #[arg(short, long)]
    pub query: String,

    /// What the model is asked to extract
    #[arg(long, default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Entities processed at once (1-16); results keep input order
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Input encoding label, e.g. "windows-1252" (default: UTF-8; a BOM overrides)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Show the table preview and generated queries without calling any API
    #[arg(long)]
    pub dry_run: bool,

    /// Rows shown in the dry-run table preview
    #[arg(long, default_value_t = 5)]
    pub preview_rows: usize,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}
