//! Rendering of extraction records for display or export.

use clap::ValueEnum;

use crate::markdown::escape_table_cell;
use crate::pipeline::ExtractionRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown table
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("output failed: {0}")]
    Io(#[from] std::io::Error),
}

pub fn render(records: &[ExtractionRecord], format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Table => Ok(render_table(records)),
        OutputFormat::Csv => render_csv(records),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)? + "\n"),
    }
}

fn render_table(records: &[ExtractionRecord]) -> String {
    let mut out = String::from("| Entity | Extracted Info |\n|---|---|\n");
    for record in records {
        out.push_str(&format!(
            "| {} | {} |\n",
            escape_table_cell(&record.entity),
            escape_table_cell(&record.extracted_info)
        ));
    }
    out
}

fn render_csv(records: &[ExtractionRecord]) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    if records.is_empty() {
        writer.write_record(["Entity", "Extracted Info"])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
