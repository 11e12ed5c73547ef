//! CSV input: header row plus string cells, with a selectable entity column.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

use crate::markdown::escape_table_cell;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV has no header row")]
    NoHeader,

    #[error("column '{name}' not found. Available columns: {available}")]
    UnknownColumn { name: String, available: String },
}

#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Reads a CSV file. A BOM wins over `encoding`; without either, UTF-8 is assumed.
    pub fn from_path(path: &Path, encoding: Option<&str>) -> Result<Self, TableError> {
        let bytes = std::fs::read(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let text = decode(&bytes, encoding)?;
        Self::from_csv_str(&text)
    }

    pub fn from_csv_str(text: &str) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.iter().all(String::is_empty) {
            return Err(TableError::NoHeader);
        }

        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect::<Vec<_>>()))
            .collect::<Result<Vec<_>, csv::Error>>()?;

        debug!(columns = headers.len(), rows = rows.len(), "table parsed");
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells of `name` in row order, skipping missing and blank cells.
    pub fn column(&self, name: &str) -> Result<Vec<String>, TableError> {
        let index = self
            .headers
            .iter()
            .position(|h| h == name.trim())
            .ok_or_else(|| TableError::UnknownColumn {
                name: name.to_string(),
                available: self.headers.join(", "),
            })?;

        let values: Vec<String> = self
            .rows
            .iter()
            .filter_map(|row| row.get(index))
            .filter(|cell| !cell.trim().is_empty())
            .cloned()
            .collect();

        let dropped = self.rows.len() - values.len();
        if dropped > 0 {
            debug!(column = name, dropped, "skipped missing or blank cells");
        }
        Ok(values)
    }

    /// Markdown table of the header and the first `limit` rows.
    pub fn preview(&self, limit: usize) -> String {
        let mut out = String::new();
        push_row(&mut out, self.headers.iter());
        out.push('|');
        out.push_str(&"---|".repeat(self.headers.len()));
        out.push('\n');

        for row in self.rows.iter().take(limit) {
            let cells = (0..self.headers.len()).map(|i| row.get(i).map_or("", String::as_str));
            push_row(&mut out, cells);
        }

        if self.rows.len() > limit {
            out.push_str(&format!("\n({} of {} rows shown)\n", limit, self.rows.len()));
        }
        out
    }
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: impl Iterator<Item = S>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&escape_table_cell(cell.as_ref()));
        out.push_str(" |");
    }
    out.push('\n');
}

fn decode(bytes: &[u8], label: Option<&str>) -> Result<String, TableError> {
    let fallback = match label {
        Some(l) => Encoding::for_label(l.trim().as_bytes())
            .ok_or_else(|| TableError::UnknownEncoding(l.to_string()))?,
        None => UTF_8,
    };

    let (text, used, had_errors) = fallback.decode(bytes);
    if had_errors {
        warn!(encoding = used.name(), "input contained malformed sequences; replaced");
    }
    Ok(text.into_owned())
}
