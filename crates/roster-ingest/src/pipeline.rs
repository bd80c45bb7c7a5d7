//! The CSV ingestion pipeline.
//!
//! Four stages, run in order per upload:
//!
//! 1. **Parse** — the first row names the fields; each later row becomes
//!    a header→value map. Blank lines are skipped, the `yearLevel`
//!    column is trimmed at parse time, and short rows simply leave the
//!    trailing headers absent (`flexible` reader).
//! 2. **Filter** — rows without a non-empty `id` are dropped. A dropped
//!    row never aborts the batch; it becomes a [`RowWarning`] on the
//!    report.
//! 3. **Normalize** — each surviving row is completed against the
//!    student schema defaults ([`StudentRecord::from_csv_row`]).
//! 4. **Commit** — each record's fields are written one at a time into
//!    the store under `student:<id>`, each write awaited before the
//!    next. Records are not grouped into a transaction: a store failure
//!    mid-batch leaves earlier records committed.
//!
//! A parse is single-use; every upload is parsed fresh.

use std::collections::HashMap;

use serde::Serialize;

use roster_core::record::{StudentRecord, YEAR_LEVEL_FIELD};
use roster_core::store::{write_record, RecordStore};

use crate::error::{IngestError, IngestResult};

/// CSV reader configuration for one upload.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Field delimiter character. Default: `','`.
    pub delimiter: u8,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// A row the filter stage dropped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowWarning {
    /// 1-based line number in the uploaded file.
    pub line: u64,
    /// Why the row was dropped.
    pub reason: String,
}

/// Outcome of one upload: the full normalized batch plus per-row
/// warnings for everything the filter dropped.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Every record that was normalized and committed.
    pub students: Vec<StudentRecord>,
    /// One entry per dropped row; empty when every row had an `id`.
    pub warnings: Vec<RowWarning>,
}

/// One parsed data row: header name → raw value, plus its source line.
type RawRow = (u64, HashMap<String, String>);

/// Parses the upload into header names and raw rows.
///
/// Applies the parse-time transform (trim `yearLevel`); all other
/// values pass through unchanged. Columns beyond the header count are
/// ignored; rows shorter than the header leave the tail headers absent.
fn parse_rows(text: &str, config: &IngestConfig) -> IngestResult<(Vec<String>, Vec<RawRow>)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        let mut row = HashMap::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            let Some(value) = record.get(idx) else {
                continue;
            };
            let value = if header == YEAR_LEVEL_FIELD {
                value.trim()
            } else {
                value
            };
            row.insert(header.clone(), value.to_string());
        }
        rows.push((line, row));
    }

    Ok((headers, rows))
}

/// Runs the full pipeline against `store`.
///
/// Returns the normalized batch and the warning list on success — the
/// batch is returned in full even when rows were dropped.
///
/// # Errors
///
/// - [`IngestError::MalformedInput`] when `text` is empty or whitespace;
///   nothing is parsed and the store is never touched.
/// - [`IngestError::Parse`] when the CSV itself is unreadable.
/// - [`IngestError::Storage`] when a field write fails mid-commit;
///   fields and records committed before the failure stay committed.
pub async fn ingest(
    store: &dyn RecordStore,
    text: &str,
    config: &IngestConfig,
) -> IngestResult<IngestReport> {
    if text.trim().is_empty() {
        return Err(IngestError::MalformedInput);
    }

    let (headers, rows) = parse_rows(text, config)?;
    tracing::debug!(headers = ?headers, rows = rows.len(), "parsed CSV upload");
    tracing::debug!(
        year_levels = ?rows
            .iter()
            .map(|(_, row)| row.get(YEAR_LEVEL_FIELD).map(String::as_str))
            .collect::<Vec<_>>(),
        "derived year levels"
    );

    let mut students = Vec::with_capacity(rows.len());
    let mut warnings = Vec::new();
    for (line, row) in &rows {
        if row.get("id").is_none_or(String::is_empty) {
            warnings.push(RowWarning {
                line: *line,
                reason: "missing id".to_string(),
            });
            continue;
        }
        students.push(StudentRecord::from_csv_row(row));
    }

    for student in &students {
        write_record(store, student).await?;
    }

    tracing::debug!(
        committed = students.len(),
        dropped = warnings.len(),
        "CSV batch committed"
    );

    Ok(IngestReport { students, warnings })
}
