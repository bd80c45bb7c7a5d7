//! Ingestion error types.

use thiserror::Error;

use roster_core::StoreError;

/// Result alias for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors from the CSV ingestion pipeline.
///
/// Rows dropped by the filter stage are *not* errors; they surface as
/// warnings on the successful report instead.
#[derive(Debug, Error)]
pub enum IngestError {
    /// No upload content was supplied. Raised before any parsing, so no
    /// store interaction has happened.
    #[error("no file content supplied")]
    MalformedInput,

    /// The input could not be read as CSV (bad quoting, invalid UTF-8).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The record store failed during the commit stage. Fields already
    /// committed by earlier records in the batch remain committed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}
