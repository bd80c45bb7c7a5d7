//! Record store seam: hash-per-key field storage.
//!
//! The store holds one field map per key. It exposes exactly the four
//! operations the ingestion pipeline and CRUD handlers consume; there
//! are no transactions and no locking across operations. Absence is
//! never an error: [`RecordStore::get_one`] on a missing key returns an
//! empty map and [`RecordStore::delete`] on a missing key is a no-op.
//!
//! The trait assumes a single logical writer stream. Concurrent writers
//! touching the same key are not coordinated; the later write wins per
//! field, not per record.

mod memory;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::record::{student_key, StudentRecord};

pub use memory::MemoryStore;

/// Field name → string value map for one stored record.
pub type FieldMap = HashMap<String, String>;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from record-store operations.
///
/// There is deliberately no `NotFound`: absent records read as empty
/// and deletes of absent keys succeed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached or rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Capability trait for hash-per-key record storage.
///
/// Injected into the ingestion pipeline and the HTTP handlers as
/// `Arc<dyn RecordStore>`; backends own their connection lifecycle.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upserts one field on the hash at `key`, creating the hash if
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend fails.
    async fn set_field(&self, key: &str, field: &str, value: &str) -> StoreResult<()>;

    /// Fetches every record whose key starts with `prefix`.
    ///
    /// Returns `(key, fields)` pairs in no particular order; callers
    /// derive ids from the keys and sort if they care.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend fails.
    async fn get_all(&self, prefix: &str) -> StoreResult<Vec<(String, FieldMap)>>;

    /// Fetches the full field map for one key; empty map if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend fails.
    async fn get_one(&self, key: &str) -> StoreResult<FieldMap>;

    /// Removes the hash at `key`; succeeds whether or not it existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend fails.
    async fn delete(&self, key: &str) -> StoreResult<()>;
}

/// Commits one normalized record, field by field.
///
/// Writes each of the nine fields individually under `student:<id>`,
/// awaiting every write before issuing the next. The fields of one
/// record are not an atomic group: a failure mid-record leaves the
/// already-written fields committed with no rollback. Every write is an
/// overwrite, so a retry of the whole record is safe.
///
/// # Errors
///
/// Returns the first [`StoreError`] a field write produces.
pub async fn write_record(store: &dyn RecordStore, record: &StudentRecord) -> StoreResult<()> {
    let key = student_key(&record.id);
    for (field, value) in record.fields() {
        store.set_field(&key, field, value).await?;
    }
    tracing::debug!(key = %key, "record committed");
    Ok(())
}
