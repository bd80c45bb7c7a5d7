//! # RosterDB Core
//!
//! Record schema and storage seam for the student-records service.
//!
//! Two pieces live here:
//!
//! - [`record`] — the canonical [`StudentRecord`] schema, the CSV
//!   defaulting rules, and the `student:<id>` key layout.
//! - [`store`] — the [`RecordStore`] capability trait (hash-per-key
//!   field storage) plus the in-memory backend.
//!
//! Both the CSV ingestion pipeline and the interactive CRUD handlers
//! write through [`store::write_record`], so every path commits the
//! same nine-field set and `id` can always be re-derived from the key.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod record;
pub mod store;

pub use record::{StudentInput, StudentRecord};
pub use store::{FieldMap, MemoryStore, RecordStore, StoreError, StoreResult};
