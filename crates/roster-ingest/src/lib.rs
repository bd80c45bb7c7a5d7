//! # RosterDB Ingestion
//!
//! CSV bulk-import pipeline: parse raw delimited text, drop rows with
//! no usable `id`, normalize the survivors against the student field
//! schema, and commit each record field-by-field into the record store.
//!
//! The stages run strictly in order and the whole batch is returned to
//! the caller regardless of how many rows were dropped; see
//! [`pipeline::ingest`] for the contract.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod pipeline;

pub use error::{IngestError, IngestResult};
pub use pipeline::{ingest, IngestConfig, IngestReport, RowWarning};
