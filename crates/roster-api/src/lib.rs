//! # RosterDB API
//!
//! REST surface for the student-records service.
//!
//! | Method   | Path             | Description                      |
//! |----------|------------------|----------------------------------|
//! | `POST`   | `/uploads`       | CSV bulk import (multipart)      |
//! | `POST`   | `/students`      | Create one record                |
//! | `GET`    | `/students`      | List all records, unordered      |
//! | `PUT`    | `/students/{id}` | Full-field overwrite             |
//! | `DELETE` | `/students/{id}` | Delete (success even if absent)  |
//!
//! Handlers convert every failure into a status plus JSON message at
//! the boundary; nothing is retried and no failure is fatal to the
//! process.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod api;
pub mod config;

pub use api::{routes, AppState};
pub use config::ServerConfig;
