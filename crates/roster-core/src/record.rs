//! Canonical student record schema and normalization rules.
//!
//! A record is nine string fields addressed by `student:<id>`. The same
//! struct backs both write paths, with different defaulting rules:
//!
//! | path        | absent/empty field becomes          |
//! |-------------|-------------------------------------|
//! | CSV import  | per-field default ([`StudentRecord::from_csv_row`]) |
//! | interactive | empty string ([`StudentRecord::from_input`])        |
//!
//! `age` stays a string end to end; it is never parsed to a number.
//! `yearLevel` is the one field with a trim rule: the value is
//! whitespace-trimmed before the emptiness check, so `"  2nd Year  "`
//! normalizes to `"2nd Year"` and an all-whitespace value falls back to
//! `"Unknown"`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Key prefix for all student hashes.
pub const KEY_PREFIX: &str = "student:";

/// Stored field name for the year level (camelCase on the wire and in
/// CSV headers, matching the browser client).
pub const YEAR_LEVEL_FIELD: &str = "yearLevel";

/// CSV header names the normalizer recognizes; other columns are ignored.
pub const CSV_FIELDS: [&str; 9] = [
    "id", "name", "email", "age", "phone", "course", "address", YEAR_LEVEL_FIELD, "college",
];

const DEFAULT_NAME: &str = "Unknown";
const DEFAULT_EMAIL: &str = "No Email";
const DEFAULT_AGE: &str = "N/A";
const DEFAULT_PHONE: &str = "No Phone";
const DEFAULT_COURSE: &str = "Unknown";
const DEFAULT_ADDRESS: &str = "No Address";
const DEFAULT_YEAR_LEVEL: &str = "Unknown";
const DEFAULT_COLLEGE: &str = "Unknown";

/// Returns the storage key for a student id.
#[must_use]
pub fn student_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// Derives the student id from a storage key.
///
/// Inverse of [`student_key`]; returns the full key unchanged if the
/// prefix is missing.
#[must_use]
pub fn id_from_key(key: &str) -> &str {
    key.strip_prefix(KEY_PREFIX).unwrap_or(key)
}

/// A fully normalized student record.
///
/// Every field is always present after normalization; "optional" only
/// describes the input, never the committed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique identifier; also the `student:<id>` key suffix.
    pub id: String,
    /// Student name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Age, kept as the literal string from the input.
    pub age: String,
    /// Contact phone number.
    pub phone: String,
    /// Course code, free-form.
    pub course: String,
    /// Mailing address.
    pub address: String,
    /// Year level label, stored trimmed.
    #[serde(rename = "yearLevel")]
    pub year_level: String,
    /// College code, free-form.
    pub college: String,
}

impl StudentRecord {
    /// Normalizes one parsed CSV row into a complete record.
    ///
    /// Applies the per-field CSV defaults; a missing key, `None`, and an
    /// empty string are all treated as absent. The caller must have
    /// filtered out rows without an `id` first.
    #[must_use]
    pub fn from_csv_row(row: &HashMap<String, String>) -> Self {
        let field = |name: &str, default: &str| -> String {
            match row.get(name) {
                Some(v) if !v.is_empty() => v.clone(),
                _ => default.to_string(),
            }
        };
        // Trim-then-check is the one combined rule for yearLevel; the
        // parser also trims this column, so the trim here only matters
        // for rows built without the parser (direct callers, tests).
        let year_level = match row.get(YEAR_LEVEL_FIELD) {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => DEFAULT_YEAR_LEVEL.to_string(),
        };

        Self {
            id: row.get("id").cloned().unwrap_or_default(),
            name: field("name", DEFAULT_NAME),
            email: field("email", DEFAULT_EMAIL),
            age: field("age", DEFAULT_AGE),
            phone: field("phone", DEFAULT_PHONE),
            course: field("course", DEFAULT_COURSE),
            address: field("address", DEFAULT_ADDRESS),
            year_level,
            college: field("college", DEFAULT_COLLEGE),
        }
    }

    /// Builds a record from an interactive create/update body.
    ///
    /// Interactive writes are full-field overwrites: every field omitted
    /// from the input is written as the empty string, not left at its
    /// previous stored value.
    #[must_use]
    pub fn from_input(id: String, input: StudentInput) -> Self {
        Self {
            id,
            name: input.name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            age: input.age.unwrap_or_default(),
            phone: input.phone.unwrap_or_default(),
            course: input.course.unwrap_or_default(),
            address: input.address.unwrap_or_default(),
            year_level: input.year_level.unwrap_or_default(),
            college: input.college.unwrap_or_default(),
        }
    }

    /// Field name/value pairs in commit order, `id` first.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 9] {
        [
            ("id", &self.id),
            ("name", &self.name),
            ("email", &self.email),
            ("age", &self.age),
            ("phone", &self.phone),
            ("course", &self.course),
            ("address", &self.address),
            (YEAR_LEVEL_FIELD, &self.year_level),
            ("college", &self.college),
        ]
    }
}

/// Interactive create/update request body.
///
/// All fields optional at the wire level; required-field policy
/// (non-empty `id` and `name` on create) is enforced at the handler
/// boundary, not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentInput {
    /// Record id (create path only; updates take the id from the URL).
    pub id: Option<String>,
    /// Student name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Age as a string.
    pub age: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Course code.
    pub course: Option<String>,
    /// Mailing address.
    pub address: Option<String>,
    /// Year level label.
    #[serde(rename = "yearLevel")]
    pub year_level: Option<String>,
    /// College code.
    pub college: Option<String>,
}
