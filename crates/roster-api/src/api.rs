//! REST API endpoints for student records.
//!
//! Thin pass-through over the record store: the only logic here is
//! required-field validation on create and the CSV pipeline call on
//! upload. Every handler converts failures to a status plus JSON
//! `message` at the boundary.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use roster_core::record::{id_from_key, student_key, KEY_PREFIX};
use roster_core::store::write_record;
use roster_core::{RecordStore, StudentInput, StudentRecord};
use roster_ingest::{ingest, IngestConfig, IngestError, RowWarning};

/// Shared store handle injected into every handler.
pub type AppState = Arc<dyn RecordStore>;

/// Multipart field name the upload endpoint reads.
const CSV_FILE_FIELD: &str = "csvFile";

/// Builds the student-records router.
pub fn routes(store: AppState) -> Router {
    Router::new()
        .route("/uploads", post(upload_csv))
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            put(update_student).delete(delete_student),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// Plain `{ message }` body.
#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

/// Body for successful uploads: the full normalized batch plus one
/// warning per dropped row.
#[derive(Debug, Serialize)]
struct UploadResponse {
    message: String,
    students: Vec<StudentRecord>,
    warnings: Vec<RowWarning>,
}

fn message_response(status: StatusCode, msg: impl Into<String>) -> impl IntoResponse {
    (status, Json(MessageResponse { message: msg.into() }))
}

/// `POST /uploads` — CSV bulk import.
///
/// Reads the `csvFile` multipart field as text and runs the ingestion
/// pipeline. Responds 200 with the whole normalized batch even when
/// rows were dropped; 400 when no file (or unreadable CSV) was
/// supplied; 500 when the store fails mid-commit.
async fn upload_csv(State(store): State<AppState>, mut multipart: Multipart) -> impl IntoResponse {
    let mut csv_text = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(CSV_FILE_FIELD) => match field.text().await {
                Ok(text) => csv_text = Some(text),
                Err(e) => {
                    return message_response(
                        StatusCode::BAD_REQUEST,
                        format!("unreadable upload: {e}"),
                    )
                    .into_response();
                }
            },
            Ok(Some(_)) => {} // other fields ignored
            Ok(None) => break,
            Err(e) => {
                return message_response(StatusCode::BAD_REQUEST, e.to_string()).into_response();
            }
        }
    }

    let Some(text) = csv_text else {
        return message_response(StatusCode::BAD_REQUEST, "No file uploaded").into_response();
    };

    match ingest(store.as_ref(), &text, &IngestConfig::default()).await {
        Ok(report) => (
            StatusCode::OK,
            Json(UploadResponse {
                message: "CSV uploaded successfully".to_string(),
                students: report.students,
                warnings: report.warnings,
            }),
        )
            .into_response(),
        Err(e @ (IngestError::MalformedInput | IngestError::Parse(_))) => {
            message_response(StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e @ IngestError::Storage(_)) => {
            tracing::error!(error = %e, "CSV commit failed");
            message_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// `POST /students` — create one record.
///
/// Requires non-empty `id` and `name`; every omitted field is written
/// as the empty string.
async fn create_student(
    State(store): State<AppState>,
    Json(input): Json<StudentInput>,
) -> impl IntoResponse {
    let id = input.id.clone().unwrap_or_default();
    let has_name = input.name.as_ref().is_some_and(|n| !n.is_empty());
    if id.is_empty() || !has_name {
        return message_response(StatusCode::BAD_REQUEST, "ID and Name are required")
            .into_response();
    }

    let record = StudentRecord::from_input(id, input);
    match write_record(store.as_ref(), &record).await {
        Ok(()) => {
            message_response(StatusCode::CREATED, "Student saved successfully").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, id = %record.id, "create failed");
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save student")
                .into_response()
        }
    }
}

/// `GET /students` — list every record, unordered as stored.
///
/// Each element is the stored field map with `id` derived from the
/// key, so records written before a schema change still list whatever
/// subset of fields they have.
async fn list_students(State(store): State<AppState>) -> impl IntoResponse {
    match store.get_all(KEY_PREFIX).await {
        Ok(entries) => {
            let students: Vec<serde_json::Value> = entries
                .into_iter()
                .map(|(key, fields)| {
                    let mut obj = serde_json::Map::with_capacity(fields.len() + 1);
                    for (field, value) in fields {
                        obj.insert(field, serde_json::Value::String(value));
                    }
                    obj.insert(
                        "id".to_string(),
                        serde_json::Value::String(id_from_key(&key).to_string()),
                    );
                    serde_json::Value::Object(obj)
                })
                .collect();
            Json(students).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "list failed");
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch students")
                .into_response()
        }
    }
}

/// `PUT /students/{id}` — full-field overwrite.
///
/// Omitted fields are written as empty strings, not left untouched.
async fn update_student(
    State(store): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<StudentInput>,
) -> impl IntoResponse {
    let record = StudentRecord::from_input(id, input);
    match write_record(store.as_ref(), &record).await {
        Ok(()) => message_response(StatusCode::OK, "Student updated successfully").into_response(),
        Err(e) => {
            tracing::error!(error = %e, id = %record.id, "update failed");
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update student")
                .into_response()
        }
    }
}

/// `DELETE /students/{id}` — remove the record.
///
/// Succeeds whether or not the id existed.
async fn delete_student(State(store): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match store.delete(&student_key(&id)).await {
        Ok(()) => message_response(StatusCode::OK, "Student deleted successfully").into_response(),
        Err(e) => {
            tracing::error!(error = %e, id = %id, "delete failed");
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete student")
                .into_response()
        }
    }
}
