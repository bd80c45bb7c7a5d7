//! Integration tests: drive the router end to end over the in-memory
//! store, without binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use roster_api::routes;
use roster_core::MemoryStore;

const BOUNDARY: &str = "X-ROSTERDB-TEST-BOUNDARY";

fn app() -> Router {
    routes(Arc::new(MemoryStore::new()))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(field_name: &str, csv: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field_name}\"; filename=\"students.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/uploads")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_list_starts_empty() {
    let app = app();
    let (status, body) = send(&app, json_request("GET", "/students", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_create_then_list() {
    let app = app();
    let (status, _) = send(
        &app,
        json_request("POST", "/students", r#"{"id":"1","name":"Ann","course":"BSIT"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, json_request("GET", "/students", "")).await;
    assert_eq!(status, StatusCode::OK);
    let students = body.as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["id"], "1");
    assert_eq!(students[0]["name"], "Ann");
    assert_eq!(students[0]["course"], "BSIT");
    // Interactive create defaults omitted fields to empty strings.
    assert_eq!(students[0]["email"], "");
    assert_eq!(students[0]["yearLevel"], "");
}

#[tokio::test]
async fn test_create_requires_id_and_name() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request("POST", "/students", r#"{"id":"1"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "ID and Name are required");

    let (status, _) = send(
        &app,
        json_request("POST", "/students", r#"{"name":"Ann"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request("POST", "/students", r#"{"id":"","name":"Ann"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_is_full_overwrite() {
    let app = app();
    send(
        &app,
        json_request(
            "POST",
            "/students",
            r#"{"id":"1","name":"Ann","email":"a@x.io"}"#,
        ),
    )
    .await;

    // PUT without email: the omitted field is written as "", not kept.
    let (status, body) = send(
        &app,
        json_request("PUT", "/students/1", r#"{"name":"Annabel"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student updated successfully");

    let (_, body) = send(&app, json_request("GET", "/students", "")).await;
    let students = body.as_array().unwrap();
    assert_eq!(students[0]["name"], "Annabel");
    assert_eq!(students[0]["email"], "");
}

#[tokio::test]
async fn test_delete_nonexistent_still_succeeds() {
    let app = app();
    let (status, body) = send(&app, json_request("DELETE", "/students/ghost", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student deleted successfully");
}

#[tokio::test]
async fn test_delete_removes_record() {
    let app = app();
    send(
        &app,
        json_request("POST", "/students", r#"{"id":"1","name":"Ann"}"#),
    )
    .await;
    send(&app, json_request("DELETE", "/students/1", "")).await;

    let (_, body) = send(&app, json_request("GET", "/students", "")).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_upload_csv_end_to_end() {
    let app = app();
    let csv = "id,name,course\n1,Ann,\n,Bad,\n2,,BSIT\n";
    let (status, body) = send(&app, multipart_request("csvFile", csv)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "CSV uploaded successfully");
    assert_eq!(body["students"].as_array().unwrap().len(), 2);
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    assert_eq!(body["warnings"][0]["reason"], "missing id");

    let (_, body) = send(&app, json_request("GET", "/students", "")).await;
    let mut students = body.as_array().unwrap().clone();
    students.sort_by_key(|s| s["id"].as_str().unwrap().to_string());
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["name"], "Ann");
    assert_eq!(students[0]["course"], "Unknown");
    assert_eq!(students[1]["name"], "Unknown");
    assert_eq!(students[1]["course"], "BSIT");
    assert_eq!(students[1]["email"], "No Email");
}

#[tokio::test]
async fn test_upload_without_file_field_rejected() {
    let app = app();
    let (status, body) = send(&app, multipart_request("somethingElse", "id\n1\n")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No file uploaded");
}

#[tokio::test]
async fn test_upload_empty_file_rejected() {
    let app = app();
    let (status, _) = send(&app, multipart_request("csvFile", "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reupload_overwrites_records() {
    let app = app();
    send(
        &app,
        multipart_request("csvFile", "id,name,email\n1,Ann,a@x.io\n"),
    )
    .await;
    send(&app, multipart_request("csvFile", "id,name\n1,Annabel\n")).await;

    let (_, body) = send(&app, json_request("GET", "/students", "")).await;
    let students = body.as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["name"], "Annabel");
    assert_eq!(students[0]["email"], "No Email");
}
