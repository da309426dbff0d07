//! Tests for the web layer
//!
//! Drives the router directly with `tower::ServiceExt::oneshot`; no
//! listening socket and no network access needed.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use super::{allowed_file, create_router, escape_html};
use crate::card_directory::CardDirectory;
use crate::report_store::ReportStore;
use crate::resolver::CardResolver;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Router backed by a temp report store and a directory with a few known
/// cards. The resolver points at an unroutable API base so an unexpected
/// remote call fails fast instead of hitting the real API.
fn test_router(entries: &[(&str, &str)]) -> (Router, TempDir) {
    let directory = CardDirectory::new();
    for (id, name) in entries {
        directory.remember(id, name);
    }
    let resolver = Arc::new(CardResolver::with_base_url(
        Arc::new(directory),
        "http://127.0.0.1:1",
    ));

    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(ReportStore::new(temp_dir.path()));

    (create_router(resolver, store), temp_dir)
}

/// Build a multipart POST / request with one file field
fn upload_request(field_name: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn get_index_renders_form() {
    let (router, _tmp) = test_router(&[]);

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("name=\"ydk_file\""));
    assert!(!body.contains("class=\"error\""));
}

#[tokio::test]
async fn post_without_deck_field_is_rejected() {
    let (router, _tmp) = test_router(&[]);

    let response = router
        .oneshot(upload_request("something_else", "deck.ydk", b"#main\n"))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("No file uploaded."));
}

#[tokio::test]
async fn post_with_empty_filename_is_rejected() {
    let (router, _tmp) = test_router(&[]);

    let response = router
        .oneshot(upload_request("ydk_file", "", b"#main\n"))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("No file selected."));
}

#[tokio::test]
async fn post_with_wrong_extension_is_rejected() {
    let (router, tmp) = test_router(&[]);

    let response = router
        .oneshot(upload_request("ydk_file", "deck.txt", b"#main\n"))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("Only .ydk files are allowed."));

    // Rejected before any parsing; nothing is written
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn post_oversized_upload_is_rejected() {
    let (router, tmp) = test_router(&[]);

    let big = vec![b'1'; 1024 * 1024 + 1];
    let response = router
        .oneshot(upload_request("ydk_file", "deck.ydk", &big))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_string(response).await;
    assert!(body.contains("File too large. Maximum size is 1MB."));
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn post_valid_deck_returns_report_and_download_link() {
    let (router, tmp) = test_router(&[("4031418", "Dark Magician")]);

    let response = router
        .oneshot(upload_request(
            "ydk_file",
            "my_deck.YDK",
            b"#main\n4031418\n4031418\n#extra\n!side\n",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Dark Magician x2"));
    assert!(body.contains("/download/deck_"));

    // The report landed in the output directory
    let saved: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].starts_with("deck_"));
    assert!(saved[0].ends_with(".txt"));
}

#[tokio::test]
async fn report_text_is_html_escaped() {
    let (router, _tmp) = test_router(&[("111", "\"Infernoble Arms - Durendal\" <&> Friends")]);

    let response = router
        .oneshot(upload_request("ydk_file", "deck.ydk", b"#main\n111\n"))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("&quot;Infernoble Arms - Durendal&quot; &lt;&amp;&gt; Friends"));
}

#[tokio::test]
async fn download_traversal_is_forbidden() {
    let (router, _tmp) = test_router(&[]);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/download/..%2F..%2Fetc%2Fpasswd")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_string(response).await, "Access denied");
}

#[tokio::test]
async fn download_missing_file_is_not_found() {
    let (router, _tmp) = test_router(&[]);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/download/deck_19700101_000000.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "File not found");
}

#[tokio::test]
async fn download_serves_stored_report_as_attachment() {
    let (router, tmp) = test_router(&[]);

    let store = ReportStore::new(tmp.path());
    let filename = store.save("Main Deck:\n  Dark Magician x2").unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .uri(format!("/download/{}", filename))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(&filename));

    assert_eq!(body_string(response).await, "Main Deck:\n  Dark Magician x2");
}

#[test]
fn allowed_file_checks_extension_case_insensitively() {
    assert!(allowed_file("deck.ydk"));
    assert!(allowed_file("DECK.YDK"));
    assert!(allowed_file("my.deck.Ydk"));
    assert!(!allowed_file("deck.txt"));
    assert!(!allowed_file("deck"));
    assert!(!allowed_file("ydk"));
}

#[test]
fn escape_html_covers_special_characters() {
    assert_eq!(
        escape_html(r#"<b>"A & B"</b>"#),
        "&lt;b&gt;&quot;A &amp; B&quot;&lt;/b&gt;"
    );
}
