//! Web server for the YDK converter UI
//!
//! Upload form, conversion endpoint and report download. Every failure
//! path returns a rendered page or terse status body; nothing is fatal
//! to the process.

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::card_directory::CardDirectory;
use crate::deck::convert_ydk;
use crate::report_store::{is_safe_filename, ReportStore};
use crate::resolver::CardResolver;

/// Upload size limit (whole request body)
const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Fixed multipart field name for the deck file
const UPLOAD_FIELD: &str = "ydk_file";

const SIZE_LIMIT_MESSAGE: &str = "File too large. Maximum size is 1MB.";
const GENERIC_ERROR_MESSAGE: &str = "Error processing the deck file. Please try again.";

/// Shared application state (card resolver + report store)
#[derive(Clone)]
struct AppState {
    resolver: Arc<CardResolver>,
    store: Arc<ReportStore>,
}

/// Escape text interpolated into HTML pages
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the upload form, optionally with an error banner
fn render_form(error: Option<&str>) -> Html<String> {
    let banner = match error {
        Some(message) => format!(r#"<p class="error">{}</p>"#, escape_html(message)),
        None => String::new(),
    };
    Html(include_str!("../static/index.html").replace("<!--ERROR-->", &banner))
}

/// Render the result page with the report text and download link
fn render_result(report: &str, filename: &str) -> Html<String> {
    Html(
        include_str!("../static/result.html")
            .replace("<!--REPORT-->", &escape_html(report))
            .replace("<!--FILENAME-->", &escape_html(filename)),
    )
}

/// GET / - upload form
async fn index_handler() -> Html<String> {
    render_form(None)
}

/// Check if the uploaded file has a .ydk extension
fn allowed_file(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".ydk")
}

/// Pull the deck file out of the multipart upload.
/// `Err` carries the user-facing message and response status.
async fn read_upload(
    multipart: &mut Multipart,
) -> std::result::Result<(String, axum::body::Bytes), (StatusCode, &'static str)> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err((StatusCode::OK, "No file uploaded.")),
            Err(e) => {
                // The transport body limit surfaces here as 413
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    return Err((StatusCode::PAYLOAD_TOO_LARGE, SIZE_LIMIT_MESSAGE));
                }
                log::warn!("Malformed multipart upload: {}", e);
                return Err((StatusCode::OK, "No file uploaded."));
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    return Err((StatusCode::PAYLOAD_TOO_LARGE, SIZE_LIMIT_MESSAGE));
                }
                log::warn!("Failed to read upload body: {}", e);
                return Err((StatusCode::OK, GENERIC_ERROR_MESSAGE));
            }
        };
        return Ok((filename, bytes));
    }
}

/// POST / - convert an uploaded deck list
async fn upload_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let (filename, bytes) = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err((status, message)) => return (status, render_form(Some(message))).into_response(),
    };

    if filename.is_empty() {
        return render_form(Some("No file selected.")).into_response();
    }
    if !allowed_file(&filename) {
        return render_form(Some("Only .ydk files are allowed.")).into_response();
    }

    let report = match convert_ydk(&bytes, &state.resolver).await {
        Ok(report) => report,
        Err(e) => {
            // Detail stays server-side; the user gets a generic message
            log::error!("Error processing file {}: {}", filename, e);
            return render_form(Some(GENERIC_ERROR_MESSAGE)).into_response();
        }
    };

    let stored = match state.store.save(&report) {
        Ok(stored) => stored,
        Err(e) => {
            log::error!("Failed to save report for {}: {}", filename, e);
            return render_form(Some(GENERIC_ERROR_MESSAGE)).into_response();
        }
    };

    log::info!("Successfully converted deck file: {}", filename);
    render_result(&report, &stored).into_response()
}

/// GET /download/{filename} - serve a stored report as an attachment
async fn download_handler(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    if !is_safe_filename(&filename) {
        log::error!("Invalid filename requested: {}", filename);
        return (StatusCode::FORBIDDEN, "Access denied").into_response();
    }

    let bytes = match state.store.load(&filename) {
        Some(bytes) => bytes,
        None => {
            log::error!("Download file not found: {}", filename);
            return (StatusCode::NOT_FOUND, "File not found").into_response();
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(bytes))
        .unwrap()
}

/// Build the web server router
pub fn create_router(resolver: Arc<CardResolver>, store: Arc<ReportStore>) -> Router {
    let state = AppState { resolver, store };

    Router::new()
        .route("/", get(index_handler).post(upload_handler))
        .route("/download/{filename}", get(download_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Start the web server (async)
///
/// Binds to 0.0.0.0 (all interfaces) to work with Docker port mapping.
/// When running locally, use firewall rules to restrict access.
pub async fn serve(
    directory: Arc<CardDirectory>,
    output_dir: &std::path::Path,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = Arc::new(CardResolver::new(directory));
    let store = Arc::new(ReportStore::new(output_dir));

    let app = create_router(resolver, store);
    let addr = format!("0.0.0.0:{}", port);

    log::info!("YDK converter listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
#[path = "web_tests.rs"]
mod tests;
