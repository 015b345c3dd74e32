//! HTTP server for the devreport API.
//!
//! # API Endpoints
//!
//! | Method | Path          | Description                              |
//! |--------|---------------|------------------------------------------|
//! | GET    | `/health`     | Health check                             |
//! | POST   | `/api/upload` | Upload a report file for parsing         |
//! | GET    | `/api/logs`   | SSE stream for real-time parse progress  |
//!
//! Each upload is parsed and rendered independently; a malformed file fails
//! that request with the parser's message and leaves the server untouched.

use axum::{
    extract::Multipart,
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, log_success, log_warning, LOG_BROADCASTER};
use super::types::{error_response, UploadResponse};
use crate::models::OutputFormat;
use crate::parser::parse_report_bytes;
use crate::render::render;

/// Start the HTTP server.
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    // permissive CORS so any local frontend can call the API
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/upload", post(upload_report))
        .route("/api/logs", get(sse_logs))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 devreport server running on http://localhost:{}", port);
    println!("   POST /api/upload - Upload a report file");
    println!("   GET  /api/logs   - SSE log stream");
    println!("   GET  /health     - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "devreport",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /api/upload",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time parse progress.
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

type UploadError = (StatusCode, Json<Value>);

fn bad_request(message: &str) -> UploadError {
    (StatusCode::BAD_REQUEST, Json(error_response(message)))
}

/// Upload endpoint: multipart `file` plus optional `format` field
/// (`json` or `xml`, default `json`).
async fn upload_report(mut multipart: Multipart) -> Result<Json<UploadResponse>, UploadError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut format = OutputFormat::Json;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(|s| s.to_string());
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| bad_request(&format!("Read error: {}", e)))?
                        .to_vec(),
                );
            }
            "format" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(&format!("Read error: {}", e)))?;
                format = OutputFormat::from_name(&text)
                    .ok_or_else(|| bad_request(&format!("Unknown output format: {}", text)))?;
            }
            _ => {}
        }
    }

    let bytes = file_data.ok_or_else(|| bad_request("No file provided"))?;

    log_info(format!(
        "Upload received: {} ({} bytes, {} output)",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len(),
        format,
    ));

    let parsed = parse_report_bytes(&bytes).map_err(|e| {
        log_error(e.to_string());
        bad_request(&e.to_string())
    })?;

    if parsed.encoding != "utf-8" {
        log_warning(format!("Decoded as {}", parsed.encoding));
    }
    log_success(format!(
        "Parsed {} devices for server {}",
        parsed.report.record_count, parsed.report.server_id,
    ));

    let output = render(&parsed.report, format).map_err(|e| {
        log_error(e.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(error_response(&e.to_string())),
        )
    })?;

    Ok(Json(UploadResponse::new(parsed, output, format, file_name)))
}
