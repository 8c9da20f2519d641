//! hotelier REST API server.
//!
//! HTTP shell over the hotelier import pipeline: accepts hotel CSV uploads
//! and serves the published dataset back to the browser client.
//!
//! Run with: `cargo run --bin hotelier-server --features server`
//!
//! Environment variables:
//! - `HOTELIER_PORT` - Port to listen on (default: 8000)
//! - `HOTELIER_HOST` - Host to bind to (default: 0.0.0.0)
//! - `HOTELIER_DATA_DIR` - Directory for hotels_valid.json and hotels.sqlite (default: output)
//! - `HOTELIER_ORIGIN` - Allowed browser origin for CORS (default: http://localhost:3000)

use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tempfile::NamedTempFile;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hotelier::pipeline;
use hotelier::report::ImportReport;
use hotelier::sink::sqlite;

/// Server configuration from environment.
#[derive(Clone)]
struct Config {
    port: u16,
    host: String,
    data_dir: PathBuf,
    origin: String,
}

impl Config {
    fn from_env() -> Self {
        Self {
            port: std::env::var("HOTELIER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            host: std::env::var("HOTELIER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            data_dir: std::env::var("HOTELIER_DATA_DIR")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("output")),
            origin: std::env::var("HOTELIER_ORIGIN")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
        }
    }

    fn database_path(&self) -> PathBuf {
        self.data_dir.join(sqlite::DATABASE_FILE)
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotelier_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    // The browser client sends credentialed requests, so the origin must be
    // explicit; a wildcard would make the browser drop the response.
    let origin: HeaderValue = config.origin.parse().expect("Invalid CORS origin");
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    tracing::info!("data directory: {}", config.data_dir.display());
    tracing::info!("allowed origin: {}", config.origin);

    let shared_config = Arc::new(config);

    let app = Router::new()
        .route("/upload", post(upload).fallback(method_not_allowed))
        .route("/data", get(data).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(shared_config)
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024)) // 50MB max
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("hotelier-server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Ingest an uploaded hotel CSV.
///
/// Accepts multipart form data with:
/// - `csvFile`: The hotel CSV file
///
/// The part is spooled to a temp file, the import pipeline runs, and both
/// sinks are replaced from the same valid set. The temp file is removed
/// whatever the outcome.
async fn upload(State(config): State<Arc<Config>>, mut multipart: Multipart) -> Response {
    let mut csv_file: Option<NamedTempFile> = None;

    // Parse multipart form
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "csvFile" => match field.bytes().await {
                Ok(bytes) => {
                    let mut temp = match NamedTempFile::new() {
                        Ok(t) => t,
                        Err(e) => {
                            return (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                Json(ErrorResponse {
                                    error: format!("Failed to create temp file: {}", e),
                                }),
                            )
                                .into_response();
                        }
                    };
                    if let Err(e) = temp.write_all(&bytes) {
                        return (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(ErrorResponse {
                                error: format!("Failed to write temp file: {}", e),
                            }),
                        )
                            .into_response();
                    }
                    csv_file = Some(temp);
                }
                Err(e) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse {
                            error: format!("Failed to read 'csvFile' upload: {}", e),
                        }),
                    )
                        .into_response();
                }
            },
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let csv_temp = match csv_file {
        Some(f) => f,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing required field: 'csvFile' (CSV file)".to_string(),
                }),
            )
                .into_response();
        }
    };

    if let Err(e) = std::fs::create_dir_all(&config.data_dir) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to create data directory: {}", e),
            }),
        )
            .into_response();
    }

    let report = pipeline::import(csv_temp.path(), &config.data_dir);
    upload_response(&report)
}

/// Map an import report onto the upload wire shape.
fn upload_response(report: &ImportReport) -> Response {
    if let Some(fatal) = report.summary.errors.first() {
        tracing::warn!("csv upload rejected: {}", fatal);
        let body = serde_json::json!({
            "error": fatal,
            "details": &report.summary.errors,
        });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    tracing::info!(
        valid = report.summary.valid_count,
        invalid = report.summary.invalid_count,
        "csv import finished"
    );
    let body = serde_json::json!({
        "message": "CSV file processed and saved.",
        "valid_count": report.summary.valid_count,
        "invalid_count": report.summary.invalid_count,
        "processor_errors": &report.summary.errors,
        "save_results": &report.save_results,
    });
    (StatusCode::OK, Json(body)).into_response()
}

/// Serve the published dataset, ordered by hotel name.
async fn data(State(config): State<Arc<Config>>) -> Response {
    match sqlite::fetch_dataset(&config.database_path()) {
        Ok(hotels) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "data": hotels,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("dataset query failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse { error: "Not Found".to_string() }),
    )
        .into_response()
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse { error: "Method Not Allowed".to_string() }),
    )
        .into_response()
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}
