//! HTTP Server for the RevFlow API.
//!
//! # API Endpoints
//!
//! | Method | Path          | Description                                  |
//! |--------|---------------|----------------------------------------------|
//! | GET    | `/health`     | Health check                                 |
//! | POST   | `/api/upload` | Upload an export, get the report as JSON     |
//! | POST   | `/api/export` | Upload an export, get `cleaned_data.csv`     |
//! | GET    | `/api/logs`   | SSE stream for real-time logs                |

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::logs::{log_error, LOG_BROADCASTER};
use super::types::{error_response, ReportResponse};
use crate::error::{ServerError, ServerResult};
use crate::export::{cleaned_csv_bytes, CLEANED_FILE_NAME};
use crate::transform::pipeline::{process_bytes, ReportOptions, ReportOutcome};

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub options: Arc<ReportOptions>,
}

type ApiError = (StatusCode, Json<Value>);

impl From<ServerError> for (StatusCode, Json<Value>) {
    fn from(err: ServerError) -> Self {
        (err.status_code(), Json(error_response(&err.to_string())))
    }
}

/// Build the API router.
///
/// When `static_dir` is set (a built frontend), it is served for every
/// path the API does not claim.
pub fn router(options: ReportOptions, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let state = AppState {
        options: Arc::new(options),
    };

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api/upload", post(upload_report))
        .route("/api/export", post(export_report))
        .route("/api/logs", get(sse_logs));

    app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.route("/", get(health)),
    };

    app.layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(
    port: u16,
    options: ReportOptions,
    static_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let serving_ui = static_dir.is_some();
    let app = router(options, static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 RevFlow server running on http://localhost:{}", port);
    println!("   POST /api/upload - Upload export, JSON report");
    println!("   POST /api/export - Upload export, cleaned CSV");
    println!("   GET  /api/logs   - SSE log stream");
    println!("   GET  /health     - Health check");
    if serving_ui {
        println!("   GET  /           - Web UI");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "revflow",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /api/upload",
            "export": "POST /api/export",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
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

/// Upload endpoint: full report as JSON
async fn upload_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ReportResponse>, ApiError> {
    let outcome = run_upload(&state, multipart).await?;

    let response = ReportResponse::try_from(outcome).map_err(|e| {
        log_error(format!("Export failed: {}", e));
        ServerError::from(e)
    })?;

    Ok(Json(response))
}

/// Export endpoint: cleaned CSV as an attachment
async fn export_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = run_upload(&state, multipart).await?;

    let bytes = cleaned_csv_bytes(&outcome.rows).map_err(ServerError::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CLEANED_FILE_NAME),
            ),
        ],
        bytes,
    ))
}

/// Read the `file` field and run the pipeline on it.
async fn run_upload(state: &AppState, mut multipart: Multipart) -> ServerResult<ReportOutcome> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?
                    .to_vec(),
            );
        }
    }

    let bytes = file_data.ok_or_else(|| ServerError::BadRequest("No file provided".to_string()))?;

    println!("\n{}", "=".repeat(70));
    println!(
        "📄 NEW UPLOAD: {} ({} bytes)",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len()
    );
    println!("{}\n", "=".repeat(70));

    process_bytes(&bytes, &state.options).map_err(|e| {
        log_error(format!("Processing failed: {}", e));
        ServerError::from(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::response::Response;
    use tower::ServiceExt;

    const BOUNDARY: &str = "revflow-test-boundary";

    const EXPORT: &str = "#\n#\n#\n#\n#\n#\n#\n\
Channel,Session,First user,Sessions,Users,Carts,Checkouts,Purchases,Revenue\n\
Paid Search,google / cpc,google / organic,10,9,1,1,1,100\n";

    fn multipart_request(uri: &str, field: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\n\
Content-Disposition: form-data; name=\"{field}\"; filename=\"export.csv\"\r\n\
Content-Type: text/csv\r\n\r\n\
{content}\r\n\
--{b}--\r\n",
            b = BOUNDARY
        );

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn json_body(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(ReportOptions::default(), None);
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_upload_returns_report() {
        let app = router(ReportOptions::default(), None);

        let response = app.oneshot(multipart_request("/api/upload", "file", EXPORT)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["preview"]["rows"].as_array().unwrap().len(), 1);
        assert_eq!(json["channelRevenue"][0]["label"], "google");
    }

    #[tokio::test]
    async fn test_upload_without_file_field_is_bad_request() {
        let app = router(ReportOptions::default(), None);

        let response = app
            .oneshot(multipart_request("/api/upload", "attachment", EXPORT))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["status"], "error");
        assert!(json["error"].as_str().unwrap().contains("No file provided"));
    }

    #[tokio::test]
    async fn test_unreadable_export_is_unprocessable() {
        let app = router(ReportOptions::default(), None);

        let response = app
            .oneshot(multipart_request("/api/upload", "file", "not a report\n"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_body(response).await;
        assert_eq!(json["status"], "error");
        assert!(json["error"].as_str().unwrap().starts_with("Processing failed: "));
    }

    #[tokio::test]
    async fn test_export_is_csv_attachment() {
        let app = router(ReportOptions::default(), None);

        let response = app.oneshot(multipart_request("/api/export", "file", EXPORT)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"cleaned_data.csv\""
        );

        let bytes = body_bytes(response).await;
        assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.lines().nth(1).unwrap().ends_with(",google,cpc,google,organic,Paid"));
    }
}
