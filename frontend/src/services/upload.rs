//! HTTP service for sending exports to the backend.

use gloo_net::http::Request;
use serde_json::Value;
use web_sys::{File, FormData};

use crate::{AppError, AppResult, ReportResponse};

/// Upload an export and get the processed report back.
pub async fn upload_report(file: File, backend_url: &str) -> AppResult<ReportResponse> {
    let form_data = FormData::new()
        .map_err(|e| AppError::Browser(format!("Failed to create FormData: {:?}", e)))?;

    form_data
        .append_with_blob("file", &file)
        .map_err(|e| AppError::Browser(format!("Failed to append file: {:?}", e)))?;

    let url = format!("{}/api/upload", backend_url);
    let request = Request::post(&url)
        .body(form_data)
        .map_err(|e| AppError::Network(format!("Failed to build request: {}", e)))?;

    let response = request
        .send()
        .await
        .map_err(|e| AppError::Network(format!("HTTP request failed: {}", e)))?;

    if !response.ok() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::Server(server_error_message(status, &body)));
    }

    response
        .json::<ReportResponse>()
        .await
        .map_err(|e| AppError::Network(format!("Failed to parse response: {}", e)))
}

/// Whether the backend answers its health check.
pub async fn check_health(backend_url: &str) -> bool {
    let url = format!("{}/health", backend_url);
    match Request::get(&url).send().await {
        Ok(response) => response.ok(),
        Err(_) => false,
    }
}

/// Pull the `error` field out of an error body, falling back to the raw text.
///
/// The "Processing failed" prefix is dropped; [`AppError::Server`] adds it back.
pub fn server_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .map(|msg| msg.trim_start_matches("Processing failed: ").to_string())
        .unwrap_or_else(|| format!("Server error ({}): {}", status, body))
}
