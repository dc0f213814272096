// framegrab-server/src/server/handlers.rs
//
// Request handlers for the frame extraction service.

use super::state::AppState;
use crate::error::AppError;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use framegrab_core::{BatchResult, CancellationToken, ExtractionRequest};
use serde::Deserialize;
use serde_json::{Value, json};

/// JSON body of `POST /image/extract-frames-m3u8`.
#[derive(Debug, Deserialize)]
pub struct ExtractFramesBody {
    pub url: String,
    pub timestamps: Vec<f64>,
    /// Falls back to the configured default format when absent
    #[serde(default)]
    pub output_format: Option<String>,
}

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({ "service": "framegrab", "status": "ok" }))
}

/// `POST /image/extract-frames-m3u8`
///
/// The batch blocks on external processes, so it runs on the blocking pool.
/// If the client disconnects the handler future is dropped, the guard
/// cancels the token, and the batch kills its in-flight process.
pub async fn extract_frames(
    State(state): State<AppState>,
    body: Result<Json<ExtractFramesBody>, JsonRejection>,
) -> Result<Json<BatchResult>, AppError> {
    let Json(body) = body?;
    let output_format = body
        .output_format
        .unwrap_or_else(|| state.processor.config().default_output_format.clone());
    let request = ExtractionRequest::new(body.url, body.timestamps).with_output_format(output_format);

    let cancel = CancellationToken::new();
    let guard = cancel.drop_guard();
    let processor = state.processor.clone();

    let outcome = tokio::task::spawn_blocking(move || processor.process(&request, &cancel))
        .await
        .map_err(|e| AppError::Internal(format!("Extraction worker failed: {e}")))?;
    guard.disarm();

    Ok(Json(outcome?))
}
