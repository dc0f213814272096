// ============================================================================
// framegrab-server/src/error.rs
// ============================================================================
//
// HTTP ERROR MAPPING: CoreError to Status Code and `{"detail": ...}` Body
//
// Errors caused by the caller's input map to 400, everything else to 500.
// Per-timestamp problems never reach this layer; they are part of a normal
// BatchResult.
//
// AI-ASSISTANT-INFO: HTTP error responses for the frame extraction service

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use framegrab_core::CoreError;
use serde_json::json;

/// Error returned by HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// The batch pipeline failed before producing a result
    Core(CoreError),
    /// The request body could not be decoded
    BadBody(String),
    /// The worker running the batch panicked or was aborted
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Core(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Core(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::Core(e) => e.to_string(),
            AppError::BadBody(msg) | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::Core(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();
        if status.is_server_error() {
            log::error!("Request failed: {detail}");
        } else {
            log::warn!("Request rejected: {detail}");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framegrab_core::ProbeError;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        let probe: AppError = CoreError::from(ProbeError::MissingDuration).into();
        assert_eq!(probe.status(), StatusCode::BAD_REQUEST);

        let invalid: AppError = CoreError::InvalidRequest("url must not be empty".into()).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let timeout: AppError = CoreError::CommandTimeout {
            command: "ffprobe".to_string(),
            timeout: Duration::from_secs(60),
            stderr: String::new(),
        }
        .into();
        assert_eq!(timeout.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let missing: AppError = CoreError::DependencyNotFound("ffprobe".to_string()).into();
        assert_eq!(missing.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_detail_carries_probe_diagnostics() {
        let err: AppError = CoreError::from(ProbeError::ToolFailed {
            exit_code: Some(1),
            stderr: "Connection refused".to_string(),
        })
        .into();
        assert_eq!(
            err.detail(),
            "Failed to get video duration: FFprobe error: Connection refused"
        );
    }
}
