// framegrab-server/tests/http_api_tests.rs

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use framegrab_core::config::CoreConfigBuilder;
use framegrab_core::error::CoreError;
use framegrab_core::error::CoreResult;
use framegrab_core::external::mocks::{MockExpectation, MockProcessRunner};
use framegrab_core::external::{CommandSpec, ProcessOutput, RunControl};
use framegrab_core::{BatchProcessor, EventDispatcher, ProcessRunner, StdFsMetadataProvider};
use framegrab_server::server::EXTRACT_FRAMES_PATH;
use framegrab_server::{AppState, router};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tempfile::tempdir;
use tower::util::ServiceExt;

const URL: &str = "https://cdn.example.com/vod/master.m3u8";

fn test_app(runner: &MockProcessRunner, output_dir: &Path, default_format: &str) -> Router {
    let config = CoreConfigBuilder::new()
        .output_dir(output_dir)
        .default_output_format(default_format)
        .build();
    let processor = BatchProcessor::new(
        config,
        Arc::new(runner.clone()),
        Arc::new(StdFsMetadataProvider),
        EventDispatcher::new(),
    );
    router(AppState::new(processor))
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(EXTRACT_FRAMES_PATH)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root_reports_service() {
    let output_dir = tempdir().unwrap();
    let app = test_app(&MockProcessRunner::new(), output_dir.path(), "jpg");

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "service": "framegrab", "status": "ok" }));
}

#[tokio::test]
async fn test_extract_mixed_timestamps() {
    let output_dir = tempdir().unwrap();
    let runner = MockProcessRunner::new();
    runner.add_expectation(MockExpectation::ffprobe_duration(10.0));
    runner.add_expectation(
        MockExpectation::new("ffmpeg")
            .matching("00:00:05.000")
            .writes_output(512),
    );
    let app = test_app(&runner, output_dir.path(), "jpg");

    let (status, body) = post_json(
        app,
        json!({ "url": URL, "timestamps": [-1, 5, 999999] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Successfully extracted 1 frames");
    let frames = body["frames"].as_array().unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0]["requested_timestamp"], 5.0);
    assert_eq!(frames[0]["status"], "success");
    assert!(frames[0]["file_path"].as_str().unwrap().ends_with("_0.jpg"));

    let invalid = body["invalid_timestamps"].as_array().unwrap();
    assert_eq!(invalid.len(), 2);
    assert_eq!(invalid[0]["valid"], false);
    assert_eq!(invalid[0]["reason"], "Timestamp cannot be negative");
    assert_eq!(
        invalid[1]["reason"],
        "Timestamp exceeds video duration of 10.00 seconds"
    );
    assert!(body.get("cancelled").is_none());
}

#[tokio::test]
async fn test_extract_all_invalid_omits_frames() {
    let output_dir = tempdir().unwrap();
    let runner = MockProcessRunner::new();
    runner.add_expectation(MockExpectation::ffprobe_duration(10.0));
    let app = test_app(&runner, output_dir.path(), "jpg");

    let (status, body) = post_json(app, json!({ "url": URL, "timestamps": [-1, 11] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No valid timestamps provided");
    assert!(body.get("frames").is_none());
    assert_eq!(body["invalid_timestamps"].as_array().unwrap().len(), 2);
    assert!(runner.calls_to("ffmpeg").is_empty());
}

#[tokio::test]
async fn test_no_invalid_timestamps_serializes_null() {
    let output_dir = tempdir().unwrap();
    let runner = MockProcessRunner::new();
    runner.add_expectation(MockExpectation::ffprobe_duration(10.0));
    runner.add_expectation(MockExpectation::new("ffmpeg").writes_output(8));
    let app = test_app(&runner, output_dir.path(), "jpg");

    let (status, body) = post_json(app, json!({ "url": URL, "timestamps": [2.5] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["invalid_timestamps"].is_null());
}

#[tokio::test]
async fn test_default_format_comes_from_config() {
    let output_dir = tempdir().unwrap();
    let runner = MockProcessRunner::new();
    runner.add_expectation(MockExpectation::ffprobe_duration(10.0));
    runner.add_expectation(MockExpectation::new("ffmpeg").writes_output(8));
    let app = test_app(&runner, output_dir.path(), "png");

    let (_, body) = post_json(app, json!({ "url": URL, "timestamps": [1] })).await;

    let path = body["frames"][0]["file_path"].as_str().unwrap();
    assert!(path.ends_with(".png"), "unexpected path {path}");
}

#[tokio::test]
async fn test_probe_failure_is_bad_request() {
    let output_dir = tempdir().unwrap();
    let runner = MockProcessRunner::new();
    runner.add_expectation(
        MockExpectation::new("ffprobe")
            .exit_code(1)
            .stderr("Server returned 403 Forbidden (access denied)"),
    );
    let app = test_app(&runner, output_dir.path(), "jpg");

    let (status, body) = post_json(app, json!({ "url": URL, "timestamps": [1] })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Failed to get video duration:"));
    assert!(detail.contains("403 Forbidden"));
}

#[tokio::test]
async fn test_probe_timeout_is_internal_error() {
    let output_dir = tempdir().unwrap();
    let runner = MockProcessRunner::new();
    runner.add_expectation(MockExpectation::new("ffprobe").fails_with(CoreError::CommandTimeout {
        command: "ffprobe".to_string(),
        timeout: Duration::from_secs(60),
        stderr: String::new(),
    }));
    let app = test_app(&runner, output_dir.path(), "jpg");

    let (status, body) = post_json(app, json!({ "url": URL, "timestamps": [1] })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_empty_timestamps_rejected() {
    let output_dir = tempdir().unwrap();
    let runner = MockProcessRunner::new();
    let app = test_app(&runner, output_dir.path(), "jpg");

    let (status, body) = post_json(app, json!({ "url": URL, "timestamps": [] })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("timestamps"));
    assert!(runner.received_calls().is_empty());
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let output_dir = tempdir().unwrap();
    let app = test_app(&MockProcessRunner::new(), output_dir.path(), "jpg");

    let (status, body) = post_json(app, json!({ "timestamps": [1, 2] })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_path_traversal_format_rejected() {
    let output_dir = tempdir().unwrap();
    let runner = MockProcessRunner::new();
    let app = test_app(&runner, output_dir.path(), "jpg");

    let (status, _) = post_json(
        app,
        json!({ "url": URL, "timestamps": [1], "output_format": "../../etc/x" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(runner.received_calls().is_empty());
}

/// Answers ffprobe immediately, then holds every ffmpeg call open until the
/// run is cancelled, recording that it saw the cancellation.
struct StallingRunner {
    saw_cancel: Arc<AtomicBool>,
}

impl ProcessRunner for StallingRunner {
    fn run(&self, spec: &CommandSpec, control: &RunControl) -> CoreResult<ProcessOutput> {
        if spec.program_name() == "ffprobe" {
            return Ok(ProcessOutput {
                exit_code: Some(0),
                stdout: r#"{"format": {"duration": "30.0"}}"#.to_string(),
                stderr: String::new(),
            });
        }

        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if control.cancel.is_cancelled() {
                self.saw_cancel.store(true, Ordering::SeqCst);
                return Err(CoreError::Cancelled);
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        Ok(ProcessOutput {
            exit_code: Some(1),
            stdout: String::new(),
            stderr: "never cancelled".to_string(),
        })
    }
}

#[tokio::test]
async fn test_client_disconnect_cancels_extraction() {
    let output_dir = tempdir().unwrap();
    let saw_cancel = Arc::new(AtomicBool::new(false));
    let config = CoreConfigBuilder::new().output_dir(output_dir.path()).build();
    let processor = BatchProcessor::new(
        config,
        Arc::new(StallingRunner {
            saw_cancel: saw_cancel.clone(),
        }),
        Arc::new(StdFsMetadataProvider),
        EventDispatcher::new(),
    );
    let app = router(AppState::new(processor));

    let request = Request::builder()
        .method("POST")
        .uri(EXTRACT_FRAMES_PATH)
        .header("content-type", "application/json")
        .body(Body::from(json!({ "url": URL, "timestamps": [1, 2] }).to_string()))
        .unwrap();

    // Giving up on the response drops the handler future, like a disconnect
    let response = tokio::time::timeout(Duration::from_millis(200), app.oneshot(request)).await;
    assert!(response.is_err(), "extraction should still be running");

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(saw_cancel.load(Ordering::SeqCst));
}
