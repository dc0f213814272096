//! Data model for a frame extraction batch.
//!
//! All values are request-scoped: they are created while processing one
//! request and handed back to the caller in a [`BatchResult`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default image container/extension for extracted frames.
pub const DEFAULT_OUTPUT_FORMAT: &str = "jpg";

fn default_output_format() -> String {
    DEFAULT_OUTPUT_FORMAT.to_string()
}

/// A caller's request to extract frames from one media URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Playlist or media URL handed to ffprobe/ffmpeg
    pub url: String,
    /// Requested timestamps in seconds, in caller order
    pub timestamps: Vec<f64>,
    /// Output image format, used as the file extension
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

impl ExtractionRequest {
    pub fn new(url: impl Into<String>, timestamps: Vec<f64>) -> Self {
        Self {
            url: url.into(),
            timestamps,
            output_format: default_output_format(),
        }
    }

    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }
}

/// Classification of one requested timestamp against the probed duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedTimestamp {
    pub timestamp: f64,
    pub valid: bool,
    /// Present iff `valid` is false
    pub reason: Option<String>,
}

impl ValidatedTimestamp {
    pub fn valid(timestamp: f64) -> Self {
        Self {
            timestamp,
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(timestamp: f64, reason: impl Into<String>) -> Self {
        Self {
            timestamp,
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Status of an extracted frame. Only confirmed extractions produce a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStatus {
    Success,
}

/// A still frame that was written to disk and verified non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFrame {
    pub file_path: PathBuf,
    pub requested_timestamp: f64,
    pub status: FrameStatus,
}

/// Why a single extraction did not produce a usable frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// ffmpeg exited unsuccessfully (`None` when killed by a signal)
    NonZeroExit(Option<i32>),
    /// ffmpeg ran but the output file is absent
    MissingOutput,
    /// ffmpeg left a zero-byte file behind
    EmptyOutput,
    /// ffmpeg did not finish within the configured timeout
    TimedOut,
    /// ffmpeg could not be started
    ProcessError(String),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::NonZeroExit(Some(code)) => write!(f, "ffmpeg exited with code {code}"),
            FailureReason::NonZeroExit(None) => write!(f, "ffmpeg was terminated by a signal"),
            FailureReason::MissingOutput => write!(f, "output file was not created"),
            FailureReason::EmptyOutput => write!(f, "output file is empty"),
            FailureReason::TimedOut => write!(f, "extraction timed out"),
            FailureReason::ProcessError(msg) => write!(f, "process error: {msg}"),
        }
    }
}

/// A failed extraction for one timestamp. Non-fatal to the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionFailure {
    pub timestamp: f64,
    pub output_path: PathBuf,
    pub reason: FailureReason,
    /// ffmpeg's stderr, empty when the process never ran
    pub diagnostics: String,
}

/// Aggregate result of one batch, returned to the caller.
///
/// `frames` is `None` when no extraction was attempted because no timestamp
/// was valid; it is `Some` (possibly empty) otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<ExtractedFrame>>,
    pub message: String,
    pub invalid_timestamps: Option<Vec<ValidatedTimestamp>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

impl BatchResult {
    /// The frames produced by this batch, empty if none were attempted.
    pub fn frames(&self) -> &[ExtractedFrame] {
        self.frames.as_deref().unwrap_or(&[])
    }
}
