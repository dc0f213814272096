// ============================================================================
// framegrab-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Frame Extraction Pipeline
//
// This module defines the error types returned by the core library. Errors are
// split into two layers:
//
// - ProbeError: the duration of the remote resource could not be determined
//   from the probe tool's output. These are attributable to the input URL.
// - CoreError: everything that can abort a batch, including probe errors,
//   process-level failures (spawn, timeout, cancellation) and I/O.
//
// Per-timestamp extraction failures are NOT errors; they are recorded as
// `ExtractionFailure` values (see models.rs) and the batch continues.
//
// AI-ASSISTANT-INFO: Error types and result alias for framegrab-core

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Failure to discover the duration of a media resource.
///
/// Every variant carries the diagnostic text of the probe tool (or of the
/// parser) so that the caller can see why the resource was rejected.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to get video duration: FFprobe error: {stderr}")]
    ToolFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to get video duration: unparsable ffprobe output: {0}")]
    InvalidOutput(String),

    #[error("Failed to get video duration: duration field missing from ffprobe output")]
    MissingDuration,

    #[error("Failed to get video duration: invalid duration value '{0}'")]
    InvalidDuration(String),
}

/// Errors that abort a whole batch or a library operation.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    /// `stderr` holds whatever the process wrote before it was killed
    #[error("Command '{command}' timed out after {timeout:?}")]
    CommandTimeout {
        command: String,
        timeout: Duration,
        stderr: String,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Returns true when the error is caused by the caller's input rather
    /// than by the service itself.
    ///
    /// Probe errors count as client errors: the probe tool ran, but the URL
    /// it was given did not resolve to a media resource with a duration.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CoreError::Probe(_) | CoreError::InvalidRequest(_))
    }
}

/// Result type for framegrab-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Creates a `CoreError` for a command that could not be spawned, mapping a
/// missing binary to `DependencyNotFound`.
pub fn command_start_error(command: impl Into<String>, err: io::Error) -> CoreError {
    let command = command.into();
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(command)
    } else {
        CoreError::CommandStart(command, err)
    }
}
