// ============================================================================
// framegrab-core/src/processing/batch.rs
// ============================================================================
//
// BATCH ORCHESTRATION: Probe, Validate, Extract, Assemble
//
// This module drives one extraction request from start to finish.
//
// WORKFLOW:
// 1. Probing     - ffprobe the URL once for its duration (fatal on failure)
// 2. Validating  - classify every requested timestamp against the duration
// 3. Extracting  - run ffmpeg once per valid timestamp, strictly in order
// 4. Assembling  - build the BatchResult from successes and rejections
//
// Extractions run one at a time against the same source. Per-timestamp
// failures never abort the batch; a probe failure always does.
//
// AI-ASSISTANT-INFO: Batch frame extraction state machine

// ---- Internal crate imports ----
use crate::cancellation::CancellationToken;
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher};
use crate::external::{FileMetadataProvider, ProcessRunner, extract_frame, probe_duration};
use crate::models::{BatchResult, ExtractionRequest, ValidatedTimestamp};
use crate::output_paths::{BatchId, frame_output_path, validate_output_format};
use crate::validation::validate_timestamps;

// ---- Standard library imports ----
use std::fmt;
use std::time::Instant;

/// Message returned when every requested timestamp was rejected
pub const NO_VALID_TIMESTAMPS_MESSAGE: &str = "No valid timestamps provided";

/// Message returned when valid timestamps existed but nothing was extracted
pub const NO_FRAMES_EXTRACTED_MESSAGE: &str = "Failed to extract any frames";

/// Stages of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Probing,
    Validating,
    Extracting,
    Assembling,
    Done,
    AbortedFatal,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchState::Probing => "probing",
            BatchState::Validating => "validating",
            BatchState::Extracting => "extracting",
            BatchState::Assembling => "assembling",
            BatchState::Done => "done",
            BatchState::AbortedFatal => "aborted",
        };
        f.write_str(name)
    }
}

struct StateTracker<'a> {
    batch_id: &'a str,
    state: BatchState,
}

impl<'a> StateTracker<'a> {
    fn new(batch_id: &'a str) -> Self {
        log::debug!("[{batch_id}] state: {}", BatchState::Probing);
        Self {
            batch_id,
            state: BatchState::Probing,
        }
    }

    fn advance(&mut self, next: BatchState) {
        log::debug!("[{}] state: {} -> {}", self.batch_id, self.state, next);
        self.state = next;
    }
}

/// Rejects requests that cannot be processed regardless of the video.
pub fn validate_request(request: &ExtractionRequest) -> CoreResult<()> {
    if request.url.trim().is_empty() {
        return Err(CoreError::InvalidRequest("url must not be empty".to_string()));
    }
    if request.timestamps.is_empty() {
        return Err(CoreError::InvalidRequest(
            "timestamps must contain at least one item".to_string(),
        ));
    }
    validate_output_format(&request.output_format)
}

/// Processes one extraction request.
///
/// The function is generic over the process runner and file system so the
/// whole pipeline can be exercised with test doubles.
///
/// # Arguments
///
/// * `runner` - Executes ffprobe and ffmpeg
/// * `fs` - Creates the output directory and verifies produced files
/// * `config` - Tool paths, output directory, whitelist and timeouts
/// * `events` - Receives one event per notable step
/// * `request` - The caller's URL, timestamps and output format
/// * `cancel` - Stops the batch when cancelled; the partial result is returned
///
/// # Returns
///
/// * `Ok(BatchResult)` - Also when nothing was extracted (`success == false`)
/// * `Err(CoreError)` - Invalid request, probe failure, or an internal error
pub fn process_batch<R, F>(
    runner: &R,
    fs: &F,
    config: &CoreConfig,
    events: &EventDispatcher,
    request: &ExtractionRequest,
    cancel: &CancellationToken,
) -> CoreResult<BatchResult>
where
    R: ProcessRunner + ?Sized,
    F: FileMetadataProvider + ?Sized,
{
    validate_request(request)?;

    let start_time = Instant::now();
    let batch_id = BatchId::generate();
    let id = batch_id.to_string();
    let mut tracker = StateTracker::new(&id);

    events.emit(Event::BatchStarted {
        batch_id: id.clone(),
        url: request.url.clone(),
        requested: request.timestamps.len(),
    });

    // --- Probing ---
    let duration = match probe_duration(runner, config, &request.url, cancel) {
        Ok(duration) => duration,
        Err(e) => {
            tracker.advance(BatchState::AbortedFatal);
            events.emit(Event::BatchFailed {
                batch_id: id.clone(),
                error: e.to_string(),
            });
            return Err(e);
        }
    };
    events.emit(Event::DurationProbed {
        batch_id: id.clone(),
        duration,
    });

    // --- Validating ---
    tracker.advance(BatchState::Validating);
    let validated = validate_timestamps(&request.timestamps, duration);
    let (valid, invalid): (Vec<ValidatedTimestamp>, Vec<ValidatedTimestamp>) =
        validated.into_iter().partition(|v| v.valid);

    for rejected in &invalid {
        events.emit(Event::TimestampRejected {
            batch_id: id.clone(),
            timestamp: rejected.timestamp,
            reason: rejected.reason.clone().unwrap_or_default(),
        });
    }

    if valid.is_empty() {
        tracker.advance(BatchState::Done);
        events.emit(Event::BatchCompleted {
            batch_id: id.clone(),
            extracted: 0,
            failed: 0,
            invalid: invalid.len(),
            elapsed: start_time.elapsed(),
        });
        return Ok(BatchResult {
            success: false,
            frames: None,
            message: NO_VALID_TIMESTAMPS_MESSAGE.to_string(),
            invalid_timestamps: Some(invalid),
            cancelled: false,
        });
    }

    if let Err(e) = fs.ensure_dir(&config.output_dir) {
        tracker.advance(BatchState::AbortedFatal);
        log::error!(
            "[{id}] Cannot create output directory {}: {e}",
            config.output_dir.display()
        );
        events.emit(Event::BatchFailed {
            batch_id: id.clone(),
            error: e.to_string(),
        });
        return Err(e);
    }

    // --- Extracting ---
    tracker.advance(BatchState::Extracting);
    let mut frames = Vec::with_capacity(valid.len());
    let mut failed = 0usize;
    let mut cancelled = false;

    for (index, entry) in valid.iter().enumerate() {
        if cancel.is_cancelled() {
            cancelled = true;
            break;
        }

        let output_path =
            frame_output_path(&config.output_dir, &batch_id, index, &request.output_format);

        match extract_frame(
            runner,
            fs,
            config,
            &request.url,
            entry.timestamp,
            &output_path,
            cancel,
        ) {
            Ok(Ok(frame)) => {
                events.emit(Event::FrameExtracted {
                    batch_id: id.clone(),
                    index,
                    timestamp: entry.timestamp,
                    path: frame.file_path.clone(),
                });
                frames.push(frame);
            }
            Ok(Err(failure)) => {
                failed += 1;
                events.emit(Event::FrameExtractionFailed {
                    batch_id: id.clone(),
                    index,
                    timestamp: failure.timestamp,
                    reason: failure.reason.to_string(),
                    diagnostics: failure.diagnostics,
                });
            }
            Err(CoreError::Cancelled) => {
                cancelled = true;
                break;
            }
            Err(e) => return Err(e),
        }
    }

    // --- Assembling ---
    tracker.advance(BatchState::Assembling);
    let extracted = frames.len();
    let message = if cancelled {
        events.emit(Event::BatchCancelled {
            batch_id: id.clone(),
            extracted,
            remaining: valid.len() - extracted - failed,
        });
        format!(
            "Extraction cancelled after {} of {} frames",
            extracted,
            valid.len()
        )
    } else if extracted == 0 {
        NO_FRAMES_EXTRACTED_MESSAGE.to_string()
    } else {
        format!("Successfully extracted {extracted} frames")
    };

    let invalid_count = invalid.len();
    let result = BatchResult {
        success: extracted > 0,
        frames: Some(frames),
        message,
        invalid_timestamps: (!invalid.is_empty()).then_some(invalid),
        cancelled,
    };

    tracker.advance(BatchState::Done);
    events.emit(Event::BatchCompleted {
        batch_id: id,
        extracted,
        failed,
        invalid: invalid_count,
        elapsed: start_time.elapsed(),
    });

    Ok(result)
}
