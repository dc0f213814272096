//! Event handler that forwards batch events to the `log` facade.

use super::{Event, EventHandler};

/// Logs rejected timestamps and failed extractions at warn level; everything
/// else at info/debug.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventHandler;

/// Warn line for a failed extraction; ffmpeg's trimmed stderr is appended so
/// the cause is visible at the default log level.
fn extraction_failure_line(
    batch_id: &str,
    index: usize,
    timestamp: f64,
    reason: &str,
    diagnostics: &str,
) -> String {
    let mut line =
        format!("[{batch_id}] Failed to extract frame {index} at timestamp {timestamp}: {reason}");
    let diagnostics = diagnostics.trim();
    if !diagnostics.is_empty() {
        line.push_str("; FFmpeg output: ");
        line.push_str(diagnostics);
    }
    line
}

impl EventHandler for LogEventHandler {
    fn handle(&self, event: &Event) {
        match event {
            Event::BatchStarted {
                batch_id,
                url,
                requested,
            } => {
                log::info!("[{batch_id}] Extracting {requested} timestamp(s) from {url}");
            }
            Event::DurationProbed { batch_id, duration } => {
                log::debug!("[{batch_id}] Video duration: {duration:.3}s");
            }
            Event::TimestampRejected {
                batch_id,
                timestamp,
                reason,
            } => {
                log::warn!("[{batch_id}] Invalid timestamp {timestamp}: {reason}");
            }
            Event::FrameExtracted {
                batch_id,
                index,
                timestamp,
                path,
            } => {
                log::info!(
                    "[{batch_id}] Frame {index} at {timestamp}s -> {}",
                    path.display()
                );
            }
            Event::FrameExtractionFailed {
                batch_id,
                index,
                timestamp,
                reason,
                diagnostics,
            } => {
                log::warn!(
                    "{}",
                    extraction_failure_line(batch_id, *index, *timestamp, reason, diagnostics)
                );
            }
            Event::BatchFailed { batch_id, error } => {
                log::error!("[{batch_id}] Batch aborted: {error}");
            }
            Event::BatchCancelled {
                batch_id,
                extracted,
                remaining,
            } => {
                log::warn!(
                    "[{batch_id}] Batch cancelled with {extracted} frame(s) extracted, {remaining} skipped"
                );
            }
            Event::BatchCompleted {
                batch_id,
                extracted,
                failed,
                invalid,
                elapsed,
            } => {
                log::info!(
                    "[{batch_id}] Done in {:.2}s: {extracted} extracted, {failed} failed, {invalid} invalid",
                    elapsed.as_secs_f64()
                );
            }
        }
    }
}
