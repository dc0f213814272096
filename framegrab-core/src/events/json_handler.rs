//! JSON event handler for structured event output
//!
//! This module provides an event handler that writes one JSON object per
//! line, for consumption by external tools watching a batch.

use super::{Event, EventHandler};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Event handler that outputs events as JSON lines
pub struct JsonEventHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl Default for JsonEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEventHandler {
    /// Create a new JSON event handler that writes to stderr
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stderr()))
    }

    /// Create a new JSON event handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            if let Ok(json_str) = serde_json::to_string(&value) {
                let _ = writeln!(output, "{}", json_str);
                let _ = output.flush();
            }
        }
    }
}

/// Converts an event to its JSON representation.
pub fn event_to_json(event: &Event, timestamp: u64) -> serde_json::Value {
    match event {
        Event::BatchStarted {
            batch_id,
            url,
            requested,
        } => json!({
            "type": "batch_started",
            "batch_id": batch_id,
            "url": url,
            "requested": requested,
            "timestamp": timestamp
        }),
        Event::DurationProbed { batch_id, duration } => json!({
            "type": "duration_probed",
            "batch_id": batch_id,
            "duration": duration,
            "timestamp": timestamp
        }),
        Event::TimestampRejected {
            batch_id,
            timestamp: requested,
            reason,
        } => json!({
            "type": "timestamp_rejected",
            "batch_id": batch_id,
            "requested_timestamp": requested,
            "reason": reason,
            "timestamp": timestamp
        }),
        Event::FrameExtracted {
            batch_id,
            index,
            timestamp: requested,
            path,
        } => json!({
            "type": "frame_extracted",
            "batch_id": batch_id,
            "index": index,
            "requested_timestamp": requested,
            "file_path": path.to_string_lossy(),
            "timestamp": timestamp
        }),
        Event::FrameExtractionFailed {
            batch_id,
            index,
            timestamp: requested,
            reason,
            diagnostics,
        } => json!({
            "type": "frame_extraction_failed",
            "batch_id": batch_id,
            "index": index,
            "requested_timestamp": requested,
            "reason": reason,
            "diagnostics": diagnostics,
            "timestamp": timestamp
        }),
        Event::BatchFailed { batch_id, error } => json!({
            "type": "batch_failed",
            "batch_id": batch_id,
            "error": error,
            "timestamp": timestamp
        }),
        Event::BatchCancelled {
            batch_id,
            extracted,
            remaining,
        } => json!({
            "type": "batch_cancelled",
            "batch_id": batch_id,
            "extracted": extracted,
            "remaining": remaining,
            "timestamp": timestamp
        }),
        Event::BatchCompleted {
            batch_id,
            extracted,
            failed,
            invalid,
            elapsed,
        } => json!({
            "type": "batch_completed",
            "batch_id": batch_id,
            "extracted": extracted,
            "failed": failed,
            "invalid": invalid,
            "elapsed_seconds": elapsed.as_secs_f64(),
            "timestamp": timestamp
        }),
    }
}

impl EventHandler for JsonEventHandler {
    fn handle(&self, event: &Event) {
        self.write_json(event_to_json(event, Self::get_timestamp()));
    }
}
