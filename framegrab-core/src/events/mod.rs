//! Structured batch events.
//!
//! The orchestrator emits one event per notable step (one per rejected
//! timestamp, one per failed extraction, ...) to a dispatcher that fans them
//! out to registered handlers: the log, a JSON stream, or a test recorder.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub mod json_handler;
pub mod log_handler;

pub use json_handler::JsonEventHandler;
pub use log_handler::LogEventHandler;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    BatchStarted {
        batch_id: String,
        url: String,
        requested: usize,
    },

    DurationProbed {
        batch_id: String,
        duration: f64,
    },

    TimestampRejected {
        batch_id: String,
        timestamp: f64,
        reason: String,
    },

    FrameExtracted {
        batch_id: String,
        index: usize,
        timestamp: f64,
        path: PathBuf,
    },

    FrameExtractionFailed {
        batch_id: String,
        index: usize,
        timestamp: f64,
        reason: String,
        diagnostics: String,
    },

    BatchFailed {
        batch_id: String,
        error: String,
    },

    BatchCancelled {
        batch_id: String,
        extracted: usize,
        remaining: usize,
    },

    BatchCompleted {
        batch_id: String,
        extracted: usize,
        failed: usize,
        invalid: usize,
        elapsed: Duration,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// A dispatcher that forwards everything to the log.
    pub fn with_logging() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.add_handler(Arc::new(LogEventHandler));
        dispatcher
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

/// Test handler that keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingEventHandler {
    events: std::sync::Mutex<Vec<Event>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl EventHandler for RecordingEventHandler {
    fn handle(&self, event: &Event) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_fans_out() {
        let first = Arc::new(RecordingEventHandler::new());
        let second = Arc::new(RecordingEventHandler::new());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_handler(first.clone());
        dispatcher.add_handler(second.clone());

        dispatcher.emit(Event::DurationProbed {
            batch_id: "b".to_string(),
            duration: 10.0,
        });

        assert_eq!(first.events().len(), 1);
        assert_eq!(second.events(), first.events());
    }
}
