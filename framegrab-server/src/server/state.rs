//! Shared state handed to every HTTP handler.

use framegrab_core::BatchProcessor;

#[derive(Clone)]
pub struct AppState {
    pub processor: BatchProcessor,
}

impl AppState {
    pub fn new(processor: BatchProcessor) -> Self {
        Self { processor }
    }
}
