// ============================================================================
// framegrab-core/src/processing/mod.rs
// ============================================================================
//
// PROCESSING: Batch Frame Extraction Workflow
//
// This module exposes the batch pipeline in two shapes:
// - `process_batch`: a generic function taking every collaborator by reference
// - `BatchProcessor`: an owned, cloneable bundle of those collaborators that
//   can be moved onto a worker thread by the HTTP layer
//
// AI-ASSISTANT-INFO: Batch processing entry points

pub mod batch;

pub use batch::{
    BatchState, NO_FRAMES_EXTRACTED_MESSAGE, NO_VALID_TIMESTAMPS_MESSAGE, process_batch,
    validate_request,
};

use crate::cancellation::CancellationToken;
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::events::EventDispatcher;
use crate::external::{FileMetadataProvider, ProcessRunner, StdFsMetadataProvider, StdProcessRunner};
use crate::models::{BatchResult, ExtractionRequest};

use std::sync::Arc;

/// Owned collaborators for running batches.
///
/// Cloning is cheap: everything except the configuration is shared.
#[derive(Clone)]
pub struct BatchProcessor {
    config: Arc<CoreConfig>,
    runner: Arc<dyn ProcessRunner>,
    fs: Arc<dyn FileMetadataProvider>,
    events: EventDispatcher,
}

impl BatchProcessor {
    pub fn new(
        config: CoreConfig,
        runner: Arc<dyn ProcessRunner>,
        fs: Arc<dyn FileMetadataProvider>,
        events: EventDispatcher,
    ) -> Self {
        Self {
            config: Arc::new(config),
            runner,
            fs,
            events,
        }
    }

    /// A processor that spawns real ffprobe/ffmpeg processes and logs events.
    pub fn with_system_tools(config: CoreConfig) -> Self {
        Self::new(
            config,
            Arc::new(StdProcessRunner::new()),
            Arc::new(StdFsMetadataProvider),
            EventDispatcher::with_logging(),
        )
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Runs one batch. Blocks until every extraction has finished or the
    /// token is cancelled.
    pub fn process(
        &self,
        request: &ExtractionRequest,
        cancel: &CancellationToken,
    ) -> CoreResult<BatchResult> {
        process_batch(
            self.runner.as_ref(),
            self.fs.as_ref(),
            &self.config,
            &self.events,
            request,
            cancel,
        )
    }
}
