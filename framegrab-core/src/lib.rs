//! Core library for extracting still frames from streaming video using ffmpeg and ffprobe.
//!
//! This crate probes a remote playlist or media URL for its duration, validates
//! the requested timestamps against it, extracts one frame per valid timestamp,
//! and reports a partial-success batch result.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use framegrab_core::{
//!     BatchProcessor, CancellationToken, CoreConfigBuilder, ExtractionRequest,
//! };
//!
//! let config = CoreConfigBuilder::new()
//!     .output_dir("/tmp/frames")
//!     .build();
//! config.validate().unwrap();
//!
//! let processor = BatchProcessor::with_system_tools(config);
//! let request = ExtractionRequest::new(
//!     "https://cdn.example.com/stream/master.m3u8",
//!     vec![5.0, 10.5, 30.0],
//! );
//!
//! let result = processor
//!     .process(&request, &CancellationToken::new())
//!     .unwrap();
//! println!("{}", result.message);
//! for frame in result.frames() {
//!     println!("{} -> {}", frame.requested_timestamp, frame.file_path.display());
//! }
//! ```

pub mod cancellation;
pub mod config;
pub mod error;
pub mod events;
pub mod external;
pub mod file_logging;
pub mod models;
pub mod output_paths;
pub mod processing;
pub mod utils;
pub mod validation;

// Re-exports for public API
pub use cancellation::{CancelOnDrop, CancellationToken};
pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{CoreError, CoreResult, ProbeError};
pub use events::{Event, EventDispatcher, EventHandler, JsonEventHandler, LogEventHandler};
pub use external::{
    FileMetadataProvider, ProcessRunner, StdFsMetadataProvider, StdProcessRunner,
    check_dependency, extract_frame, probe_duration,
};
pub use models::{
    BatchResult, ExtractedFrame, ExtractionFailure, ExtractionRequest, FailureReason, FrameStatus,
    ValidatedTimestamp,
};
pub use output_paths::{BatchId, frame_output_path};
pub use processing::{BatchProcessor, process_batch};
pub use utils::{format_bytes, format_timecode};
pub use validation::validate_timestamps;
